use std::path::Path;

use serde::Serialize;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Index drawn with probability proportional to `weights`.
    fn weighted(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        let mut target = self.next_f64() * total;
        for (i, w) in weights.iter().enumerate() {
            if target < *w {
                return i;
            }
            target -= w;
        }
        weights.len() - 1
    }
}

#[derive(Serialize)]
struct Row {
    work_year: u32,
    experience_level: &'static str,
    employment_type: &'static str,
    job_title: &'static str,
    salary: u64,
    salary_currency: &'static str,
    salary_in_usd: u64,
    employee_residence: &'static str,
    remote_ratio: u8,
    company_location: &'static str,
    company_size: &'static str,
}

/// (title, relative frequency, base USD salary)
const TITLES: [(&str, f64, f64); 14] = [
    ("Data Engineer", 26.0, 142_000.0),
    ("Data Scientist", 23.0, 140_000.0),
    ("Data Analyst", 16.0, 108_000.0),
    ("Machine Learning Engineer", 8.0, 155_000.0),
    ("Analytics Engineer", 3.0, 152_000.0),
    ("Data Architect", 3.0, 161_000.0),
    ("Research Scientist", 2.0, 161_000.0),
    ("Applied Scientist", 1.5, 190_000.0),
    ("Data Science Manager", 1.5, 191_000.0),
    ("Research Engineer", 1.0, 163_000.0),
    ("ML Engineer", 1.0, 159_000.0),
    ("Head of Data", 0.5, 183_000.0),
    ("BI Developer", 0.4, 115_000.0),
    ("Data Specialist", 0.3, 96_000.0),
];

/// (code, relative frequency, salary multiplier)
const LEVELS: [(&str, f64, f64); 4] = [
    ("EN", 8.0, 0.6),
    ("MI", 21.0, 0.8),
    ("SE", 67.0, 1.1),
    ("EX", 3.0, 1.4),
];

const REMOTE: [(u8, f64); 3] = [(0, 51.0), (100, 44.0), (50, 5.0)];
const COUNTRIES: [(&str, &str, f64); 5] = [
    ("US", "USD", 1.0),
    ("GB", "GBP", 0.8),
    ("CA", "CAD", 1.35),
    ("ES", "EUR", 0.92),
    ("IN", "INR", 82.0),
];
const COUNTRY_WEIGHTS: [f64; 5] = [80.0, 6.0, 5.0, 5.0, 4.0];
const SIZES: [&str; 3] = ["S", "M", "L"];
const SIZE_WEIGHTS: [f64; 3] = [4.0, 84.0, 12.0];

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = Path::new("data/ds_salaries.csv");
    if let Some(dir) = output_path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let mut writer = csv::Writer::from_path(output_path)?;

    let title_weights: Vec<f64> = TITLES.iter().map(|t| t.1).collect();
    let level_weights: Vec<f64> = LEVELS.iter().map(|l| l.1).collect();
    let remote_weights: Vec<f64> = REMOTE.iter().map(|r| r.1).collect();

    let n_rows = 3755;
    for _ in 0..n_rows {
        let (job_title, _, base) = TITLES[rng.weighted(&title_weights)];
        let (experience_level, _, factor) = LEVELS[rng.weighted(&level_weights)];
        let (remote_ratio, _) = REMOTE[rng.weighted(&remote_weights)];
        let (country, currency, rate) = COUNTRIES[rng.weighted(&COUNTRY_WEIGHTS)];
        let company_size = SIZES[rng.weighted(&SIZE_WEIGHTS)];

        let usd = rng.gauss(base * factor, base * 0.25).max(5_000.0).round();
        writer.serialize(Row {
            work_year: 2020 + rng.weighted(&[1.0, 3.0, 18.0, 50.0]) as u32,
            experience_level,
            employment_type: "FT",
            job_title,
            salary: (usd * rate).round() as u64,
            salary_currency: currency,
            salary_in_usd: usd as u64,
            employee_residence: country,
            remote_ratio,
            company_location: country,
            company_size,
        })?;
    }
    writer.flush()?;

    println!("Wrote {n_rows} records to {}", output_path.display());
    Ok(())
}
