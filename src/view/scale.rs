/// Continuous mapping from a data domain to a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// A collapsed domain maps everything to the middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d1 == d0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / (d1 - d0) * (r1 - r0)
    }

}

/// Discrete keys spread evenly over a range, ends included. A single key
/// sits in the middle.
#[derive(Debug, Clone, PartialEq)]
pub struct PointScale<K> {
    keys: Vec<K>,
    start: f64,
    step: f64,
}

impl<K: PartialEq> PointScale<K> {
    pub fn new(keys: Vec<K>, range: (f64, f64)) -> Self {
        let (r0, r1) = range;
        let n = keys.len();
        let step = (r1 - r0) / n.saturating_sub(1).max(1) as f64;
        let start = r0 + (r1 - r0 - step * n.saturating_sub(1) as f64) * 0.5;
        Self { keys, start, step }
    }

    pub fn position(&self, key: &K) -> Option<f64> {
        let i = self.keys.iter().position(|k| k == key)?;
        Some(self.start + self.step * i as f64)
    }

    /// Keys paired with their coordinate, in order.
    pub fn ticks(&self) -> impl Iterator<Item = (&K, f64)> {
        self.keys
            .iter()
            .enumerate()
            .map(move |(i, k)| (k, self.start + self.step * i as f64))
    }
}
