// ---------------------------------------------------------------------------
// Nice tick steps
// ---------------------------------------------------------------------------

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// Step of roughly `count` "nice" ticks (1, 2 or 5 × 10^k) spanning
/// `[start, stop]`. Negative results encode the reciprocal of a fractional
/// step, which keeps the tick values exact.
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count.max(1) as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -(10f64.powf(-power)) / factor
    }
}

/// Roughly `count` evenly spaced round values inside `[start, stop]`.
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let (lo, hi) = if stop < start { (stop, start) } else { (start, stop) };
    let step = tick_increment(lo, hi, count);
    if step == 0.0 || !step.is_finite() {
        return Vec::new();
    }

    let mut ticks = Vec::new();
    if step > 0.0 {
        let first = (lo / step).ceil() as i64;
        let last = (hi / step).floor() as i64;
        for i in first..=last {
            ticks.push(i as f64 * step);
        }
    } else {
        let inv = -step;
        let first = (lo * inv).ceil() as i64;
        let last = (hi * inv).floor() as i64;
        for i in first..=last {
            ticks.push(i as f64 / inv);
        }
    }
    if stop < start {
        ticks.reverse();
    }
    ticks
}

// ---------------------------------------------------------------------------
// Fixed-threshold histogram bins
// ---------------------------------------------------------------------------

/// One histogram interval `[x0, x1)`; the last bin also includes `x1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub index: usize,
    pub x0: f64,
    pub x1: f64,
    pub upper_closed: bool,
}

impl Bin {
    #[cfg(test)]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.x0 && (value < self.x1 || (self.upper_closed && value <= self.x1))
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn center(&self) -> f64 {
        (self.x0 + self.x1) / 2.0
    }
}

/// Bin layout computed once from the full dataset. Counts for any subset are
/// taken against the same thresholds so bars keep their position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistogramBins {
    bins: Vec<Bin>,
    /// Interior thresholds, ascending; `bins.len() == thresholds.len() + 1`.
    thresholds: Vec<f64>,
}

impl HistogramBins {
    /// Domain `[0, max]` over the finite values, split at nice ticks.
    pub fn from_values<I>(values: I, tick_target: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let max = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))));
        match max {
            Some(max) if max >= 0.0 => Self::from_domain(0.0, max, tick_target),
            _ => Self::default(),
        }
    }

    pub fn from_domain(lo: f64, hi: f64, tick_target: usize) -> Self {
        let thresholds: Vec<f64> = nice_ticks(lo, hi, tick_target)
            .into_iter()
            .filter(|&t| t > lo && t < hi)
            .collect();

        let n = thresholds.len();
        let bins = (0..=n)
            .map(|i| Bin {
                index: i,
                x0: if i == 0 { lo } else { thresholds[i - 1] },
                x1: if i == n { hi } else { thresholds[i] },
                upper_closed: i == n,
            })
            .collect();

        HistogramBins { bins, thresholds }
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn get(&self, index: usize) -> Option<&Bin> {
        self.bins.get(index)
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// `(lo, hi)` covered by all bins.
    pub fn domain(&self) -> Option<(f64, f64)> {
        Some((self.bins.first()?.x0, self.bins.last()?.x1))
    }

    /// Index of the bin holding `value`; `None` outside the domain or for NaN.
    pub fn bin_for(&self, value: f64) -> Option<usize> {
        let (lo, hi) = self.domain()?;
        if !value.is_finite() || value < lo || value > hi {
            return None;
        }
        Some(self.thresholds.partition_point(|&t| t <= value))
    }

    /// Per-bin counts for a subset of values.
    pub fn counts<I>(&self, values: I) -> Vec<usize>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut counts = vec![0usize; self.bins.len()];
        for v in values {
            if let Some(i) = self.bin_for(v) {
                counts[i] += 1;
            }
        }
        counts
    }
}
