use crate::error::{TradeError, TradeResult};

/// Tick counts at or above these error ratios snap to 10, 5 or 2 times a power of ten.
const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> TradeResult<Self> {
        validate_span(domain, "linear scale domain")?;
        validate_finite(range, "linear scale range")?;

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Extends the domain to round tick boundaries.
    #[must_use]
    pub fn nice(self, count: usize) -> Self {
        let (domain_start, domain_end) = nice_domain(self.domain_start, self.domain_end, count);
        Self {
            domain_start,
            domain_end,
            ..self
        }
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let normalized = (pixel - self.range_start) / (self.range_end - self.range_start);
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        ticks(self.domain_start, self.domain_end, count)
    }
}

/// Square-root scale used for bubble positions.
///
/// Values map through `sqrt` before linear interpolation, so small traders
/// stay visually separated from the largest ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SqrtScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> TradeResult<Self> {
        validate_span(domain, "sqrt scale domain")?;
        validate_finite(range, "sqrt scale range")?;

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Extends the domain to round tick boundaries (on the untransformed domain).
    #[must_use]
    pub fn nice(self, count: usize) -> Self {
        let (domain_start, domain_end) = nice_domain(self.domain_start, self.domain_end, count);
        Self {
            domain_start,
            domain_end,
            ..self
        }
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let start = signed_sqrt(self.domain_start);
        let end = signed_sqrt(self.domain_end);
        let normalized = (signed_sqrt(value) - start) / (end - start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let start = signed_sqrt(self.domain_start);
        let end = signed_sqrt(self.domain_end);
        let normalized = (pixel - self.range_start) / (self.range_end - self.range_start);
        let root = start + normalized * (end - start);
        root * root.abs()
    }

    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        ticks(self.domain_start, self.domain_end, count)
    }
}

/// Ordinal band scale: evenly spaced bands with inner/outer padding.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale<K> {
    domain: Vec<K>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl<K: PartialEq + Clone> BandScale<K> {
    /// Builds bands over `range` with the same padding applied inside and outside.
    pub fn new(domain: Vec<K>, range: (f64, f64), padding: f64) -> TradeResult<Self> {
        validate_finite(range, "band scale range")?;
        if !padding.is_finite() || !(0.0..=1.0).contains(&padding) {
            return Err(TradeError::InvalidData(
                "band padding must be finite and in [0, 1]".to_owned(),
            ));
        }

        let count = domain.len() as f64;
        let (range_start, range_end) = range;
        let step = (range_end - range_start) / (count - padding + padding * 2.0).max(1.0);
        let start = range_start + (range_end - range_start - step * (count - padding)) * 0.5;

        Ok(Self {
            domain,
            start,
            step,
            bandwidth: step * (1.0 - padding),
        })
    }

    #[must_use]
    pub fn domain(&self) -> &[K] {
        &self.domain
    }

    /// Start offset of the band for `key`, or `None` when `key` is unknown.
    #[must_use]
    pub fn position(&self, key: &K) -> Option<f64> {
        self.domain
            .iter()
            .position(|candidate| candidate == key)
            .map(|index| self.start + self.step * index as f64)
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }
}

/// Tick step for `count` ticks over `[start, stop]`.
///
/// Positive results are the step itself; negative results encode the inverse
/// step (`-1 / step`) to avoid precision loss for sub-unit steps.
#[must_use]
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
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

/// Expands `[start, stop]` outward to multiples of the tick step.
#[must_use]
pub fn nice_domain(start: f64, stop: f64, count: usize) -> (f64, f64) {
    if !start.is_finite() || !stop.is_finite() || start == stop {
        return (start, stop);
    }
    let reversed = stop < start;
    let (mut low, mut high) = if reversed { (stop, start) } else { (start, stop) };
    let mut previous_step = None;

    for _ in 0..10 {
        let step = tick_increment(low, high, count);
        if previous_step == Some(step) {
            break;
        }
        if step > 0.0 {
            low = (low / step).floor() * step;
            high = (high / step).ceil() * step;
        } else if step < 0.0 {
            low = (low * step).ceil() / step;
            high = (high * step).floor() / step;
        } else {
            break;
        }
        previous_step = Some(step);
    }

    if reversed { (high, low) } else { (low, high) }
}

/// Round tick values inside `[start, stop]`.
#[must_use]
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let (low, high) = if stop < start { (stop, start) } else { (start, stop) };
    let step = tick_increment(low, high, count);
    if step == 0.0 || !step.is_finite() {
        return Vec::new();
    }

    let mut values: Vec<f64> = if step > 0.0 {
        let first = (low / step).ceil() as i64;
        let last = (high / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    } else {
        let inverse = -step;
        let first = (low * inverse).ceil() as i64;
        let last = (high * inverse).floor() as i64;
        (first..=last).map(|i| i as f64 / inverse).collect()
    };

    if stop < start {
        values.reverse();
    }
    values
}

fn signed_sqrt(value: f64) -> f64 {
    value.abs().sqrt().copysign(value)
}

fn validate_span(domain: (f64, f64), what: &str) -> TradeResult<()> {
    validate_finite(domain, what)?;
    if domain.0 == domain.1 {
        return Err(TradeError::InvalidData(format!("{what} must be non-zero")));
    }
    Ok(())
}

fn validate_finite(pair: (f64, f64), what: &str) -> TradeResult<()> {
    if !pair.0.is_finite() || !pair.1.is_finite() {
        return Err(TradeError::InvalidData(format!("{what} must be finite")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{nice_domain, tick_increment, ticks};

    #[test]
    fn nice_rounds_outward() {
        assert_eq!(nice_domain(0.0, 8.0, 10), (0.0, 8.0));
        assert_eq!(nice_domain(0.0, 523_000.0, 10), (0.0, 550_000.0));
        assert_eq!(nice_domain(0.0, 0.97, 10), (0.0, 1.0));
    }

    #[test]
    fn tick_increment_encodes_sub_unit_steps_as_negative() {
        assert_eq!(tick_increment(0.0, 10.0, 5), 2.0);
        assert_eq!(tick_increment(0.0, 1.0, 5), -5.0);
    }

    #[test]
    fn ticks_cover_domain() {
        assert_eq!(ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }
}
