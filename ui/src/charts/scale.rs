//! Linear and band scales with the tick conventions of the usual web
//! charting recipes (nice 1/2/5 steps, `,.Nf` tick labels).

use crate::core::format::{format_grouped, precision_fixed};

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = 1.4142135623730951; // sqrt(2)

/// `(i1, i2, inc)`: tick indices and signed increment. A negative `inc`
/// means the step is `1 / -inc`, which keeps small steps exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
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

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inv = 10f64.powf(-power) / factor;
        i1 = (start * inv).round();
        i2 = (stop * inv).round();
        if i1 / inv < start {
            i1 += 1.0;
        }
        if i2 / inv > stop {
            i2 -= 1.0;
        }
        inc = -inv;
    } else {
        let step = 10f64.powf(power) * factor;
        i1 = (start / step).round();
        i2 = (stop / step).round();
        if i1 * step < start {
            i1 += 1.0;
        }
        if i2 * step > stop {
            i2 -= 1.0;
        }
        inc = step;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Roughly `count` evenly spaced, human-friendly values covering `[start, stop]`.
pub fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_spec(lo, hi, count);
    if !(i2 >= i1) {
        return Vec::new();
    }

    let n = (i2 - i1 + 1.0) as usize;
    let mut values: Vec<f64> = (0..n)
        .map(|i| {
            let k = i1 + i as f64;
            if inc < 0.0 {
                k / -inc
            } else {
                k * inc
            }
        })
        .collect();
    if reverse {
        values.reverse();
    }
    values
}

/// Distance between adjacent ticks for `ticks(start, stop, count)`.
pub fn tick_step(start: f64, stop: f64, count: f64) -> f64 {
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (_, _, inc) = tick_spec(lo, hi, count);
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse {
        -step
    } else {
        step
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a domain value into the range. A degenerate domain maps
    /// everything to the range midpoint.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 || !span.is_finite() {
            return (r0 + r1) / 2.0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }

    pub fn ticks(&self, count: f64) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }

    /// Label formatter matched to the precision of `ticks(count)`.
    pub fn tick_format(&self, count: f64) -> impl Fn(f64) -> String {
        let (d0, d1) = self.domain;
        let precision = if d0 == d1 {
            0
        } else {
            precision_fixed(tick_step(d0, d1, count))
        };
        move |value| format_grouped(value, precision)
    }
}

/// Ordinal scale dividing a continuous range into uniform bands.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
    align: f64,
}

impl BandScale {
    /// Duplicate domain entries collapse onto their first occurrence.
    pub fn new<I, S>(domain: I, range: (f64, f64)) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for value in domain {
            let value = value.into();
            if !unique.contains(&value) {
                unique.push(value);
            }
        }
        Self {
            domain: unique,
            range,
            padding_inner: 0.0,
            padding_outer: 0.0,
            align: 0.5,
        }
    }

    /// Set inner and outer padding together.
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding_inner = padding.clamp(0.0, 1.0);
        self.padding_outer = padding.max(0.0);
        self
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn contains(&self, value: &str) -> bool {
        self.domain.iter().any(|d| d == value)
    }

    fn layout(&self) -> (f64, f64, bool) {
        let (r0, r1) = self.range;
        let reverse = r1 < r0;
        let (start, stop) = if reverse { (r1, r0) } else { (r0, r1) };
        let n = self.domain.len() as f64;
        let step = (stop - start) / (n - self.padding_inner + self.padding_outer * 2.0).max(1.0);
        let start = start + (stop - start - step * (n - self.padding_inner)) * self.align;
        (start, step, reverse)
    }

    pub fn step(&self) -> f64 {
        self.layout().1
    }

    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Start of the band for `value`, if it is part of the domain.
    pub fn apply(&self, value: &str) -> Option<f64> {
        let position = self.domain.iter().position(|d| d == value)?;
        let (start, step, reverse) = self.layout();
        let n = self.domain.len();
        let slot = if reverse { n - 1 - position } else { position };
        Some(start + step * slot as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn ticks_pick_nice_steps() {
        assert_eq!(
            ticks(0.0, 50.0, 8.0),
            vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0]
        );
        assert_eq!(ticks(0.0, 1.0, 5.0), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(ticks(0.0, 125.0, 5.0), vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0, 120.0]);
        assert_eq!(ticks(3.0, 3.0, 5.0), vec![3.0]);
    }

    #[test]
    fn tick_format_matches_step_precision() {
        let scale = LinearScale::new((0.0, 50.0), (65.0, 640.0));
        let fine = scale.tick_format(100.0);
        assert_eq!(fine(5.0), "5.0");
        let coarse = scale.tick_format(8.0);
        assert_eq!(coarse(50.0), "50");

        let wide = LinearScale::new((0.0, 2000.0), (0.0, 100.0)).tick_format(8.0);
        assert_eq!(wide(1250.0), "1,250");
    }

    #[test]
    fn linear_maps_endpoints() {
        let scale = LinearScale::new((0.0, 125.0), (350.0, 0.0));
        assert!(close(scale.apply(0.0), 350.0));
        assert!(close(scale.apply(125.0), 0.0));
        assert!(close(scale.apply(62.5), 175.0));
    }

    #[test]
    fn band_layout_with_padding() {
        let scale = BandScale::new(["OTU10", "OTU20"], (30.0, 83.0)).padding(0.1);
        let step = 53.0 / 2.1;
        assert!(close(scale.step(), step));
        assert!(close(scale.bandwidth(), step * 0.9));
        let first = scale.apply("OTU10").unwrap();
        assert!(close(first, 30.0 + (53.0 - step * 1.9) * 0.5));
        assert!(close(scale.apply("OTU20").unwrap(), first + step));
        assert_eq!(scale.apply("OTU99"), None);
    }

    #[test]
    fn band_domain_is_deduplicated_in_first_seen_order() {
        let scale = BandScale::new(["b", "a", "b"], (0.0, 100.0));
        assert_eq!(scale.domain(), ["b", "a"]);
    }
}
