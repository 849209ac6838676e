use std::f64::consts::PI;

pub const RETURN_BINS: usize = 50;
pub const DENSITY_POINTS: usize = 200;

/// Equal-width histogram over the range of the values.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub min: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Non-finite values are ignored. A zero-width range is widened by 0.5
    /// on each side so a constant series still lands in a single bin.
    pub fn new(values: &[f64], bins: usize) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() || bins == 0 {
            return Self {
                min: 0.0,
                bin_width: 0.0,
                counts: Vec::new(),
            };
        }

        let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if hi - lo == 0.0 {
            lo -= 0.5;
            hi += 0.5;
        }

        let bin_width = (hi - lo) / bins as f64;
        let mut counts = vec![0; bins];
        for v in finite {
            // The top edge is inclusive for the last bin.
            let idx = (((v - lo) / bin_width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Self {
            min: lo,
            bin_width,
            counts,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn max(&self) -> f64 {
        self.min + self.bin_width * self.counts.len() as f64
    }
}

/// Sample standard deviation (n - 1 denominator).
fn sample_std(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Gaussian kernel density over the data range, scaled by `scale`
/// (`n * bin_width` puts it on the histogram's count axis).
/// Bandwidth follows Scott's rule. Returns nothing for fewer than two
/// values or a constant series.
pub fn density_curve(values: &[f64], points: usize, scale: f64) -> Vec<(f64, f64)> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.len() < 2 || points < 2 {
        return Vec::new();
    }
    let std = sample_std(&finite);
    if std == 0.0 || !std.is_finite() {
        return Vec::new();
    }

    let n = finite.len() as f64;
    let bandwidth = std * n.powf(-0.2);
    let norm = 1.0 / (n * bandwidth * (2.0 * PI).sqrt());

    let lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let step = (hi - lo) / (points - 1) as f64;

    (0..points)
        .map(|i| {
            let x = lo + step * i as f64;
            let density: f64 = finite
                .iter()
                .map(|v| (-0.5 * ((x - v) / bandwidth).powi(2)).exp())
                .sum::<f64>()
                * norm;
            (x, density * scale)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn counts_every_value_once() {
        let values: Vec<f64> = (0..100).map(|i| i as f64 / 100.0).collect();
        let hist = Histogram::new(&values, 10);
        assert_eq!(hist.counts.len(), 10);
        assert_eq!(hist.total(), 100);
        assert!(hist.counts.iter().all(|&c| c == 10));
        assert_relative_eq!(hist.max(), 0.99, epsilon = 1e-12);
    }

    #[test]
    fn max_value_lands_in_last_bin() {
        let hist = Histogram::new(&[0.0, 1.0], 4);
        assert_eq!(hist.counts, vec![1, 0, 0, 1]);
    }

    #[test]
    fn constant_series_widens_range() {
        let hist = Histogram::new(&[0.0, 0.0, 0.0], RETURN_BINS);
        assert_eq!(hist.total(), 3);
        assert_relative_eq!(hist.min, -0.5);
        assert_relative_eq!(hist.max(), 0.5, epsilon = 1e-12);
        assert_eq!(hist.max_count(), 3);
    }

    #[test]
    fn ignores_non_finite_and_empty_input() {
        let hist = Histogram::new(&[f64::NAN, f64::INFINITY], 5);
        assert!(hist.counts.is_empty());
        assert_eq!(hist.total(), 0);
        assert_eq!(hist.max_count(), 0);
    }

    #[test]
    fn density_integrates_to_roughly_scale() {
        let values: Vec<f64> = (0..400).map(|i| i as f64 / 399.0).collect();
        let curve = density_curve(&values, 400, 1.0);
        assert_eq!(curve.len(), 400);
        let area: f64 = curve
            .windows(2)
            .map(|w| (w[1].0 - w[0].0) * (w[0].1 + w[1].1) / 2.0)
            .sum();
        // The curve is cut at the data range, so a little mass sits outside it.
        assert!(area > 0.85 && area < 1.0, "area = {}", area);
    }

    #[test]
    fn density_needs_spread() {
        assert!(density_curve(&[0.0, 0.0, 0.0], 10, 1.0).is_empty());
        assert!(density_curve(&[0.3], 10, 1.0).is_empty());
    }
}
