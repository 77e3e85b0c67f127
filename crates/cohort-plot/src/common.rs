//! Shared figure helpers: value extraction, binning, and the kernel density
//! estimate behind the violin plot.

use anyhow::Result;
use polars::prelude::DataFrame;

use cohort_transform::data_utils::column_f64_values;

pub const FIGURE_SIZE: (u32, u32) = (640, 480);

/// Non-missing values of a scale column.
pub fn present_values(df: &DataFrame, code: &str) -> Result<Vec<f64>> {
    Ok(column_f64_values(df, code)?
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .collect())
}

/// Inclusive value range padded by 5% on each side so marks don't sit on the
/// frame. A degenerate range widens to a unit interval.
pub fn padded_range(values: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(*v);
        max = max.max(*v);
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if min == max {
        return (min - 0.5, max + 0.5);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

/// Equal-width histogram bins over `[lo, hi)`, as (bin start, count).
pub fn histogram_bins(values: &[f64], lo: f64, hi: f64, bins: usize) -> Vec<(f64, usize)> {
    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in values {
        let idx = ((v - lo) / width).floor() as isize;
        let idx = idx.clamp(0, bins as isize - 1) as usize;
        counts[idx] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| (lo + idx as f64 * width, count))
        .collect()
}

/// Gaussian kernel density estimate evaluated at `points` positions across
/// the padded value range. Bandwidth is Silverman's rule of thumb, floored
/// to keep degenerate samples drawable.
pub fn kernel_density(values: &[f64], points: usize) -> Vec<(f64, f64)> {
    if values.is_empty() {
        return Vec::new();
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
    let bandwidth = (1.06 * std * n.powf(-0.2)).max(1e-3);

    let (lo, hi) = padded_range(values);
    let step = (hi - lo) / (points.max(2) - 1) as f64;
    (0..points.max(2))
        .map(|idx| {
            let x = lo + idx as f64 * step;
            let density = values
                .iter()
                .map(|v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                / (n * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
            (x, density)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_range_widens_degenerate_samples() {
        assert_eq!(padded_range(&[2.0, 2.0]), (1.5, 2.5));
        assert_eq!(padded_range(&[]), (0.0, 1.0));
    }

    #[test]
    fn bins_cover_every_value_once() {
        let values = [0.0, 0.5, 1.0, 2.0, 3.9, 4.0];
        let bins = histogram_bins(&values, 0.0, 4.0, 4);
        let total: usize = bins.iter().map(|(_, c)| c).sum();
        assert_eq!(total, values.len());
        // The closing edge lands in the last bin.
        assert_eq!(bins[3].1, 2);
    }

    #[test]
    fn density_peaks_near_the_sample_mean() {
        let values = [1.0, 2.0, 2.0, 2.0, 3.0];
        let curve = kernel_density(&values, 41);
        let peak = curve
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(x, _)| *x)
            .unwrap();
        assert!((peak - 2.0).abs() < 0.25);
    }
}
