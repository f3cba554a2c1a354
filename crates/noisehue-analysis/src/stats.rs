//! Descriptive statistics for a sample series.
//!
//! Independent of the spectral pipeline; used for diagnostics only.

use crate::normalize::SampleSeries;
use serde::{Deserialize, Serialize};

/// Samples whose magnitude exceeds this are counted as clipped.
pub const CLIP_THRESHOLD: f64 = 0.999;

/// Compute RMS (Root Mean Square) level of a signal
///
/// Returns RMS value in linear scale (not dB)
pub fn rms(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }

    let sum_sq: f64 = signal.iter().map(|&x| x * x).sum();
    (sum_sq / signal.len() as f64).sqrt()
}

/// Arithmetic mean, 0 for an empty signal.
pub fn mean(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    signal.iter().sum::<f64>() / signal.len() as f64
}

/// Population standard deviation (divides by N).
pub fn std_dev(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    let m = mean(signal);
    let var = signal.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / signal.len() as f64;
    var.sqrt()
}

/// Count samples with `|x| > threshold`.
pub fn count_clipped(signal: &[f64], threshold: f64) -> usize {
    signal.iter().filter(|x| x.abs() > threshold).count()
}

/// Summary statistics for a [`SampleSeries`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleStatistics {
    /// Number of samples.
    pub count: usize,
    /// Arithmetic mean (ideally near 0).
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
    /// Root mean square level.
    pub rms: f64,
    /// Samples beyond [`CLIP_THRESHOLD`].
    pub clipped: usize,
    /// `clipped` as a percentage of `count`.
    pub clipped_percent: f64,
}

impl SampleStatistics {
    /// Compute statistics over a series.
    pub fn compute(series: &SampleSeries) -> Self {
        let signal = series.as_slice();
        let count = signal.len();

        let (min, max) = signal
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });

        let clipped = count_clipped(signal, CLIP_THRESHOLD);

        Self {
            count,
            mean: mean(signal),
            std_dev: std_dev(signal),
            min,
            max,
            rms: rms(signal),
            clipped,
            clipped_percent: 100.0 * clipped as f64 / count as f64,
        }
    }

    /// True if any sample is counted as clipped.
    pub fn has_clipping(&self) -> bool {
        self.clipped > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_zero_series() {
        let series = SampleSeries::from_raw(&[32768; 100]).unwrap();
        let stats = SampleStatistics::compute(&series);
        assert_eq!(stats.count, 100);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.rms, 0.0);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 0.0);
        assert_eq!(stats.clipped, 0);
        assert_eq!(stats.clipped_percent, 0.0);
        assert!(!stats.has_clipping());
    }

    #[test]
    fn square_wave_statistics() {
        let series = SampleSeries::from_amplitudes(vec![0.5, -0.5, 0.5, -0.5]).unwrap();
        let stats = SampleStatistics::compute(&series);
        assert_eq!(stats.mean, 0.0);
        assert!((stats.std_dev - 0.5).abs() < 1e-12);
        assert!((stats.rms - 0.5).abs() < 1e-12);
        assert_eq!(stats.min, -0.5);
        assert_eq!(stats.max, 0.5);
    }

    #[test]
    fn offset_affects_mean_not_std() {
        let series = SampleSeries::from_amplitudes(vec![0.6, 0.4, 0.6, 0.4]).unwrap();
        let stats = SampleStatistics::compute(&series);
        assert!((stats.mean - 0.5).abs() < 1e-12);
        assert!((stats.std_dev - 0.1).abs() < 1e-12);
        assert!(stats.rms > stats.std_dev);
    }

    #[test]
    fn clipping_counts_extremes() {
        // Raw 0 maps to exactly -1.0; raw 65535 to just under +1.0.
        let series = SampleSeries::from_raw(&[0, 0, 65535, 32768]).unwrap();
        let stats = SampleStatistics::compute(&series);
        assert_eq!(stats.clipped, 3);
        assert!((stats.clipped_percent - 75.0).abs() < 1e-12);
        assert!(stats.has_clipping());
    }

    #[test]
    fn helpers_handle_empty() {
        assert_eq!(rms(&[]), 0.0);
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(std_dev(&[]), 0.0);
        assert_eq!(count_clipped(&[], CLIP_THRESHOLD), 0);
    }
}
