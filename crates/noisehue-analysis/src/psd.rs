//! Power spectral density estimation.
//!
//! Two interchangeable strategies, selected by [`PsdMethod`]:
//!
//! - [`PsdMethod::WindowedAverage`] (Welch): Hann-windowed, half-overlapping
//!   segments with the segment mean removed, density-scaled and averaged.
//!   Lower variance, coarser frequency resolution.
//! - [`PsdMethod::DirectTransform`]: one-sided periodogram of the whole series,
//!   `|X_k|^2 / N`. Full resolution, high variance.
//!
//! Both are pure functions of `(samples, sample_rate)`.

use crate::error::{InputError, Result};
use crate::fft::{Fft, bin_frequencies, hann_window};
use crate::normalize::SampleSeries;
use serde::{Deserialize, Serialize};

/// Smallest series either method accepts.
pub const MIN_SAMPLES: usize = 2;

/// Upper bound on the Welch segment length.
pub const MAX_SEGMENT_LEN: usize = 4096;

/// Spectrum estimation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PsdMethod {
    /// Welch's method: averaged periodograms of overlapping windowed segments.
    #[default]
    #[serde(rename = "welch", alias = "windowed-average")]
    WindowedAverage,
    /// Single periodogram of the full series.
    #[serde(rename = "fft", alias = "direct-transform")]
    DirectTransform,
}

impl PsdMethod {
    /// Short name used on the command line and in config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            PsdMethod::WindowedAverage => "welch",
            PsdMethod::DirectTransform => "fft",
        }
    }

    /// Estimate the PSD of `series` with this method.
    pub fn estimate(&self, series: &SampleSeries, sample_rate: f64) -> Result<Spectrum> {
        match self {
            PsdMethod::WindowedAverage => welch_psd(series.as_slice(), sample_rate),
            PsdMethod::DirectTransform => periodogram(series.as_slice(), sample_rate),
        }
    }
}

impl std::fmt::Display for PsdMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PsdMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "welch" | "windowed-average" => Ok(PsdMethod::WindowedAverage),
            "fft" | "direct-transform" => Ok(PsdMethod::DirectTransform),
            other => Err(format!(
                "unknown PSD method '{other}' (expected 'welch' or 'fft')"
            )),
        }
    }
}

/// Frequency bins and their power, index-aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    /// Bin frequencies in Hz, ascending from 0.
    pub frequencies: Vec<f64>,
    /// Power at each bin (non-negative).
    pub power: Vec<f64>,
}

impl Spectrum {
    /// Number of bins.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// True when the spectrum has no bins.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Iterate `(frequency, power)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.frequencies
            .iter()
            .copied()
            .zip(self.power.iter().copied())
    }

    /// Highest bin frequency, or 0 for an empty spectrum.
    pub fn max_frequency(&self) -> f64 {
        self.frequencies.last().copied().unwrap_or(0.0)
    }
}

/// Estimate the PSD of `series` with the given method.
pub fn estimate_psd(series: &SampleSeries, sample_rate: f64, method: PsdMethod) -> Result<Spectrum> {
    method.estimate(series, sample_rate)
}

/// Welch segment length for a series of `len` samples.
///
/// `min(len / 8, 4096)`, never below one.
pub fn welch_segment_len(len: usize) -> usize {
    (len / 8).min(MAX_SEGMENT_LEN).max(1)
}

/// Welch PSD with a Hann window, 50% overlap and density scaling.
///
/// Units are power per Hz. The result has `nperseg / 2 + 1` bins.
pub fn welch_psd(signal: &[f64], sample_rate: f64) -> Result<Spectrum> {
    check_inputs(signal.len(), sample_rate)?;

    let nperseg = welch_segment_len(signal.len());
    let noverlap = nperseg / 2;
    let step = nperseg - noverlap;
    let num_segments = (signal.len() - noverlap) / step;

    let window = hann_window(nperseg);
    let window_power: f64 = window.iter().map(|w| w * w).sum();
    let scale = 1.0 / (sample_rate * window_power);

    let fft = Fft::new(nperseg);
    let num_bins = fft.num_bins();
    let mut accum = vec![0.0; num_bins];
    let mut segment = vec![0.0; nperseg];

    for seg in 0..num_segments {
        let start = seg * step;
        let chunk = &signal[start..start + nperseg];
        let mean = chunk.iter().sum::<f64>() / nperseg as f64;

        for ((dst, &x), &w) in segment.iter_mut().zip(chunk).zip(&window) {
            *dst = (x - mean) * w;
        }

        for (acc, bin) in accum.iter_mut().zip(fft.forward(&segment)) {
            *acc += bin.norm_sqr();
        }
    }

    // One-sided: fold negative frequencies in, except DC and an even-length Nyquist.
    let fold_end = if nperseg % 2 == 0 {
        num_bins - 1
    } else {
        num_bins
    };
    let norm = scale / num_segments as f64;
    let power: Vec<f64> = accum
        .iter()
        .enumerate()
        .map(|(k, &p)| {
            let factor = if k > 0 && k < fold_end { 2.0 } else { 1.0 };
            p * norm * factor
        })
        .collect();

    #[cfg(feature = "tracing")]
    tracing::debug!(
        nperseg,
        noverlap,
        num_segments,
        bins = num_bins,
        "welch psd estimated"
    );

    Ok(Spectrum {
        frequencies: bin_frequencies(nperseg, sample_rate),
        power,
    })
}

/// One-sided periodogram of the whole signal: `|X_k|^2 / N`.
pub fn periodogram(signal: &[f64], sample_rate: f64) -> Result<Spectrum> {
    check_inputs(signal.len(), sample_rate)?;

    let n = signal.len();
    let fft = Fft::new(n);
    let power: Vec<f64> = fft
        .forward(signal)
        .iter()
        .map(|c| c.norm_sqr() / n as f64)
        .collect();

    #[cfg(feature = "tracing")]
    tracing::debug!(n, bins = power.len(), "periodogram estimated");

    Ok(Spectrum {
        frequencies: bin_frequencies(n, sample_rate),
        power,
    })
}

/// Reject a non-physical sample rate.
pub(crate) fn check_sample_rate(sample_rate: f64) -> Result<()> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(())
    } else {
        Err(InputError::InvalidSampleRate(sample_rate))
    }
}

/// Reject a bad rate or a series too short to transform.
fn check_inputs(len: usize, sample_rate: f64) -> Result<()> {
    check_sample_rate(sample_rate)?;
    if len < MIN_SAMPLES {
        return Err(InputError::TooShort {
            required: MIN_SAMPLES,
            actual: len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine(freq: f64, sample_rate: f64, n: usize, amplitude: f64) -> Vec<f64> {
        (0..n)
            .map(|i| amplitude * (2.0 * PI * freq * i as f64 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn segment_len_rules() {
        assert_eq!(welch_segment_len(2), 1);
        assert_eq!(welch_segment_len(80), 10);
        assert_eq!(welch_segment_len(1_000_000), 4096);
    }

    #[test]
    fn welch_shape() {
        let signal = sine(1000.0, 48000.0, 8192, 0.5);
        let spectrum = welch_psd(&signal, 48000.0).unwrap();
        assert_eq!(spectrum.len(), 1024 / 2 + 1);
        assert_eq!(spectrum.frequencies.len(), spectrum.power.len());
        assert_eq!(spectrum.max_frequency(), 24000.0);
    }

    #[test]
    fn welch_peak_at_tone() {
        let signal = sine(3000.0, 48000.0, 65536, 0.5);
        let spectrum = welch_psd(&signal, 48000.0).unwrap();
        let (peak_freq, _) = spectrum
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap();
        assert!((peak_freq - 3000.0).abs() <= 12.0, "peak at {peak_freq}");
    }

    #[test]
    fn welch_density_integrates_to_variance() {
        // Parseval: the integral of a density-scaled PSD is the signal power.
        let amplitude = 0.5;
        let signal = sine(1000.0, 48000.0, 65536, amplitude);
        let spectrum = welch_psd(&signal, 48000.0).unwrap();
        let df = spectrum.frequencies[1] - spectrum.frequencies[0];
        let total: f64 = spectrum.power.iter().sum::<f64>() * df;
        let expected = amplitude * amplitude / 2.0;
        assert!(
            (total - expected).abs() / expected < 0.05,
            "integrated {total}, expected {expected}"
        );
    }

    #[test]
    fn welch_removes_dc_offset() {
        let signal = vec![0.3; 4096];
        let spectrum = welch_psd(&signal, 44100.0).unwrap();
        assert!(spectrum.power.iter().all(|&p| p.abs() < 1e-20));
    }

    #[test]
    fn periodogram_matches_definition() {
        let signal = [1.0, 0.0, -1.0, 0.0];
        let spectrum = periodogram(&signal, 4.0).unwrap();
        assert_eq!(spectrum.frequencies, vec![0.0, 1.0, 2.0]);
        // X = [0, 2, 0]: power = |X|^2 / 4
        assert!(spectrum.power[0].abs() < 1e-12);
        assert!((spectrum.power[1] - 1.0).abs() < 1e-12);
        assert!(spectrum.power[2].abs() < 1e-12);
    }

    #[test]
    fn too_short_is_rejected() {
        for method in [PsdMethod::WindowedAverage, PsdMethod::DirectTransform] {
            let series = SampleSeries::from_raw(&[32768]).unwrap();
            let err = method.estimate(&series, 44100.0).unwrap_err();
            assert_eq!(
                err,
                InputError::TooShort {
                    required: 2,
                    actual: 1
                }
            );
        }
    }

    #[test]
    fn minimum_length_succeeds() {
        let series = SampleSeries::from_raw(&[0, 65535]).unwrap();
        for method in [PsdMethod::WindowedAverage, PsdMethod::DirectTransform] {
            let spectrum = method.estimate(&series, 44100.0).unwrap();
            assert!(!spectrum.is_empty());
            assert!(spectrum.power.iter().all(|&p| p >= 0.0));
        }
    }

    #[test]
    fn invalid_rate_is_rejected() {
        let signal = vec![0.0; 64];
        assert!(matches!(
            welch_psd(&signal, 0.0),
            Err(InputError::InvalidSampleRate(_))
        ));
        assert!(matches!(
            periodogram(&signal, f64::NAN),
            Err(InputError::InvalidSampleRate(_))
        ));
    }

    #[test]
    fn method_parsing() {
        assert_eq!("welch".parse::<PsdMethod>(), Ok(PsdMethod::WindowedAverage));
        assert_eq!(
            "windowed-average".parse::<PsdMethod>(),
            Ok(PsdMethod::WindowedAverage)
        );
        assert_eq!("FFT".parse::<PsdMethod>(), Ok(PsdMethod::DirectTransform));
        assert!("bartlett".parse::<PsdMethod>().is_err());
    }
}
