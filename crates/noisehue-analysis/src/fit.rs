//! Power-law fitting of a PSD in log-log space.
//!
//! The model is `log10(P) = log10(a) - b * log10(f)`, solved by ordinary
//! least squares over the bins inside `[fmin, fmax]` with positive frequency
//! and power. The reported slope is `-b`, so `P ∝ f^slope`: white is 0,
//! pink -1, red -2, blue +1, violet +2.
//!
//! An infeasible fit (too few usable bins, or a degenerate regression) is an
//! expected outcome for silent or tiny inputs and is returned as `None`, not
//! as an error.

use crate::psd::Spectrum;
use serde::{Deserialize, Serialize};

/// Default lower edge of the fitting band in Hz.
pub const DEFAULT_FMIN: f64 = 20.0;

/// Fewest in-band bins a fit needs.
pub const MIN_FIT_POINTS: usize = 2;

/// Frequency band used for fitting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitBand {
    /// Lower edge in Hz (inclusive).
    pub fmin: f64,
    /// Upper edge in Hz (inclusive).
    pub fmax: f64,
}

impl FitBand {
    /// Band from optional bounds, defaulting to `[20 Hz, sample_rate / 4]`.
    pub fn resolve(fmin: Option<f64>, fmax: Option<f64>, sample_rate: f64) -> Self {
        Self {
            fmin: fmin.unwrap_or(DEFAULT_FMIN),
            fmax: fmax.unwrap_or(sample_rate / 4.0),
        }
    }

    /// Whether a bin participates in the fit.
    #[inline]
    pub fn accepts(&self, freq: f64, power: f64) -> bool {
        freq >= self.fmin && freq <= self.fmax && freq > 0.0 && power > 0.0
    }
}

/// Successful power-law fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerLawFit {
    /// Spectral exponent: `P ∝ f^slope`.
    pub slope: f64,
    /// `log10(a)`, the fitted log-power at 1 Hz.
    pub intercept: f64,
    /// Coefficient of determination of the log-log regression.
    pub r_squared: f64,
    /// Bins the fit was computed over.
    pub frequencies: Vec<f64>,
    /// Fitted power at each of `frequencies`.
    pub power: Vec<f64>,
}

impl PowerLawFit {
    /// Power-per-octave change in dB.
    pub fn db_per_octave(&self) -> f64 {
        crate::classify::db_per_octave(self.slope)
    }

    /// Evaluate the fitted power law at `freq`.
    pub fn evaluate(&self, freq: f64) -> f64 {
        10f64.powf(self.intercept + self.slope * freq.log10())
    }
}

/// Why a fit could not be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitInfeasible {
    /// Fewer than [`MIN_FIT_POINTS`] usable bins in the band.
    TooFewPoints {
        /// Usable bins found.
        found: usize,
    },
    /// Regression was singular or produced non-finite parameters.
    Degenerate,
}

impl std::fmt::Display for FitInfeasible {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitInfeasible::TooFewPoints { found } => write!(
                f,
                "only {found} usable bin(s) in band, need {MIN_FIT_POINTS}"
            ),
            FitInfeasible::Degenerate => f.write_str("log-log regression is degenerate"),
        }
    }
}

/// Fit a power law to `spectrum` over `band`, or `None` if infeasible.
pub fn fit_power_law(spectrum: &Spectrum, band: FitBand) -> Option<PowerLawFit> {
    match try_fit_power_law(spectrum, band) {
        Ok(fit) => Some(fit),
        Err(reason) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(fmin = band.fmin, fmax = band.fmax, %reason, "no power-law fit");
            #[cfg(not(feature = "tracing"))]
            let _ = reason;
            None
        }
    }
}

/// Fit a power law, reporting the reason when no fit is possible.
pub fn try_fit_power_law(spectrum: &Spectrum, band: FitBand) -> Result<PowerLawFit, FitInfeasible> {
    let (frequencies, measured): (Vec<f64>, Vec<f64>) = spectrum
        .iter()
        .filter(|&(f, p)| band.accepts(f, p))
        .unzip();

    if frequencies.len() < MIN_FIT_POINTS {
        return Err(FitInfeasible::TooFewPoints {
            found: frequencies.len(),
        });
    }

    let xs: Vec<f64> = frequencies.iter().map(|f| f.log10()).collect();
    let ys: Vec<f64> = measured.iter().map(|p| p.log10()).collect();
    let (slope, intercept, r_squared) =
        linear_regression(&xs, &ys).ok_or(FitInfeasible::Degenerate)?;

    let power = xs.iter().map(|&x| 10f64.powf(intercept + slope * x)).collect();

    #[cfg(feature = "tracing")]
    tracing::debug!(points = xs.len(), slope, intercept, r_squared, "power-law fit");

    Ok(PowerLawFit {
        slope,
        intercept,
        r_squared,
        frequencies,
        power,
    })
}

/// Ordinary least squares `y = intercept + slope * x`.
///
/// Returns `(slope, intercept, r_squared)`, or `None` when `x` has no spread
/// or the result is not finite.
fn linear_regression(xs: &[f64], ys: &[f64]) -> Option<(f64, f64, f64)> {
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if !sxx.is_finite() || sxx <= f64::EPSILON * n {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    if !slope.is_finite() || !intercept.is_finite() {
        return None;
    }

    // A perfectly flat response is explained exactly by the model.
    let r_squared = if syy > 0.0 {
        ((sxy * sxy) / (sxx * syy)).clamp(0.0, 1.0)
    } else {
        1.0
    };

    Some((slope, intercept, r_squared))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn power_law_spectrum(exponent: f64, scale: f64, num_bins: usize, bin_hz: f64) -> Spectrum {
        let frequencies: Vec<f64> = (0..num_bins).map(|k| k as f64 * bin_hz).collect();
        let power = frequencies
            .iter()
            .map(|&f| if f > 0.0 { scale * f.powf(exponent) } else { 0.0 })
            .collect();
        Spectrum { frequencies, power }
    }

    #[test]
    fn recovers_exact_exponents() {
        for exponent in [-2.0, -1.0, 0.0, 1.0, 2.0] {
            let spectrum = power_law_spectrum(exponent, 3.0e-4, 2049, 10.766);
            let fit = fit_power_law(&spectrum, FitBand::resolve(None, None, 44100.0)).unwrap();
            assert!(
                (fit.slope - exponent).abs() < 1e-9,
                "exponent {exponent}, fitted {}",
                fit.slope
            );
            assert!((fit.intercept - 3.0e-4f64.log10()).abs() < 1e-9);
            if exponent != 0.0 {
                assert!((fit.r_squared - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn fitted_curve_tracks_band() {
        let spectrum = power_law_spectrum(-1.0, 1.0, 1025, 21.5);
        let band = FitBand {
            fmin: 100.0,
            fmax: 1000.0,
        };
        let fit = fit_power_law(&spectrum, band).unwrap();
        assert_eq!(fit.frequencies.len(), fit.power.len());
        assert!(fit.frequencies.iter().all(|&f| (100.0..=1000.0).contains(&f)));
        for (&f, &p) in fit.frequencies.iter().zip(&fit.power) {
            assert!((p - 1.0 / f).abs() / p < 1e-9);
            assert!((fit.evaluate(f) - p).abs() / p < 1e-9);
        }
    }

    #[test]
    fn default_band_is_twenty_hz_to_quarter_rate() {
        let band = FitBand::resolve(None, None, 48000.0);
        assert_eq!(band.fmin, 20.0);
        assert_eq!(band.fmax, 12000.0);

        let custom = FitBand::resolve(Some(50.0), Some(5000.0), 48000.0);
        assert_eq!(custom, FitBand { fmin: 50.0, fmax: 5000.0 });
    }

    #[test]
    fn inverted_band_is_infeasible() {
        let spectrum = power_law_spectrum(0.0, 1.0, 513, 43.0);
        let band = FitBand {
            fmin: 5000.0,
            fmax: 100.0,
        };
        assert_eq!(
            try_fit_power_law(&spectrum, band),
            Err(FitInfeasible::TooFewPoints { found: 0 })
        );
        assert!(fit_power_law(&spectrum, band).is_none());
    }

    #[test]
    fn zero_power_is_infeasible() {
        let spectrum = Spectrum {
            frequencies: (0..100).map(|k| k as f64 * 50.0).collect(),
            power: vec![0.0; 100],
        };
        assert!(fit_power_law(&spectrum, FitBand::resolve(None, None, 10000.0)).is_none());
    }

    #[test]
    fn single_point_is_infeasible() {
        let spectrum = Spectrum {
            frequencies: vec![0.0, 100.0, 200.0],
            power: vec![1.0, 1.0, 0.0],
        };
        assert_eq!(
            try_fit_power_law(&spectrum, FitBand { fmin: 20.0, fmax: 1000.0 }),
            Err(FitInfeasible::TooFewPoints { found: 1 })
        );
    }

    #[test]
    fn nonpositive_power_is_excluded_not_fatal() {
        let mut spectrum = power_law_spectrum(-2.0, 1.0, 513, 43.0);
        spectrum.power[10] = 0.0;
        spectrum.power[11] = -1e-30;
        let fit = fit_power_law(&spectrum, FitBand::resolve(None, None, 44100.0)).unwrap();
        assert!((fit.slope + 2.0).abs() < 1e-9);
        assert!(!fit.frequencies.contains(&(10.0 * 43.0)));
    }

    #[test]
    fn infeasible_display() {
        assert_eq!(
            FitInfeasible::TooFewPoints { found: 1 }.to_string(),
            "only 1 usable bin(s) in band, need 2"
        );
    }
}
