//! End-to-end analysis: statistics, PSD, power-law fit, classification.

use crate::classify::{NoiseLabel, classify};
use crate::error::Result;
use crate::fit::{FitBand, PowerLawFit, fit_power_law};
use crate::normalize::SampleSeries;
use crate::psd::{PsdMethod, Spectrum, check_sample_rate};
use crate::stats::SampleStatistics;
use serde::{Deserialize, Serialize};

/// Default sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: f64 = 44100.0;

/// Parameters for one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Sample rate of the input in Hz.
    pub sample_rate: f64,
    /// PSD estimation strategy.
    pub method: PsdMethod,
    /// Lower edge of the fitting band in Hz.
    pub fmin: f64,
    /// Upper edge of the fitting band in Hz; `None` means `sample_rate / 4`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fmax: Option<f64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            method: PsdMethod::default(),
            fmin: crate::fit::DEFAULT_FMIN,
            fmax: None,
        }
    }
}

impl AnalysisConfig {
    /// Config at the given rate with all other fields defaulted.
    pub fn with_sample_rate(sample_rate: f64) -> Self {
        Self {
            sample_rate,
            ..Self::default()
        }
    }

    /// Set the estimation method.
    pub fn method(mut self, method: PsdMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the fitting band bounds.
    pub fn band(mut self, fmin: f64, fmax: Option<f64>) -> Self {
        self.fmin = fmin;
        self.fmax = fmax;
        self
    }

    /// Concrete fitting band, with `fmax` resolved against the sample rate.
    pub fn fit_band(&self) -> FitBand {
        FitBand::resolve(Some(self.fmin), self.fmax, self.sample_rate)
    }
}

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Configuration the run used.
    pub config: AnalysisConfig,
    /// Band the fit was restricted to.
    pub band: FitBand,
    /// Time-domain statistics.
    pub statistics: SampleStatistics,
    /// PSD estimate.
    pub spectrum: Spectrum,
    /// Power-law fit, absent when infeasible.
    pub fit: Option<PowerLawFit>,
    /// Classification of the fitted slope.
    pub label: NoiseLabel,
}

impl AnalysisReport {
    /// Fitted slope, if a fit exists.
    pub fn slope(&self) -> Option<f64> {
        self.fit.as_ref().map(|fit| fit.slope)
    }
}

/// Fit and classify an already-estimated spectrum.
pub fn classify_spectrum(spectrum: &Spectrum, band: FitBand) -> (Option<PowerLawFit>, NoiseLabel) {
    let fit = fit_power_law(spectrum, band);
    let label = classify(fit.as_ref().map(|f| f.slope));
    (fit, label)
}

/// Run the full pipeline over `series`.
///
/// Fails only on input problems (bad rate, too few samples). An infeasible
/// fit is reported as `fit: None` and [`NoiseLabel::Unknown`].
pub fn analyze(series: &SampleSeries, config: &AnalysisConfig) -> Result<AnalysisReport> {
    check_sample_rate(config.sample_rate)?;

    let statistics = SampleStatistics::compute(series);
    let spectrum = config.method.estimate(series, config.sample_rate)?;
    let band = config.fit_band();
    let (fit, label) = classify_spectrum(&spectrum, band);

    #[cfg(feature = "tracing")]
    tracing::info!(
        samples = series.len(),
        method = %config.method,
        bins = spectrum.len(),
        label = label.name(),
        "analysis complete"
    );

    Ok(AnalysisReport {
        config: *config,
        band,
        statistics,
        spectrum,
        fit,
        label,
    })
}
