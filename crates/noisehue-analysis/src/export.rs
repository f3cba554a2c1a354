//! Hand-off data for plotting front ends.
//!
//! Nothing here draws. [`PlotData`] carries everything a renderer needs for
//! the two stacked spectrum views (linear-x/log-y and log-log with the fitted
//! line and white/pink/red reference slopes) plus an optional time-domain
//! excerpt. It serializes to JSON, and the spectrum can also be written as CSV.
//!
//! # Example
//!
//! ```rust,ignore
//! use noisehue_analysis::{analyze, AnalysisConfig, export::PlotData};
//!
//! let report = analyze(&series, &AnalysisConfig::default())?;
//! PlotData::from_report(&report, "Noise Spectrum: white.txt")
//!     .with_time_excerpt(&series, 1000)
//!     .write_json("white.json")?;
//! ```

use crate::classify::NoiseLabel;
use crate::fit::PowerLawFit;
use crate::normalize::SampleSeries;
use crate::pipeline::AnalysisReport;
use crate::psd::Spectrum;
use serde::{Deserialize, Serialize};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Points in each reference line.
pub const REFERENCE_POINTS: usize = 100;

/// Lowest frequency of the reference lines in Hz.
pub const REFERENCE_FMIN: f64 = 10.0;

/// Default length of the time-domain excerpt.
pub const DEFAULT_EXCERPT_SAMPLES: usize = 1000;

/// White, pink and red slopes anchored at a common level for visual comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLines {
    /// Log-spaced frequencies from 10 Hz to Nyquist.
    pub frequencies: Vec<f64>,
    /// Flat line at the median measured PSD.
    pub white: Vec<f64>,
    /// `f^-1` from the same anchor.
    pub pink: Vec<f64>,
    /// `f^-2` from the same anchor.
    pub red: Vec<f64>,
}

impl ReferenceLines {
    /// Build reference lines for `spectrum`, or `None` if it has no positive bins.
    pub fn for_spectrum(spectrum: &Spectrum, sample_rate: f64) -> Option<Self> {
        let mut positive: Vec<f64> = spectrum
            .iter()
            .filter(|&(f, p)| f > 0.0 && p > 0.0)
            .map(|(_, p)| p)
            .collect();
        let anchor = median(&mut positive)?;

        let frequencies = log_space(REFERENCE_FMIN, sample_rate / 2.0, REFERENCE_POINTS);
        let f0 = frequencies[0];
        let white = vec![anchor; frequencies.len()];
        let pink = frequencies.iter().map(|&f| anchor * (f / f0).powi(-1)).collect();
        let red = frequencies.iter().map(|&f| anchor * (f / f0).powi(-2)).collect();

        Some(Self {
            frequencies,
            white,
            pink,
            red,
        })
    }
}

/// Leading samples for a time-domain view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeExcerpt {
    /// Sample times in milliseconds.
    pub time_ms: Vec<f64>,
    /// Normalized amplitudes.
    pub amplitude: Vec<f64>,
}

impl TimeExcerpt {
    /// First `num_samples` samples of `series` (fewer if it is shorter).
    pub fn new(series: &SampleSeries, sample_rate: f64, num_samples: usize) -> Self {
        let amplitude: Vec<f64> = series.as_slice().iter().take(num_samples).copied().collect();
        let time_ms = (0..amplitude.len())
            .map(|i| i as f64 / sample_rate * 1000.0)
            .collect();
        Self { time_ms, amplitude }
    }
}

/// Everything a renderer receives for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotData {
    /// Plot title.
    pub title: String,
    /// Sample rate in Hz (sets the linear view's x range to Nyquist).
    pub sample_rate: f64,
    /// PSD bin frequencies.
    pub frequencies: Vec<f64>,
    /// PSD values.
    pub power: Vec<f64>,
    /// Fitted power law, if any.
    pub fit: Option<PowerLawFit>,
    /// Classification.
    pub label: NoiseLabel,
    /// Rendered label, e.g. `"Pink noise (-3 dB/octave, slope = -1.01)"`.
    pub label_text: String,
    /// Reference slopes, present only alongside a fit.
    pub reference: Option<ReferenceLines>,
    /// Time-domain excerpt, if requested.
    pub time_excerpt: Option<TimeExcerpt>,
}

impl PlotData {
    /// Assemble plot data from a finished report.
    pub fn from_report(report: &AnalysisReport, title: impl Into<String>) -> Self {
        let sample_rate = report.config.sample_rate;
        let reference = report
            .fit
            .as_ref()
            .and_then(|_| ReferenceLines::for_spectrum(&report.spectrum, sample_rate));

        Self {
            title: title.into(),
            sample_rate,
            frequencies: report.spectrum.frequencies.clone(),
            power: report.spectrum.power.clone(),
            fit: report.fit.clone(),
            label: report.label,
            label_text: report.label.to_string(),
            reference,
            time_excerpt: None,
        }
    }

    /// Attach the first `num_samples` of `series` as a time-domain excerpt.
    pub fn with_time_excerpt(mut self, series: &SampleSeries, num_samples: usize) -> Self {
        self.time_excerpt = Some(TimeExcerpt::new(series, self.sample_rate, num_samples));
        self
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty-printed JSON to `path`.
    pub fn write_json(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let mut writer = BufWriter::new(std::fs::File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()
    }

    /// Write the spectrum and fit as CSV to `path`.
    ///
    /// Columns: `frequency_hz,power,fit_power`. `fit_power` is empty outside
    /// the fitted band.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let mut writer = BufWriter::new(std::fs::File::create(path)?);
        writeln!(writer, "# {}", self.title)?;
        writeln!(writer, "# {}", self.label_text)?;
        writeln!(writer, "frequency_hz,power,fit_power")?;

        let empty: &[f64] = &[];
        let (fit_freqs, fit_power) = self.fit.as_ref().map_or((empty, empty), |fit| {
            (fit.frequencies.as_slice(), fit.power.as_slice())
        });
        let mut fit_iter = fit_freqs.iter().zip(fit_power).peekable();

        for (&freq, &power) in self.frequencies.iter().zip(&self.power) {
            // Fit bins are an ordered subset of the spectrum bins.
            match fit_iter.peek() {
                Some(&(&fit_freq, &fitted)) if fit_freq == freq => {
                    writeln!(writer, "{:.6},{:.6e},{:.6e}", freq, power, fitted)?;
                    fit_iter.next();
                }
                _ => writeln!(writer, "{:.6},{:.6e},", freq, power)?,
            }
        }

        writer.flush()
    }
}

/// `n` log-spaced points from `start` to `end` inclusive.
fn log_space(start: f64, end: f64, n: usize) -> Vec<f64> {
    let (a, b) = (start.log10(), end.log10());
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => (0..n)
            .map(|i| 10f64.powf(a + (b - a) * i as f64 / (n - 1) as f64))
            .collect(),
    }
}

/// Median of `values`, sorting in place. `None` if empty.
fn median(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    Some(if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    })
}
