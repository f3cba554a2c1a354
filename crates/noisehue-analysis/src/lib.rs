//! Noisehue Analysis - noise color classification from raw samples
//!
//! This crate turns a stream of unsigned 16-bit samples into a noise color:
//!
//! - [`normalize`] - Raw u16 samples to centered amplitudes in `[-1, 1]`
//! - [`fft`] - FFT wrapper and Hann window
//! - [`psd`] - Power spectral density (Welch or direct periodogram)
//! - [`fit`] - Power-law fit of the PSD in log-log space
//! - [`classify`] - Slope to noise color (white, pink, red, blue, violet)
//! - [`stats`] - Time-domain statistics and clipping detection
//! - [`pipeline`] - The whole chain behind one call
//! - [`export`] - Plot hand-off data (JSON/CSV) for external renderers
//! - [`generator`] - Seeded white and red noise sources
//!
//! ## Example Workflow
//!
//! ```rust
//! use noisehue_analysis::{AnalysisConfig, SampleSeries, analyze, generator};
//!
//! let raw = generator::generate(generator::NoiseKind::White, 1 << 15, 44100, 1);
//! let series = SampleSeries::from_u16(&raw).unwrap();
//! let report = analyze(&series, &AnalysisConfig::default()).unwrap();
//! println!("Detected: {}", report.label);
//! ```
//!
//! ## Slope Convention
//!
//! The fitted slope is the exponent in `PSD(f) ∝ f^slope`. White is 0,
//! pink -1, red/brown -2, blue +1, violet +2. Each unit of slope is about
//! 3.01 dB per octave.

pub mod classify;
pub mod error;
pub mod export;
pub mod fft;
pub mod fit;
pub mod generator;
pub mod normalize;
pub mod pipeline;
pub mod psd;
pub mod stats;

// Re-export main types
pub use classify::{NoiseColor, NoiseLabel, classify, db_per_octave};
pub use error::{InputError, Result};
pub use export::{PlotData, ReferenceLines, TimeExcerpt};
pub use fft::{Fft, hann_window};
pub use fit::{FitBand, FitInfeasible, PowerLawFit, fit_power_law, try_fit_power_law};
pub use generator::{NoiseGenerator, NoiseKind, RedNoise, WhiteNoise};
pub use normalize::SampleSeries;
pub use pipeline::{AnalysisConfig, AnalysisReport, analyze, classify_spectrum};
pub use psd::{PsdMethod, Spectrum, estimate_psd, periodogram, welch_psd};
pub use stats::SampleStatistics;
