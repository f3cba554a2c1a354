//! Configuration value validation.
//!
//! Checks that a configuration describes a physically meaningful analysis.
//! A band with `fmin > fmax` is not rejected here: it is a legal request that
//! simply yields no fit.
//!
//! # Example
//!
//! ```rust
//! use noisehue_analysis::AnalysisConfig;
//! use noisehue_config::validate_analysis;
//!
//! validate_analysis(&AnalysisConfig::default()).expect("defaults are valid");
//! assert!(validate_analysis(&AnalysisConfig::with_sample_rate(0.0)).is_err());
//! ```

use crate::file::ConfigFile;
use noisehue_analysis::AnalysisConfig;
use thiserror::Error;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Sample rate is not a positive finite number.
    #[error("sample_rate must be a positive finite number, got {0}")]
    SampleRate(f64),

    /// Lower fit bound is negative or not finite.
    #[error("fmin must be a non-negative finite number, got {0}")]
    Fmin(f64),

    /// Upper fit bound is not a positive finite number.
    #[error("fmax must be a positive finite number, got {0}")]
    Fmax(f64),

    /// Time excerpt length is zero.
    #[error("excerpt_samples must be at least 1")]
    ExcerptSamples,

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Collect the individual problems with an analysis config.
fn analysis_problems(config: &AnalysisConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !(config.sample_rate.is_finite() && config.sample_rate > 0.0) {
        errors.push(ValidationError::SampleRate(config.sample_rate));
    }
    if !(config.fmin.is_finite() && config.fmin >= 0.0) {
        errors.push(ValidationError::Fmin(config.fmin));
    }
    if let Some(fmax) = config.fmax
        && !(fmax.is_finite() && fmax > 0.0)
    {
        errors.push(ValidationError::Fmax(fmax));
    }

    errors
}

/// Fold a list of problems into a single result.
fn into_result(mut errors: Vec<ValidationError>) -> ValidationResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

/// Validate an analysis configuration.
pub fn validate_analysis(config: &AnalysisConfig) -> ValidationResult<()> {
    into_result(analysis_problems(config))
}

/// Validate a whole config file.
pub fn validate_config(config: &ConfigFile) -> ValidationResult<()> {
    let mut errors = analysis_problems(&config.analysis);
    if config.output.excerpt_samples == 0 {
        errors.push(ValidationError::ExcerptSamples);
    }
    into_result(errors)
}
