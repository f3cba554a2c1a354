//! Error types for the analysis pipeline.

use thiserror::Error;

/// Fatal input problems: the run cannot produce a spectrum from this data.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    /// No samples were supplied.
    #[error("sample sequence is empty")]
    Empty,

    /// A raw sample lies outside the unsigned 16-bit range.
    #[error("sample {value} at index {index} is out of range [0, {max}]")]
    OutOfRange {
        /// Position of the offending sample.
        index: usize,
        /// The raw value that was rejected.
        value: u32,
        /// Largest accepted raw value.
        max: u32,
    },

    /// A pre-normalized amplitude is not finite or lies outside `[-1, 1]`.
    #[error("amplitude {value} at index {index} is outside [-1, 1]")]
    InvalidAmplitude {
        /// Position of the offending amplitude.
        index: usize,
        /// The rejected value.
        value: f64,
    },

    /// Too few samples to form a single spectral segment.
    #[error("need at least {required} samples to estimate a spectrum, got {actual}")]
    TooShort {
        /// Minimum sample count.
        required: usize,
        /// Sample count supplied.
        actual: usize,
    },

    /// Sample rate is zero, negative, or not finite.
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(f64),
}

/// Convenience result type for analysis operations.
pub type Result<T> = std::result::Result<T, InputError>;
