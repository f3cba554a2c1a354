//! Sample file I/O for noisehue.
//!
//! Input files are plain text with one unsigned 16-bit sample per line:
//!
//! ```text
//! 32768
//! 41021
//! 29877
//! ```
//!
//! - **Reading**: [`read_samples`] parses raw integers; [`load_series`] also
//!   normalizes them into a [`SampleSeries`](noisehue_analysis::SampleSeries)
//! - **Writing**: [`write_samples`] emits the same format
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use noisehue_io::{load_series, write_samples};
//!
//! write_samples("white.txt", &raw)?;
//! let series = load_series("white.txt")?;
//! ```

mod samples;

pub use samples::{load_series, parse_samples, read_samples, write_samples};

/// Error types for sample file operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A line is not an unsigned integer.
    #[error("line {line}: cannot parse '{content}' as an unsigned integer sample")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// Offending line, trimmed.
        content: String,
    },

    /// The file holds no samples.
    #[error("no samples found")]
    Empty,

    /// Samples parsed but are not valid analyzer input.
    #[error("invalid samples: {0}")]
    Input(#[from] noisehue_analysis::InputError),
}

/// Convenience result type for sample file operations.
pub type Result<T> = std::result::Result<T, Error>;
