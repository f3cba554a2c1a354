//! Configuration for noisehue analysis runs.
//!
//! Settings come from three layers, highest priority first: command-line
//! flags, a TOML config file, and built-in defaults. This crate owns the file
//! layer.
//!
//! # Features
//!
//! - **Config File**: Load and save [`ConfigFile`] as TOML
//! - **Validation**: Reject non-physical rates and frequency bounds
//! - **Paths**: Platform-specific config directory
//!
//! # Example
//!
//! ```rust,no_run
//! use noisehue_config::{ConfigFile, default_config_path};
//!
//! let config = ConfigFile::load(default_config_path()).unwrap();
//! let analysis = config.analysis_config();
//! println!("rate = {} Hz, method = {}", analysis.sample_rate, analysis.method);
//! ```
//!
//! A config file looks like:
//!
//! ```toml
//! [analysis]
//! sample_rate = 48000.0
//! method = "welch"
//! fmin = 20.0
//! fmax = 12000.0
//!
//! [output]
//! excerpt_samples = 1000
//! ```

mod error;
mod file;

/// Platform-specific configuration paths.
pub mod paths;

/// Configuration value validation.
pub mod validation;

pub use error::{ConfigError, FileOp};
pub use file::{ConfigFile, OutputConfig};
pub use paths::{default_config_path, ensure_user_config_dir, user_config_dir};
pub use validation::{ValidationError, ValidationResult, validate_analysis, validate_config};
