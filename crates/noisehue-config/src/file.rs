//! TOML config file.

use crate::error::{ConfigError, FileOp};
use crate::validation::validate_config;
use noisehue_analysis::AnalysisConfig;
use noisehue_analysis::export::DEFAULT_EXCERPT_SAMPLES;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output-related settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Samples included in the time-domain excerpt.
    pub excerpt_samples: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            excerpt_samples: DEFAULT_EXCERPT_SAMPLES,
        }
    }
}

/// Contents of a noisehue config file.
///
/// Every table and key is optional; missing values take their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// `[analysis]` table.
    pub analysis: AnalysisConfig,
    /// `[output]` table.
    pub output: OutputConfig,
}

impl ConfigFile {
    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io(FileOp::Read, path, e))?;
        Self::from_toml(&content)
    }

    /// Load `path` if given, else the file at `default` if it exists, else defaults.
    ///
    /// An explicitly given path must exist.
    pub fn load_or_default(
        path: Option<&Path>,
        default: impl AsRef<Path>,
    ) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None if default.as_ref().is_file() => Self::load(default),
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: ConfigFile = toml::from_str(toml_str)?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Convert the config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save the config to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::io(FileOp::CreateDir, parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::io(FileOp::Write, path, e))?;
        Ok(())
    }

    /// Analysis parameters from the `[analysis]` table.
    pub fn analysis_config(&self) -> AnalysisConfig {
        self.analysis
    }
}
