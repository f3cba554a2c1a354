//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use noisehue_config::{ConfigFile, default_config_path};
use std::path::Path;

/// Load the config file named on the command line, or the user default.
///
/// A missing default file yields built-in defaults; a missing explicit file
/// is an error.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<ConfigFile> {
    let default = default_config_path();
    let config = ConfigFile::load_or_default(path, &default).with_context(|| {
        format!(
            "failed to load config from {}",
            path.unwrap_or(&default).display()
        )
    })?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}
