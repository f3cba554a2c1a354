//! Platform-specific paths for configuration.
//!
//! - **User config**: `~/.config/noisehue/` (Linux), `~/Library/Application Support/noisehue/` (macOS), `%APPDATA%\noisehue\` (Windows)
//!
//! # Example
//!
//! ```rust,no_run
//! use noisehue_config::paths;
//!
//! let path = paths::default_config_path();
//! println!("Config file: {:?}", path);
//! ```

use crate::error::{ConfigError, FileOp};
use std::path::PathBuf;

/// Application name used for directory paths.
const APP_NAME: &str = "noisehue";

/// File name of the default config file.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Returns the user-specific configuration directory.
///
/// # Platform Paths
///
/// - Linux: `~/.config/noisehue/`
/// - macOS: `~/Library/Application Support/noisehue/`
/// - Windows: `%APPDATA%\noisehue\`
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the path of the default config file.
pub fn default_config_path() -> PathBuf {
    user_config_dir().join(CONFIG_FILE_NAME)
}

/// Create the user config directory if needed and return it.
pub fn ensure_user_config_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_config_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir)
            .map_err(|e| ConfigError::io(FileOp::CreateDir, &dir, e))?;
    }
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_is_inside_config_dir() {
        let path = default_config_path();
        assert!(path.starts_with(user_config_dir()));
        assert_eq!(path.file_name().unwrap(), CONFIG_FILE_NAME);
    }

    #[test]
    fn config_dir_ends_with_app_name() {
        assert!(user_config_dir().ends_with(APP_NAME));
    }
}
