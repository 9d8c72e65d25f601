//! Configuration file loading for the CLI
//!
//! This module defines [`AppConfig`] and handles finding and loading it
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;

use crate::error::{AwActionError, ConfigError};

/// Application configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Output configuration section
    #[serde(default)]
    pub output: OutputConfig,

    /// Input configuration section
    #[serde(default)]
    pub input: InputConfig,

    #[serde(skip)]
    config_file_path: Option<PathBuf>,
}

impl AppConfig {
    /// The file this configuration was read from, if any.
    pub fn config_file_path(&self) -> Option<&Path> {
        self.config_file_path.as_deref()
    }
}

/// Output configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print the JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Input configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Ignore lines whose first non-blank character is `#`
    pub skip_comments: bool,

    /// Ignore lines containing only whitespace
    pub skip_blank_lines: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            skip_comments: true,
            skip_blank_lines: true,
        }
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (awaction/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, AwActionError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("awaction/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "awaction", "awaction") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, AwActionError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let mut config: AppConfig = toml::from_str(&content).map_err(ConfigError::from)?;
    config.config_file_path = Some(path.to_path_buf());

    Ok(config)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.output.pretty);
        assert!(config.input.skip_comments);
        assert!(config.input.skip_blank_lines);
        assert!(config.config_file_path().is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[output]\npretty = false\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert!(!config.output.pretty);
        assert!(config.input.skip_comments);
        assert_eq!(config.config_file_path(), Some(path.as_path()));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempdir().unwrap();
        let err = load_config(Some(dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(
            err,
            AwActionError::Config(ConfigError::MissingFile(_))
        ));
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[input]\nskip_comments = \"sometimes\"\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, AwActionError::Config(ConfigError::Parse(_))));
    }
}
