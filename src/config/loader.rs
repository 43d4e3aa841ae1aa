//! Configuration loading and discovery for `assetry.toml`
//!
//! Provides functions to find, load, and validate configuration.

use super::schema::AssetryConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for by [`find_config_from`].
pub const CONFIG_FILE_NAME: &str = "assetry.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse assetry.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// Find assetry.toml by walking up from a specific directory.
///
/// Checks `start` first, then each parent in turn up to the filesystem root,
/// and returns the nearest match.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        // Move to parent directory
        if !current.pop() {
            // Reached root, no config found
            return None;
        }
    }
}

/// Parse and validate configuration text.
///
/// Relative paths are left as written.
pub fn parse_config(contents: &str) -> Result<AssetryConfig, ConfigError> {
    let config: AssetryConfig = toml::from_str(contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Load configuration from an assetry.toml file.
///
/// A relative `assets.root` is resolved against the directory holding the
/// file, so the returned root can be used from any working directory.
pub fn load_config(path: &Path) -> Result<AssetryConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let mut config = parse_config(&contents)?;

    if let Some(dir) = path.parent() {
        config.assets.root = resolve_path(dir, &config.assets.root);
    }

    tracing::debug!(config = %path.display(), root = %config.assets.root.display(), "loaded asset config");
    Ok(config)
}

/// Resolve a path relative to the config directory.
///
/// If the path is absolute, returns it unchanged.
/// If relative, joins it with the config directory.
pub fn resolve_path(config_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        config_dir.join(path)
    }
}
