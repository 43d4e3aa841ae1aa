//! Configuration schema types for `assetry.toml`
//!
//! ```toml
//! [assets]
//! root = "content"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Asset directory settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Directory file names are resolved against. Relative paths are
    /// relative to the directory holding `assetry.toml`.
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

fn default_root() -> PathBuf {
    PathBuf::from("assets")
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
        }
    }
}

/// Root of `assetry.toml`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssetryConfig {
    #[serde(default)]
    pub assets: AssetsConfig,
}

/// A configuration validation error
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "assets.root")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "assetry.toml: '{}' {}", self.field, self.message)
    }
}

impl AssetryConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.assets.root.as_os_str().is_empty() {
            errors.push(ConfigValidationError {
                field: "assets.root".to_string(),
                message: "must be a non-empty path".to_string(),
            });
        }

        errors
    }
}
