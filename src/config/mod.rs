//! Configuration module for asset registries
//!
//! Provides types and parsing for `assetry.toml` configuration.

pub mod loader;
pub mod schema;

pub use loader::{find_config_from, load_config, parse_config, ConfigError, CONFIG_FILE_NAME};
pub use schema::*;
