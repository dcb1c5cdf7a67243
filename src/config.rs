//! Engine configuration loaded from TOML.
//!
//! Provides two loading methods:
//! - `default_config()` - Settings embedded in the binary
//! - `load_config(path)` - Settings from a file on disk

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::Category;
use crate::quote::PricingConfig;

/// Default settings embedded at compile time from `config/engine.toml`.
const DEFAULT_CONFIG: &str = include_str!("../config/engine.toml");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Base slots that must be filled for a complete quote
    #[serde(default)]
    pub required_categories: Vec<Category>,
    /// Re-derive filters whenever the base selection changes
    #[serde(default = "default_smart_sync")]
    pub smart_sync: bool,
    /// Drop zero-stock parts from candidate lists
    #[serde(default)]
    pub hide_out_of_stock: bool,
    #[serde(default)]
    pub pricing: PricingConfig,
}

fn default_smart_sync() -> bool {
    true
}

impl EngineConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid engine config")
    }
}

/// Load settings from a TOML file. Unknown category names are an error.
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {:?}", path))?;
    let config = EngineConfig::from_toml(&content)?;
    info!("Loaded engine config from {:?}", path);
    Ok(config)
}

/// The settings embedded in the binary.
///
/// # Panics
/// Panics if the embedded TOML is invalid (this would be a compile-time bug).
pub fn default_config() -> EngineConfig {
    EngineConfig::from_toml(DEFAULT_CONFIG).expect("embedded engine.toml must be valid")
}
