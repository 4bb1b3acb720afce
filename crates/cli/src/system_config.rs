//! System configuration file location and persistence
//!
//! The file lives at `<config dir>/quiesce/config.toml`. `QUIESCE_CONFIG`
//! overrides the path.

use anyhow::{Context, Result};
use quiesce_core::Settings;
use std::path::PathBuf;

pub use quiesce_core::config::example_config;

/// Environment variable overriding the config file path
pub const CONFIG_ENV: &str = "QUIESCE_CONFIG";

/// Resolve the config file path
pub fn config_file_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("quiesce").join("config.toml"))
}

/// Load settings, using defaults when the file does not exist
pub fn load() -> Result<Settings> {
    let path = config_file_path().context("Could not determine config file path")?;
    Settings::load(&path).with_context(|| format!("Failed to load config from {}", path.display()))
}

/// Save settings
pub fn save(settings: &Settings) -> Result<()> {
    let path = config_file_path().context("Could not determine config file path")?;
    settings
        .save(&path)
        .with_context(|| format!("Failed to write config to {}", path.display()))
}

/// Write the default settings if no config file exists yet
pub fn init_if_missing() -> Result<()> {
    let path = config_file_path().context("Could not determine config file path")?;
    if !path.exists() {
        save(&Settings::default())?;
        tracing::info!("Created config file at {}", path.display());
    }
    Ok(())
}
