//! Configuration types
//!
//! Stored as TOML. Every field has a default, so an empty or partial file is
//! valid.

use crate::error::Error;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Accepted range for `debounce.window_ms`
pub const WINDOW_MS_RANGE: std::ops::RangeInclusive<u64> = 1..=60_000;

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Debounce controller settings
    pub debounce: DebounceConfig,
    /// Outside-interaction detector settings
    pub dismiss: DismissConfig,
}

/// Debounce controller settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    /// Quiescence window in milliseconds (default: 1000)
    pub window_ms: u64,
    /// Search term a search widget starts with
    pub initial_term: String,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            window_ms: 1000,
            initial_term: "programming".to_string(),
        }
    }
}

impl DebounceConfig {
    /// Quiescence window as a `Duration`
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

/// Order in which ambient listeners and local handlers observe one interaction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DispatchOrder {
    /// Ambient listeners fire before local handlers
    AmbientFirst,
    /// Local handlers bubble first, ambient listeners last
    #[default]
    LocalFirst,
}

impl std::fmt::Display for DispatchOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchOrder::AmbientFirst => write!(f, "ambient-first"),
            DispatchOrder::LocalFirst => write!(f, "local-first"),
        }
    }
}

impl std::str::FromStr for DispatchOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ambient-first" => Ok(DispatchOrder::AmbientFirst),
            "local-first" => Ok(DispatchOrder::LocalFirst),
            other => Err(Error::InvalidConfig(format!(
                "unknown dispatch order '{}' (expected ambient-first or local-first)",
                other
            ))),
        }
    }
}

/// Outside-interaction detector settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DismissConfig {
    /// Dispatch order used by the ambient scope
    pub order: DispatchOrder,
}

impl Settings {
    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !WINDOW_MS_RANGE.contains(&self.debounce.window_ms) {
            return Err(Error::InvalidConfig(format!(
                "debounce.window_ms must be in {}-{} (got {})",
                WINDOW_MS_RANGE.start(),
                WINDOW_MS_RANGE.end(),
                self.debounce.window_ms
            )));
        }
        Ok(())
    }

    /// Parse and validate settings from TOML
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load settings from `path`, falling back to defaults if the file is missing
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Validate and write settings to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

/// Annotated example configuration
pub fn example_config() -> &'static str {
    r#"# Quiesce configuration

[debounce]
# Quiescence window in milliseconds (1-60000)
window_ms = 1000
# Term the search widget starts with
initial_term = "programming"

[dismiss]
# "local-first" or "ambient-first"
order = "local-first"
"#
}
