//! Configuration loading and management
//!
//! Handles parsing of `tabboard.toml` configuration files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of the config file looked up inside the data directory
pub const CONFIG_FILE: &str = "tabboard.toml";

const MAX_TIMEOUT_SECS: u64 = 120;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Task store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Profile lookup configuration
    #[serde(default)]
    pub profile: ProfileConfig,

    /// Dashboard configuration
    #[serde(default)]
    pub ui: UiConfig,
}

/// Task store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Slot name holding the serialized task collection
    #[serde(default = "default_slot")]
    pub slot: String,
}

fn default_slot() -> String {
    "todos".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            slot: default_slot(),
        }
    }
}

/// Profile lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Base URL of the user directory API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// User-Agent header sent with lookups
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    concat!("tabboard/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tab shown at startup (todo | profile)
    #[serde(default = "default_tab")]
    pub default_tab: String,
}

fn default_tab() -> String {
    "todo".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_tab: default_tab(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the data directory, or return defaults
    pub fn load_from_dir(data_dir: &Path) -> Self {
        let config_path = data_dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load(&config_path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %config_path.display(), error = %err, "ignoring invalid config");
                Self::default()
            }
        }
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit path must exist and be valid; the data directory file is
    /// optional and falls back to defaults.
    pub fn resolve(explicit: Option<&Path>, data_dir: &Path) -> Result<Self> {
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::ConfigNotFound(path.to_path_buf()));
                }
                Self::load(path)
            }
            None => Ok(Self::load_from_dir(data_dir)),
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        self.store.validate()?;
        self.profile.validate()?;
        self.ui.validate()?;
        Ok(())
    }
}

impl StoreConfig {
    fn validate(&self) -> Result<()> {
        let slot = self.slot.trim();
        if slot.is_empty() {
            return Err(Error::InvalidConfig("store.slot cannot be empty".to_string()));
        }
        if !slot
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
        {
            return Err(Error::InvalidConfig(format!(
                "store.slot '{slot}' may only contain letters, digits, '-' and '_'"
            )));
        }
        Ok(())
    }
}

impl ProfileConfig {
    fn validate(&self) -> Result<()> {
        let base = self.api_base.trim();
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(Error::InvalidConfig(format!(
                "profile.api_base must start with http:// or https:// (got '{base}')"
            )));
        }
        if self.user_agent.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "profile.user_agent cannot be empty".to_string(),
            ));
        }
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(Error::InvalidConfig(format!(
                "profile.timeout_secs must be between 1 and {MAX_TIMEOUT_SECS}"
            )));
        }
        Ok(())
    }
}

impl UiConfig {
    fn validate(&self) -> Result<()> {
        self.default_tab
            .parse::<crate::tabs::Tab>()
            .map_err(|err| Error::InvalidConfig(format!("ui.default_tab: {err}")))?;
        Ok(())
    }
}
