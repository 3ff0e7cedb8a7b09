//! Configuration storage for wattscope.
//!
//! Settings live in `<config dir>/wattscope/config.json` and can be
//! overridden per-run with `WATTSCOPE_*` environment variables. A missing
//! or unreadable file yields defaults, which put the app in demo mode.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

/// The configuration directory name under the platform config dir.
const CONFIG_DIR: &str = "wattscope";

/// The configuration file name.
const CONFIG_FILE: &str = "config.json";

fn default_api_base_url() -> String {
    "https://api.octopus.energy".to_string()
}

/// User-facing settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Base URL of the supplier API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Personal API key; account endpoints require it.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Account number, e.g. `A-1234A5B6`.
    #[serde(default)]
    pub account_number: Option<String>,
    /// Electricity meter point administration number.
    #[serde(default)]
    pub mpan: Option<String>,
    /// Meter serial number.
    #[serde(default)]
    pub meter_serial: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_key: None,
            account_number: None,
            mpan: None,
            meter_serial: None,
        }
    }
}

impl Config {
    /// Whether enough account details exist to fetch real data.
    pub fn is_account_configured(&self) -> bool {
        self.api_key.is_some()
            && self.account_number.is_some()
            && self.mpan.is_some()
            && self.meter_serial.is_some()
    }

    /// Apply `WATTSCOPE_*` environment overrides on top of the file values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("WATTSCOPE_API_URL") {
            self.api_base_url = url;
        }
        for (var, slot) in [
            ("WATTSCOPE_API_KEY", &mut self.api_key),
            ("WATTSCOPE_ACCOUNT", &mut self.account_number),
            ("WATTSCOPE_MPAN", &mut self.mpan),
            ("WATTSCOPE_METER_SERIAL", &mut self.meter_serial),
        ] {
            if let Ok(value) = std::env::var(var) {
                *slot = Some(value);
            }
        }
        self
    }
}

/// Manages config storage and retrieval.
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a manager rooted at the platform config dir.
    ///
    /// Returns `None` if the config directory cannot be determined.
    pub fn new() -> Option<Self> {
        let base = dirs::config_dir()?;
        Some(Self::at(base.join(CONFIG_DIR).join(CONFIG_FILE)))
    }

    /// Create a manager for an explicit path (used by tests).
    pub fn at(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load the config, falling back to defaults when the file is missing
    /// or unreadable.
    pub fn load(&self) -> Config {
        if !self.config_path.exists() {
            return Config::default();
        }
        match File::open(&self.config_path) {
            Ok(file) => serde_json::from_reader(BufReader::new(file)).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file: {}", e);
                Config::default()
            }),
            Err(e) => {
                tracing::warn!("Failed to open config file: {}", e);
                Config::default()
            }
        }
    }

    /// Persist the config. Returns `false` on any IO failure.
    pub fn save(&self, config: &Config) -> bool {
        if let Some(parent) = self.config_path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return false;
            }
        }
        let file = match File::create(&self.config_path) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("Failed to create config file: {}", e);
                return false;
            }
        };
        let mut writer = BufWriter::new(file);
        if serde_json::to_writer_pretty(&mut writer, config).is_err() {
            return false;
        }
        writer.flush().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::at(dir.path().join("config.json"));
        let config = manager.load();
        assert_eq!(config, Config::default());
        assert!(!config.is_account_configured());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::at(dir.path().join("nested").join("config.json"));
        let config = Config {
            api_key: Some("sk_live_demo".to_string()),
            account_number: Some("A-1234A5B6".to_string()),
            mpan: Some("1200023456789".to_string()),
            meter_serial: Some("21E1234567".to_string()),
            ..Config::default()
        };
        assert!(manager.save(&config));
        assert_eq!(manager.load(), config);
        assert!(config.is_account_configured());
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        let manager = ConfigManager::at(path);
        assert_eq!(manager.load(), Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"api_key": "sk_live_demo"}"#).unwrap();
        let manager = ConfigManager::at(path);
        let config = manager.load();
        assert_eq!(config.api_key.as_deref(), Some("sk_live_demo"));
        assert_eq!(config.api_base_url, default_api_base_url());
    }
}
