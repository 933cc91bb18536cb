use crate::core::currency::{Currency, CurrencyConverter, DEFAULT_EXCHANGE_RATE};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

fn default_exchange_rate() -> f64 {
    DEFAULT_EXCHANGE_RATE
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Currency amounts are displayed in.
    #[serde(default)]
    pub currency: Currency,
    /// VND per one USD.
    #[serde(default = "default_exchange_rate")]
    pub exchange_rate: f64,
    pub data_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            exchange_rate: DEFAULT_EXCHANGE_RATE,
            data_path: None,
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to defaults
    /// when no file has been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "fintrack", "fintrack")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("dev", "fintrack", "fintrack")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        if !(config.exchange_rate.is_finite() && config.exchange_rate > 0.0) {
            anyhow::bail!(
                "Invalid exchange_rate {} in {}",
                config.exchange_rate,
                path.as_ref().display()
            );
        }
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn converter(&self) -> CurrencyConverter {
        CurrencyConverter::new(self.exchange_rate)
    }
}
