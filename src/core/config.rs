use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_DAYS: i64 = 10;
pub const DEFAULT_CURRENCIES: [&str; 4] = ["EUR", "CHF", "PLN", "USD"];
pub const DEFAULT_LOG_PATH: &str = "exchange.log";
pub const DEFAULT_PRIVATBANK_URL: &str = "https://api.privatbank.ua";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_days() -> i64 {
    DEFAULT_DAYS
}

fn default_currencies() -> Vec<String> {
    DEFAULT_CURRENCIES.iter().map(|c| c.to_string()).collect()
}

fn default_log_path() -> String {
    DEFAULT_LOG_PATH.to_string()
}

fn default_base_url() -> String {
    DEFAULT_PRIVATBANK_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PrivatBankConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PrivatBankConfig {
    fn default() -> Self {
        PrivatBankConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub privatbank: PrivatBankConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Number of days to look back, clamped to 1..=10 when used.
    #[serde(default = "default_days")]
    pub days: i64,
    #[serde(default = "default_currencies")]
    pub currencies: Vec<String>,
    #[serde(default = "default_log_path")]
    pub log_path: String,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            days: default_days(),
            currencies: default_currencies(),
            log_path: default_log_path(),
            providers: ProvidersConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the platform config file, or built-in defaults when there is none.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("ua", "xrates", "xrates")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        // An empty document deserializes to unit, not to a map
        if config_str.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.currencies.iter().all(|c| c.trim().is_empty()) {
            bail!("At least one currency must be configured");
        }
        if self.providers.privatbank.timeout_secs == 0 {
            bail!("providers.privatbank.timeout_secs must be greater than zero");
        }
        Ok(())
    }
}
