//! Persistent CLI Configuration Loader
//!
//! Configuration is loaded from `~/.config/zakat/config.toml` on Linux,
//! `~/Library/Application Support/zakat/config.toml` on macOS, or
//! `%APPDATA%\zakat\config.toml` on Windows.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use zakat_engine::config::PricingConfig;
use zakat_engine::prelude::*;

/// CLI Configuration structure loaded from TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CliConfig {
    /// Default gold price per gram, traditional grade.
    pub gold_price: Option<Decimal>,
    /// Default silver price per gram.
    pub silver_price: Option<Decimal>,
    /// JSON file holding the latest `PriceQuote`, refreshed by an external job.
    pub price_file: Option<PathBuf>,
    /// JSON file with a full `PricingConfig` (fallback table, cache, staleness).
    pub pricing_config: Option<PathBuf>,
    pub max_price_age_days: Option<i64>,
    /// Refuse stale prices instead of warning about them.
    pub reject_stale: Option<bool>,
    /// "bangladesh" or "international". Detected from `TZ` when unset.
    pub region: Option<String>,
    /// Enable file logging by default.
    pub enable_logging: Option<bool>,
    /// Offline mode by default.
    pub offline: Option<bool>,
}

impl CliConfig {
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("zakat"))
    }

    /// Returns the full path to the config file.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// Loads from the default location. A missing file (or no config
    /// directory at all) yields `CliConfig::default()`.
    pub fn load() -> Result<Self, ZakatError> {
        let Some(path) = Self::config_path() else {
            debug!("Could not determine config directory");
            return Ok(Self::default());
        };
        if !path.exists() {
            debug!("No config file found at {:?}", path);
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Loads a specific file. Missing, unreadable and malformed files are all
    /// errors.
    pub fn load_from(path: &Path) -> Result<Self, ZakatError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ZakatError::configuration(format!("Failed to read config file {:?}: {}", path, e)))?;
        let config = toml::from_str::<CliConfig>(&content)
            .map_err(|e| ZakatError::configuration(format!("Failed to parse config file {:?}: {}", path, e)))?;
        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Settles a load result once logging is up. A file the user named must
    /// load; a broken default file is reported and replaced by defaults.
    pub fn settle(loaded: Result<Self, ZakatError>, explicit: bool) -> Result<Self, ZakatError> {
        match loaded {
            Ok(config) => Ok(config),
            Err(e) if explicit => Err(e),
            Err(e) => {
                warn!("{}; using default settings", e);
                Ok(Self::default())
            }
        }
    }

    /// Builds the engine's pricing configuration: the JSON file if one is
    /// named, then environment variables, then the overrides in this file.
    pub fn pricing(&self) -> Result<PricingConfig, ZakatError> {
        let mut pricing = match &self.pricing_config {
            Some(path) => PricingConfig::try_from_json(path)?,
            None => PricingConfig::default(),
        };

        let env = PricingConfig::from_env()?;
        if env.price_override.is_some() {
            pricing.price_override = env.price_override;
        }

        if let (Some(gold), Some(silver)) = (self.gold_price, self.silver_price) {
            if pricing.price_override.is_none() {
                pricing.price_override = Some(MetalPrices::new(gold, silver)?);
            }
        }
        if let Some(days) = self.max_price_age_days {
            pricing.staleness.max_age_days = days;
        }
        if let Some(reject) = self.reject_stale {
            pricing.staleness.action = if reject { StaleAction::Reject } else { StaleAction::Warn };
        }

        pricing.validate()?;
        Ok(pricing)
    }

    pub fn region(&self) -> Region {
        self.region
            .as_deref()
            .and_then(|r| r.parse().ok())
            .unwrap_or_else(|| Region::from_timezone(&std::env::var("TZ").unwrap_or_default()))
    }
}
