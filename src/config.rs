use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

use crate::inputs::IntoZakatDecimal;
use crate::pricing::MetalPrices;
use crate::providers::{FallbackPriceTable, PriceQuote, StalenessPolicy};
use crate::types::ZakatError;

/// Where prices come from and how far they can be trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingConfig {
    pub fallback: FallbackPriceTable,
    /// How long a fetched quote is reused before the source is asked again.
    pub cache_ttl_seconds: u64,
    pub staleness: StalenessPolicy,
    /// Per-gram prices for the traditional grade that take precedence over
    /// every other source.
    pub price_override: Option<MetalPrices>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            fallback: FallbackPriceTable::default(),
            cache_ttl_seconds: 3600,
            staleness: StalenessPolicy::default(),
            price_override: None,
        }
    }
}

impl std::str::FromStr for PricingConfig {
    type Err = ZakatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: PricingConfig = serde_json::from_str(s)
            .map_err(|e| ZakatError::configuration(format!("Failed to parse config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

impl PricingConfig {
    /// Validates the configuration for logical consistency and safety.
    pub fn validate(&self) -> Result<(), ZakatError> {
        let table = &self.fallback;
        let grades = [
            ("gold22k", Some(table.gold_22k)),
            ("gold21k", Some(table.gold_21k)),
            ("gold18k", Some(table.gold_18k)),
            ("goldTraditional", table.gold_traditional),
            ("silver", Some(table.silver)),
        ];
        for (name, price) in grades {
            if price.is_some_and(|p| p <= Decimal::ZERO) {
                return Err(ZakatError::configuration(format!("Fallback price '{}' must be positive", name)));
            }
        }

        if self.staleness.max_age_days < 0 {
            return Err(ZakatError::configuration("maxAgeDays must be non-negative"));
        }

        if let Some(prices) = &self.price_override {
            if prices.gold_per_gram <= Decimal::ZERO || prices.silver_per_gram <= Decimal::ZERO {
                return Err(ZakatError::configuration("Override prices must be positive"));
            }
        }

        Ok(())
    }

    /// Loads defaults, then applies `ZAKAT_GOLD_PRICE` / `ZAKAT_SILVER_PRICE`
    /// (per gram, traditional grade) and `ZAKAT_MAX_PRICE_AGE_DAYS` if set.
    pub fn from_env() -> Result<Self, ZakatError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ZakatError> {
        let mut config = Self::default();

        match (lookup("ZAKAT_GOLD_PRICE"), lookup("ZAKAT_SILVER_PRICE")) {
            (Some(gold), Some(silver)) => {
                let gold = gold
                    .as_str()
                    .into_zakat_decimal()
                    .map_err(|e| ZakatError::configuration(format!("Invalid gold price format: {}", e)))?;
                let silver = silver
                    .as_str()
                    .into_zakat_decimal()
                    .map_err(|e| ZakatError::configuration(format!("Invalid silver price format: {}", e)))?;
                config.price_override = Some(MetalPrices::new(gold, silver)?);
            }
            (None, None) => {}
            (Some(_), None) => return Err(ZakatError::configuration("ZAKAT_SILVER_PRICE env var not set")),
            (None, Some(_)) => return Err(ZakatError::configuration("ZAKAT_GOLD_PRICE env var not set")),
        }

        if let Some(days) = lookup("ZAKAT_MAX_PRICE_AGE_DAYS") {
            config.staleness.max_age_days = days
                .trim()
                .parse()
                .map_err(|e| ZakatError::configuration(format!("Invalid ZAKAT_MAX_PRICE_AGE_DAYS: {}", e)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Attempts to load configuration from a JSON file.
    pub fn try_from_json(path: impl AsRef<std::path::Path>) -> Result<Self, ZakatError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ZakatError::configuration(format!("Failed to read config file: {}", e)))?;
        content.parse()
    }

    /// The quote to start from before any live source is consulted: the
    /// override when present, the fallback table otherwise.
    pub fn initial_quote(&self) -> Result<PriceQuote, ZakatError> {
        match self.price_override {
            Some(prices) => Ok(PriceQuote::new(
                prices,
                chrono::Local::now().date_naive(),
                "Configured prices",
            )),
            None => self.fallback.to_quote(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::StaleAction;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = PricingConfig::default();
        assert_eq!(config.cache_ttl_seconds, 3600);
        assert_eq!(config.staleness.max_age_days, 7);
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_quote().unwrap().source, "Fallback prices");
    }

    #[test]
    fn test_env_override() {
        let config = PricingConfig::from_lookup(lookup(&[
            ("ZAKAT_GOLD_PRICE", "11761"),
            ("ZAKAT_SILVER_PRICE", " 223 "),
            ("ZAKAT_MAX_PRICE_AGE_DAYS", "3"),
        ]))
        .unwrap();

        let prices = config.price_override.unwrap();
        assert_eq!(prices.gold_per_gram, dec!(11761));
        assert_eq!(prices.silver_per_gram, dec!(223));
        assert_eq!(config.staleness.max_age_days, 3);
        assert_eq!(config.initial_quote().unwrap().prices, prices);
    }

    #[test]
    fn test_env_requires_both_prices() {
        let err = PricingConfig::from_lookup(lookup(&[("ZAKAT_GOLD_PRICE", "11761")])).unwrap_err();
        assert!(matches!(err, ZakatError::ConfigurationError { .. }));

        assert!(PricingConfig::from_lookup(lookup(&[])).unwrap().price_override.is_none());
    }

    #[test]
    fn test_env_rejects_garbage() {
        let res = PricingConfig::from_lookup(lookup(&[
            ("ZAKAT_GOLD_PRICE", "lots"),
            ("ZAKAT_SILVER_PRICE", "223"),
        ]));
        assert!(res.is_err());
    }

    #[test]
    fn test_from_str_partial_json() {
        let config: PricingConfig = r#"{"cacheTtlSeconds": 60, "staleness": {"action": "reject"}}"#
            .parse()
            .unwrap();
        assert_eq!(config.cache_ttl_seconds, 60);
        assert_eq!(config.staleness.action, StaleAction::Reject);
        assert_eq!(config.staleness.max_age_days, 7);
        assert_eq!(config.fallback, FallbackPriceTable::default());
    }

    #[test]
    fn test_validate_rejects_non_positive_fallback() {
        let mut config = PricingConfig::default();
        config.fallback.silver = Decimal::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_try_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"priceOverride": {{"goldPerGram": "100", "silverPerGram": "2"}}}}"#).unwrap();

        let config = PricingConfig::try_from_json(file.path()).unwrap();
        assert_eq!(config.price_override, Some(MetalPrices::new(100, 2).unwrap()));

        assert!(PricingConfig::try_from_json("/nonexistent/zakat.json").is_err());
    }
}
