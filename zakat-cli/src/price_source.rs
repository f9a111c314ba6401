use std::path::PathBuf;

use tracing::{debug, info};
use zakat_engine::config::PricingConfig;
use zakat_engine::prelude::*;

/// Reads the latest quote from a JSON file kept up to date by an external job.
pub struct QuoteFileProvider {
    path: PathBuf,
}

impl QuoteFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl PriceProvider for QuoteFileProvider {
    async fn get_quote(&self) -> Result<PriceQuote, ZakatError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ZakatError::NetworkError(format!("Failed to read {:?}: {}", self.path, e)))?;
        let quote: PriceQuote = serde_json::from_str(&content)
            .map_err(|e| ZakatError::NetworkError(format!("Malformed quote in {:?}: {}", self.path, e)))?;
        quote.validate()?;
        debug!(source = %quote.source, as_of = %quote.as_of, "read price file");
        Ok(quote)
    }
}

/// Picks the price source for this run.
///
/// Explicit prices (flags, env, config) win outright. Otherwise the quote
/// file is consulted unless offline, with the fallback table behind it.
pub fn build_provider(
    flag_prices: Option<MetalPrices>,
    price_file: Option<PathBuf>,
    offline: bool,
    pricing: &PricingConfig,
) -> Result<Box<dyn PriceProvider>, ZakatError> {
    if let Some(prices) = flag_prices {
        info!("using prices from the command line");
        return Ok(Box::new(StaticPriceProvider::user_supplied(prices)));
    }

    let base = pricing.initial_quote()?;
    if pricing.price_override.is_some() || offline {
        return Ok(Box::new(StaticPriceProvider::new(base)));
    }

    match price_file {
        Some(path) => {
            let primary = QuoteFileProvider::new(path);
            let provider = BestEffortPriceProvider::new(primary, base);
            Ok(Box::new(CachedPriceProvider::new(provider, pricing.cache_ttl_seconds)))
        }
        None => Ok(Box::new(StaticPriceProvider::new(base))),
    }
}
