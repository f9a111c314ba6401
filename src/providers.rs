//! Price sources for the calculation engine.
//!
//! The engine takes prices as plain numbers. Everything about *where* they
//! come from lives here: fixed quotes, the last-known-good fallback table, a
//! TTL cache, primary-with-fallback selection, and the staleness policy.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::madhab::TRADITIONAL_UNIT_TO_GRAM;
use crate::math::ZakatDecimal;
use crate::pricing::MetalPrices;
use crate::types::ZakatError;

/// Prices together with the date they were observed and where they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub prices: MetalPrices,
    pub as_of: NaiveDate,
    pub source: String,
}

impl PriceQuote {
    pub fn new(prices: MetalPrices, as_of: NaiveDate, source: impl Into<String>) -> Self {
        Self {
            prices,
            as_of,
            source: source.into(),
        }
    }

    /// Rejects negative prices. Quotes read from outside the process bypass
    /// [`MetalPrices::new`], so they are checked here.
    pub fn validate(&self) -> Result<(), ZakatError> {
        MetalPrices::new(self.prices.gold_per_gram, self.prices.silver_per_gram).map(|_| ())
    }

    /// Whole days between `as_of` and `today`. Negative for future-dated quotes.
    pub fn age_days(&self, today: NaiveDate) -> i64 {
        (today - self.as_of).num_days()
    }
}

/// Last-known-good prices, in currency per **vori**, by purity grade.
///
/// This is a named configuration value, not engine state. Only the
/// traditional (lowest) gold grade ever feeds the engine; the other grades
/// are kept for display and for picking the lowest when no traditional
/// price is published.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackPriceTable {
    pub gold_22k: Decimal,
    pub gold_21k: Decimal,
    pub gold_18k: Decimal,
    #[serde(default)]
    pub gold_traditional: Option<Decimal>,
    pub silver: Decimal,
    pub last_updated: NaiveDate,
}

impl Default for FallbackPriceTable {
    fn default() -> Self {
        Self {
            gold_22k: dec!(9850),
            gold_21k: dec!(9400),
            gold_18k: dec!(8050),
            gold_traditional: None,
            silver: dec!(1850),
            last_updated: NaiveDate::from_ymd_opt(2024, 11, 8).unwrap_or_default(),
        }
    }
}

impl FallbackPriceTable {
    /// The lowest-purity gold price per vori: the traditional grade when
    /// published, otherwise the cheapest listed karat.
    pub fn lowest_gold_per_vori(&self) -> Decimal {
        self.gold_traditional
            .unwrap_or_else(|| self.gold_22k.min(self.gold_21k).min(self.gold_18k))
    }

    /// Converts the table into per-gram prices for the engine.
    pub fn to_prices(&self) -> Result<MetalPrices, ZakatError> {
        MetalPrices::new(
            (self.lowest_gold_per_vori() / TRADITIONAL_UNIT_TO_GRAM).to_cents(),
            (self.silver / TRADITIONAL_UNIT_TO_GRAM).to_cents(),
        )
    }

    pub fn to_quote(&self) -> Result<PriceQuote, ZakatError> {
        Ok(PriceQuote::new(self.to_prices()?, self.last_updated, "Fallback prices"))
    }
}

/// What to do with prices older than the allowed age.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StaleAction {
    #[default]
    Warn,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PriceFreshness {
    Fresh,
    Stale {
        #[serde(rename = "ageDays")]
        age_days: i64,
    },
}

/// How old a quote may be before it is flagged or refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StalenessPolicy {
    pub max_age_days: i64,
    pub action: StaleAction,
}

impl Default for StalenessPolicy {
    fn default() -> Self {
        Self {
            max_age_days: 7,
            action: StaleAction::Warn,
        }
    }
}

impl StalenessPolicy {
    pub fn check(&self, quote: &PriceQuote, today: NaiveDate) -> Result<PriceFreshness, ZakatError> {
        let age_days = quote.age_days(today);
        if age_days <= self.max_age_days {
            return Ok(PriceFreshness::Fresh);
        }

        match self.action {
            StaleAction::Warn => {
                tracing::warn!(
                    source = %quote.source,
                    as_of = %quote.as_of,
                    age_days,
                    max_age_days = self.max_age_days,
                    "metal prices are stale"
                );
                Ok(PriceFreshness::Stale { age_days })
            }
            StaleAction::Reject => Err(ZakatError::StalePrices {
                age_days,
                max_age_days: self.max_age_days,
            }),
        }
    }
}

/// Trait for fetching current metal prices.
///
/// Implementors can fetch prices from various sources: fixed values for
/// tests, environment variables, a jewellers' association feed, a database.
#[cfg(feature = "async")]
#[async_trait::async_trait]
pub trait PriceProvider: Send + Sync {
    async fn get_quote(&self) -> Result<PriceQuote, ZakatError>;
}

/// A provider that always returns the same quote.
#[derive(Debug, Clone)]
pub struct StaticPriceProvider {
    quote: PriceQuote,
}

impl StaticPriceProvider {
    pub fn new(quote: PriceQuote) -> Self {
        Self { quote }
    }

    /// Prices supplied directly by the user, dated today.
    pub fn user_supplied(prices: MetalPrices) -> Self {
        Self::new(PriceQuote::new(prices, chrono::Local::now().date_naive(), "User supplied"))
    }

    pub fn from_fallback(table: &FallbackPriceTable) -> Result<Self, ZakatError> {
        Ok(Self::new(table.to_quote()?))
    }
}

#[cfg(feature = "async")]
#[async_trait::async_trait]
impl PriceProvider for StaticPriceProvider {
    async fn get_quote(&self) -> Result<PriceQuote, ZakatError> {
        Ok(self.quote.clone())
    }
}

/// A decorator that reuses a fetched quote until the TTL expires.
#[cfg(feature = "async")]
#[derive(Debug, Clone)]
pub struct CachedPriceProvider<P> {
    inner: P,
    cache: std::sync::Arc<tokio::sync::RwLock<Option<(std::time::Instant, PriceQuote)>>>,
    ttl: std::time::Duration,
}

#[cfg(feature = "async")]
impl<P> CachedPriceProvider<P> {
    pub fn new(inner: P, ttl_seconds: u64) -> Self {
        Self {
            inner,
            cache: std::sync::Arc::new(tokio::sync::RwLock::new(None)),
            ttl: std::time::Duration::from_secs(ttl_seconds),
        }
    }

    /// Drops the cached quote so the next call hits the inner provider.
    pub async fn invalidate(&self) {
        *self.cache.write().await = None;
    }
}

#[cfg(feature = "async")]
#[async_trait::async_trait]
impl<P: PriceProvider> PriceProvider for CachedPriceProvider<P> {
    async fn get_quote(&self) -> Result<PriceQuote, ZakatError> {
        {
            let guard = self.cache.read().await;
            if let Some((fetched_at, quote)) = &*guard {
                if fetched_at.elapsed() < self.ttl {
                    return Ok(quote.clone());
                }
            }
        }

        let quote = self.inner.get_quote().await?;
        *self.cache.write().await = Some((std::time::Instant::now(), quote.clone()));
        tracing::debug!(source = %quote.source, "refreshed cached metal prices");
        Ok(quote)
    }
}

/// Tries the primary provider and falls back to a fixed quote when it fails
/// or reports a zero price.
#[cfg(feature = "async")]
#[derive(Debug, Clone)]
pub struct BestEffortPriceProvider<P> {
    primary: P,
    fallback: PriceQuote,
}

#[cfg(feature = "async")]
impl<P> BestEffortPriceProvider<P> {
    pub fn new(primary: P, fallback: PriceQuote) -> Self {
        Self { primary, fallback }
    }
}

#[cfg(feature = "async")]
#[async_trait::async_trait]
impl<P: PriceProvider> PriceProvider for BestEffortPriceProvider<P> {
    async fn get_quote(&self) -> Result<PriceQuote, ZakatError> {
        match self.primary.get_quote().await {
            Ok(quote) if !quote.prices.has_unknown_price() => Ok(quote),
            Ok(quote) => {
                tracing::warn!(source = %quote.source, "price source returned a zero price; using fallback");
                Ok(self.fallback.clone())
            }
            Err(e) => {
                tracing::warn!(error = %e, "price source failed; using fallback");
                Ok(self.fallback.clone())
            }
        }
    }
}

/// Fetches a quote and applies the staleness policy to it.
#[cfg(feature = "async")]
pub async fn fetch_checked<P: PriceProvider + ?Sized>(
    provider: &P,
    policy: &StalenessPolicy,
    today: NaiveDate,
) -> Result<(PriceQuote, PriceFreshness), ZakatError> {
    let quote = provider.get_quote().await?;
    let freshness = policy.check(&quote, today)?;
    Ok((quote, freshness))
}
