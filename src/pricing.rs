//! Price Normalizer.
//!
//! Turns raw per-gram metal prices into the derived prices the rest of the
//! pipeline needs: the price of one traditional unit (vori) and the
//! "selling" price per gram after the retail markup deduction.
//!
//! Prices are always quoted for the traditional (lowest purity) grade. Using a
//! higher grade would overstate the value of mixed holdings.

use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::inputs::IntoZakatDecimal;
use crate::madhab::{RETAIL_MARKUP_FRACTION, TRADITIONAL_UNIT_TO_GRAM};
use crate::math::ZakatDecimal;
use crate::types::ZakatError;

/// Current market prices for the traditional grade, in currency per gram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetalPrices {
    pub gold_per_gram: Decimal,
    pub silver_per_gram: Decimal,
}

impl MetalPrices {
    /// Creates a new price pair, rejecting negative values.
    pub fn new(
        gold_per_gram: impl IntoZakatDecimal,
        silver_per_gram: impl IntoZakatDecimal,
    ) -> Result<Self, ZakatError> {
        let gold = gold_per_gram.into_zakat_decimal()?;
        let silver = silver_per_gram.into_zakat_decimal()?;

        if gold < Decimal::ZERO {
            return Err(ZakatError::invalid_input("goldPricePerGram", gold, "price must be non-negative"));
        }
        if silver < Decimal::ZERO {
            return Err(ZakatError::invalid_input("silverPricePerGram", silver, "price must be non-negative"));
        }

        Ok(Self {
            gold_per_gram: gold,
            silver_per_gram: silver,
        })
    }

    /// True when either price is zero, which almost always means the feed
    /// was unavailable rather than that the metal is free.
    pub fn has_unknown_price(&self) -> bool {
        self.gold_per_gram.is_zero() || self.silver_per_gram.is_zero()
    }

    pub fn normalize(&self) -> DerivedPrices {
        normalize(self.gold_per_gram, self.silver_per_gram)
    }
}

/// Prices derived from [`MetalPrices`]. Recomputed on every call, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DerivedPrices {
    /// Price of one vori of gold, whole currency units.
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub gold_per_traditional_unit: Decimal,
    /// Price of one vori of silver, whole currency units.
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub silver_per_traditional_unit: Decimal,
    /// Gold price per gram net of retail markup, 2 dp.
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub gold_selling_per_gram: Decimal,
    /// Silver price per gram net of retail markup, 2 dp.
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub silver_selling_per_gram: Decimal,
}

/// Price of one traditional unit, rounded to whole currency units.
pub fn per_traditional_unit(price_per_gram: Decimal) -> Decimal {
    (price_per_gram * TRADITIONAL_UNIT_TO_GRAM).to_whole_units()
}

/// Per-gram price after the retail markup deduction, kept to 2 dp because
/// the fraction matters once multiplied by hundreds of grams.
pub fn selling_per_gram(price_per_gram: Decimal) -> Decimal {
    (price_per_gram * (Decimal::ONE - RETAIL_MARKUP_FRACTION)).to_cents()
}

/// Converts raw per-gram prices into [`DerivedPrices`].
///
/// Zero in, zero out. Whether a zero price is real or "unknown" is for the
/// caller to decide (see [`MetalPrices::has_unknown_price`]).
pub fn normalize(gold_price_per_gram: Decimal, silver_price_per_gram: Decimal) -> DerivedPrices {
    let derived = DerivedPrices {
        gold_per_traditional_unit: per_traditional_unit(gold_price_per_gram),
        silver_per_traditional_unit: per_traditional_unit(silver_price_per_gram),
        gold_selling_per_gram: selling_per_gram(gold_price_per_gram),
        silver_selling_per_gram: selling_per_gram(silver_price_per_gram),
    };
    tracing::debug!(
        gold_selling = %derived.gold_selling_per_gram,
        silver_selling = %derived.silver_selling_per_gram,
        "normalized metal prices"
    );
    derived
}

/// Fails with `InvalidInput` when the weight is too large to convert.
pub fn vori_to_grams(vori: Decimal) -> Result<Decimal, ZakatError> {
    vori.checked_mul(TRADITIONAL_UNIT_TO_GRAM)
        .ok_or_else(|| ZakatError::invalid_input("vori", vori, "weight is too large"))
}

pub fn grams_to_vori(grams: Decimal) -> Decimal {
    grams / TRADITIONAL_UNIT_TO_GRAM
}

/// Currency value of a gram-denominated holding at the selling price,
/// rounded to whole units.
///
/// Callers use this to fill `goldValue` / `silverValue` in an asset bundle;
/// the bundle itself never carries grams. A weight whose value overflows is
/// rejected as `InvalidInput` on `grams`.
pub fn holding_value(grams: Decimal, selling_per_gram: Decimal) -> Result<Decimal, ZakatError> {
    grams
        .checked_mul(selling_per_gram)
        .map(|value| value.to_whole_units())
        .ok_or_else(|| ZakatError::invalid_input("grams", grams, "holding value overflows"))
}
