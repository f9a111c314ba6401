//! # Fiqh Constants: Hanafi Madhab, South Asian Weights
//!
//! Nisab is defined in traditional units (*vori* / *tola*, 11.66 g each):
//! - **Gold**: 7.5 vori = 87.45 g
//! - **Silver**: 52.5 vori = 612.15 g
//!
//! The Hanafi position for the general public is to measure monetary wealth
//! against the **silver** Nisab. This is a fixed ruling, not the outcome of a
//! runtime "lower of the two" comparison.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Grams in one traditional weight unit (vori / tola).
pub const TRADITIONAL_UNIT_TO_GRAM: Decimal = dec!(11.66);

/// Fraction deducted from the quoted price to approximate the resale price,
/// net of retail markup and making charges.
pub const RETAIL_MARKUP_FRACTION: Decimal = dec!(0.20);

/// Gold Nisab in traditional units.
pub const GOLD_NISAB_UNITS: Decimal = dec!(7.5);

/// Silver Nisab in traditional units.
pub const SILVER_NISAB_UNITS: Decimal = dec!(52.5);

/// `GOLD_NISAB_UNITS × TRADITIONAL_UNIT_TO_GRAM`
pub const GOLD_NISAB_GRAMS: Decimal = dec!(87.45);

/// `SILVER_NISAB_UNITS × TRADITIONAL_UNIT_TO_GRAM`
pub const SILVER_NISAB_GRAMS: Decimal = dec!(612.15);

/// Zakat rate on monetary wealth (2.5%). Not configurable per call.
pub const ZAKAT_RATE: Decimal = dec!(0.025);

/// Which classical threshold governs an assessment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NisabBasis {
    Gold,
    Silver,
}

/// The Hanafi ruling on which Nisab applies to monetary wealth.
pub const HANAFI_NISAB_BASIS: NisabBasis = NisabBasis::Silver;
