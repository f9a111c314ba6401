//! # Nisab Resolver
//!
//! Computes both classical thresholds in currency from the selling prices and
//! selects the one that governs.
//!
//! ## Fiqh basis
//! Silver's Nisab is, under any realistic gold/silver ratio, far lower than
//! gold's, so it brings more people into the obligation. The Hanafi position
//! for the general public fixes the silver threshold. `recommended` is
//! therefore always `silver_nisab`, even for inputs where gold comes out lower.

use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::madhab::{GOLD_NISAB_GRAMS, HANAFI_NISAB_BASIS, NisabBasis, SILVER_NISAB_GRAMS};
use crate::math::ZakatDecimal;
use crate::pricing::DerivedPrices;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NisabThreshold {
    /// `round(87.45 × gold_selling_per_gram)`
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub gold_nisab: Decimal,
    /// `round(612.15 × silver_selling_per_gram)`
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub silver_nisab: Decimal,
    /// The threshold assessments are compared against.
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub recommended: Decimal,
    pub basis: NisabBasis,
}

impl NisabThreshold {
    /// The threshold for the given basis, regardless of which one is recommended.
    pub fn for_basis(&self, basis: NisabBasis) -> Decimal {
        match basis {
            NisabBasis::Gold => self.gold_nisab,
            NisabBasis::Silver => self.silver_nisab,
        }
    }
}

pub fn gold_nisab(gold_selling_per_gram: Decimal) -> Decimal {
    (GOLD_NISAB_GRAMS * gold_selling_per_gram).to_whole_units()
}

pub fn silver_nisab(silver_selling_per_gram: Decimal) -> Decimal {
    (SILVER_NISAB_GRAMS * silver_selling_per_gram).to_whole_units()
}

/// Resolves the Nisab threshold from derived prices.
pub fn resolve_nisab(prices: &DerivedPrices) -> NisabThreshold {
    let gold = gold_nisab(prices.gold_selling_per_gram);
    let silver = silver_nisab(prices.silver_selling_per_gram);

    let threshold = NisabThreshold {
        gold_nisab: gold,
        silver_nisab: silver,
        recommended: silver,
        basis: HANAFI_NISAB_BASIS,
    };
    tracing::debug!(gold_nisab = %gold, silver_nisab = %silver, basis = %threshold.basis, "resolved nisab");
    threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::normalize;
    use rust_decimal_macros::dec;

    #[test]
    fn test_nisab_from_market_prices() {
        let nisab = resolve_nisab(&normalize(dec!(11761), dec!(223)));

        // 612.15 × 178.40 = 109207.56
        assert_eq!(nisab.silver_nisab, dec!(109208));
        // 87.45 × 9408.80 = 822799.56
        assert_eq!(nisab.gold_nisab, dec!(822800));
        assert_eq!(nisab.recommended, nisab.silver_nisab);
        assert_eq!(nisab.basis, NisabBasis::Silver);
    }

    #[test]
    fn test_silver_recommended_even_when_gold_is_lower() {
        // Contrived prices where gold's threshold undercuts silver's.
        let prices = DerivedPrices {
            gold_selling_per_gram: dec!(1),
            silver_selling_per_gram: dec!(100),
            ..Default::default()
        };
        let nisab = resolve_nisab(&prices);

        assert!(nisab.gold_nisab < nisab.silver_nisab);
        assert_eq!(nisab.recommended, dec!(61215));
        assert_eq!(nisab.basis, NisabBasis::Silver);
    }

    #[test]
    fn test_for_basis() {
        let nisab = resolve_nisab(&normalize(dec!(100), dec!(2)));
        // 100 × 0.8 = 80; 87.45 × 80 = 6996
        assert_eq!(nisab.for_basis(NisabBasis::Gold), dec!(6996));
        // 2 × 0.8 = 1.6; 612.15 × 1.6 = 979.44
        assert_eq!(nisab.for_basis(NisabBasis::Silver), dec!(979));
    }

    #[test]
    fn test_zero_prices_give_zero_nisab() {
        let nisab = resolve_nisab(&DerivedPrices::default());
        assert_eq!(nisab.recommended, Decimal::ZERO);
    }
}
