//! Rounding rules shared by the calculation stages.
//!
//! These change the computed values themselves. Display formatting happens
//! downstream and is not this module's concern.

use rust_decimal::{Decimal, RoundingStrategy};

pub trait ZakatDecimal {
    /// Rounds to the nearest whole currency unit, halves away from zero.
    fn to_whole_units(self) -> Decimal;

    /// Rounds to two decimal places, halves away from zero.
    fn to_cents(self) -> Decimal;
}

impl ZakatDecimal for Decimal {
    fn to_whole_units(self) -> Decimal {
        self.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }

    fn to_cents(self) -> Decimal {
        self.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}
