use rust_decimal::Decimal;
use std::str::FromStr;
use crate::types::ZakatError;

/// Trait for converting various types into `Decimal` for Zakat calculations.
///
/// This lets callers pass `i32`, `f64`, `&str`, etc. straight into the
/// constructors without wrapping them in `dec!()` or `Decimal::from()`.
pub trait IntoZakatDecimal {
    fn into_zakat_decimal(self) -> Result<Decimal, ZakatError>;
}

impl IntoZakatDecimal for Decimal {
    fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
        Ok(self)
    }
}

macro_rules! impl_into_zakat_decimal_int {
    ($($t:ty),*) => {
        $(
            impl IntoZakatDecimal for $t {
                fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
                    Ok(Decimal::from(self))
                }
            }
        )*
    };
}

impl_into_zakat_decimal_int!(i32, u32, i64, u64, isize, usize);

macro_rules! impl_into_zakat_decimal_float {
    ($($t:ty),*) => {
        $(
            impl IntoZakatDecimal for $t {
                fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
                    // Go through the shortest display form so 0.1 stays 0.1.
                    Decimal::from_str(&self.to_string())
                        .map_err(|_| ZakatError::invalid_input("value", self, "not a finite number"))
                }
            }
        )*
    };
}

impl_into_zakat_decimal_float!(f32, f64);

impl IntoZakatDecimal for &str {
    fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
        Decimal::from_str(self.trim())
            .map_err(|e| ZakatError::invalid_input("value", self, format!("invalid number format: {}", e)))
    }
}

impl IntoZakatDecimal for String {
    fn into_zakat_decimal(self) -> Result<Decimal, ZakatError> {
        self.as_str().into_zakat_decimal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_conversions() {
        assert_eq!(50_000.into_zakat_decimal().unwrap(), dec!(50000));
        assert_eq!(0.1_f64.into_zakat_decimal().unwrap(), dec!(0.1));
        assert_eq!(" 178.4 ".into_zakat_decimal().unwrap(), dec!(178.4));
        assert_eq!(String::from("11.66").into_zakat_decimal().unwrap(), dec!(11.66));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!("twelve".into_zakat_decimal().is_err());
        assert!(f64::NAN.into_zakat_decimal().is_err());
        assert!(f64::INFINITY.into_zakat_decimal().is_err());
    }
}
