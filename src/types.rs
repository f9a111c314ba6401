use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The kind of arithmetic a trace step represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Initial,
    Add,
    Subtract,
    Compare,
    Rate,
    Result,
    Info,
}

impl Operation {
    fn symbol(&self) -> &'static str {
        match self {
            Operation::Initial | Operation::Info => " ",
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Compare => "?",
            Operation::Rate => "x",
            Operation::Result => "=",
        }
    }
}

/// Represents a single step in the Zakat calculation process.
///
/// Steps are recorded in the order the assessor performs them so a caller can
/// show exactly how `zakat_due` was reached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculationStep {
    /// Human-readable description of what this step does.
    pub description: String,
    /// The value at this step (if applicable).
    #[serde(with = "rust_decimal::serde::float_option")]
    #[schemars(with = "Option<f64>")]
    pub amount: Option<Decimal>,
    pub operation: Operation,
}

impl CalculationStep {
    fn with_amount(description: impl Into<String>, amount: Decimal, operation: Operation) -> Self {
        Self {
            description: description.into(),
            amount: Some(amount),
            operation,
        }
    }

    pub fn initial(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with_amount(description, amount, Operation::Initial)
    }

    pub fn add(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with_amount(description, amount, Operation::Add)
    }

    pub fn subtract(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with_amount(description, amount, Operation::Subtract)
    }

    pub fn compare(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with_amount(description, amount, Operation::Compare)
    }

    pub fn rate(description: impl Into<String>, rate: Decimal) -> Self {
        Self::with_amount(description, rate, Operation::Rate)
    }

    pub fn result(description: impl Into<String>, amount: Decimal) -> Self {
        Self::with_amount(description, amount, Operation::Result)
    }

    pub fn info(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            amount: None,
            operation: Operation::Info,
        }
    }

    /// Renders the step as one aligned line of an explanation.
    pub(crate) fn render(&self, width: usize) -> String {
        match (self.operation, self.amount) {
            (Operation::Info, _) => format!("  INFO: {}", self.description),
            (Operation::Rate, Some(amount)) => format!(
                "  {:<width$} : {} {:>14.3}",
                self.description,
                self.operation.symbol(),
                amount,
                width = width
            ),
            (_, Some(amount)) => format!(
                "  {:<width$} : {} {:>14.2}",
                self.description,
                self.operation.symbol(),
                amount,
                width = width
            ),
            (_, None) => format!("  {:<width$} : [No Amount]", self.description, width = width),
        }
    }
}

/// Details attached to an [`ZakatError::InvalidInput`] rejection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvalidInputDetails {
    /// Wire name of the offending field (e.g. `assets.cash`).
    pub field: String,
    /// The rejected value, as the caller supplied it.
    pub value: String,
    pub reason: String,
}

/// Errors raised at the validation boundary and by price-source collaborators.
///
/// The three pure stages (`normalize`, `resolve_nisab`, `assess`) never return
/// an error; everything here belongs to the code that feeds them.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq)]
pub enum ZakatError {
    #[error("Invalid input for '{}': {} (got {})", .0.field, .0.reason, .0.value)]
    InvalidInput(Box<InvalidInputDetails>),

    #[error("{metal} price is zero; the price feed is probably unavailable")]
    PriceUnavailable { metal: String },

    #[error("Metal prices are {age_days} days old (maximum allowed {max_age_days})")]
    StalePrices { age_days: i64, max_age_days: i64 },

    #[error("Configuration error: {reason}")]
    ConfigurationError { reason: String },

    #[error("Price source error: {0}")]
    NetworkError(String),
}

impl ZakatError {
    /// Shorthand for building an [`ZakatError::InvalidInput`].
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        ZakatError::InvalidInput(Box::new(InvalidInputDetails {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }))
    }

    pub fn configuration(reason: impl Into<String>) -> Self {
        ZakatError::ConfigurationError { reason: reason.into() }
    }

    /// Returns the offending field for input errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            ZakatError::InvalidInput(details) => Some(details.field.as_str()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_operation_serializes_camel_case() {
        let step = CalculationStep::initial("Cash", dec!(100));
        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains(r#""operation":"initial""#));
        assert!(json.contains(r#""amount":100.0"#));

        let info = CalculationStep::info("note");
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains(r#""amount":null"#));
    }

    #[test]
    fn test_invalid_input_display() {
        let err = ZakatError::invalid_input("assets.cash", "-5", "must be non-negative");
        assert_eq!(
            err.to_string(),
            "Invalid input for 'assets.cash': must be non-negative (got -5)"
        );
        assert_eq!(err.field(), Some("assets.cash"));
    }

    #[test]
    fn test_error_roundtrips_through_json() {
        let err = ZakatError::StalePrices { age_days: 40, max_age_days: 7 };
        let json = serde_json::to_string(&err).unwrap();
        let back: ZakatError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }

    #[test]
    fn test_render_rate_uses_three_decimals() {
        let line = CalculationStep::rate("Zakat Rate", dec!(0.025)).render(12);
        assert!(line.contains("0.025"));
        assert!(line.contains('x'));
    }
}
