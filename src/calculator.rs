//! The one logical operation callers use: raw metal prices plus declared
//! wealth in, a full assessment out.
//!
//! This is also the validation boundary. The three pure stages assume their
//! inputs have already passed [`ZakatRequest::validate`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::assessment::{AssetBundle, LiabilityBundle, ZakatAssessment, assess};
use crate::nisab::{NisabThreshold, resolve_nisab};
use crate::pricing::{DerivedPrices, MetalPrices, normalize};
use crate::types::ZakatError;

/// Upper bound on any single price or bundle field. Keeps every intermediate
/// product well inside `Decimal`'s range.
pub const MAX_INPUT_AMOUNT: Decimal = dec!(1000000000000000);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ZakatRequest {
    pub gold_price_per_gram: Decimal,
    pub silver_price_per_gram: Decimal,
    #[serde(default)]
    pub assets: AssetBundle,
    #[serde(default)]
    pub liabilities: LiabilityBundle,
}

/// Every amount in the response serializes as a JSON number. Requests accept
/// numbers or numeric strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ZakatResponse {
    pub derived_prices: DerivedPrices,
    pub nisab: NisabThreshold,
    pub assessment: ZakatAssessment,
}

fn check_amount(field: String, value: Decimal) -> Result<(), ZakatError> {
    if value < Decimal::ZERO {
        return Err(ZakatError::invalid_input(field, value, "must be non-negative"));
    }
    if value > MAX_INPUT_AMOUNT {
        return Err(ZakatError::invalid_input(field, value, "exceeds the supported maximum"));
    }
    Ok(())
}

impl ZakatRequest {
    pub fn new(prices: MetalPrices, assets: AssetBundle, liabilities: LiabilityBundle) -> Self {
        Self {
            gold_price_per_gram: prices.gold_per_gram,
            silver_price_per_gram: prices.silver_per_gram,
            assets,
            liabilities,
        }
    }

    pub fn prices(&self) -> MetalPrices {
        MetalPrices {
            gold_per_gram: self.gold_price_per_gram,
            silver_per_gram: self.silver_price_per_gram,
        }
    }

    /// Rejects unconvertible, negative or out-of-range values and zero prices.
    ///
    /// A zero price is treated as "feed unavailable": letting it through
    /// would produce a zero Nisab and make Zakat trivially obligatory.
    pub fn validate(&self) -> Result<(), ZakatError> {
        self.assets.validate()?;
        self.liabilities.validate()?;

        check_amount("goldPricePerGram".to_string(), self.gold_price_per_gram)?;
        check_amount("silverPricePerGram".to_string(), self.silver_price_per_gram)?;

        for (name, value) in self.assets.entries() {
            check_amount(format!("assets.{}", name), value)?;
        }
        for (name, value) in self.liabilities.entries() {
            check_amount(format!("liabilities.{}", name), value)?;
        }

        if self.gold_price_per_gram.is_zero() {
            return Err(ZakatError::PriceUnavailable { metal: "gold".to_string() });
        }
        if self.silver_price_per_gram.is_zero() {
            return Err(ZakatError::PriceUnavailable { metal: "silver".to_string() });
        }
        Ok(())
    }
}

impl std::str::FromStr for ZakatRequest {
    type Err = ZakatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
            .map_err(|e| ZakatError::invalid_input("request", "<json>", format!("malformed request: {}", e)))
    }
}

/// Runs the full pipeline: validate, normalize, resolve Nisab, assess.
pub fn calculate(request: &ZakatRequest) -> Result<ZakatResponse, ZakatError> {
    request.validate()?;

    let derived_prices = normalize(request.gold_price_per_gram, request.silver_price_per_gram);
    let nisab = resolve_nisab(&derived_prices);
    let assessment = assess(&request.assets, &request.liabilities, nisab.recommended);

    tracing::info!(
        nisab = %nisab.recommended,
        zakatable = %assessment.zakatable_amount,
        obligatory = assessment.is_obligatory,
        due = %assessment.zakat_due,
        "zakat calculated"
    );

    Ok(ZakatResponse {
        derived_prices,
        nisab,
        assessment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn request() -> ZakatRequest {
        ZakatRequest::new(
            MetalPrices::new(11761, 223).unwrap(),
            AssetBundle::new().cash(100_000).bank_balance(50_000),
            LiabilityBundle::new().necessary_loans(20_000),
        )
    }

    #[test]
    fn test_pipeline() {
        let response = calculate(&request()).unwrap();

        assert_eq!(response.derived_prices.silver_selling_per_gram, dec!(178.40));
        assert_eq!(response.nisab.recommended, dec!(109208));
        assert_eq!(response.assessment.nisab_threshold, response.nisab.recommended);
        assert!(response.assessment.is_obligatory);
        assert_eq!(response.assessment.zakat_due, dec!(3250));
    }

    #[test]
    fn test_rejects_negative_asset() {
        let mut req = request();
        req.assets.investments_value = dec!(-1);
        let err = calculate(&req).unwrap_err();
        assert_eq!(err.field(), Some("assets.investmentsValue"));
    }

    #[test]
    fn test_rejects_negative_liability() {
        let mut req = request();
        req.liabilities.unpaid_bills = dec!(-5);
        assert_eq!(calculate(&req).unwrap_err().field(), Some("liabilities.unpaidBills"));
    }

    #[test]
    fn test_rejects_unparseable_setter_input() {
        let req = ZakatRequest::new(
            MetalPrices::new(11761, 223).unwrap(),
            AssetBundle::new().cash("1,000").bank_balance(500_000),
            LiabilityBundle::new(),
        );
        let err = calculate(&req).unwrap_err();
        assert!(matches!(err, ZakatError::InvalidInput(_)));
        assert_eq!(err.field(), Some("assets.cash"));
    }

    #[test]
    fn test_rejects_oversized_amount() {
        let mut req = request();
        req.assets.cash = MAX_INPUT_AMOUNT + Decimal::ONE;
        assert!(matches!(calculate(&req), Err(ZakatError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_zero_price() {
        let mut req = request();
        req.silver_price_per_gram = Decimal::ZERO;
        assert_eq!(
            calculate(&req).unwrap_err(),
            ZakatError::PriceUnavailable { metal: "silver".to_string() }
        );

        let mut req = request();
        req.gold_price_per_gram = Decimal::ZERO;
        assert!(matches!(calculate(&req), Err(ZakatError::PriceUnavailable { .. })));
    }

    #[test]
    fn test_from_str_defaults_missing_bundles() {
        let req = ZakatRequest::from_str(r#"{"goldPricePerGram": 11761, "silverPricePerGram": 223}"#).unwrap();
        assert_eq!(req.assets, AssetBundle::default());
        assert_eq!(req.liabilities, LiabilityBundle::default());
        assert!(ZakatRequest::from_str("{").is_err());
    }
}
