//! # Zakat Assessor
//!
//! Aggregates a declared asset bundle and liability bundle into a zakatable
//! amount, compares it against the Nisab and computes the amount due.
//!
//! ## Deductible liabilities (Hanafi)
//! Only debts incurred for necessities (food, shelter, medical) and falling
//! due within the year, plus unpaid bills, reduce the zakatable base.
//! Developmental debt such as business-expansion loans or long-term
//! mortgages is never deducted, and [`LiabilityBundle`] has no field for it.

use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::inputs::IntoZakatDecimal;
use crate::madhab::ZAKAT_RATE;
use crate::math::ZakatDecimal;
use crate::types::{CalculationStep, ZakatError};

/// Stores a converted value, or records why the conversion failed under the
/// field's wire name.
fn set_amount(slot: &mut Decimal, errors: &mut Vec<ZakatError>, field: &str, val: impl IntoZakatDecimal) {
    match val.into_zakat_decimal() {
        Ok(v) => *slot = v,
        Err(ZakatError::InvalidInput(mut details)) => {
            details.field = field.to_string();
            errors.push(ZakatError::InvalidInput(details));
        }
        Err(e) => errors.push(e),
    }
}

fn first_input_error(errors: &[ZakatError]) -> Result<(), ZakatError> {
    match errors.first() {
        Some(e) => Err(e.clone()),
        None => Ok(()),
    }
}

/// One assessment's worth of wealth, by category, in currency.
///
/// Gram holdings must already be converted to currency (see
/// [`crate::pricing::holding_value`]). Unknown JSON properties are ignored and
/// never summed, so a stray `goldGram` cannot be double-counted.
///
/// The fluent setters never panic. A value that cannot be converted is
/// collected and reported by [`AssetBundle::validate`] (and therefore by
/// `calculate`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetBundle {
    pub cash: Decimal,
    pub bank_balance: Decimal,
    pub gold_value: Decimal,
    pub silver_value: Decimal,
    pub business_inventory_value: Decimal,
    pub investments_value: Decimal,
    pub investment_properties_value: Decimal,
    pub other: Decimal,
    #[serde(skip)]
    #[schemars(skip)]
    input_errors: Vec<ZakatError>,
}

impl AssetBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cash(mut self, val: impl IntoZakatDecimal) -> Self {
        set_amount(&mut self.cash, &mut self.input_errors, "assets.cash", val);
        self
    }

    pub fn bank_balance(mut self, val: impl IntoZakatDecimal) -> Self {
        set_amount(&mut self.bank_balance, &mut self.input_errors, "assets.bankBalance", val);
        self
    }

    pub fn gold_value(mut self, val: impl IntoZakatDecimal) -> Self {
        set_amount(&mut self.gold_value, &mut self.input_errors, "assets.goldValue", val);
        self
    }

    pub fn silver_value(mut self, val: impl IntoZakatDecimal) -> Self {
        set_amount(&mut self.silver_value, &mut self.input_errors, "assets.silverValue", val);
        self
    }

    pub fn business_inventory(mut self, val: impl IntoZakatDecimal) -> Self {
        set_amount(&mut self.business_inventory_value, &mut self.input_errors, "assets.businessInventoryValue", val);
        self
    }

    pub fn investments(mut self, val: impl IntoZakatDecimal) -> Self {
        set_amount(&mut self.investments_value, &mut self.input_errors, "assets.investmentsValue", val);
        self
    }

    pub fn investment_properties(mut self, val: impl IntoZakatDecimal) -> Self {
        set_amount(&mut self.investment_properties_value, &mut self.input_errors, "assets.investmentPropertiesValue", val);
        self
    }

    pub fn other(mut self, val: impl IntoZakatDecimal) -> Self {
        set_amount(&mut self.other, &mut self.input_errors, "assets.other", val);
        self
    }

    /// The summed categories, keyed by wire name. This is the complete set.
    pub fn entries(&self) -> [(&'static str, Decimal); 8] {
        [
            ("cash", self.cash),
            ("bankBalance", self.bank_balance),
            ("goldValue", self.gold_value),
            ("silverValue", self.silver_value),
            ("businessInventoryValue", self.business_inventory_value),
            ("investmentsValue", self.investments_value),
            ("investmentPropertiesValue", self.investment_properties_value),
            ("other", self.other),
        ]
    }

    pub fn total(&self) -> Decimal {
        self.entries().iter().map(|(_, v)| *v).sum()
    }

    /// Returns the first value a setter could not convert, if any.
    pub fn validate(&self) -> Result<(), ZakatError> {
        first_input_error(&self.input_errors)
    }
}

/// Deductible liabilities. Unknown JSON properties are rejected outright.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct LiabilityBundle {
    /// Debts for food, shelter or medical necessity due within the year.
    pub necessary_loans: Decimal,
    pub unpaid_bills: Decimal,
    pub other: Decimal,
    #[serde(skip)]
    #[schemars(skip)]
    input_errors: Vec<ZakatError>,
}

impl LiabilityBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn necessary_loans(mut self, val: impl IntoZakatDecimal) -> Self {
        set_amount(&mut self.necessary_loans, &mut self.input_errors, "liabilities.necessaryLoans", val);
        self
    }

    pub fn unpaid_bills(mut self, val: impl IntoZakatDecimal) -> Self {
        set_amount(&mut self.unpaid_bills, &mut self.input_errors, "liabilities.unpaidBills", val);
        self
    }

    pub fn other(mut self, val: impl IntoZakatDecimal) -> Self {
        set_amount(&mut self.other, &mut self.input_errors, "liabilities.other", val);
        self
    }

    pub fn entries(&self) -> [(&'static str, Decimal); 3] {
        [
            ("necessaryLoans", self.necessary_loans),
            ("unpaidBills", self.unpaid_bills),
            ("other", self.other),
        ]
    }

    pub fn total(&self) -> Decimal {
        self.entries().iter().map(|(_, v)| *v).sum()
    }

    pub fn validate(&self) -> Result<(), ZakatError> {
        first_input_error(&self.input_errors)
    }
}

/// Result of one assessment. Fully determined by its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ZakatAssessment {
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub total_assets: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub deductible_liabilities: Decimal,
    /// `total_assets - deductible_liabilities`. Negative when liabilities
    /// exceed assets; never clamped.
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub zakatable_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub nisab_threshold: Decimal,
    pub is_obligatory: bool,
    /// Whole currency units; zero when not obligatory.
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub zakat_due: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[schemars(with = "f64")]
    pub zakat_rate: Decimal,
    /// Step-by-step trace of how this assessment was derived.
    pub calculation_trace: Vec<CalculationStep>,
}

/// Assesses Zakat for the given bundles against a Nisab threshold.
///
/// Obligation is inclusive: wealth exactly at the threshold is obligated.
/// A negative zakatable amount is never obligated.
pub fn assess(assets: &AssetBundle, liabilities: &LiabilityBundle, nisab_threshold: Decimal) -> ZakatAssessment {
    let total_assets = assets.total();
    let deductible_liabilities = liabilities.total();
    let zakatable_amount = total_assets - deductible_liabilities;

    let is_obligatory = zakatable_amount >= nisab_threshold && zakatable_amount >= Decimal::ZERO;
    let zakat_due = if is_obligatory {
        (zakatable_amount * ZAKAT_RATE).to_whole_units()
    } else {
        Decimal::ZERO
    };

    let mut trace = Vec::new();
    for (name, amount) in assets.entries().into_iter().filter(|(_, v)| !v.is_zero()) {
        trace.push(CalculationStep::add(name, amount));
    }
    trace.push(CalculationStep::result("Total Assets", total_assets));
    for (name, amount) in liabilities.entries().into_iter().filter(|(_, v)| !v.is_zero()) {
        trace.push(CalculationStep::subtract(name, amount));
    }
    trace.push(CalculationStep::result("Deductible Liabilities", deductible_liabilities));
    trace.push(CalculationStep::result("Zakatable Amount", zakatable_amount));
    trace.push(CalculationStep::compare("Nisab Threshold (Silver)", nisab_threshold));

    if is_obligatory {
        trace.push(CalculationStep::rate("Zakat Rate", ZAKAT_RATE));
        trace.push(CalculationStep::result("Zakat Due", zakat_due));
    } else if zakatable_amount < Decimal::ZERO {
        trace.push(CalculationStep::info("Liabilities exceed assets - No Zakat Due"));
    } else {
        trace.push(CalculationStep::info("Zakatable amount below Nisab - No Zakat Due"));
    }

    tracing::debug!(
        %total_assets,
        %deductible_liabilities,
        %zakatable_amount,
        %nisab_threshold,
        is_obligatory,
        %zakat_due,
        "assessed zakat"
    );

    ZakatAssessment {
        total_assets,
        deductible_liabilities,
        zakatable_amount,
        nisab_threshold,
        is_obligatory,
        zakat_due,
        zakat_rate: ZAKAT_RATE,
        calculation_trace: trace,
    }
}

impl ZakatAssessment {
    /// Why no Zakat is due, if that is the outcome.
    pub fn exemption_reason(&self) -> Option<&'static str> {
        if self.is_obligatory {
            None
        } else if self.zakatable_amount < Decimal::ZERO {
            Some("Liabilities exceed assets")
        } else {
            Some("Below Nisab")
        }
    }

    /// Returns a concise status string.
    /// Format: "{Obligatory/Exempt} - Due: {Amount}"
    pub fn summary(&self) -> String {
        match self.exemption_reason() {
            None => format!("Obligatory - Due: {}", self.zakat_due),
            Some(reason) => format!("Exempt ({}) - Due: 0", reason),
        }
    }

    /// Generates a plain-text, step-by-step explanation of the assessment.
    pub fn explain(&self) -> String {
        use std::fmt::Write;

        let width = self
            .calculation_trace
            .iter()
            .map(|step| step.description.len())
            .max()
            .unwrap_or(20)
            .max(20);

        let mut output = String::new();
        let _ = writeln!(output, "Zakat assessment:");
        let _ = writeln!(output, "{:-<50}", "");
        for step in &self.calculation_trace {
            let _ = writeln!(output, "{}", step.render(width));
        }
        let _ = writeln!(output, "{:-<50}", "");
        match self.exemption_reason() {
            None => {
                let _ = writeln!(output, "Status: OBLIGATORY");
                let _ = writeln!(output, "Amount Due: {}", self.zakat_due);
            }
            Some(reason) => {
                let _ = writeln!(output, "Status: EXEMPT");
                let _ = writeln!(output, "Reason: {}", reason);
            }
        }
        output
    }
}

impl std::fmt::Display for ZakatAssessment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Zakatable: {} | Nisab: {}", self.zakatable_amount, self.nisab_threshold)?;
        write!(f, "Status: {}", self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Operation;
    use rust_decimal_macros::dec;

    const NISAB: Decimal = dec!(109248);

    #[test]
    fn test_below_nisab() {
        let assets = AssetBundle::new().cash(50_000).bank_balance(30_000);
        let result = assess(&assets, &LiabilityBundle::new(), NISAB);

        assert_eq!(result.total_assets, dec!(80000));
        assert_eq!(result.zakatable_amount, dec!(80000));
        assert!(!result.is_obligatory);
        assert_eq!(result.zakat_due, Decimal::ZERO);
        assert_eq!(result.exemption_reason(), Some("Below Nisab"));
    }

    #[test]
    fn test_above_nisab_with_necessary_loan() {
        let assets = AssetBundle::new().cash(100_000).bank_balance(50_000);
        let liabilities = LiabilityBundle::new().necessary_loans(20_000);
        let result = assess(&assets, &liabilities, NISAB);

        assert_eq!(result.total_assets, dec!(150000));
        assert_eq!(result.deductible_liabilities, dec!(20000));
        assert_eq!(result.zakatable_amount, dec!(130000));
        assert!(result.is_obligatory);
        assert_eq!(result.zakat_due, dec!(3250));
        assert_eq!(result.zakat_rate, dec!(0.025));
    }

    #[test]
    fn test_negative_zakatable_is_preserved() {
        let liabilities = LiabilityBundle::new().necessary_loans(10_000);
        let result = assess(&AssetBundle::new(), &liabilities, NISAB);

        assert_eq!(result.total_assets, Decimal::ZERO);
        assert_eq!(result.zakatable_amount, dec!(-10000));
        assert!(!result.is_obligatory);
        assert_eq!(result.zakat_due, Decimal::ZERO);
        assert_eq!(result.exemption_reason(), Some("Liabilities exceed assets"));
    }

    #[test]
    fn test_negative_never_obligatory_against_zero_nisab() {
        let liabilities = LiabilityBundle::new().unpaid_bills(1);
        let result = assess(&AssetBundle::new(), &liabilities, Decimal::ZERO);
        assert!(!result.is_obligatory);
    }

    #[test]
    fn test_exactly_at_nisab_is_obligatory() {
        let assets = AssetBundle::new().bank_balance(NISAB);
        let result = assess(&assets, &LiabilityBundle::new(), NISAB);

        assert!(result.is_obligatory);
        // 109248 × 0.025 = 2731.2
        assert_eq!(result.zakat_due, dec!(2731));
    }

    #[test]
    fn test_one_below_nisab_is_exempt() {
        let assets = AssetBundle::new().bank_balance(NISAB - dec!(0.01));
        let result = assess(&assets, &LiabilityBundle::new(), NISAB);
        assert!(!result.is_obligatory);
    }

    #[test]
    fn test_all_eight_categories_are_summed() {
        let assets = AssetBundle::new()
            .cash(1)
            .bank_balance(2)
            .gold_value(3)
            .silver_value(4)
            .business_inventory(5)
            .investments(6)
            .investment_properties(7)
            .other(8);
        assert_eq!(assets.total(), dec!(36));
    }

    #[test]
    fn test_all_three_liabilities_are_deducted() {
        let liabilities = LiabilityBundle::new().necessary_loans(100).unpaid_bills(20).other(3);
        assert_eq!(liabilities.total(), dec!(123));
    }

    #[test]
    fn test_due_rounds_half_up() {
        // 200020 × 0.025 = 5000.5
        let assets = AssetBundle::new().cash(200_020);
        let result = assess(&assets, &LiabilityBundle::new(), NISAB);
        assert_eq!(result.zakat_due, dec!(5001));
    }

    #[test]
    fn test_unparseable_setter_input_is_reported() {
        let assets = AssetBundle::new().cash("1,000,000").bank_balance(f64::NAN).investments(500);
        assert_eq!(assets.cash, Decimal::ZERO);
        assert_eq!(assets.investments_value, dec!(500));

        let err = assets.validate().unwrap_err();
        assert!(matches!(err, ZakatError::InvalidInput(_)));
        assert_eq!(err.field(), Some("assets.cash"));

        let liabilities = LiabilityBundle::new().necessary_loans(1000).unpaid_bills("twelve");
        assert_eq!(liabilities.validate().unwrap_err().field(), Some("liabilities.unpaidBills"));

        assert!(AssetBundle::new().cash("1000000").validate().is_ok());
    }

    #[test]
    fn test_unknown_asset_fields_are_ignored() {
        let json = r#"{"cash": 1000, "goldGram": 50, "goldValue": "470440"}"#;
        let assets: AssetBundle = serde_json::from_str(json).unwrap();
        assert_eq!(assets.total(), dec!(471440));
    }

    #[test]
    fn test_non_deductible_liability_is_rejected() {
        let json = r#"{"necessaryLoans": 1000, "businessExpansionLoan": 500000}"#;
        let result: Result<LiabilityBundle, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_trace_records_steps() {
        let assets = AssetBundle::new().cash(100_000).bank_balance(50_000);
        let liabilities = LiabilityBundle::new().necessary_loans(20_000);
        let result = assess(&assets, &liabilities, NISAB);

        let ops: Vec<Operation> = result.calculation_trace.iter().map(|s| s.operation).collect();
        assert_eq!(
            ops,
            vec![
                Operation::Add,
                Operation::Add,
                Operation::Result,
                Operation::Subtract,
                Operation::Result,
                Operation::Result,
                Operation::Compare,
                Operation::Rate,
                Operation::Result,
            ]
        );
        let last = result.calculation_trace.last().unwrap();
        assert_eq!(last.amount, Some(dec!(3250)));
    }

    #[test]
    fn test_explain_and_summary() {
        let assets = AssetBundle::new().cash(100_000).bank_balance(50_000);
        let result = assess(&assets, &LiabilityBundle::new(), NISAB);

        let text = result.explain();
        assert!(text.contains("Status: OBLIGATORY"));
        assert!(text.contains("Amount Due: 3750"));
        assert!(text.contains("bankBalance"));
        assert_eq!(result.summary(), "Obligatory - Due: 3750");

        let exempt = assess(&AssetBundle::new(), &LiabilityBundle::new(), NISAB);
        assert!(exempt.explain().contains("Reason: Below Nisab"));
    }
}
