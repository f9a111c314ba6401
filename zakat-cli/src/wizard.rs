use colored::Colorize;
use inquire::validator::{ErrorMessage, Validation};
use inquire::{Confirm, CustomType, Select};
use rust_decimal::Decimal;

use zakat_engine::prelude::*;

fn amount(prompt: &str, help: &str) -> Result<Decimal, inquire::InquireError> {
    CustomType::<Decimal>::new(prompt)
        .with_default(Decimal::ZERO)
        .with_help_message(help)
        .with_error_message("Please enter a valid number")
        .with_validator(|input: &Decimal| {
            if *input < Decimal::ZERO {
                Ok(Validation::Invalid(ErrorMessage::Custom("Value must be non-negative".to_string())))
            } else if *input > MAX_INPUT_AMOUNT {
                Ok(Validation::Invalid(ErrorMessage::Custom(format!("Value must not exceed {}", MAX_INPUT_AMOUNT))))
            } else {
                Ok(Validation::Valid)
            }
        })
        .prompt()
}

/// Gold or silver holding, entered in grams or vori, valued at the selling price.
fn metal_holding(metal: &str, selling_per_gram: Decimal) -> Result<Decimal, Box<dyn std::error::Error>> {
    if !Confirm::new(&format!("Do you hold any {}?", metal)).with_default(false).prompt()? {
        return Ok(Decimal::ZERO);
    }

    let unit = Select::new("Weight unit:", vec!["grams", "vori"]).prompt()?;
    let weight = amount(&format!("{} weight ({}):", metal, unit), "All purities together")?;
    let grams = if unit == "vori" { vori_to_grams(weight)? } else { weight };

    let value = holding_value(grams, selling_per_gram)?;
    println!("{}", format!("  valued at {} ({} g × {})", value, grams, selling_per_gram).dimmed());
    Ok(value)
}

/// Walks the user through every asset and liability category.
pub fn run_wizard_mode(prices: &MetalPrices) -> Result<ZakatRequest, Box<dyn std::error::Error>> {
    let derived = prices.normalize();

    println!("\n{}", "GUIDED ZAKAT WIZARD".bright_cyan().bold());
    println!("{}", "Enter 0 or press Enter to skip a category. Ctrl+C exits.".dimmed());

    println!("\n{}", "--- Cash & Savings ---".bright_green());
    let mut assets = AssetBundle::new()
        .cash(amount("Cash on hand:", "Physical cash in any currency, converted")?)
        .bank_balance(amount("Bank balance:", "Savings and current accounts")?);

    println!("\n{}", "--- Precious Metals ---".bright_yellow());
    assets = assets
        .gold_value(metal_holding("gold", derived.gold_selling_per_gram)?)
        .silver_value(metal_holding("silver", derived.silver_selling_per_gram)?);

    println!("\n{}", "--- Business & Investments ---".bright_blue());
    assets = assets
        .business_inventory(amount("Business inventory:", "Goods held for sale, at market value")?)
        .investments(amount("Investments:", "Shares, funds, crypto at market value")?)
        .investment_properties(amount("Investment properties:", "Property bought for resale")?)
        .other(amount("Other zakatable assets:", "Receivables you expect to collect")?);

    println!("\n{}", "--- Liabilities ---".bright_magenta());
    println!(
        "{}",
        "Only debts for necessities due this year count. Business-expansion loans and long-term mortgages do not."
            .dimmed()
    );
    let liabilities = LiabilityBundle::new()
        .necessary_loans(amount("Loans for necessities:", "Food, shelter, medical")?)
        .unpaid_bills(amount("Unpaid bills:", "Utilities, rent, fees already due")?)
        .other(amount("Other deductible debts:", "Other short-term necessary debts")?);

    println!("\n{}", "Wizard complete! Calculating...".bold());
    Ok(ZakatRequest::new(*prices, assets, liabilities))
}
