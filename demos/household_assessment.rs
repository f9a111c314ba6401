//! A Dhaka household's annual assessment, end to end.
//!
//! Prices come from the fallback table, jewellery is entered in vori, and the
//! finished assessment is wrapped in a record ready to be stored.
//!
//! Run with: `cargo run --example household_assessment`

use rust_decimal_macros::dec;
use zakat_engine::prelude::*;

#[tokio::main]
async fn main() -> Result<(), ZakatError> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let config = PricingConfig::default();
    let provider = StaticPriceProvider::new(config.initial_quote()?);
    let today = chrono::Local::now().date_naive();
    let (quote, freshness) = fetch_checked(&provider, &config.staleness, today).await?;

    println!("Prices: {} as of {} ({:?})", quote.source, quote.as_of, freshness);

    let derived = quote.prices.normalize();
    let nisab = resolve_nisab(&derived);
    println!("Gold Nisab:   {}", nisab.gold_nisab);
    println!("Silver Nisab: {} (applied)", nisab.silver_nisab);

    // 3 vori of wedding jewellery, 20 g of silverware
    let gold = holding_value(vori_to_grams(dec!(3))?, derived.gold_selling_per_gram)?;
    let silver = holding_value(dec!(20), derived.silver_selling_per_gram)?;

    let assets = AssetBundle::new()
        .cash(35_000)
        .bank_balance(120_000)
        .gold_value(gold)
        .silver_value(silver)
        .investments(60_000);
    let liabilities = LiabilityBundle::new().necessary_loans(15_000).unpaid_bills(6_200);

    let record = AssessmentRecord::capture(ZakatRequest::new(quote.prices, assets, liabilities))?;
    let assessment = &record.response.assessment;

    let region = Region::from_timezone("Asia/Dhaka");
    println!("\n{}", assessment.explain());
    println!("{}", region.nisab_wording().basis_note);
    println!("{}", assessment.summary());
    println!("\nRecord {} created at {}", record.id, record.created_at);

    Ok(())
}
