use colored::Colorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use zakat_engine::prelude::*;

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn row(item: &str, amount: String) -> Row {
    Row {
        item: item.to_string(),
        amount,
    }
}

fn table(rows: Vec<Row>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn price_table(quote: &PriceQuote, freshness: PriceFreshness, nisab: &NisabThreshold, region: Region) -> String {
    let derived = quote.prices.normalize();
    let freshness = match freshness {
        PriceFreshness::Fresh => "fresh".green().to_string(),
        PriceFreshness::Stale { age_days } => format!("stale ({} days old)", age_days).yellow().to_string(),
    };

    let rows = vec![
        row("Source", quote.source.clone()),
        row("As of", quote.as_of.to_string()),
        row("Freshness", freshness),
        row("Gold / gram", quote.prices.gold_per_gram.to_string()),
        row("Silver / gram", quote.prices.silver_per_gram.to_string()),
        row("Gold / vori", derived.gold_per_traditional_unit.to_string()),
        row("Silver / vori", derived.silver_per_traditional_unit.to_string()),
        row("Gold selling / gram", derived.gold_selling_per_gram.to_string()),
        row("Silver selling / gram", derived.silver_selling_per_gram.to_string()),
        row("Gold Nisab", nisab.gold_nisab.to_string()),
        row("Silver Nisab", nisab.silver_nisab.to_string()),
        row("Applied Nisab", nisab.recommended.to_string().bold().to_string()),
    ];

    let wording = region.nisab_wording();
    format!("{}\n{}\n{}", table(rows), wording.basis_note.dimmed(), wording.weight_note.dimmed())
}

pub fn response_table(response: &ZakatResponse, region: Region) -> String {
    let assessment = &response.assessment;
    let status = match assessment.exemption_reason() {
        None => "OBLIGATORY".green().bold().to_string(),
        Some(reason) => format!("EXEMPT ({})", reason).yellow().to_string(),
    };

    let rows = vec![
        row("Total Assets", assessment.total_assets.to_string()),
        row("Deductible Liabilities", assessment.deductible_liabilities.to_string()),
        row("Zakatable Amount", assessment.zakatable_amount.to_string()),
        row("Nisab Threshold", assessment.nisab_threshold.to_string()),
        row("Status", status),
        row("Zakat Due", assessment.zakat_due.to_string().bold().to_string()),
    ];

    format!("{}\n{}", table(rows), region.nisab_wording().basis_note.dimmed())
}
