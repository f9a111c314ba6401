//! # Zakat CLI
//!
//! Command-line front end for the Hanafi Zakat engine.
//!
//! ## Usage
//! ```bash
//! # Assess a request file
//! zakat-cli calculate --input request.json
//!
//! # Assess from flags, with prices from the configured source
//! zakat-cli assess --cash 100000 --bank-balance 50000 --necessary-loans 20000
//!
//! # Show the current quote and Nisab
//! zakat-cli prices --offline
//!
//! # Answer questions instead of passing flags
//! zakat-cli wizard
//! ```

use clap::{Args as ClapArgs, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use zakat_engine::prelude::*;

mod config_loader;
mod price_source;
mod render;
mod wizard;

use config_loader::CliConfig;

#[derive(Parser, Debug)]
#[command(name = "zakat-cli")]
#[command(version)]
#[command(about = "Hanafi Zakat calculator", long_about = None)]
struct Args {
    /// Enable file logging to logs/ directory
    #[arg(long, global = true, default_value = "false")]
    log: bool,

    /// Ignore the price file and use configured or fallback prices
    #[arg(long, global = true, default_value = "false")]
    offline: bool,

    /// Gold price per gram, traditional grade (overrides every other source)
    #[arg(long, global = true, requires = "silver_price")]
    gold_price: Option<Decimal>,

    /// Silver price per gram (overrides every other source)
    #[arg(long, global = true, requires = "gold_price")]
    silver_price: Option<Decimal>,

    /// Alternative config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assess a ZakatRequest JSON file
    Calculate {
        #[arg(short, long)]
        input: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Assess wealth given as flags
    Assess {
        #[command(flatten)]
        wealth: WealthArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show the current quote, derived prices and Nisab
    Prices {
        #[arg(long, default_value = "false")]
        json: bool,
    },
    /// Interactive questionnaire
    Wizard {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(ClapArgs, Debug)]
struct OutputArgs {
    /// Print the response as JSON
    #[arg(long, default_value = "false")]
    json: bool,

    /// Write an assessment record (JSON) to this path
    #[arg(long)]
    save: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
struct WealthArgs {
    #[arg(long, default_value = "0")]
    cash: Decimal,
    #[arg(long, default_value = "0")]
    bank_balance: Decimal,
    /// Currency value of gold held
    #[arg(long, default_value = "0", conflicts_with = "gold_grams")]
    gold_value: Decimal,
    /// Gold held in grams, valued at the selling price
    #[arg(long)]
    gold_grams: Option<Decimal>,
    #[arg(long, default_value = "0", conflicts_with = "silver_grams")]
    silver_value: Decimal,
    #[arg(long)]
    silver_grams: Option<Decimal>,
    #[arg(long, default_value = "0")]
    business_inventory: Decimal,
    #[arg(long, default_value = "0")]
    investments: Decimal,
    #[arg(long, default_value = "0")]
    investment_properties: Decimal,
    #[arg(long, default_value = "0")]
    other_assets: Decimal,
    #[arg(long, default_value = "0")]
    necessary_loans: Decimal,
    #[arg(long, default_value = "0")]
    unpaid_bills: Decimal,
    #[arg(long, default_value = "0")]
    other_liabilities: Decimal,
}

impl WealthArgs {
    fn into_request(self, prices: MetalPrices) -> Result<ZakatRequest, ZakatError> {
        let derived = prices.normalize();
        let gold = match self.gold_grams {
            Some(grams) => {
                holding_value(grams, derived.gold_selling_per_gram).map_err(|e| rename_field(e, "gold-grams"))?
            }
            None => self.gold_value,
        };
        let silver = match self.silver_grams {
            Some(grams) => {
                holding_value(grams, derived.silver_selling_per_gram).map_err(|e| rename_field(e, "silver-grams"))?
            }
            None => self.silver_value,
        };

        let assets = AssetBundle::new()
            .cash(self.cash)
            .bank_balance(self.bank_balance)
            .gold_value(gold)
            .silver_value(silver)
            .business_inventory(self.business_inventory)
            .investments(self.investments)
            .investment_properties(self.investment_properties)
            .other(self.other_assets);
        let liabilities = LiabilityBundle::new()
            .necessary_loans(self.necessary_loans)
            .unpaid_bills(self.unpaid_bills)
            .other(self.other_liabilities);
        Ok(ZakatRequest::new(prices, assets, liabilities))
    }
}

/// Reports a conversion error against the flag the user typed.
fn rename_field(err: ZakatError, flag: &str) -> ZakatError {
    match err {
        ZakatError::InvalidInput(mut details) => {
            details.field = flag.to_string();
            ZakatError::InvalidInput(details)
        }
        other => other,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let loaded = match &args.config {
        Some(path) => CliConfig::load_from(path),
        None => CliConfig::load(),
    };

    let file_logging = args.log || loaded.as_ref().ok().and_then(|c| c.enable_logging).unwrap_or(false);
    let _file_guard = init_tracing(file_logging)?;
    info!("--- Zakat session started [{}] ---", chrono::Utc::now());

    let cli_config = CliConfig::settle(loaded, args.config.is_some())?;

    let region = cli_config.region();
    let sources = PriceSources {
        flag_prices: match (args.gold_price, args.silver_price) {
            (Some(gold), Some(silver)) => Some(MetalPrices::new(gold, silver)?),
            _ => None,
        },
        offline: args.offline || cli_config.offline.unwrap_or(false),
        config: &cli_config,
    };

    match args.command {
        Commands::Calculate { input, output } => {
            // Request files carry their own prices.
            let content = std::fs::read_to_string(&input)?;
            let request: ZakatRequest = content.parse()?;
            report(request, &output, region)?;
        }
        Commands::Prices { json } => {
            let (quote, freshness) = sources.current_quote().await?;
            let nisab = resolve_nisab(&quote.prices.normalize());
            if json {
                let out = serde_json::json!({ "quote": quote, "nisab": nisab });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", render::price_table(&quote, freshness, &nisab, region));
            }
        }
        Commands::Assess { wealth, output } => {
            let (quote, _) = sources.current_quote().await?;
            report(wealth.into_request(quote.prices)?, &output, region)?;
        }
        Commands::Wizard { output } => {
            let (quote, _) = sources.current_quote().await?;
            let request = wizard::run_wizard_mode(&quote.prices)?;
            report(request, &output, region)?;
        }
    }

    Ok(())
}

struct PriceSources<'a> {
    flag_prices: Option<MetalPrices>,
    offline: bool,
    config: &'a CliConfig,
}

impl PriceSources<'_> {
    async fn current_quote(&self) -> Result<(PriceQuote, PriceFreshness), ZakatError> {
        let pricing = self.config.pricing()?;
        let provider =
            price_source::build_provider(self.flag_prices, self.config.price_file.clone(), self.offline, &pricing)?;
        let today = chrono::Local::now().date_naive();
        fetch_checked(provider.as_ref(), &pricing.staleness, today).await
    }
}

fn report(request: ZakatRequest, output: &OutputArgs, region: Region) -> Result<(), Box<dyn std::error::Error>> {
    let record = AssessmentRecord::capture(request)?;

    if output.json {
        println!("{}", serde_json::to_string_pretty(&record.response)?);
    } else {
        println!("{}", render::response_table(&record.response, region));
        println!("\n{}", record.response.assessment.explain());
    }

    if let Some(path) = &output.save {
        std::fs::write(path, record.to_json()?)?;
        info!(id = %record.id, path = ?path, "saved assessment record");
    }
    Ok(())
}

/// Console logging always; a daily-rolling file in logs/ when requested.
fn init_tracing(
    to_file: bool,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>, Box<dyn std::error::Error>> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("zakat_engine=info,zakat_cli=info"))
    };
    let console = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    if !to_file {
        tracing_subscriber::registry().with(env_filter()).with(console).init();
        return Ok(None);
    }

    std::fs::create_dir_all("logs")?;
    let file_appender = tracing_appender::rolling::daily("logs", "zakat.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(console)
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();
    Ok(Some(guard))
}
