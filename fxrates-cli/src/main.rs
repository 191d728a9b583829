//! FX Rates CLI
//!
//! Command-line host for the rate handler: lists currencies and prints
//! rate factors as JSON.

mod config;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::{Map, Value, json};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fxrates_client::ExchangeRatesApiClient;
use fxrates_handler::RateHandler;
use fxrates_types::CurrencyCode;

#[derive(Parser)]
#[command(name = "fxrates")]
#[command(author, version, about = "Exchange rate query CLI", long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: config::Settings,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every supported currency code with its name
    Currencies,
    /// Show the name of one currency
    Name {
        /// Currency code (e.g. EUR)
        code: String,
    },
    /// Show rate factors relative to one base unit
    Rate {
        /// Base currency
        #[arg(long, default_value = "USD")]
        base: String,
        /// Currency codes to convert into
        #[arg(required = true)]
        codes: Vec<String>,
    },
    /// Show when the active rates were captured
    Timestamp {
        /// Base currency
        #[arg(long, default_value = "USD")]
        base: String,
    },
    /// Show rate factors published on a given date
    Historical {
        /// Date in YYYY-MM-DD form
        #[arg(long)]
        date: NaiveDate,
        /// Base currency
        #[arg(long, default_value = "USD")]
        base: String,
        /// Currency codes to convert into
        #[arg(required = true)]
        codes: Vec<String>,
    },
}

fn parse_currency(s: &str) -> Result<CurrencyCode> {
    s.parse().map_err(|e: String| anyhow::anyhow!(e))
}

fn parse_currencies(codes: &[String]) -> Result<Vec<CurrencyCode>> {
    codes.iter().map(|c| parse_currency(c)).collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fxrates_handler=debug,fxrates_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let handler =
        RateHandler::<ExchangeRatesApiClient>::from_config(cli.settings.provider_config()?)?;
    tracing::debug!("Using {} at {}", handler.name(), handler.endpoint());

    match cli.command {
        Commands::Currencies => {
            let mut currencies = Map::new();
            for code in handler.get_all_currency_codes().await? {
                let name = handler.get_currency_name(code.as_str()).await?;
                currencies.insert(code.into_string(), Value::String(name));
            }
            println!("{}", serde_json::to_string_pretty(&currencies)?);
        }

        Commands::Name { code } => {
            let code = parse_currency(&code)?;
            let name = handler.get_currency_name(code.as_str()).await?;
            let mut output = Map::new();
            output.insert(code.into_string(), Value::String(name));
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Commands::Rate { base, codes } => {
            let base = parse_currency(&base)?;
            let mut rates = Map::new();
            for code in parse_currencies(&codes)? {
                let factor = handler
                    .get_rate_factor(base.as_str(), code.as_str())
                    .await?;
                rates.insert(code.into_string(), json!(factor));
            }
            let timestamp = handler.get_rate_timestamp(base.as_str(), "").await?;
            let snapshot_base = handler.base().await?;
            let output = json!({
                "base": base,
                "snapshot_base": snapshot_base,
                "timestamp": timestamp,
                "rates": rates,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Commands::Timestamp { base } => {
            let base = parse_currency(&base)?;
            let timestamp = handler.get_rate_timestamp(base.as_str(), "").await?;
            println!("{}", serde_json::to_string_pretty(&json!({ "timestamp": timestamp }))?);
        }

        Commands::Historical { date, base, codes } => {
            let base = parse_currency(&base)?;
            let mut rates = Map::new();
            for code in parse_currencies(&codes)? {
                let factor = handler
                    .get_historical_rate_factor(date, base.as_str(), code.as_str())
                    .await?;
                rates.insert(code.into_string(), json!(factor));
            }
            let output = json!({
                "date": date,
                "base": base,
                "rates": rates,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
