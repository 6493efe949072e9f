//! Converter CLI
//!
//! Command-line interface for the Converter API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use converter_client::ConverterClient;
use converter_types::CurrencyCode;

#[derive(Parser)]
#[command(name = "converter")]
#[command(author, version, about = "Currency converter API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Converter API
    #[arg(
        long,
        env = "CONVERTER_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an amount between two currencies
    Convert {
        /// Currency to convert from (e.g. USD)
        source: String,
        /// Currency to convert into (e.g. UAH)
        target: String,
        /// Amount in units of the source currency
        amount: f64,
    },
    /// List the supported currency codes
    Currencies,
    /// Check API health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Health => {
            let client = ConverterClient::new(&cli.api_url);
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Convert {
            source,
            target,
            amount,
        } => {
            let client = ConverterClient::new(&cli.api_url);
            let result = client.convert(&source, &target, amount).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Currencies => {
            for currency in CurrencyCode::all() {
                println!("{}\t{:03}", currency.code(), currency.numeric());
            }
        }
    }

    Ok(())
}
