//! CLI application for receipt and invoice field extraction.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{auto, config, fields, hybrid};

/// Extract line items and named fields from scanned receipts and invoices
#[derive(Parser)]
#[command(name = "fieldscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse every OCR line into Qty/Item/Price/Info rows
    Auto(auto::AutoArgs),

    /// Look up the values next to the given field labels
    Fields(fields::FieldsArgs),

    /// Field lookup combined with fields inferred by a text model
    Hybrid(hybrid::HybridArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // GOOGLE_API_KEY may come from a .env file
    dotenvy::dotenv().ok();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Auto(args) => auto::run(args, cli.config.as_deref()).await,
        Commands::Fields(args) => fields::run(args, cli.config.as_deref()).await,
        Commands::Hybrid(args) => hybrid::run(args, cli.config.as_deref()).await,
        Commands::Config(args) => config::run(args, cli.config.as_deref()).await,
    }
}
