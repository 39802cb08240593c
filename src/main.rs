//! Kalshi/Polymarket arbitrage bot entry point.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use prophet_arb::config::Config;
use prophet_arb::fetch::{client_from_config_file, fetch_summary, FETCH_DEADLINE};
use prophet_arb::metrics;

/// Kalshi/Polymarket arbitrage bot.
#[derive(Parser, Debug)]
#[command(name = "prophet-arb")]
#[command(about = "Prediction-market arbitrage bot for Kalshi and Polymarket")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the YAML configuration file.
    #[arg(short, long, global = true, default_value = Config::DEFAULT_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch events from Kalshi once and print the first one (default).
    FetchEvents,

    /// Load the configuration and print a summary.
    CheckConfig,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("prophet_arb=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    metrics::init_metrics();

    let result = match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&args.config),
        Some(Command::FetchEvents) | None => cmd_fetch_events(&args.config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("FATAL: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Load configuration, fetch Kalshi events once and print the first.
async fn cmd_fetch_events(config_path: &Path) -> anyhow::Result<()> {
    let client = client_from_config_file(config_path).context("startup failed")?;

    let cancel = CancellationToken::new();
    let summary = fetch_summary(&client, FETCH_DEADLINE, &cancel)
        .await
        .context("failed to fetch Kalshi events")?;

    if let Some(line) = summary.example_line() {
        println!("{line}");
    }

    Ok(())
}

/// Load configuration and print a summary without touching the network.
fn cmd_check_config(config_path: &Path) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("PROPHET ARB BOT - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading {}... ", config_path.display());
    let config = match Config::load(config_path) {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            return Err(e).context("configuration load failed");
        }
    };

    let environment = config.kalshi.environment();

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Kalshi Environment: {}", environment.to_string().to_uppercase());
    println!("  Kalshi Base URL: {}", environment.base_url());
    println!(
        "  Kalshi API Key: {}",
        if config.kalshi.api_key().is_some() { "present" } else { "missing (anonymous requests)" }
    );
    println!(
        "  Polymarket Private Key: {}",
        if config.polymarket.private_key.is_empty() { "missing" } else { "present" }
    );
    println!("  Min Profit Threshold: {}", config.bot.min_profit_threshold);
    println!("  Max Trade Value: ${}", config.bot.max_trade_value);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}
