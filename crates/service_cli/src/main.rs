//! Pricer CLI - price and stress trades from TOML files
//!
//! # Commands
//!
//! - `pricer price --trade <file>` - Price a trade and report its risk
//! - `pricer stress --trade <file> --spot <x>` - Reprice under a shifted
//!   spot / maturity and report the change of every measure
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this binary reads the configuration,
//! initialises tracing and hands off to the desk in `service_cli`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pricer_core::types::Date;
use service_cli::commands;
use service_cli::config::{CliConfig, OutputFormat};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Option, bond and structured product pricer
#[derive(Parser)]
#[command(name = "pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "pricer.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a trade
    Price {
        /// Path to the trade file (TOML)
        #[arg(short, long)]
        trade: PathBuf,

        /// Output format, overriding the configuration
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Write the simulated paths to this JSON file
        #[arg(long)]
        paths: Option<PathBuf>,
    },

    /// Reprice a trade under a stress scenario
    Stress {
        /// Path to the trade file (TOML)
        #[arg(short, long)]
        trade: PathBuf,

        /// Stressed spot (nominal for bonds and swaps)
        #[arg(short, long)]
        spot: f64,

        /// Stressed valuation date (YYYY-MM-DD)
        #[arg(short, long)]
        begin_date: Option<Date>,

        /// Stressed maturity in years
        #[arg(short, long)]
        maturity: Option<f64>,

        /// Output format, overriding the configuration
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },
}

fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(&cli.config)?;

    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_filter_str()
    };
    init_tracing(level);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let rendered = match cli.command {
        Commands::Price {
            trade,
            format,
            paths,
        } => commands::price::run(&config, &trade, format, paths.as_deref())?,
        Commands::Stress {
            trade,
            spot,
            begin_date,
            maturity,
            format,
        } => commands::stress::run(&config, &trade, spot, begin_date, maturity, format)?,
    };
    println!("{rendered}");
    Ok(())
}
