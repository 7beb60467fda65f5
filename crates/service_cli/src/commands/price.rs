//! Price command implementation
//!
//! Prices one trade file and prints its measures, optionally writing the
//! simulated paths as JSON.

use std::path::Path;

use tracing::info;

use crate::config::{CliConfig, OutputFormat};
use crate::desk::{Desk, TradeRequest};
use crate::error::{CliError, Result};
use crate::output::render_result;

/// Run the price command
pub fn run(config: &CliConfig, trade: &Path, format: Option<OutputFormat>, paths: Option<&Path>) -> Result<String> {
    info!(trade = %trade.display(), "Starting pricing...");
    info!(
        n_paths = config.simulation.n_paths,
        n_steps = config.simulation.n_steps,
        seed = config.simulation.seed,
        "Monte Carlo settings"
    );

    let request = TradeRequest::load(trade)?;
    let desk = Desk::from_config(config)?;
    let result = desk.price(&request)?;

    if let Some(target) = paths {
        let matrix = desk.paths(&request)?;
        let json = serde_json::to_string(&matrix)?;
        std::fs::write(target, json).map_err(|e| CliError::io(target, e))?;
        info!(paths = matrix.len(), target = %target.display(), "Paths written");
    }

    let rendered = render_result(&result, format.unwrap_or(config.output.format))?;
    info!("Pricing complete");
    Ok(rendered)
}
