//! Stress command implementation
//!
//! Reprices a trade under a spot / maturity shift and prints the change of
//! every measure.

use std::path::Path;

use pricer_core::types::Date;
use tracing::info;

use crate::config::{CliConfig, OutputFormat};
use crate::desk::{Desk, StressScenario, TradeRequest};
use crate::error::Result;
use crate::output::render_outcome;

/// Run the stress command
pub fn run(
    config: &CliConfig,
    trade: &Path,
    spot: f64,
    begin_date: Option<Date>,
    maturity: Option<f64>,
    format: Option<OutputFormat>,
) -> Result<String> {
    let mut scenario = StressScenario::new().with_spot(spot);
    scenario.new_begin_date = begin_date;
    scenario.new_maturity_years = maturity;
    info!(trade = %trade.display(), ?scenario, "Starting stress test...");

    let request = TradeRequest::load(trade)?;
    let outcome = Desk::from_config(config)?.stress(&request, &scenario)?;

    let moved = outcome.changed().count();
    info!(moved, measures = outcome.difference.len(), "Stress test complete");
    render_outcome(&outcome, format.unwrap_or(config.output.format))
}
