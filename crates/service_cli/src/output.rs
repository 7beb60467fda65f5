//! Result rendering.

use pricer_risk::{ResultSet, ScenarioOutcome};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::config::OutputFormat;
use crate::error::Result;

#[derive(Tabled)]
struct MeasureRow<'a> {
    #[tabled(rename = "Measure")]
    name: &'a str,
    #[tabled(rename = "Value")]
    value: f64,
}

#[derive(Tabled)]
struct ChangeRow<'a> {
    #[tabled(rename = "Measure")]
    name: &'a str,
    #[tabled(rename = "Base")]
    base: f64,
    #[tabled(rename = "Stressed")]
    stressed: f64,
    #[tabled(rename = "Change")]
    change: f64,
}

/// Renders a priced trade.
pub fn render_result(result: &ResultSet, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Table => Ok(table(
            result.iter().map(|(name, value)| MeasureRow { name, value }),
        )),
    }
}

/// Renders a stress run: base, stressed and change per measure.
pub fn render_outcome(outcome: &ScenarioOutcome, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
        OutputFormat::Table => Ok(table(outcome.difference.iter().map(|(name, change)| {
            ChangeRow {
                name,
                base: outcome.base.get(name).unwrap_or(f64::NAN),
                stressed: outcome.stressed.get(name).unwrap_or(f64::NAN),
                change,
            }
        }))),
    }
}

fn table<T: Tabled>(rows: impl IntoIterator<Item = T>) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string()
}
