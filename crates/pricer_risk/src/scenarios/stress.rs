//! Spot and maturity stress scenarios.

use pricer_core::types::{ConfigurationError, Date, Maturity};
use pricer_pricing::context::MarketContext;
use tracing::debug;

use super::result_set::ResultSet;

/// Shifts applied to a trade's inputs before repricing.
///
/// Unset fields leave the corresponding input unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StressScenario {
    /// Replacement spot (or bond nominal).
    pub new_spot: Option<f64>,
    /// Replacement valuation date; needs a date-based maturity.
    pub new_begin_date: Option<Date>,
    /// Replacement maturity, in years.
    pub new_maturity_years: Option<f64>,
}

impl StressScenario {
    /// Scenario with no shift.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the stressed spot.
    pub fn with_spot(mut self, spot: f64) -> Self {
        self.new_spot = Some(spot);
        self
    }

    /// Sets the stressed valuation date.
    pub fn with_begin_date(mut self, date: Date) -> Self {
        self.new_begin_date = Some(date);
        self
    }

    /// Sets the stressed maturity.
    pub fn with_maturity_years(mut self, years: f64) -> Self {
        self.new_maturity_years = Some(years);
        self
    }

    /// Whether the scenario moves the maturity.
    #[inline]
    pub fn shifts_maturity(&self) -> bool {
        self.new_begin_date.is_some() || self.new_maturity_years.is_some()
    }

    /// Stressed spot.
    #[inline]
    pub fn apply_spot(&self, spot: f64) -> f64 {
        self.new_spot.unwrap_or(spot)
    }

    /// Stressed maturity, via [`Maturity::shifted`].
    ///
    /// # Errors
    /// `ConfigurationError::MissingInput` when only a begin date is given
    /// and the maturity has no end date.
    pub fn apply_maturity(&self, maturity: &Maturity) -> Result<Maturity, ConfigurationError> {
        if !self.shifts_maturity() {
            return Ok(*maturity);
        }
        maturity.shifted(self.new_begin_date, self.new_maturity_years)
    }

    /// Market inputs with spot and maturity stressed.
    pub fn apply(&self, market: &MarketContext) -> Result<MarketContext, ConfigurationError> {
        let maturity = self.apply_maturity(&market.maturity)?;
        Ok(market
            .clone()
            .with_spot(self.apply_spot(market.spot))
            .with_maturity(maturity))
    }

    /// Runs `price` on the base inputs (`None`) and on this scenario, and
    /// rounds base, stressed and difference to `decimals`.
    pub fn evaluate<F, E>(&self, decimals: u32, mut price: F) -> Result<ScenarioOutcome, E>
    where
        F: FnMut(Option<&StressScenario>) -> Result<ResultSet, E>,
    {
        let base = price(None)?;
        let stressed = price(Some(self))?;
        debug!(scenario = ?self, measures = base.len(), "stress scenario evaluated");
        Ok(ScenarioOutcome::new(base, stressed, decimals))
    }
}

/// Base and stressed measures with their difference.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScenarioOutcome {
    /// Measures before the shift.
    pub base: ResultSet,
    /// Measures after the shift.
    pub stressed: ResultSet,
    /// `stressed − base`.
    pub difference: ResultSet,
}

impl ScenarioOutcome {
    /// Builds the outcome; the difference is taken before rounding.
    pub fn new(base: ResultSet, stressed: ResultSet, decimals: u32) -> Self {
        let difference = stressed.difference(&base).rounded(decimals);
        Self {
            base: base.rounded(decimals),
            stressed: stressed.rounded(decimals),
            difference,
        }
    }

    /// Measures that moved.
    pub fn changed(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.difference.iter().filter(|&(_, v)| v != 0.0)
    }
}
