//! Yield-based duration and convexity of coupon bonds.

use pricer_core::types::SolverError;
use pricer_models::instruments::bonds::{FixedRateBond, FloatingRateBond};
use tracing::debug;

/// Duration and convexity of a fixed-rate bond at its yield to maturity.
///
/// Each leg at offset `t` contributes its value discounted on the bond's
/// rate curve, weighted by `exp(−ytm/period · t)` and by `t` (duration) or `t²` (convexity), where
/// `period = T / N`. Duration is normalised by the market price; convexity is
/// returned unnormalised.
///
/// # Examples
/// ```
/// use pricer_core::market_data::Rate;
/// use pricer_core::types::Maturity;
/// use pricer_models::instruments::bonds::FixedRateBond;
/// use pricer_risk::BondRisk;
///
/// let bond = FixedRateBond::new(0.05, Maturity::from_years(3.0).unwrap(), 100.0, 3, Rate::flat(0.03)).unwrap();
/// let risk = BondRisk::new(&bond);
///
/// let duration = risk.duration().unwrap();
/// assert!(duration > 0.0 && duration < 3.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BondRisk<'a> {
    bond: &'a FixedRateBond,
}

impl<'a> BondRisk<'a> {
    /// Creates the engine.
    pub fn new(bond: &'a FixedRateBond) -> Self {
        Self { bond }
    }

    /// Engine on the fixed-rate equivalent of a floating-rate bond.
    pub fn floating(bond: &'a FloatingRateBond) -> Self {
        Self::new(bond.as_fixed())
    }

    /// Yield to maturity of the underlying bond.
    ///
    /// # Errors
    /// `SolverError::NotConverged` when the yield cannot be found.
    #[inline]
    pub fn ytm(&self) -> Result<f64, SolverError> {
        self.bond.ytm()
    }

    /// `Σ CF_t · exp(−ytm/period · t) · t / price`.
    ///
    /// # Errors
    /// `SolverError::NotConverged` when the yield cannot be found.
    pub fn duration(&self) -> Result<f64, SolverError> {
        let duration = self.weighted_sum(1)? / self.bond.price();
        debug!(duration, "bond duration");
        Ok(duration)
    }

    /// `Σ CF_t · exp(−ytm/period · t) · t²`.
    ///
    /// # Errors
    /// `SolverError::NotConverged` when the yield cannot be found.
    pub fn convexity(&self) -> Result<f64, SolverError> {
        let convexity = self.weighted_sum(2)?;
        debug!(convexity, "bond convexity");
        Ok(convexity)
    }

    fn weighted_sum(&self, power: i32) -> Result<f64, SolverError> {
        let ytm = self.bond.ytm()?;
        let period = self.bond.period();
        Ok(self
            .bond
            .cashflows()
            .iter()
            .map(|cf| {
                let t = cf.offset();
                cf.zero_coupon().price(None) * (-ytm / period * t).exp() * t.powi(power)
            })
            .sum())
    }
}
