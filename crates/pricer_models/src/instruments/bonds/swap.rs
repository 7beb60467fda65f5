//! Fixed-for-floating interest-rate swap.

use pricer_core::market_data::Rate;
use pricer_core::types::{Maturity, PricingError};

use super::fixed_rate::FixedRateBond;
use super::floating_rate::FloatingRateBond;

/// Exchange of a fixed-rate leg against a floating-rate leg on a common schedule.
///
/// # Examples
/// ```
/// use pricer_core::market_data::Rate;
/// use pricer_core::types::Maturity;
/// use pricer_models::instruments::bonds::InterestRateSwap;
///
/// let t = Maturity::from_years(2.0).unwrap();
/// let payer = InterestRateSwap::new(0.03, 0.03, t, 1_000_000.0, 4, Rate::flat(0.025), true).unwrap();
/// assert!(payer.price().abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct InterestRateSwap {
    fixed_leg: FixedRateBond,
    floating_leg: FloatingRateBond,
    fixed_pay: bool,
}

impl InterestRateSwap {
    /// Creates a swap; `fixed_pay` is true when the holder pays the fixed leg.
    ///
    /// # Errors
    /// Same as [`FixedRateBond::new`].
    pub fn new(
        fixed_rate: f64,
        libor_rate: f64,
        maturity: Maturity,
        nominal: f64,
        nb_coupon: usize,
        rate: Rate,
        fixed_pay: bool,
    ) -> Result<Self, PricingError> {
        Ok(Self {
            fixed_leg: FixedRateBond::new(fixed_rate, maturity, nominal, nb_coupon, rate.clone())?,
            floating_leg: FloatingRateBond::new(libor_rate, maturity, nominal, nb_coupon, rate)?,
            fixed_pay,
        })
    }

    /// Received leg minus paid leg.
    pub fn price(&self) -> f64 {
        let (fixed, floating) = (self.fixed_leg.price(), self.floating_leg.price());
        if self.fixed_pay {
            floating - fixed
        } else {
            fixed - floating
        }
    }

    /// Returns the fixed leg.
    #[inline]
    pub fn fixed_leg(&self) -> &FixedRateBond {
        &self.fixed_leg
    }

    /// Returns the floating leg.
    #[inline]
    pub fn floating_leg(&self) -> &FloatingRateBond {
        &self.floating_leg
    }

    /// Whether the holder pays fixed.
    #[inline]
    pub fn fixed_pay(&self) -> bool {
        self.fixed_pay
    }
}
