//! Floating-rate bond.

use pricer_core::market_data::Rate;
use pricer_core::types::{Maturity, PricingError};

use super::fixed_rate::FixedRateBond;

/// Bond whose coupons fix on a reference (libor) rate.
///
/// With a single known fixing the bond prices as the fixed-rate bond paying
/// that fixing.
#[derive(Debug, Clone)]
pub struct FloatingRateBond {
    libor_rate: f64,
    equivalent: FixedRateBond,
}

impl FloatingRateBond {
    /// Creates a floating-rate bond fixed at `libor_rate`.
    ///
    /// # Errors
    /// Same as [`FixedRateBond::new`].
    pub fn new(
        libor_rate: f64,
        maturity: Maturity,
        nominal: f64,
        nb_coupon: usize,
        rate: Rate,
    ) -> Result<Self, PricingError> {
        Ok(Self {
            libor_rate,
            equivalent: FixedRateBond::new(libor_rate, maturity, nominal, nb_coupon, rate)?,
        })
    }

    /// Market price.
    #[inline]
    pub fn price(&self) -> f64 {
        self.equivalent.price()
    }

    /// Price with every leg discounted at `force_rate` when given.
    #[inline]
    pub fn price_at(&self, force_rate: Option<f64>) -> f64 {
        self.equivalent.price_at(force_rate)
    }

    /// The fixing paid on every coupon date.
    #[inline]
    pub fn libor_rate(&self) -> f64 {
        self.libor_rate
    }

    /// Fixed-rate bond paying the fixing.
    #[inline]
    pub fn as_fixed(&self) -> &FixedRateBond {
        &self.equivalent
    }
}
