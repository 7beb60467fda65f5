//! Zero-coupon bond.

use pricer_core::market_data::Rate;
use pricer_core::types::Maturity;

/// Single payment of `nominal` at `maturity`.
///
/// # Examples
/// ```
/// use pricer_core::market_data::Rate;
/// use pricer_core::types::Maturity;
/// use pricer_models::instruments::bonds::ZeroCouponBond;
///
/// let zc = ZeroCouponBond::new(Rate::flat(0.03), Maturity::from_years(2.0).unwrap(), 100.0);
/// assert!((zc.price(None) - 100.0 * (-0.06f64).exp()).abs() < 1e-12);
/// assert!((zc.price(Some(0.0)) - 100.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct ZeroCouponBond {
    rate: Rate,
    maturity: Maturity,
    nominal: f64,
}

impl ZeroCouponBond {
    /// Creates a zero-coupon bond.
    pub fn new(rate: Rate, maturity: Maturity, nominal: f64) -> Self {
        Self {
            rate,
            maturity,
            nominal,
        }
    }

    /// `nominal × DF(maturity)`; `force_rate` replaces the curve rate.
    #[inline]
    pub fn price(&self, force_rate: Option<f64>) -> f64 {
        self.nominal * self.rate.discount_factor(&self.maturity, force_rate)
    }

    /// Returns the maturity.
    #[inline]
    pub fn maturity(&self) -> &Maturity {
        &self.maturity
    }

    /// Returns the nominal.
    #[inline]
    pub fn nominal(&self) -> f64 {
        self.nominal
    }

    /// Returns the discounting rate.
    #[inline]
    pub fn rate(&self) -> &Rate {
        &self.rate
    }
}
