//! Market inputs for the Monte Carlo engine.
//!
//! [`MarketContext`] gathers spot, discounting rate, volatility, maturity and
//! the optional dividend / foreign-rate inputs. [`MarketContext::gbm_params`]
//! turns them into risk-neutral GBM parameters for a given underlying class:
//!
//! | Underlying | Adjustment |
//! |------------|------------|
//! | dividend share, capitalised index | discrete dividend lowers spot, else `r −= q` |
//! | no-dividend share, non-capitalised index | none |
//! | forex | `spot ×= exp(−r_f·T)` |
//! | none (binary, barrier) | none |

use pricer_core::market_data::Rate;
use pricer_core::types::{ConfigurationError, DomainError, Maturity, PricingError};
use pricer_models::instruments::UnderlyingClass;

use crate::mc::GbmParams;

/// Market data consumed by the engine.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::Rate;
/// use pricer_core::types::Maturity;
/// use pricer_models::instruments::UnderlyingClass;
/// use pricer_pricing::context::MarketContext;
///
/// let market = MarketContext::new(100.0, Rate::flat(0.03), 0.2, Maturity::from_years(1.0).unwrap())
///     .with_dividend(0.01);
///
/// let gbm = market.gbm_params(Some(UnderlyingClass::DividendShare)).unwrap();
/// assert!((gbm.rate - 0.02).abs() < 1e-12);
/// assert_eq!(gbm.spot, 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct MarketContext {
    /// Initial spot.
    pub spot: f64,
    /// Discounting rate.
    pub rate: Rate,
    /// Annualised volatility.
    pub volatility: f64,
    /// Time to maturity.
    pub maturity: Maturity,
    /// Dividend: a yield, or a cash amount when `dividend_date` is set.
    pub dividend: Option<f64>,
    /// Time to the discrete dividend payment, in years.
    pub dividend_date: Option<f64>,
    /// Foreign interest rate for FX underlyings.
    pub forward_rate: Option<f64>,
}

impl MarketContext {
    /// Creates a context without dividend or foreign-rate inputs.
    pub fn new(spot: f64, rate: Rate, volatility: f64, maturity: Maturity) -> Self {
        Self {
            spot,
            rate,
            volatility,
            maturity,
            dividend: None,
            dividend_date: None,
            forward_rate: None,
        }
    }

    /// Sets the dividend yield, or the cash dividend when a date is also set.
    pub fn with_dividend(mut self, dividend: f64) -> Self {
        self.dividend = Some(dividend);
        self
    }

    /// Sets the discrete dividend payment time.
    pub fn with_dividend_date(mut self, years: f64) -> Self {
        self.dividend_date = Some(years);
        self
    }

    /// Sets the foreign rate.
    pub fn with_forward_rate(mut self, forward_rate: f64) -> Self {
        self.forward_rate = Some(forward_rate);
        self
    }

    /// Replaces the spot.
    pub fn with_spot(mut self, spot: f64) -> Self {
        self.spot = spot;
        self
    }

    /// Replaces the maturity.
    pub fn with_maturity(mut self, maturity: Maturity) -> Self {
        self.maturity = maturity;
        self
    }

    /// Checks that the context can be simulated.
    ///
    /// # Errors
    /// - `DomainError::NonPositiveMaturity` for `T <= 0`
    /// - `ConfigurationError::InvalidParameter` for a non-positive spot or a
    ///   negative volatility
    pub fn validate(&self) -> Result<(), PricingError> {
        if !self.maturity.is_positive() {
            return Err(DomainError::NonPositiveMaturity {
                years: self.maturity.years(),
            }
            .into());
        }
        if !(self.spot > 0.0 && self.spot.is_finite()) {
            return Err(ConfigurationError::InvalidParameter {
                name: "spot",
                value: self.spot.to_string(),
            }
            .into());
        }
        if !(self.volatility >= 0.0 && self.volatility.is_finite()) {
            return Err(ConfigurationError::InvalidParameter {
                name: "volatility",
                value: self.volatility.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Discount factor to maturity.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        self.rate.discount_factor(&self.maturity, None)
    }

    /// Continuously compounded rate implied by the discount factor, `−ln(DF)/T`.
    #[inline]
    pub fn implied_rate(&self) -> f64 {
        -self.discount_factor().ln() / self.maturity.years()
    }

    /// GBM parameters for an underlying class, starting from [`Self::implied_rate`].
    ///
    /// # Errors
    /// `ConfigurationError::MissingInput` for `dividend` (dividend underlyings)
    /// or `forward_rate` (FX) when absent.
    pub fn gbm_params(
        &self,
        underlying: Option<UnderlyingClass>,
    ) -> Result<GbmParams, ConfigurationError> {
        let t = self.maturity.years();
        let (spot, rate) = self.adjust(underlying, self.spot, self.implied_rate())?;
        Ok(GbmParams::new(spot, rate, self.volatility, t))
    }

    /// GBM parameters for full-path stepping, at the flat curve rate `rate(T)`.
    ///
    /// The underlying adjustment is the same as in [`Self::gbm_params`].
    pub fn flat_gbm_params(
        &self,
        underlying: Option<UnderlyingClass>,
    ) -> Result<GbmParams, ConfigurationError> {
        let t = self.maturity.years();
        let (spot, rate) = self.adjust(underlying, self.spot, self.rate.rate(&self.maturity))?;
        Ok(GbmParams::new(spot, rate, self.volatility, t))
    }

    /// Dividend yield or foreign rate entering the Black-Scholes carry term.
    ///
    /// Zero for non-paying underlyings and for discrete dividends, which act
    /// on spot instead.
    pub fn carry(&self, underlying: Option<UnderlyingClass>) -> Result<f64, ConfigurationError> {
        match underlying {
            Some(u) if u.pays_dividend() => {
                let dividend = self.required(self.dividend, "dividend")?;
                Ok(if self.dividend_date.is_some() { 0.0 } else { dividend })
            }
            Some(UnderlyingClass::Forex) => self.required(self.forward_rate, "forward_rate"),
            _ => Ok(0.0),
        }
    }

    /// Spot after a discrete dividend, if any, for the given underlying.
    pub fn adjusted_spot(&self, underlying: Option<UnderlyingClass>) -> Result<f64, ConfigurationError> {
        match underlying {
            Some(u) if u.pays_dividend() => match self.dividend_date {
                Some(date) => {
                    let dividend = self.required(self.dividend, "dividend")?;
                    Ok(self.spot - dividend * (-self.implied_rate() * date).exp())
                }
                None => Ok(self.spot),
            },
            _ => Ok(self.spot),
        }
    }

    fn adjust(
        &self,
        underlying: Option<UnderlyingClass>,
        spot: f64,
        rate: f64,
    ) -> Result<(f64, f64), ConfigurationError> {
        let t = self.maturity.years();
        match underlying {
            Some(u) if u.pays_dividend() => {
                let dividend = self.required(self.dividend, "dividend")?;
                Ok(match self.dividend_date {
                    Some(date) => (spot - dividend * (-rate * date).exp(), rate),
                    None => (spot, rate - dividend),
                })
            }
            Some(UnderlyingClass::Forex) => {
                let forward_rate = self.required(self.forward_rate, "forward_rate")?;
                Ok((spot * (-forward_rate * t).exp(), rate))
            }
            _ => Ok((spot, rate)),
        }
    }

    fn required(&self, value: Option<f64>, key: &str) -> Result<f64, ConfigurationError> {
        value.ok_or_else(|| ConfigurationError::MissingInput {
            key: key.to_string(),
        })
    }
}
