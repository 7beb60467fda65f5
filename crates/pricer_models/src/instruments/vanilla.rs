//! Vanilla option definitions.

use pricer_core::types::{ConfigurationError, Maturity};

use super::payoff::{OptionType, UnderlyingClass};

/// European call or put on a given underlying class.
///
/// For FX underlyings the stored strike is the effective strike
/// `K·exp(r_d·T)`; build those through [`VanillaOption::forex`].
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionType, UnderlyingClass, VanillaOption};
///
/// let call = VanillaOption::new(OptionType::Call, UnderlyingClass::NoDividendShare, 100.0).unwrap();
/// assert_eq!(call.payoff(110.0), 10.0);
/// assert_eq!(call.payoff(90.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanillaOption {
    option_type: OptionType,
    underlying: UnderlyingClass,
    strike: f64,
}

impl VanillaOption {
    /// Creates a non-FX vanilla option.
    ///
    /// # Errors
    /// - `ConfigurationError::MissingInput` (`domestic_rate`) for a forex
    ///   underlying; use [`VanillaOption::forex`]
    /// - `ConfigurationError::InvalidParameter` for a negative or non-finite strike
    pub fn new(
        option_type: OptionType,
        underlying: UnderlyingClass,
        strike: f64,
    ) -> Result<Self, ConfigurationError> {
        if underlying == UnderlyingClass::Forex {
            return Err(ConfigurationError::MissingInput {
                key: "domestic_rate".to_string(),
            });
        }
        Self::checked(option_type, underlying, strike)
    }

    /// Creates an FX option whose effective strike is `strike·exp(domestic_rate·T)`.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::Maturity;
    /// use pricer_models::instruments::{OptionType, VanillaOption};
    ///
    /// let t = Maturity::from_years(1.0).unwrap();
    /// let option = VanillaOption::forex(OptionType::Call, 1.10, 0.02, &t).unwrap();
    /// assert!((option.strike() - 1.10 * 0.02f64.exp()).abs() < 1e-12);
    /// ```
    pub fn forex(
        option_type: OptionType,
        strike: f64,
        domestic_rate: f64,
        maturity: &Maturity,
    ) -> Result<Self, ConfigurationError> {
        if !domestic_rate.is_finite() {
            return Err(ConfigurationError::InvalidParameter {
                name: "domestic_rate",
                value: domestic_rate.to_string(),
            });
        }
        let effective = strike * (domestic_rate * maturity.years()).exp();
        Self::checked(option_type, UnderlyingClass::Forex, effective)
    }

    fn checked(
        option_type: OptionType,
        underlying: UnderlyingClass,
        strike: f64,
    ) -> Result<Self, ConfigurationError> {
        if !strike.is_finite() || strike < 0.0 {
            return Err(ConfigurationError::InvalidParameter {
                name: "strike",
                value: strike.to_string(),
            });
        }
        Ok(Self {
            option_type,
            underlying,
            strike,
        })
    }

    /// Payoff at expiry for the given spot.
    #[inline]
    pub fn payoff(&self, spot: f64) -> f64 {
        self.option_type.intrinsic(spot, self.strike)
    }

    /// Returns the option type.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Returns the underlying class.
    #[inline]
    pub fn underlying(&self) -> UnderlyingClass {
        self.underlying
    }

    /// Returns the effective strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }
}
