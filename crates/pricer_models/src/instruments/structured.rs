//! Structured products: reverse convertible and outperformance certificate.

use pricer_core::types::ConfigurationError;

use super::bonds::FixedRateBond;
use super::payoff::UnderlyingClass;
use super::spread::Priced;
use super::vanilla::VanillaOption;

/// Short put on the underlying wrapped around a long fixed-rate bond.
///
/// The bond's coupon is what the investor receives for selling the put.
#[derive(Debug, Clone)]
pub struct ReverseConvertible {
    put: Priced<VanillaOption>,
    bond: FixedRateBond,
}

impl ReverseConvertible {
    /// Creates a reverse convertible.
    ///
    /// # Errors
    /// `ConfigurationError::InvalidOptionType` if the option leg is not a put.
    pub fn new(put: Priced<VanillaOption>, bond: FixedRateBond) -> Result<Self, ConfigurationError> {
        if put.instrument.option_type().is_call() {
            return Err(ConfigurationError::InvalidOptionType(
                "reverse convertible takes a put".to_string(),
            ));
        }
        Ok(Self { put, bond })
    }

    /// Bond nominal less the put payoff.
    #[inline]
    pub fn payoff(&self, spot: f64) -> f64 {
        self.bond.nominal() - self.put.instrument.payoff(spot)
    }

    /// Put price less bond price.
    #[inline]
    pub fn price(&self) -> f64 {
        self.put.price - self.bond.price()
    }

    /// Returns the put leg.
    #[inline]
    pub fn put(&self) -> &Priced<VanillaOption> {
        &self.put
    }

    /// Returns the bond leg.
    #[inline]
    pub fn bond(&self) -> &FixedRateBond {
        &self.bond
    }

    /// Underlying class of the put.
    #[inline]
    pub fn underlying(&self) -> UnderlyingClass {
        self.put.instrument.underlying()
    }
}

/// Outperformance certificate: a zero-strike call plus a leveraged ATM call.
///
/// Participation is the ratio of the zero-strike call price to the ATM call
/// price, so upside above the ATM strike is amplified by that factor.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{
///     CertificatOutperformance, OptionType, Priced, UnderlyingClass, VanillaOption,
/// };
///
/// let u = UnderlyingClass::NoDividendShare;
/// let zs = Priced::new(VanillaOption::new(OptionType::Call, u, 0.0).unwrap(), 100.0);
/// let atm = Priced::new(VanillaOption::new(OptionType::Call, u, 100.0).unwrap(), 10.0);
///
/// let cert = CertificatOutperformance::new(zs, atm).unwrap();
/// assert_eq!(cert.participation(), 10.0);
/// assert_eq!(cert.payoff(110.0), 110.0 + 9.0 * 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CertificatOutperformance {
    zs_call: Priced<VanillaOption>,
    call: Priced<VanillaOption>,
}

impl CertificatOutperformance {
    /// Creates a certificate.
    ///
    /// # Errors
    /// - `ConfigurationError::InvalidOptionType` unless both legs are calls
    /// - `ConfigurationError::InconsistentStrikes` if the zero-strike leg has
    ///   a non-zero strike
    /// - `ConfigurationError::InvalidParameter` if the ATM call price is not
    ///   positive and finite
    pub fn new(
        zs_call: Priced<VanillaOption>,
        call: Priced<VanillaOption>,
    ) -> Result<Self, ConfigurationError> {
        if !zs_call.instrument.option_type().is_call() || !call.instrument.option_type().is_call() {
            return Err(ConfigurationError::InvalidOptionType(
                "outperformance certificate takes two calls".to_string(),
            ));
        }
        let k_zs = zs_call.instrument.strike();
        if k_zs != 0.0 {
            return Err(ConfigurationError::InconsistentStrikes {
                product: "outperformance certificate",
                reason: format!("zero-strike call has strike {k_zs}"),
            });
        }
        if !call.price.is_finite() || call.price <= 0.0 {
            return Err(ConfigurationError::InvalidParameter {
                name: "atm_call_price",
                value: call.price.to_string(),
            });
        }
        Ok(Self { zs_call, call })
    }

    /// Zero-strike call price over ATM call price.
    #[inline]
    pub fn participation(&self) -> f64 {
        self.zs_call.price / self.call.price
    }

    /// `zs payoff + (participation − 1) · call payoff`.
    pub fn payoff(&self, spot: f64) -> f64 {
        self.zs_call.instrument.payoff(spot)
            + (self.participation() - 1.0) * self.call.instrument.payoff(spot)
    }

    /// `zs price + (participation − 1) · call price`.
    pub fn price(&self) -> f64 {
        self.zs_call.price + (self.participation() - 1.0) * self.call.price
    }

    /// Returns the zero-strike call.
    #[inline]
    pub fn zero_strike_call(&self) -> &Priced<VanillaOption> {
        &self.zs_call
    }

    /// Returns the ATM call.
    #[inline]
    pub fn call(&self) -> &Priced<VanillaOption> {
        &self.call
    }

    /// Underlying class of the ATM call.
    #[inline]
    pub fn underlying(&self) -> UnderlyingClass {
        self.call.instrument.underlying()
    }
}
