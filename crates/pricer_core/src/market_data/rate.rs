//! Interest rates and discounting.

use super::curves::{InterpolationMethod, RateCurve};
use crate::types::{ConfigurationError, Maturity};
use std::fmt;
use std::str::FromStr;

/// How a rate turns into a discount factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Compounding {
    /// `DF = exp(−r·T)`
    #[default]
    Continuous,
    /// `DF = (1 + r)^(−T)`
    Compounded,
}

impl Compounding {
    /// Discount factor for rate `r` over `t` years.
    #[inline]
    pub fn discount(&self, r: f64, t: f64) -> f64 {
        match self {
            Self::Continuous => (-r * t).exp(),
            Self::Compounded => (1.0 + r).powf(-t),
        }
    }
}

impl FromStr for Compounding {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "continuous" => Ok(Self::Continuous),
            "compounded" => Ok(Self::Compounded),
            _ => Err(ConfigurationError::UnknownCompounding(s.to_string())),
        }
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continuous => write!(f, "continuous"),
            Self::Compounded => write!(f, "compounded"),
        }
    }
}

#[derive(Debug, Clone)]
enum RateSource {
    /// Same rate for every maturity.
    Flat(f64),
    /// Maturity-dependent rate.
    Curve(RateCurve),
}

/// Annualised interest rate with its compounding convention.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::Rate;
/// use pricer_core::types::Maturity;
///
/// let rate = Rate::flat(0.03);
/// let t = Maturity::from_years(2.0).unwrap();
///
/// let df = rate.discount_factor(&t, None);
/// assert!((df - (-0.06f64).exp()).abs() < 1e-15);
///
/// // forcing a rate bypasses the stored one
/// let forced = rate.discount_factor(&t, Some(0.0));
/// assert_eq!(forced, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Rate {
    source: RateSource,
    compounding: Compounding,
}

impl Rate {
    /// Flat, continuously compounded rate.
    pub fn flat(rate: f64) -> Self {
        Self {
            source: RateSource::Flat(rate),
            compounding: Compounding::Continuous,
        }
    }

    /// Continuously compounded rate read off an interpolated curve.
    ///
    /// # Errors
    ///
    /// See [`RateCurve::new`].
    pub fn from_curve(
        tenors: &[f64],
        rates: &[f64],
        method: InterpolationMethod,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            source: RateSource::Curve(RateCurve::new(tenors, rates, method)?),
            compounding: Compounding::Continuous,
        })
    }

    /// Replace the compounding convention.
    pub fn with_compounding(mut self, compounding: Compounding) -> Self {
        self.compounding = compounding;
        self
    }

    /// Rate applicable at `maturity`.
    pub fn rate(&self, maturity: &Maturity) -> f64 {
        match &self.source {
            RateSource::Flat(r) => *r,
            RateSource::Curve(curve) => curve.rate(maturity),
        }
    }

    /// Discount factor to `maturity`; `force_rate` replaces the stored rate.
    pub fn discount_factor(&self, maturity: &Maturity, force_rate: Option<f64>) -> f64 {
        let r = force_rate.unwrap_or_else(|| self.rate(maturity));
        self.compounding.discount(r, maturity.years())
    }

    /// Compounding convention.
    #[inline]
    pub fn compounding(&self) -> Compounding {
        self.compounding
    }

    /// Whether the rate is maturity-independent.
    #[inline]
    pub fn is_flat(&self) -> bool {
        matches!(self.source, RateSource::Flat(_))
    }
}
