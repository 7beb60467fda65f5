//! Option type and underlying classification.

use pricer_core::types::{ConfigurationError, DomainError};
use std::fmt;
use std::str::FromStr;

/// Call or put.
///
/// # Examples
/// ```
/// use pricer_models::instruments::OptionType;
///
/// let call: OptionType = "call".parse().unwrap();
/// assert_eq!(call.intrinsic(110.0, 100.0), 10.0);
/// assert_eq!(OptionType::Put.intrinsic(110.0, 100.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// max(S - K, 0)
    Call,
    /// max(K - S, 0)
    Put,
}

impl OptionType {
    /// Intrinsic value at `spot` for `strike`.
    #[inline]
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }

    /// Returns true for a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }
}

impl FromStr for OptionType {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            _ => Err(ConfigurationError::InvalidOptionType(format!(
                "{s} (choose call or put)"
            ))),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

/// Kind of asset an option is written on.
///
/// Determines how spot and drift are adjusted before simulation and which
/// carry rate enters the closed-form Greeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnderlyingClass {
    /// Share paying no dividend.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "no dividend share"))]
    NoDividendShare,
    /// Share paying a dividend, as a yield or a discrete amount.
    #[cfg_attr(feature = "serde", serde(rename = "dividend share"))]
    DividendShare,
    /// Exchange rate.
    #[cfg_attr(feature = "serde", serde(rename = "forex rate"))]
    Forex,
    /// Index reinvesting its dividends.
    #[cfg_attr(feature = "serde", serde(rename = "capitalized index"))]
    CapitalizedIndex,
    /// Price index.
    #[cfg_attr(feature = "serde", serde(rename = "non capitalized index"))]
    NonCapitalizedIndex,
}

impl UnderlyingClass {
    /// Configuration name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoDividendShare => "no dividend share",
            Self::DividendShare => "dividend share",
            Self::Forex => "forex rate",
            Self::CapitalizedIndex => "capitalized index",
            Self::NonCapitalizedIndex => "non capitalized index",
        }
    }

    /// Dividend share or capitalized index.
    #[inline]
    pub fn pays_dividend(&self) -> bool {
        matches!(self, Self::DividendShare | Self::CapitalizedIndex)
    }
}

impl FromStr for UnderlyingClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "no dividend share" => Ok(Self::NoDividendShare),
            "dividend share" => Ok(Self::DividendShare),
            "forex rate" => Ok(Self::Forex),
            "capitalized index" => Ok(Self::CapitalizedIndex),
            "non capitalized index" => Ok(Self::NonCapitalizedIndex),
            _ => Err(DomainError::UnknownUnderlying(s.to_string())),
        }
    }
}

impl fmt::Display for UnderlyingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
