//! Straddles, strangles, strips and straps.

use pricer_core::types::ConfigurationError;
use std::fmt;
use std::str::FromStr;

use super::payoff::UnderlyingClass;
use super::spread::Priced;
use super::vanilla::VanillaOption;

/// Call/put combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StrategyKind {
    /// Call + put, same strike.
    Straddle,
    /// Call + put, call strike above put strike.
    Strangle,
    /// Call + 2 puts, same strike.
    Strip,
    /// 2 calls + put, same strike.
    Strap,
}

impl StrategyKind {
    /// Number of calls and puts held per unit of strategy.
    #[inline]
    pub fn weights(&self) -> (f64, f64) {
        match self {
            Self::Straddle | Self::Strangle => (1.0, 1.0),
            Self::Strip => (1.0, 2.0),
            Self::Strap => (2.0, 1.0),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Straddle => "straddle",
            Self::Strangle => "strangle",
            Self::Strip => "strip",
            Self::Strap => "strap",
        }
    }
}

impl FromStr for StrategyKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "straddle" => Ok(Self::Straddle),
            "strangle" => Ok(Self::Strangle),
            "strip" => Ok(Self::Strip),
            "strap" => Ok(Self::Strap),
            _ => Err(ConfigurationError::UnknownProductKind(format!(
                "{s} (select straddle, strangle, strip or strap)"
            ))),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Long or short position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Position {
    /// Bought.
    #[default]
    Long,
    /// Sold.
    Short,
}

impl Position {
    /// +1 for long, −1 for short.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            Self::Long => 1.0,
            Self::Short => -1.0,
        }
    }
}

impl FromStr for Position {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long" => Ok(Self::Long),
            "short" => Ok(Self::Short),
            _ => Err(ConfigurationError::InvalidParameter {
                name: "long_short",
                value: s.to_string(),
            }),
        }
    }
}

/// Volatility strategy built from one call and one put.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{
///     OptionStrategy, OptionType, Position, Priced, StrategyKind, UnderlyingClass, VanillaOption,
/// };
///
/// let u = UnderlyingClass::NoDividendShare;
/// let call = Priced::new(VanillaOption::new(OptionType::Call, u, 100.0).unwrap(), 8.0);
/// let put = Priced::new(VanillaOption::new(OptionType::Put, u, 100.0).unwrap(), 5.0);
///
/// let strap = OptionStrategy::new(StrategyKind::Strap, Position::Long, call, put).unwrap();
/// assert_eq!(strap.payoff(110.0), 20.0);
/// assert_eq!(strap.price(), 21.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionStrategy {
    kind: StrategyKind,
    position: Position,
    call: Priced<VanillaOption>,
    put: Priced<VanillaOption>,
}

impl OptionStrategy {
    /// Creates a strategy.
    ///
    /// # Errors
    /// - `ConfigurationError::InvalidOptionType` unless given a call and a put
    /// - `ConfigurationError::InconsistentStrikes` if straddle/strip/strap
    ///   strikes differ, or a strangle's call strike is not above its put strike
    pub fn new(
        kind: StrategyKind,
        position: Position,
        call: Priced<VanillaOption>,
        put: Priced<VanillaOption>,
    ) -> Result<Self, ConfigurationError> {
        if !call.instrument.option_type().is_call() || put.instrument.option_type().is_call()
        {
            return Err(ConfigurationError::InvalidOptionType(format!(
                "{kind} takes a call and a put"
            )));
        }

        let (k_call, k_put) = (call.instrument.strike(), put.instrument.strike());
        match kind {
            StrategyKind::Strangle if k_call <= k_put => {
                return Err(ConfigurationError::InconsistentStrikes {
                    product: "strangle",
                    reason: format!("call strike {k_call} must be greater than put strike {k_put}"),
                })
            }
            StrategyKind::Straddle | StrategyKind::Strip | StrategyKind::Strap
                if k_call != k_put =>
            {
                return Err(ConfigurationError::InconsistentStrikes {
                    product: "straddle",
                    reason: format!("call strike {k_call} and put strike {k_put} must be equal"),
                })
            }
            _ => {}
        }

        Ok(Self {
            kind,
            position,
            call,
            put,
        })
    }

    /// Weighted sum of the leg payoffs, negated when short.
    pub fn payoff(&self, spot: f64) -> f64 {
        let (wc, wp) = self.kind.weights();
        self.position.sign()
            * (wc * self.call.instrument.payoff(spot) + wp * self.put.instrument.payoff(spot))
    }

    /// Weighted sum of the leg prices, negated when short.
    pub fn price(&self) -> f64 {
        let (wc, wp) = self.kind.weights();
        self.position.sign() * (wc * self.call.price + wp * self.put.price)
    }

    /// Returns the strategy kind.
    #[inline]
    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    /// Returns the position.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the call leg.
    #[inline]
    pub fn call(&self) -> &Priced<VanillaOption> {
        &self.call
    }

    /// Returns the put leg.
    #[inline]
    pub fn put(&self) -> &Priced<VanillaOption> {
        &self.put
    }

    /// Underlying class of the call leg.
    #[inline]
    pub fn underlying(&self) -> UnderlyingClass {
        self.call.instrument.underlying()
    }
}
