//! Vertical spreads and butterflies.

use pricer_core::types::ConfigurationError;
use std::fmt;
use std::str::FromStr;

use super::payoff::{OptionType, UnderlyingClass};
use super::vanilla::VanillaOption;

/// An instrument together with its price, as carried by composite products.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Priced<T> {
    /// The instrument.
    pub instrument: T,
    /// Its price.
    pub price: f64,
}

impl<T> Priced<T> {
    /// Pairs an instrument with a price.
    pub fn new(instrument: T, price: f64) -> Self {
        Self { instrument, price }
    }
}

/// Call spread or put spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SpreadKind {
    /// Long a call, short a higher-strike call.
    CallSpread,
    /// Long a put, short a lower-strike put.
    PutSpread,
}

impl SpreadKind {
    /// Option type both legs must have.
    #[inline]
    pub fn leg_type(&self) -> OptionType {
        match self {
            Self::CallSpread => OptionType::Call,
            Self::PutSpread => OptionType::Put,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::CallSpread => "call spread",
            Self::PutSpread => "put spread",
        }
    }
}

impl FromStr for SpreadKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', " ").as_str() {
            "call spread" => Ok(Self::CallSpread),
            "put spread" => Ok(Self::PutSpread),
            _ => Err(ConfigurationError::UnknownProductKind(s.to_string())),
        }
    }
}

impl fmt::Display for SpreadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Long one vanilla, short another of the same type.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{
///     OptionType, Priced, Spread, SpreadKind, UnderlyingClass, VanillaOption,
/// };
///
/// let u = UnderlyingClass::NoDividendShare;
/// let long = VanillaOption::new(OptionType::Call, u, 100.0).unwrap();
/// let short = VanillaOption::new(OptionType::Call, u, 110.0).unwrap();
///
/// let spread = Spread::new(
///     SpreadKind::CallSpread,
///     Priced::new(long, 6.0),
///     Priced::new(short, 2.5),
/// )
/// .unwrap();
///
/// assert_eq!(spread.payoff(120.0), 10.0);
/// assert_eq!(spread.price(), 3.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spread {
    kind: SpreadKind,
    long: Priced<VanillaOption>,
    short: Priced<VanillaOption>,
}

impl Spread {
    /// Creates a spread, checking leg types and strike ordering.
    ///
    /// # Errors
    /// - `ConfigurationError::InvalidOptionType` if a leg does not match the spread kind
    /// - `ConfigurationError::InconsistentStrikes` if the short strike is not
    ///   above (call spread) or below (put spread) the long strike
    pub fn new(
        kind: SpreadKind,
        long: Priced<VanillaOption>,
        short: Priced<VanillaOption>,
    ) -> Result<Self, ConfigurationError> {
        let expected = kind.leg_type();
        if long.instrument.option_type() != expected || short.instrument.option_type() != expected
        {
            return Err(ConfigurationError::InvalidOptionType(format!(
                "{kind} takes two {expected}s"
            )));
        }

        let (k_long, k_short) = (long.instrument.strike(), short.instrument.strike());
        match kind {
            SpreadKind::CallSpread if k_short <= k_long => {
                return Err(ConfigurationError::InconsistentStrikes {
                    product: "call spread",
                    reason: format!(
                        "short leg strike {k_short} must be greater than long leg strike {k_long}"
                    ),
                })
            }
            SpreadKind::PutSpread if k_long <= k_short => {
                return Err(ConfigurationError::InconsistentStrikes {
                    product: "put spread",
                    reason: format!(
                        "long leg strike {k_long} must be greater than short leg strike {k_short}"
                    ),
                })
            }
            _ => {}
        }

        Ok(Self { kind, long, short })
    }

    /// Long payoff minus short payoff.
    #[inline]
    pub fn payoff(&self, spot: f64) -> f64 {
        self.long.instrument.payoff(spot) - self.short.instrument.payoff(spot)
    }

    /// Long price minus short price.
    #[inline]
    pub fn price(&self) -> f64 {
        self.long.price - self.short.price
    }

    /// Returns the spread kind.
    #[inline]
    pub fn kind(&self) -> SpreadKind {
        self.kind
    }

    /// Returns the long leg.
    #[inline]
    pub fn long_leg(&self) -> &Priced<VanillaOption> {
        &self.long
    }

    /// Returns the short leg.
    #[inline]
    pub fn short_leg(&self) -> &Priced<VanillaOption> {
        &self.short
    }

    /// Underlying class of the long leg.
    #[inline]
    pub fn underlying(&self) -> UnderlyingClass {
        self.long.instrument.underlying()
    }
}

/// Put spread plus call spread sharing the short strike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButterflySpread {
    put_spread: Spread,
    call_spread: Spread,
}

impl ButterflySpread {
    /// Creates a butterfly.
    ///
    /// # Errors
    /// - `ConfigurationError::InvalidOptionType` if the spreads are not a put
    ///   spread and a call spread
    /// - `ConfigurationError::InconsistentStrikes` if the short strikes differ
    pub fn new(put_spread: Spread, call_spread: Spread) -> Result<Self, ConfigurationError> {
        if put_spread.kind() != SpreadKind::PutSpread || call_spread.kind() != SpreadKind::CallSpread
        {
            return Err(ConfigurationError::InvalidOptionType(
                "butterfly takes a put spread and a call spread".to_string(),
            ));
        }
        let k_put = put_spread.short_leg().instrument.strike();
        let k_call = call_spread.short_leg().instrument.strike();
        if k_put != k_call {
            return Err(ConfigurationError::InconsistentStrikes {
                product: "butterfly spread",
                reason: format!(
                    "put spread short strike {k_put} must equal call spread short strike {k_call}"
                ),
            });
        }
        Ok(Self {
            put_spread,
            call_spread,
        })
    }

    /// Sum of both spread payoffs.
    #[inline]
    pub fn payoff(&self, spot: f64) -> f64 {
        self.put_spread.payoff(spot) + self.call_spread.payoff(spot)
    }

    /// Sum of both spread prices.
    #[inline]
    pub fn price(&self) -> f64 {
        self.put_spread.price() + self.call_spread.price()
    }

    /// Returns the put spread.
    #[inline]
    pub fn put_spread(&self) -> &Spread {
        &self.put_spread
    }

    /// Returns the call spread.
    #[inline]
    pub fn call_spread(&self) -> &Spread {
        &self.call_spread
    }

    /// Underlying class of the call spread.
    #[inline]
    pub fn underlying(&self) -> UnderlyingClass {
        self.call_spread.underlying()
    }
}
