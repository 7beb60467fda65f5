//! Trade requests as read from TOML files.
//!
//! Enumerated inputs (underlying, option type, day count, ...) stay strings
//! here and are parsed by the pricing library, so a bad value surfaces as the
//! library's own configuration or domain error.

use pricer_core::market_data::{Compounding, InterpolationMethod, Rate};
use pricer_core::types::{ConfigurationError, Date, DayCountConvention, Maturity};
use pricer_pricing::context::MarketContext;
use pricer_risk::StressScenario;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// Maturity given as a year count or as a begin/end date pair.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaturityInput {
    /// Time to maturity in years
    pub years: Option<f64>,
    /// Valuation date, `YYYY-MM-DD`
    pub begin_date: Option<String>,
    /// Expiry date, `YYYY-MM-DD`
    pub end_date: Option<String>,
    /// `ACT/360` (default) or `ACT/365`
    pub day_count: Option<String>,
}

impl MaturityInput {
    /// Maturity of `years`.
    pub fn from_years(years: f64) -> Self {
        Self {
            years: Some(years),
            ..Self::default()
        }
    }

    /// Builds the maturity.
    pub fn resolve(&self) -> Result<Maturity> {
        let convention = match &self.day_count {
            Some(s) => s.parse::<DayCountConvention>()?,
            None => DayCountConvention::default(),
        };
        let begin = self.begin_date.as_deref().map(Date::parse).transpose()?;
        let end = self.end_date.as_deref().map(Date::parse).transpose()?;
        Ok(Maturity::resolve(self.years, begin, end, convention)?)
    }

    fn from_maturity(maturity: &Maturity) -> Self {
        Self {
            years: Some(maturity.years()),
            begin_date: None,
            end_date: maturity.end_date().map(|d| d.to_string()),
            day_count: Some(maturity.convention().name().to_string()),
        }
    }
}

/// Flat rate or interpolated curve.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RateInput {
    /// Flat rate
    pub value: Option<f64>,
    /// Curve pillars, in years
    pub tenors: Option<Vec<f64>>,
    /// Curve rates at the pillars
    pub rates: Option<Vec<f64>>,
    /// `linear` (default), `cubic`, `barycentric` or `krogh`
    pub interpolation: Option<String>,
    /// `continuous` (default) or `compounded`
    pub compounding: Option<String>,
}

impl RateInput {
    /// Flat continuous rate.
    pub fn flat(value: f64) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// Builds the rate.
    pub fn build(&self) -> Result<Rate> {
        let rate = match (self.value, &self.tenors, &self.rates) {
            (Some(value), _, _) => Rate::flat(value),
            (None, Some(tenors), Some(rates)) => {
                let method = match &self.interpolation {
                    Some(s) => s.parse::<InterpolationMethod>()?,
                    None => InterpolationMethod::Linear,
                };
                Rate::from_curve(tenors, rates, method)?
            }
            _ => {
                return Err(ConfigurationError::MissingInput {
                    key: "rate.value or rate.tenors/rate.rates".to_string(),
                }
                .into())
            }
        };
        Ok(match &self.compounding {
            Some(s) => rate.with_compounding(s.parse::<Compounding>()?),
            None => rate,
        })
    }
}

/// Market inputs for option products.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MarketInput {
    /// Initial spot
    pub spot: f64,
    /// Annualised volatility
    pub volatility: f64,
    /// Dividend yield, or cash dividend when `dividend_date` is set
    #[serde(default)]
    pub dividend: Option<f64>,
    /// Time to the cash dividend, in years
    #[serde(default)]
    pub dividend_date: Option<f64>,
    /// Foreign rate for FX underlyings
    #[serde(default)]
    pub forward_rate: Option<f64>,
}

/// Product-specific part of a [`TradeRequest`], tagged by `product`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "product", rename_all = "snake_case")]
pub enum ProductRequest {
    /// Zero-coupon bond
    ZeroCouponBond {
        /// Nominal repaid at maturity
        nominal: f64,
    },
    /// Fixed-rate coupon bond
    FixedBond {
        /// Annual coupon rate
        coupon_rate: f64,
        /// Nominal
        nominal: f64,
        /// Number of coupons
        nb_coupon: usize,
    },
    /// Floating-rate bond at a fixing
    FloatingBond {
        /// Floating-rate fixing
        libor_rate: f64,
        /// Nominal
        nominal: f64,
        /// Number of coupons
        nb_coupon: usize,
    },
    /// Fixed against floating swap
    Swap {
        /// Fixed leg rate
        fixed_rate: f64,
        /// Floating leg fixing
        libor_rate: f64,
        /// Nominal
        nominal: f64,
        /// Number of coupons on each leg
        nb_coupon: usize,
        /// Whether the fixed leg is paid
        #[serde(default = "default_true")]
        fixed_pay: bool,
    },
    /// European call or put
    Vanilla {
        /// `call` or `put`
        option_type: String,
        /// Underlying class name
        underlying: String,
        /// Strike
        strike: f64,
        /// Domestic rate, FX only
        #[serde(default)]
        domestic_rate: Option<f64>,
    },
    /// Call or put spread
    Spread {
        /// `call` or `put`
        option_type: String,
        /// Underlying class name
        underlying: String,
        /// Long leg strike
        long_strike: f64,
        /// Short leg strike
        short_strike: f64,
        /// Domestic rate, FX only
        #[serde(default)]
        domestic_rate: Option<f64>,
    },
    /// Butterfly: put spread and call spread sharing the middle strike
    Butterfly {
        /// Underlying class name
        underlying: String,
        /// Long call strike
        lower_strike: f64,
        /// Shared short strike
        middle_strike: f64,
        /// Long put strike
        upper_strike: f64,
        /// Domestic rate, FX only
        #[serde(default)]
        domestic_rate: Option<f64>,
    },
    /// Straddle, strangle, strip or strap
    Strategy {
        /// Strategy name
        strategy: String,
        /// `long` or `short`
        #[serde(default = "default_position")]
        position: String,
        /// Underlying class name
        underlying: String,
        /// Call leg strike
        call_strike: f64,
        /// Put leg strike
        put_strike: f64,
        /// Domestic rate, FX only
        #[serde(default)]
        domestic_rate: Option<f64>,
    },
    /// Digital or touch option
    Binary {
        /// Binary kind, e.g. `one_touch`
        option_type: String,
        /// Amount paid
        payoff_amount: f64,
        /// Strike, for binary call and put
        #[serde(default)]
        strike: Option<f64>,
        /// Single barrier
        #[serde(default)]
        barrier: Option<f64>,
        /// Lower barrier
        #[serde(default)]
        lower_barrier: Option<f64>,
        /// Upper barrier
        #[serde(default)]
        upper_barrier: Option<f64>,
    },
    /// Knock-out or knock-in call
    Barrier {
        /// `knock_out` or `knock_in`
        option_type: String,
        /// Strike
        strike: f64,
        /// Barrier level
        barrier: f64,
    },
    /// Short put plus fixed-rate bond
    ReverseConvertible {
        /// Underlying class name
        underlying: String,
        /// Put strike
        strike: f64,
        /// Bond coupon rate
        coupon_rate: f64,
        /// Bond nominal
        nominal: f64,
        /// Bond coupons
        nb_coupon: usize,
        /// Domestic rate, FX only
        #[serde(default)]
        domestic_rate: Option<f64>,
    },
    /// Outperformance certificate struck at the money
    Certificate {
        /// Underlying class name
        underlying: String,
        /// Domestic rate, FX only
        #[serde(default)]
        domestic_rate: Option<f64>,
    },
}

fn default_true() -> bool {
    true
}

fn default_position() -> String {
    "long".to_string()
}

impl ProductRequest {
    /// Whether the product is a bond or swap, priced off the rate alone.
    pub fn is_rates_product(&self) -> bool {
        matches!(
            self,
            Self::ZeroCouponBond { .. }
                | Self::FixedBond { .. }
                | Self::FloatingBond { .. }
                | Self::Swap { .. }
        )
    }

    fn nominal_mut(&mut self) -> Option<&mut f64> {
        match self {
            Self::ZeroCouponBond { nominal }
            | Self::FixedBond { nominal, .. }
            | Self::FloatingBond { nominal, .. }
            | Self::Swap { nominal, .. } => Some(nominal),
            _ => None,
        }
    }
}

/// One trade: product, maturity, discounting rate and, for options, market.
///
/// # Examples
/// ```
/// use service_cli::desk::{ProductRequest, TradeRequest};
///
/// let request = TradeRequest::from_toml(r#"
///     product = "vanilla"
///     option_type = "call"
///     underlying = "no dividend share"
///     strike = 102.0
///
///     [maturity]
///     years = 0.5
///
///     [rate]
///     value = 0.03
///
///     [market]
///     spot = 100.0
///     volatility = 0.2
/// "#).unwrap();
///
/// assert!(matches!(request.product, ProductRequest::Vanilla { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TradeRequest {
    /// Product terms
    #[serde(flatten)]
    pub product: ProductRequest,
    /// Maturity of the trade
    pub maturity: MaturityInput,
    /// Discounting rate
    pub rate: RateInput,
    /// Market inputs, required for option products
    #[serde(default)]
    pub market: Option<MarketInput>,
}

impl TradeRequest {
    /// Parses a TOML trade.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Reads and parses a TOML trade file.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
        Self::from_toml(&content)
    }

    /// Market context for option products.
    pub fn market_context(&self) -> Result<MarketContext> {
        let market = self.market.as_ref().ok_or_else(|| ConfigurationError::MissingInput {
            key: "market".to_string(),
        })?;
        let mut context = MarketContext::new(
            market.spot,
            self.rate.build()?,
            market.volatility,
            self.maturity.resolve()?,
        );
        context.dividend = market.dividend;
        context.dividend_date = market.dividend_date;
        context.forward_rate = market.forward_rate;
        Ok(context)
    }

    /// Copy of the request with the scenario applied: maturity shifted,
    /// and the spot (options) or nominal (bonds, swaps) replaced.
    pub fn stressed(&self, scenario: &StressScenario) -> Result<Self> {
        let mut stressed = self.clone();
        if scenario.shifts_maturity() {
            let shifted = scenario.apply_maturity(&self.maturity.resolve()?)?;
            stressed.maturity = MaturityInput::from_maturity(&shifted);
        }
        if let Some(nominal) = stressed.product.nominal_mut() {
            *nominal = scenario.apply_spot(*nominal);
        }
        if let Some(market) = stressed.market.as_mut() {
            market.spot = scenario.apply_spot(market.spot);
        }
        Ok(stressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const BOND: &str = r#"
        product = "fixed_bond"
        coupon_rate = 0.05
        nominal = 100
        nb_coupon = 2

        [maturity]
        begin_date = "2025-01-01"
        end_date = "2027-01-01"
        day_count = "ACT/365"

        [rate]
        tenors = [0.5, 1.0, 2.0]
        rates = [0.02, 0.025, 0.03]
    "#;

    // ========================================
    // Parsing Tests
    // ========================================

    #[test]
    fn test_parse_dated_bond() {
        let request = TradeRequest::from_toml(BOND).unwrap();
        assert!(request.product.is_rates_product());
        assert!(request.market.is_none());
        let maturity = request.maturity.resolve().unwrap();
        assert_relative_eq!(maturity.years(), 730.0 / 365.0, epsilon = 1e-12);
        assert!(!request.rate.build().unwrap().is_flat());
    }

    #[test]
    fn test_unknown_product_rejected() {
        let err = TradeRequest::from_toml("product = \"swaption\"\n[maturity]\nyears = 1\n[rate]\nvalue = 0.03");
        assert!(matches!(err, Err(CliError::Toml(_))));
    }

    #[test]
    fn test_missing_rate_and_maturity_inputs() {
        assert!(RateInput::default().build().is_err());
        assert!(MaturityInput::default().resolve().is_err());
        let bad_date = MaturityInput {
            begin_date: Some("2025-13-01".to_string()),
            end_date: Some("2026-01-01".to_string()),
            ..MaturityInput::default()
        };
        assert!(matches!(bad_date.resolve(), Err(CliError::Date(_))));
    }

    #[test]
    fn test_option_needs_market() {
        let request = TradeRequest {
            product: ProductRequest::Certificate {
                underlying: "no dividend share".to_string(),
                domestic_rate: None,
            },
            maturity: MaturityInput::from_years(1.0),
            rate: RateInput::flat(0.03),
            market: None,
        };
        assert!(matches!(request.market_context(), Err(CliError::Pricing(_))));
    }

    // ========================================
    // Stress Tests
    // ========================================

    #[test]
    fn test_stressed_bond_changes_nominal_and_keeps_end_date() {
        let request = TradeRequest::from_toml(BOND).unwrap();
        let scenario = StressScenario::new()
            .with_spot(200.0)
            .with_begin_date(Date::parse("2026-01-01").unwrap());
        let stressed = request.stressed(&scenario).unwrap();

        assert!(matches!(stressed.product, ProductRequest::FixedBond { nominal, .. } if nominal == 200.0));
        assert_eq!(stressed.maturity.end_date.as_deref(), Some("2027-01-01"));
        assert_relative_eq!(stressed.maturity.resolve().unwrap().years(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_stressed_option_changes_spot() {
        let request = TradeRequest {
            product: ProductRequest::Vanilla {
                option_type: "put".to_string(),
                underlying: "no dividend share".to_string(),
                strike: 100.0,
                domestic_rate: None,
            },
            maturity: MaturityInput::from_years(1.0),
            rate: RateInput::flat(0.03),
            market: Some(MarketInput {
                spot: 100.0,
                volatility: 0.2,
                ..MarketInput::default()
            }),
        };
        let stressed = request.stressed(&StressScenario::new().with_spot(90.0)).unwrap();
        assert_eq!(stressed.market.map(|m| m.spot), Some(90.0));
        assert_eq!(stressed.maturity, request.maturity);
    }
}
