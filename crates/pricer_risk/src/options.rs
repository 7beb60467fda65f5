//! Closed-form Black-Scholes risk for options and option-based products.
//!
//! Every engine borrows its product and a [`MarketContext`]. The model is
//! built per underlying class: the carry term `q` is the dividend yield or
//! the foreign rate, and a discrete dividend lowers spot by its present
//! value (see [`MarketContext::carry`] and [`MarketContext::adjusted_spot`]).
//!
//! Composite products combine their legs' Greeks linearly:
//!
//! | Product | Greeks |
//! |---------|--------|
//! | spread | long − short |
//! | butterfly | put spread + call spread |
//! | strategy | ±(w_c·call + w_p·put) |
//! | reverse convertible | −put |
//! | outperformance certificate | (1 − participation)·ATM call |

use pricer_core::types::PricingError;
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::{
    ButterflySpread, CertificatOutperformance, OptionStrategy, Product, ReverseConvertible, Spread,
    UnderlyingClass, VanillaOption,
};
use pricer_pricing::context::MarketContext;
use tracing::debug;

use crate::greeks::Greeks;

/// Black-Scholes model for an underlying class under the given market.
///
/// # Errors
/// - `DomainError::NonPositiveMaturity` and `ConfigurationError` from
///   [`MarketContext::validate`]
/// - `ConfigurationError::MissingInput` when the dividend or foreign rate
///   is needed but absent
/// - `ConfigurationError::InvalidParameter` for zero volatility or a
///   dividend-adjusted spot at or below zero
pub fn black_scholes(
    market: &MarketContext,
    underlying: UnderlyingClass,
) -> Result<BlackScholes<f64>, PricingError> {
    market.validate()?;
    let spot = market.adjusted_spot(Some(underlying))?;
    let carry = market.carry(Some(underlying))?;
    let model = BlackScholes::new(spot, market.implied_rate(), market.volatility)?
        .with_dividend_yield(carry);
    Ok(model)
}

/// Risk of a European vanilla option.
#[derive(Debug, Clone, Copy)]
pub struct OptionRisk<'a> {
    option: &'a VanillaOption,
    market: &'a MarketContext,
}

impl<'a> OptionRisk<'a> {
    /// Creates the engine.
    pub fn new(option: &'a VanillaOption, market: &'a MarketContext) -> Self {
        Self { option, market }
    }

    fn model(&self) -> Result<BlackScholes<f64>, PricingError> {
        black_scholes(self.market, self.option.underlying())
    }

    /// Closed-form price.
    pub fn price(&self) -> Result<f64, PricingError> {
        let t = self.market.maturity.years();
        Ok(self.model()?.price(self.option.option_type(), self.option.strike(), t))
    }

    /// Black-Scholes delta.
    pub fn delta(&self) -> Result<f64, PricingError> {
        let t = self.market.maturity.years();
        Ok(self.model()?.delta(self.option.option_type(), self.option.strike(), t))
    }

    /// Black-Scholes gamma.
    pub fn gamma(&self) -> Result<f64, PricingError> {
        let t = self.market.maturity.years();
        Ok(self.model()?.gamma(self.option.strike(), t))
    }

    /// Black-Scholes vega.
    pub fn vega(&self) -> Result<f64, PricingError> {
        let t = self.market.maturity.years();
        Ok(self.model()?.vega(self.option.strike(), t))
    }

    /// Black-Scholes theta, per year.
    pub fn theta(&self) -> Result<f64, PricingError> {
        let t = self.market.maturity.years();
        Ok(self.model()?.theta(self.option.option_type(), self.option.strike(), t))
    }

    /// Black-Scholes rho.
    pub fn rho(&self) -> Result<f64, PricingError> {
        let t = self.market.maturity.years();
        Ok(self.model()?.rho(self.option.option_type(), self.option.strike(), t))
    }

    /// All five sensitivities from one model build.
    pub fn greeks(&self) -> Result<Greeks, PricingError> {
        let model = self.model()?;
        let t = self.market.maturity.years();
        let (ot, k) = (self.option.option_type(), self.option.strike());
        let greeks = Greeks {
            delta: model.delta(ot, k, t),
            gamma: model.gamma(k, t),
            vega: model.vega(k, t),
            theta: model.theta(ot, k, t),
            rho: model.rho(ot, k, t),
        };
        debug!(
            option_type = %ot,
            strike = k,
            delta = greeks.delta,
            gamma = greeks.gamma,
            "vanilla greeks"
        );
        Ok(greeks)
    }
}

/// Risk of a call or put spread: long leg minus short leg.
#[derive(Debug, Clone, Copy)]
pub struct SpreadRisk<'a> {
    spread: &'a Spread,
    market: &'a MarketContext,
}

impl<'a> SpreadRisk<'a> {
    /// Creates the engine.
    pub fn new(spread: &'a Spread, market: &'a MarketContext) -> Self {
        Self { spread, market }
    }

    /// Long-leg Greeks minus short-leg Greeks.
    pub fn greeks(&self) -> Result<Greeks, PricingError> {
        let long = OptionRisk::new(&self.spread.long_leg().instrument, self.market).greeks()?;
        let short = OptionRisk::new(&self.spread.short_leg().instrument, self.market).greeks()?;
        Ok(long - short)
    }
}

/// Risk of a butterfly: sum of its put and call spreads.
#[derive(Debug, Clone, Copy)]
pub struct ButterflySpreadRisk<'a> {
    butterfly: &'a ButterflySpread,
    market: &'a MarketContext,
}

impl<'a> ButterflySpreadRisk<'a> {
    /// Creates the engine.
    pub fn new(butterfly: &'a ButterflySpread, market: &'a MarketContext) -> Self {
        Self { butterfly, market }
    }

    /// Put-spread Greeks plus call-spread Greeks.
    pub fn greeks(&self) -> Result<Greeks, PricingError> {
        let puts = SpreadRisk::new(self.butterfly.put_spread(), self.market).greeks()?;
        let calls = SpreadRisk::new(self.butterfly.call_spread(), self.market).greeks()?;
        Ok(puts + calls)
    }
}

/// Risk of a straddle, strangle, strip or strap.
#[derive(Debug, Clone, Copy)]
pub struct OptionProductsRisk<'a> {
    strategy: &'a OptionStrategy,
    market: &'a MarketContext,
}

impl<'a> OptionProductsRisk<'a> {
    /// Creates the engine.
    pub fn new(strategy: &'a OptionStrategy, market: &'a MarketContext) -> Self {
        Self { strategy, market }
    }

    /// Weighted leg Greeks, negated for a short position.
    pub fn greeks(&self) -> Result<Greeks, PricingError> {
        let (w_call, w_put) = self.strategy.kind().weights();
        let call = OptionRisk::new(&self.strategy.call().instrument, self.market).greeks()?;
        let put = OptionRisk::new(&self.strategy.put().instrument, self.market).greeks()?;
        Ok((call * w_call + put * w_put) * self.strategy.position().sign())
    }
}

#[derive(Debug, Clone, Copy)]
enum Structured<'a> {
    ReverseConvertible(&'a ReverseConvertible),
    Certificate(&'a CertificatOutperformance),
}

/// Risk of a reverse convertible or an outperformance certificate.
///
/// Only the option legs carry spot and volatility risk; the bond leg of a
/// reverse convertible is left to [`crate::bond::BondRisk`].
#[derive(Debug, Clone, Copy)]
pub struct StructuredProductsRisk<'a> {
    product: Structured<'a>,
    market: &'a MarketContext,
}

impl<'a> StructuredProductsRisk<'a> {
    /// Engine for a reverse convertible.
    pub fn reverse_convertible(product: &'a ReverseConvertible, market: &'a MarketContext) -> Self {
        Self {
            product: Structured::ReverseConvertible(product),
            market,
        }
    }

    /// Engine for an outperformance certificate.
    pub fn certificate(product: &'a CertificatOutperformance, market: &'a MarketContext) -> Self {
        Self {
            product: Structured::Certificate(product),
            market,
        }
    }

    /// Reverse convertible: the negated put Greeks. Certificate: the ATM
    /// call Greeks scaled by `1 − participation`.
    pub fn greeks(&self) -> Result<Greeks, PricingError> {
        match self.product {
            Structured::ReverseConvertible(rc) => {
                Ok(-OptionRisk::new(&rc.put().instrument, self.market).greeks()?)
            }
            Structured::Certificate(cert) => {
                let call = OptionRisk::new(&cert.call().instrument, self.market).greeks()?;
                Ok(call * (1.0 - cert.participation()))
            }
        }
    }
}

/// Closed-form Greeks of any product, or `None` for binary and barrier
/// options, which have no closed form here.
///
/// # Examples
/// ```
/// use pricer_core::market_data::Rate;
/// use pricer_core::types::Maturity;
/// use pricer_models::instruments::{BarrierKind, BarrierOption, Product};
/// use pricer_pricing::context::MarketContext;
/// use pricer_risk::product_greeks;
///
/// let market = MarketContext::new(100.0, Rate::flat(0.03), 0.2, Maturity::from_years(1.0).unwrap());
/// let ko = Product::from(BarrierOption::new(BarrierKind::KnockOut, 100.0, 130.0).unwrap());
/// assert_eq!(product_greeks(&ko, &market).unwrap(), None);
/// ```
pub fn product_greeks(
    product: &Product,
    market: &MarketContext,
) -> Result<Option<Greeks>, PricingError> {
    let greeks = match product {
        Product::Vanilla(p) => OptionRisk::new(p, market).greeks()?,
        Product::Binary(_) | Product::Barrier(_) => return Ok(None),
        Product::Spread(p) => SpreadRisk::new(p, market).greeks()?,
        Product::Butterfly(p) => ButterflySpreadRisk::new(p, market).greeks()?,
        Product::Strategy(p) => OptionProductsRisk::new(p, market).greeks()?,
        Product::ReverseConvertible(p) => {
            StructuredProductsRisk::reverse_convertible(p, market).greeks()?
        }
        Product::Certificate(p) => StructuredProductsRisk::certificate(p, market).greeks()?,
    };
    Ok(Some(greeks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::Rate;
    use pricer_core::types::{ConfigurationError, Maturity};
    use pricer_models::instruments::{OptionType, Position, Priced, SpreadKind, StrategyKind};

    const U: UnderlyingClass = UnderlyingClass::NoDividendShare;

    fn market() -> MarketContext {
        MarketContext::new(100.0, Rate::flat(0.03), 0.2, Maturity::from_years(0.5).unwrap())
    }

    fn option(option_type: OptionType, strike: f64) -> VanillaOption {
        VanillaOption::new(option_type, U, strike).unwrap()
    }

    fn priced(option_type: OptionType, strike: f64) -> Priced<VanillaOption> {
        let opt = option(option_type, strike);
        let price = OptionRisk::new(&opt, &market()).price().unwrap();
        Priced::new(opt, price)
    }

    fn greeks(option_type: OptionType, strike: f64) -> Greeks {
        OptionRisk::new(&option(option_type, strike), &market()).greeks().unwrap()
    }

    // ========================================
    // Vanilla Tests
    // ========================================

    #[test]
    fn test_vanilla_matches_black_scholes() {
        let m = market();
        let call = option(OptionType::Call, 102.0);
        let risk = OptionRisk::new(&call, &m);
        let bs = BlackScholes::new(100.0, 0.03, 0.2).unwrap();

        assert_relative_eq!(risk.price().unwrap(), bs.price_call(102.0, 0.5), epsilon = 1e-10);
        assert_relative_eq!(risk.delta().unwrap(), bs.delta(OptionType::Call, 102.0, 0.5), epsilon = 1e-10);
        assert_relative_eq!(risk.gamma().unwrap(), bs.gamma(102.0, 0.5), epsilon = 1e-10);
        assert_relative_eq!(risk.vega().unwrap(), bs.vega(102.0, 0.5), epsilon = 1e-10);
        assert_relative_eq!(risk.theta().unwrap(), bs.theta(OptionType::Call, 102.0, 0.5), epsilon = 1e-10);
        assert_relative_eq!(risk.rho().unwrap(), bs.rho(OptionType::Call, 102.0, 0.5), epsilon = 1e-10);
    }

    #[test]
    fn test_call_put_delta_parity() {
        let call = greeks(OptionType::Call, 100.0);
        let put = greeks(OptionType::Put, 100.0);
        assert_relative_eq!(call.delta - put.delta, 1.0, epsilon = 1e-12);
        assert_relative_eq!(call.gamma, put.gamma, epsilon = 1e-12);
        assert_relative_eq!(call.vega, put.vega, epsilon = 1e-12);
    }

    #[test]
    fn test_dividend_yield_reduces_call_delta() {
        let paying = VanillaOption::new(OptionType::Call, UnderlyingClass::DividendShare, 100.0).unwrap();
        let m = market().with_dividend(0.04);
        let with_q = OptionRisk::new(&paying, &m).greeks().unwrap();
        assert!(with_q.delta < greeks(OptionType::Call, 100.0).delta);
    }

    #[test]
    fn test_missing_forward_rate() {
        let fx = VanillaOption::new(OptionType::Call, UnderlyingClass::Forex, 1.1).unwrap();
        let m = market();
        match OptionRisk::new(&fx, &m).greeks() {
            Err(PricingError::Configuration(ConfigurationError::MissingInput { key })) => {
                assert_eq!(key, "forward_rate")
            }
            other => panic!("Expected MissingInput, got {:?}", other),
        }
    }

    // ========================================
    // Composite Tests
    // ========================================

    #[test]
    fn test_spread_is_long_minus_short() {
        let spread = Spread::new(
            SpreadKind::CallSpread,
            priced(OptionType::Call, 95.0),
            priced(OptionType::Call, 105.0),
        )
        .unwrap();
        let g = SpreadRisk::new(&spread, &market()).greeks().unwrap();
        let expected = greeks(OptionType::Call, 95.0) - greeks(OptionType::Call, 105.0);
        assert_relative_eq!(g.delta, expected.delta, epsilon = 1e-12);
        assert!(g.delta > 0.0);
    }

    #[test]
    fn test_butterfly_sums_spreads() {
        let puts = Spread::new(
            SpreadKind::PutSpread,
            priced(OptionType::Put, 110.0),
            priced(OptionType::Put, 100.0),
        )
        .unwrap();
        let calls = Spread::new(
            SpreadKind::CallSpread,
            priced(OptionType::Call, 90.0),
            priced(OptionType::Call, 100.0),
        )
        .unwrap();
        let fly = ButterflySpread::new(puts, calls).unwrap();
        let m = market();
        let g = ButterflySpreadRisk::new(&fly, &m).greeks().unwrap();
        let expected = SpreadRisk::new(&puts, &m).greeks().unwrap() + SpreadRisk::new(&calls, &m).greeks().unwrap();
        assert_relative_eq!(g.vega, expected.vega, epsilon = 1e-12);
    }

    #[test]
    fn test_short_strap_weights() {
        let strap = OptionStrategy::new(
            StrategyKind::Strap,
            Position::Short,
            priced(OptionType::Call, 100.0),
            priced(OptionType::Put, 100.0),
        )
        .unwrap();
        let g = OptionProductsRisk::new(&strap, &market()).greeks().unwrap();
        let expected = -(greeks(OptionType::Call, 100.0) * 2.0 + greeks(OptionType::Put, 100.0));
        assert_relative_eq!(g.gamma, expected.gamma, epsilon = 1e-12);
        assert!(g.gamma < 0.0);
    }

    #[test]
    fn test_certificate_scales_atm_call() {
        let cert = CertificatOutperformance::new(priced(OptionType::Call, 0.0), priced(OptionType::Call, 100.0)).unwrap();
        let g = StructuredProductsRisk::certificate(&cert, &market()).greeks().unwrap();
        let atm = greeks(OptionType::Call, 100.0);
        assert_relative_eq!(g.delta, atm.delta * (1.0 - cert.participation()), epsilon = 1e-12);
    }

    #[test]
    fn test_product_dispatch() {
        let put = option(OptionType::Put, 100.0);
        let g = product_greeks(&Product::from(put), &market()).unwrap();
        assert_eq!(g, Some(greeks(OptionType::Put, 100.0)));
    }
}
