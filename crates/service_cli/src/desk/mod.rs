//! Pricing desk.
//!
//! [`Desk`] turns a [`TradeRequest`] into core objects, prices them with the
//! Monte Carlo engine (options) or the discount curve (bonds, swaps),
//! attaches closed-form Greeks or bond risk, and returns a [`ResultSet`]
//! rounded to the configured decimals.
//!
//! | Product | Measures |
//! |---------|----------|
//! | zero-coupon bond, swap | price |
//! | fixed / floating bond | price, ytm, duration, convexity |
//! | vanilla | price, proba, payoff, Greeks |
//! | spread, butterfly, strategy | price, Greeks |
//! | reverse convertible | price, bond_price, Greeks |
//! | certificate | price, participation, Greeks |
//! | binary, barrier | price, proba |

mod request;

pub use request::{MarketInput, MaturityInput, ProductRequest, RateInput, TradeRequest};
pub use pricer_risk::{ResultSet, ScenarioOutcome, StressScenario};

use pricer_core::types::{ConfigurationError, Maturity};
use pricer_models::instruments::bonds::{
    FixedRateBond, FloatingRateBond, InterestRateSwap, ZeroCouponBond,
};
use pricer_models::instruments::{
    BarrierKind, BarrierOption, BinaryKind, BinaryOption, BinaryParams, ButterflySpread,
    CertificatOutperformance, OptionStrategy, OptionType, Position, Priced, Product,
    ReverseConvertible, Spread, SpreadKind, StrategyKind, UnderlyingClass, VanillaOption,
};
use pricer_pricing::context::MarketContext;
use pricer_pricing::mc::{BrownianMotionEngine, MonteCarloConfig, SimulationMode};
use pricer_risk::{product_greeks, BondRisk};
use tracing::debug;

use crate::config::CliConfig;
use crate::error::Result;

/// Prices trade requests with one simulation configuration.
#[derive(Debug, Clone, Copy)]
pub struct Desk {
    config: MonteCarloConfig,
    decimals: u32,
}

impl Desk {
    /// Creates a desk.
    pub fn new(config: MonteCarloConfig, decimals: u32) -> Self {
        Self { config, decimals }
    }

    /// Desk from the `[simulation]` and `[output]` settings.
    pub fn from_config(config: &CliConfig) -> Result<Self> {
        Ok(Self::new(config.monte_carlo()?, config.output.decimals))
    }

    /// Simulation settings.
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Rounded measures of a trade.
    pub fn price(&self, request: &TradeRequest) -> Result<ResultSet> {
        Ok(self.measures(request)?.rounded(self.decimals))
    }

    /// Measures before and after `scenario`, with their rounded difference.
    pub fn stress(&self, request: &TradeRequest, scenario: &StressScenario) -> Result<ScenarioOutcome> {
        scenario.evaluate(self.decimals, |stress| match stress {
            Some(s) => self.measures(&request.stressed(s)?),
            None => self.measures(request),
        })
    }

    /// Full simulated paths of an option trade, one row per path.
    pub fn paths(&self, request: &TradeRequest) -> Result<Vec<Vec<f64>>> {
        let market = request.market_context()?;
        let product = self.option_product(&request.product, &market)?;
        let mut engine = BrownianMotionEngine::new(self.config, market)?;
        engine.price_with_mode(&product, SimulationMode::FullPath)?;
        Ok(engine
            .paths()
            .map(|paths| paths.iter().map(<[f64]>::to_vec).collect())
            .unwrap_or_default())
    }

    /// Unrounded measures of a trade.
    pub fn measures(&self, request: &TradeRequest) -> Result<ResultSet> {
        let measures = if request.product.is_rates_product() {
            self.rates_measures(request)?
        } else {
            self.option_measures(request)?
        };
        debug!(measures = measures.len(), "trade priced");
        Ok(measures)
    }

    fn rates_measures(&self, request: &TradeRequest) -> Result<ResultSet> {
        let maturity = request.maturity.resolve()?;
        let rate = request.rate.build()?;
        let mut out = ResultSet::new();

        match request.product {
            ProductRequest::ZeroCouponBond { nominal } => {
                out.insert("price", ZeroCouponBond::new(rate, maturity, nominal).price(None));
            }
            ProductRequest::FixedBond {
                coupon_rate,
                nominal,
                nb_coupon,
            } => {
                let bond = FixedRateBond::new(coupon_rate, maturity, nominal, nb_coupon, rate)?;
                insert_bond_risk(&mut out, bond.price(), BondRisk::new(&bond))?;
            }
            ProductRequest::FloatingBond {
                libor_rate,
                nominal,
                nb_coupon,
            } => {
                let bond = FloatingRateBond::new(libor_rate, maturity, nominal, nb_coupon, rate)?;
                insert_bond_risk(&mut out, bond.price(), BondRisk::floating(&bond))?;
            }
            ProductRequest::Swap {
                fixed_rate,
                libor_rate,
                nominal,
                nb_coupon,
                fixed_pay,
            } => {
                let swap = InterestRateSwap::new(
                    fixed_rate, libor_rate, maturity, nominal, nb_coupon, rate, fixed_pay,
                )?;
                out.insert("price", swap.price());
            }
            _ => {
                return Err(ConfigurationError::UnknownProductKind(
                    "option product priced as a rates product".to_string(),
                )
                .into())
            }
        }
        Ok(out)
    }

    fn option_measures(&self, request: &TradeRequest) -> Result<ResultSet> {
        let market = request.market_context()?;
        let product = self.option_product(&request.product, &market)?;
        let mut out = ResultSet::new();

        match &product {
            Product::Vanilla(option) => {
                let result = self.engine(&market)?.price(&product)?;
                out.insert("price", result.price);
                out.insert("proba", result.probability);
                out.insert("payoff", option.payoff(market.spot));
            }
            Product::Binary(option) => {
                let mode = if is_touch(option.kind()) {
                    SimulationMode::FullPath
                } else {
                    SimulationMode::Terminal
                };
                let result = self.engine(&market)?.price_with_mode(&product, mode)?;
                out.insert("price", result.price);
                out.insert("proba", result.probability);
            }
            Product::Barrier(_) => {
                let result = self.engine(&market)?.price(&product)?;
                out.insert("price", result.price);
                out.insert("proba", result.probability);
            }
            Product::ReverseConvertible(rc) => {
                out.insert("price", rc.price());
                out.insert("bond_price", rc.bond().price());
            }
            Product::Certificate(cert) => {
                out.insert("price", cert.price());
                out.insert("participation", cert.participation());
            }
            other => {
                if let Some(price) = other.leg_price() {
                    out.insert("price", price);
                }
            }
        }

        if let Some(greeks) = product_greeks(&product, &market)? {
            out.insert_greeks(&greeks);
        }
        Ok(out)
    }

    fn engine(&self, market: &MarketContext) -> Result<BrownianMotionEngine> {
        Ok(BrownianMotionEngine::new(self.config, market.clone())?)
    }

    /// Builds the product, pricing composite legs with the engine.
    fn option_product(&self, request: &ProductRequest, market: &MarketContext) -> Result<Product> {
        let maturity = market.maturity;
        let legs = LegBuilder {
            desk: self,
            market,
            maturity: &maturity,
        };

        let product: Product = match request {
            ProductRequest::Vanilla {
                option_type,
                underlying,
                strike,
                domestic_rate,
            } => legs
                .option(option_type.parse()?, underlying.parse()?, *strike, *domestic_rate)?
                .into(),
            ProductRequest::Spread {
                option_type,
                underlying,
                long_strike,
                short_strike,
                domestic_rate,
            } => {
                let option_type: OptionType = option_type.parse()?;
                let underlying: UnderlyingClass = underlying.parse()?;
                let kind = match option_type {
                    OptionType::Call => SpreadKind::CallSpread,
                    OptionType::Put => SpreadKind::PutSpread,
                };
                let long = legs.priced(option_type, underlying, *long_strike, *domestic_rate)?;
                let short = legs.priced(option_type, underlying, *short_strike, *domestic_rate)?;
                Spread::new(kind, long, short)?.into()
            }
            ProductRequest::Butterfly {
                underlying,
                lower_strike,
                middle_strike,
                upper_strike,
                domestic_rate,
            } => {
                let u: UnderlyingClass = underlying.parse()?;
                let puts = Spread::new(
                    SpreadKind::PutSpread,
                    legs.priced(OptionType::Put, u, *upper_strike, *domestic_rate)?,
                    legs.priced(OptionType::Put, u, *middle_strike, *domestic_rate)?,
                )?;
                let calls = Spread::new(
                    SpreadKind::CallSpread,
                    legs.priced(OptionType::Call, u, *lower_strike, *domestic_rate)?,
                    legs.priced(OptionType::Call, u, *middle_strike, *domestic_rate)?,
                )?;
                ButterflySpread::new(puts, calls)?.into()
            }
            ProductRequest::Strategy {
                strategy,
                position,
                underlying,
                call_strike,
                put_strike,
                domestic_rate,
            } => {
                let kind: StrategyKind = strategy.parse()?;
                let position: Position = position.parse()?;
                let u: UnderlyingClass = underlying.parse()?;
                let call = legs.priced(OptionType::Call, u, *call_strike, *domestic_rate)?;
                let put = legs.priced(OptionType::Put, u, *put_strike, *domestic_rate)?;
                OptionStrategy::new(kind, position, call, put)?.into()
            }
            ProductRequest::Binary {
                option_type,
                payoff_amount,
                strike,
                barrier,
                lower_barrier,
                upper_barrier,
            } => {
                let kind: BinaryKind = option_type.parse()?;
                let params = BinaryParams {
                    strike: *strike,
                    payoff_amount: *payoff_amount,
                    barrier: *barrier,
                    lower_barrier: *lower_barrier,
                    upper_barrier: *upper_barrier,
                };
                BinaryOption::new(kind, params)?.into()
            }
            ProductRequest::Barrier {
                option_type,
                strike,
                barrier,
            } => {
                let kind: BarrierKind = option_type.parse()?;
                BarrierOption::new(kind, *strike, *barrier)?.into()
            }
            ProductRequest::ReverseConvertible {
                underlying,
                strike,
                coupon_rate,
                nominal,
                nb_coupon,
                domestic_rate,
            } => {
                let put = legs.priced(OptionType::Put, underlying.parse()?, *strike, *domestic_rate)?;
                let bond = FixedRateBond::new(*coupon_rate, maturity, *nominal, *nb_coupon, market.rate.clone())?;
                ReverseConvertible::new(put, bond)?.into()
            }
            ProductRequest::Certificate {
                underlying,
                domestic_rate,
            } => {
                let u: UnderlyingClass = underlying.parse()?;
                let zero_strike = legs.priced(OptionType::Call, u, 0.0, *domestic_rate)?;
                let atm = legs.priced(OptionType::Call, u, market.spot, *domestic_rate)?;
                CertificatOutperformance::new(zero_strike, atm)?.into()
            }
            ProductRequest::ZeroCouponBond { .. }
            | ProductRequest::FixedBond { .. }
            | ProductRequest::FloatingBond { .. }
            | ProductRequest::Swap { .. } => {
                return Err(ConfigurationError::UnknownProductKind(
                    "bond or swap priced as an option product".to_string(),
                )
                .into())
            }
        };
        debug!(product = product.name(), "product built");
        Ok(product)
    }
}

/// Builds and prices vanilla legs under one market.
struct LegBuilder<'a> {
    desk: &'a Desk,
    market: &'a MarketContext,
    maturity: &'a Maturity,
}

impl LegBuilder<'_> {
    fn option(
        &self,
        option_type: OptionType,
        underlying: UnderlyingClass,
        strike: f64,
        domestic_rate: Option<f64>,
    ) -> Result<VanillaOption> {
        let option = match underlying {
            UnderlyingClass::Forex => {
                let domestic_rate = domestic_rate.ok_or_else(|| ConfigurationError::MissingInput {
                    key: "domestic_rate".to_string(),
                })?;
                VanillaOption::forex(option_type, strike, domestic_rate, self.maturity)?
            }
            _ => VanillaOption::new(option_type, underlying, strike)?,
        };
        Ok(option)
    }

    fn priced(
        &self,
        option_type: OptionType,
        underlying: UnderlyingClass,
        strike: f64,
        domestic_rate: Option<f64>,
    ) -> Result<Priced<VanillaOption>> {
        let option = self.option(option_type, underlying, strike, domestic_rate)?;
        let result = self.desk.engine(self.market)?.price(&Product::from(option))?;
        Ok(Priced::new(option, result.price))
    }
}

fn is_touch(kind: BinaryKind) -> bool {
    !matches!(kind, BinaryKind::BinaryCall | BinaryKind::BinaryPut)
}

fn insert_bond_risk(out: &mut ResultSet, price: f64, risk: BondRisk<'_>) -> Result<()> {
    out.insert("price", price);
    out.insert("ytm", risk.ytm()?);
    out.insert("duration", risk.duration()?);
    out.insert("convexity", risk.convexity()?);
    Ok(())
}
