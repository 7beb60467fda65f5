//! Brownian motion Monte Carlo engine.

use pricer_core::types::{ConfigurationError, PricingError};
use pricer_models::instruments::Product;
use tracing::debug;

use super::config::MonteCarloConfig;
use super::paths::{generate_gbm_paths, generate_terminal_values, PathMatrix};
use super::workspace::PathWorkspace;
use crate::context::MarketContext;
use crate::rng::PricerRng;

/// How paths are simulated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SimulationMode {
    /// Log increments summed per path; only `S_T` reaches the payoff.
    #[default]
    Terminal,
    /// Every node stored and the whole path handed to the payoff.
    FullPath,
}

/// Monte Carlo estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PricingResult {
    /// `DF(T) × mean(payoff)`.
    pub price: f64,
    /// Fraction of paths with a strictly positive payoff.
    pub probability: f64,
    /// Standard error of the discounted price estimate.
    pub std_error: f64,
}

/// Risk-neutral GBM simulator pricing any [`Product`].
///
/// Shocks are drawn from the configured seed, so two engines with the same
/// inputs return bit-identical results.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::Rate;
/// use pricer_core::types::Maturity;
/// use pricer_models::instruments::{OptionType, Product, UnderlyingClass, VanillaOption};
/// use pricer_pricing::context::MarketContext;
/// use pricer_pricing::mc::{BrownianMotionEngine, MonteCarloConfig};
///
/// let config = MonteCarloConfig::builder().n_paths(2000).n_steps(50).build().unwrap();
/// let market = MarketContext::new(100.0, Rate::flat(0.03), 0.2, Maturity::from_years(0.5).unwrap());
/// let mut engine = BrownianMotionEngine::new(config, market).unwrap();
///
/// let call = VanillaOption::new(OptionType::Call, UnderlyingClass::NoDividendShare, 100.0).unwrap();
/// let result = engine.price(&Product::from(call)).unwrap();
/// assert!(result.price > 0.0);
/// assert!(result.probability > 0.0 && result.probability < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct BrownianMotionEngine {
    config: MonteCarloConfig,
    market: MarketContext,
    workspace: PathWorkspace,
}

impl BrownianMotionEngine {
    /// Creates an engine.
    ///
    /// # Errors
    /// See [`MonteCarloConfig::validate`] and [`MarketContext::validate`].
    pub fn new(config: MonteCarloConfig, market: MarketContext) -> Result<Self, PricingError> {
        config.validate()?;
        market.validate()?;
        Ok(Self {
            workspace: PathWorkspace::new(config.n_paths(), config.n_steps()),
            config,
            market,
        })
    }

    /// Prices in terminal mode, or full-path mode when the product needs it.
    pub fn price(&mut self, product: &Product) -> Result<PricingResult, PricingError> {
        let mode = if product.requires_full_path() {
            SimulationMode::FullPath
        } else {
            SimulationMode::Terminal
        };
        self.price_with_mode(product, mode)
    }

    /// Prices with an explicit simulation mode.
    ///
    /// # Errors
    /// - `ConfigurationError::RequiresPathSimulation` for a path-dependent
    ///   product in terminal mode
    /// - `ConfigurationError::MissingInput` when the underlying adjustment
    ///   lacks `dividend` or `forward_rate`
    pub fn price_with_mode(
        &mut self,
        product: &Product,
        mode: SimulationMode,
    ) -> Result<PricingResult, PricingError> {
        debug!(
            product = product.name(),
            ?mode,
            n_paths = self.config.n_paths(),
            n_steps = self.config.n_steps(),
            seed = self.config.seed(),
            "monte carlo pricing"
        );
        match mode {
            SimulationMode::Terminal => self.price_terminal(product),
            SimulationMode::FullPath => self.price_full_path(product),
        }
    }

    fn price_terminal(&mut self, product: &Product) -> Result<PricingResult, PricingError> {
        if product.requires_full_path() {
            return Err(ConfigurationError::RequiresPathSimulation {
                product: product.name(),
            }
            .into());
        }
        let params = self.market.gbm_params(product.underlying())?;
        let n_steps = self.config.n_steps();
        self.draw_shocks();

        let mut terminals = vec![0.0; self.config.n_paths()];
        generate_terminal_values(&mut terminals, self.workspace.shocks(), params, n_steps);

        let payoffs = self.workspace.payoffs_mut();
        for (payoff, &spot) in payoffs.iter_mut().zip(&terminals) {
            *payoff = product.payoff_terminal(spot)?;
        }
        let result = summarise(self.workspace.payoffs(), self.market.discount_factor());
        self.workspace.clear_shocks();

        debug!(price = result.price, probability = result.probability, "terminal pricing done");
        Ok(result)
    }

    fn price_full_path(&mut self, product: &Product) -> Result<PricingResult, PricingError> {
        let params = self.market.flat_gbm_params(product.underlying())?;
        let n_steps = self.config.n_steps();
        self.draw_shocks();

        let (paths, shocks) = self.workspace.paths_mut_and_shocks();
        generate_gbm_paths(paths, shocks, params, n_steps);

        let values: Vec<f64> = PathMatrix::new(self.workspace.paths(), n_steps)
            .iter()
            .map(|path| product.payoff_path(path))
            .collect();
        self.workspace.payoffs_mut().copy_from_slice(&values);
        let result = summarise(self.workspace.payoffs(), self.market.discount_factor());

        debug!(price = result.price, probability = result.probability, "full-path pricing done");
        Ok(result)
    }

    fn draw_shocks(&mut self) {
        if self.workspace.has_shocks() {
            return;
        }
        let dt = self.market.maturity.years() / self.config.n_steps() as f64;
        let mut rng = PricerRng::from_seed(self.config.seed());
        self.workspace.ensure_shocks(&mut rng, dt.sqrt());
        debug!(seed = self.config.seed(), dt, "shocks drawn");
    }

    /// Path matrix of the last full-path simulation.
    pub fn paths(&self) -> Option<PathMatrix<'_>> {
        self.workspace
            .has_paths()
            .then(|| PathMatrix::new(self.workspace.paths(), self.config.n_steps()))
    }

    /// Cached shocks, if any (kept after full-path pricing, cleared after terminal pricing).
    pub fn shocks(&self) -> Option<&[f64]> {
        self.workspace.has_shocks().then(|| self.workspace.shocks())
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Returns the market inputs.
    #[inline]
    pub fn market(&self) -> &MarketContext {
        &self.market
    }
}

fn summarise(payoffs: &[f64], discount_factor: f64) -> PricingResult {
    let n = payoffs.len() as f64;
    let mean = payoffs.iter().sum::<f64>() / n;
    let in_the_money = payoffs.iter().filter(|&&p| p > 0.0).count() as f64;
    let variance = if payoffs.len() > 1 {
        payoffs.iter().map(|&p| (p - mean).powi(2)).sum::<f64>() / (n - 1.0)
    } else {
        0.0
    };
    PricingResult {
        price: discount_factor * mean,
        probability: in_the_money / n,
        std_error: discount_factor * (variance / n).sqrt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::Rate;
    use pricer_core::types::Maturity;
    use pricer_models::instruments::{
        BarrierKind, BarrierOption, BinaryKind, BinaryOption, BinaryParams, OptionType,
        UnderlyingClass, VanillaOption,
    };

    fn engine(n_paths: usize, n_steps: usize) -> BrownianMotionEngine {
        let config = MonteCarloConfig::builder()
            .n_paths(n_paths)
            .n_steps(n_steps)
            .build()
            .unwrap();
        let market = MarketContext::new(100.0, Rate::flat(0.03), 0.2, Maturity::from_years(1.0).unwrap());
        BrownianMotionEngine::new(config, market).unwrap()
    }

    fn call(strike: f64) -> Product {
        VanillaOption::new(OptionType::Call, UnderlyingClass::NoDividendShare, strike)
            .unwrap()
            .into()
    }

    // ========================================
    // Construction Tests
    // ========================================

    #[test]
    fn test_rejects_zero_maturity() {
        let config = MonteCarloConfig::builder().n_paths(10).n_steps(10).build().unwrap();
        let market = MarketContext::new(100.0, Rate::flat(0.03), 0.2, Maturity::from_years(0.0).unwrap());
        assert!(BrownianMotionEngine::new(config, market).unwrap_err().is_domain());
    }

    // ========================================
    // Terminal Mode Tests
    // ========================================

    #[test]
    fn test_zero_strike_call_is_spot() {
        // martingale: E[DF · S_T] = S_0
        let mut e = engine(20_000, 10);
        let result = e.price(&call(0.0)).unwrap();
        assert_relative_eq!(result.price, 100.0, max_relative = 0.01);
        assert_eq!(result.probability, 1.0);
    }

    #[test]
    fn test_terminal_clears_shocks() {
        let mut e = engine(100, 10);
        e.price(&call(100.0)).unwrap();
        assert!(e.shocks().is_none());
        assert!(e.paths().is_none());
    }

    #[test]
    fn test_repeat_pricing_is_identical() {
        let mut e = engine(500, 20);
        let first = e.price(&call(95.0)).unwrap();
        let second = e.price(&call(95.0)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_barrier_in_terminal_mode_fails() {
        let mut e = engine(100, 10);
        let ko: Product = BarrierOption::new(BarrierKind::KnockOut, 100.0, 120.0).unwrap().into();
        let err = e.price_with_mode(&ko, SimulationMode::Terminal).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_missing_dividend_is_reported() {
        let mut e = engine(100, 10);
        let product: Product = VanillaOption::new(OptionType::Put, UnderlyingClass::DividendShare, 100.0)
            .unwrap()
            .into();
        match e.price(&product) {
            Err(PricingError::Configuration(ConfigurationError::MissingInput { key })) => {
                assert_eq!(key, "dividend")
            }
            other => panic!("Expected MissingInput, got {:?}", other),
        }
    }

    // ========================================
    // Full-Path Mode Tests
    // ========================================

    #[test]
    fn test_full_path_keeps_paths_and_shocks() {
        let mut e = engine(50, 12);
        let ko: Product = BarrierOption::new(BarrierKind::KnockOut, 100.0, 130.0).unwrap().into();
        e.price(&ko).unwrap();

        let paths = e.paths().unwrap();
        assert_eq!(paths.n_paths(), 50);
        assert_eq!(paths.n_steps(), 12);
        assert!(paths.iter().all(|p| p[0] == 100.0));
        assert_eq!(e.shocks().map(<[f64]>::len), Some(50 * 12));
    }

    #[test]
    fn test_one_touch_path_worth_more_than_terminal() {
        let mut e = engine(5000, 50);
        let params = BinaryParams {
            barrier: Some(115.0),
            payoff_amount: 1.0,
            ..Default::default()
        };
        let one_touch: Product = BinaryOption::new(BinaryKind::OneTouch, params).unwrap().into();
        let terminal = e.price_with_mode(&one_touch, SimulationMode::Terminal).unwrap();
        let path = e.price_with_mode(&one_touch, SimulationMode::FullPath).unwrap();
        assert!(path.price >= terminal.price);
    }

    #[test]
    fn test_summarise() {
        let result = summarise(&[0.0, 2.0, 4.0, 0.0], 0.5);
        assert_relative_eq!(result.price, 0.75);
        assert_relative_eq!(result.probability, 0.5);
        assert!(result.std_error > 0.0);
    }
}
