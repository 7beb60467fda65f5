//! Monte Carlo pricing under geometric Brownian motion.
//!
//! # Architecture
//!
//! ```text
//! BrownianMotionEngine
//! ├── MonteCarloConfig  (paths, steps, seed)
//! ├── MarketContext     (spot, rate, volatility, maturity, dividends)
//! ├── PathWorkspace     (cached shocks, path matrix, payoffs)
//! └── Orchestration
//!     ├── generate_terminal_values()  terminal mode
//!     ├── generate_gbm_paths()        full-path mode
//!     └── summary statistics
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pricer_core::market_data::Rate;
//! use pricer_core::types::Maturity;
//! use pricer_models::instruments::{BarrierKind, BarrierOption, Product};
//! use pricer_pricing::context::MarketContext;
//! use pricer_pricing::mc::{BrownianMotionEngine, MonteCarloConfig};
//!
//! let config = MonteCarloConfig::builder().n_paths(500).n_steps(100).build().unwrap();
//! let market = MarketContext::new(100.0, Rate::flat(0.03), 0.2, Maturity::from_years(1.0).unwrap());
//! let mut engine = BrownianMotionEngine::new(config, market).unwrap();
//!
//! let ko = Product::from(BarrierOption::new(BarrierKind::KnockOut, 100.0, 140.0).unwrap());
//! let result = engine.price(&ko).unwrap();
//!
//! // barrier products run in full-path mode and leave the paths behind
//! let paths = engine.paths().unwrap();
//! assert_eq!(paths.n_paths(), 500);
//! assert!(result.price >= 0.0);
//! ```

pub mod config;
pub mod engine;
pub mod paths;
pub mod workspace;

pub use config::{MonteCarloConfig, MonteCarloConfigBuilder, MAX_PATHS, MAX_STEPS};
pub use engine::{BrownianMotionEngine, PricingResult, SimulationMode};
pub use paths::{generate_gbm_paths, generate_terminal_values, GbmParams, PathMatrix};
pub use workspace::PathWorkspace;
