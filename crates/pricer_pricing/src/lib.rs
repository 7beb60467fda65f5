//! # Pricer Pricing (Layer 3: Simulation Engine)
//!
//! Monte Carlo pricing of [`pricer_models::instruments::Product`]s under
//! risk-neutral geometric Brownian motion.
//!
//! - [`rng`]: seeded normal shocks
//! - [`context`]: market inputs and the per-underlying drift/spot adjustment
//! - [`mc`]: configuration, path generation and the
//!   [`BrownianMotionEngine`](mc::BrownianMotionEngine)
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::market_data::Rate;
//! use pricer_core::types::Maturity;
//! use pricer_models::instruments::{OptionType, Product, UnderlyingClass, VanillaOption};
//! use pricer_pricing::context::MarketContext;
//! use pricer_pricing::mc::{BrownianMotionEngine, MonteCarloConfig};
//!
//! let config = MonteCarloConfig::builder().n_paths(1000).n_steps(10).seed(272).build().unwrap();
//! let market = MarketContext::new(100.0, Rate::flat(0.05), 0.2, Maturity::from_years(1.0).unwrap());
//! let mut engine = BrownianMotionEngine::new(config, market).unwrap();
//!
//! let put = VanillaOption::new(OptionType::Put, UnderlyingClass::NoDividendShare, 100.0).unwrap();
//! let result = engine.price(&Product::from(put)).unwrap();
//! println!("price {:.4} +/- {:.4}", result.price, result.std_error);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod context;
pub mod mc;
pub mod rng;
