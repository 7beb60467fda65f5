//! # Pricer Risk (L4: Application)
//!
//! Sensitivities and scenario analysis on top of the pricing layers.
//!
//! This crate provides:
//! - [`Greeks`]: delta, gamma, vega, theta and rho with linear arithmetic
//! - Closed-form risk engines for vanilla options and the composite
//!   products built from them ([`options`])
//! - Yield-based duration and convexity for coupon bonds ([`bond`])
//! - Stress scenarios and named result sets ([`scenarios`])
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  greeks     - Greeks arithmetic         │
//! │  options    - Black-Scholes risk        │
//! │  bond       - duration, convexity       │
//! │  scenarios  - StressScenario, ResultSet │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │  pricer_pricing (L3)  MarketContext     │
//! │  pricer_models  (L2)  BlackScholes      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use pricer_core::market_data::Rate;
//! use pricer_core::types::Maturity;
//! use pricer_models::instruments::{OptionType, UnderlyingClass, VanillaOption};
//! use pricer_pricing::context::MarketContext;
//! use pricer_risk::options::OptionRisk;
//!
//! let market = MarketContext::new(100.0, Rate::flat(0.03), 0.2, Maturity::from_years(1.0).unwrap());
//! let call = VanillaOption::new(OptionType::Call, UnderlyingClass::NoDividendShare, 100.0).unwrap();
//!
//! let greeks = OptionRisk::new(&call, &market).greeks().unwrap();
//! assert!(greeks.delta > 0.5 && greeks.delta < 1.0);
//! assert!(greeks.gamma > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod bond;
pub mod greeks;
pub mod options;
pub mod scenarios;

pub use bond::BondRisk;
pub use greeks::Greeks;
pub use options::{
    product_greeks, ButterflySpreadRisk, OptionProductsRisk, OptionRisk, SpreadRisk,
    StructuredProductsRisk,
};
pub use scenarios::{ResultSet, ScenarioOutcome, StressScenario};
