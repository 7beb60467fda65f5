//! # pricer_core: Mathematical Foundation for the Pricing Library
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the 4-layer architecture, providing:
//! - Time types: `Date`, `DayCountConvention`, `Maturity` (`types::time`)
//! - Error types: `ConfigurationError`, `SolverError`, `DomainError`,
//!   `InterpolationError` and the umbrella `PricingError` (`types::error`)
//! - Interpolators generic over `T: Float` (`math::interpolators`)
//! - Least-squares and target solvers (`math::solvers`)
//! - Rates, rate curves and discounting (`market_data`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Error derives
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::Rate;
//! use pricer_core::types::{Date, DayCountConvention, Maturity};
//!
//! let begin = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 12, 26).unwrap();
//! let maturity = Maturity::from_dates(begin, end, DayCountConvention::Act360).unwrap();
//! assert!((maturity.years() - 1.0).abs() < 1e-12);
//!
//! let df = Rate::flat(0.03).discount_factor(&maturity, None);
//! assert!((df - (-0.03f64).exp()).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for Date, DayCountConvention,
//!   InterpolationMethod, Compounding and the error types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
