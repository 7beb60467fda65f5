//! Market data: interest rates and the curves they are read from.
//!
//! # Components
//!
//! - [`curves`]: Pillar-based [`RateCurve`] with a selectable
//!   [`InterpolationMethod`]
//! - [`Rate`]: flat or curve rate plus [`Compounding`], producing discount
//!   factors
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::{InterpolationMethod, Rate};
//! use pricer_core::types::Maturity;
//!
//! let rate = Rate::from_curve(
//!     &[0.5, 1.0, 2.0, 5.0],
//!     &[0.02, 0.025, 0.03, 0.035],
//!     "cubic".parse::<InterpolationMethod>().unwrap(),
//! )
//! .unwrap();
//!
//! let t = Maturity::from_years(1.0).unwrap();
//! assert!((rate.rate(&t) - 0.025).abs() < 1e-12);
//! ```

pub mod curves;
mod rate;

pub use curves::{InterpolationMethod, RateCurve};
pub use rate::{Compounding, Rate};
