//! Core time and error types.
//!
//! This module provides:
//! - `time`: `Date`, `DayCountConvention` and `Maturity`
//! - `error`: Structured error types for configuration, solver, domain and interpolation failures
//!
//! # Re-exports
//!
//! - [`Date`], [`DayCountConvention`], [`Maturity`] from `time`
//! - [`PricingError`], [`ConfigurationError`], [`SolverError`], [`DomainError`],
//!   [`InterpolationError`], [`DateError`] from `error`

pub mod error;
pub mod time;

pub use error::{
    ConfigurationError, DateError, DomainError, InterpolationError, PricingError, SolverError,
};
pub use time::{Date, DayCountConvention, Maturity};
