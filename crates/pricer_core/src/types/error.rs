//! Error types for structured error handling.
//!
//! This module provides:
//! - `ConfigurationError`: Malformed instrument or market inputs, raised at construction
//! - `SolverError`: Errors from root-finding and least-squares solvers
//! - `DomainError`: Inputs outside the domain the simulation understands
//! - `InterpolationError`: Errors from the generic interpolators
//! - `DateError`: Errors from date construction and parsing
//! - `PricingError`: Umbrella error returned by pricing and risk operations
//!
//! All configuration and domain errors are raised when an object is built,
//! so a malformed instrument can never reach a pricing routine.

use std::fmt;
use thiserror::Error;

/// Date-related errors.
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    ParseError(String),
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateError::InvalidDate { year, month, day } => {
                write!(f, "Invalid date: {}-{}-{}", year, month, day)
            }
            DateError::ParseError(msg) => write!(f, "Date parse error: {}", msg),
        }
    }
}

impl std::error::Error for DateError {}

/// Configuration errors for instruments and market inputs.
///
/// Every variant is detected while an object is constructed; none of them is
/// recovered internally.
///
/// # Examples
/// ```
/// use pricer_core::types::ConfigurationError;
///
/// let err = ConfigurationError::MissingInput { key: "dividend".to_string() };
/// assert_eq!(format!("{}", err), "Missing input: dividend");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ConfigurationError {
    /// A required input is absent.
    #[error("Missing input: {key}")]
    MissingInput {
        /// Name of the missing input
        key: String,
    },

    /// Day-count convention string not recognised.
    #[error("Unknown day count convention: {0} (expected ACT/360 or ACT/365)")]
    UnknownDayCount(String),

    /// Interpolation method string not recognised.
    #[error("Unknown interpolation type: {0} (expected linear, cubic, barycentric or krogh)")]
    UnknownInterpolation(String),

    /// Compounding convention string not recognised.
    #[error("Unknown rate type: {0} (expected continuous or compounded)")]
    UnknownCompounding(String),

    /// Curve has too few pillars for the chosen interpolation.
    #[error("Not enough points in rate curve for {method}: got {got}, need at least {need}")]
    InsufficientCurvePoints {
        /// Interpolation method name
        method: &'static str,
        /// Number of pillars supplied
        got: usize,
        /// Minimum required
        need: usize,
    },

    /// Option type string not recognised.
    #[error("Invalid option type: {0}")]
    InvalidOptionType(String),

    /// Product or strategy kind string not recognised.
    #[error("Unknown product kind: {0}")]
    UnknownProductKind(String),

    /// A barrier level required by the product kind is absent.
    #[error("Barrier value required for {kind} option: {detail}")]
    MissingBarrier {
        /// Product kind
        kind: &'static str,
        /// Which barrier(s) are needed
        detail: &'static str,
    },

    /// Legs of a composite product violate its strike rule.
    #[error("Inconsistent strikes for {product}: {reason}")]
    InconsistentStrikes {
        /// Product name
        product: &'static str,
        /// Violated rule
        reason: String,
    },

    /// Numeric parameter outside its admissible range.
    #[error("Invalid parameter {name}: {value}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Offending value, formatted
        value: String,
    },

    /// Product payoff depends on the whole path but terminal values were supplied.
    #[error("{product} requires full-path Monte Carlo simulation")]
    RequiresPathSimulation {
        /// Product name
        product: &'static str,
    },

    /// Interpolant could not be constructed from the curve.
    #[error("Rate curve error: {0}")]
    Curve(#[from] InterpolationError),
}

/// Inputs outside the domain handled by the simulation.
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DomainError {
    /// Underlying-asset classification not recognised.
    #[error("Unknown underlying: {0}")]
    UnknownUnderlying(String),

    /// Maturity must be strictly positive for a priced instrument.
    #[error("Maturity must be positive for pricing, got {years} years")]
    NonPositiveMaturity {
        /// Maturity in years
        years: f64,
    },
}

/// Interpolation errors.
///
/// # Examples
/// ```
/// use pricer_core::types::InterpolationError;
///
/// let err = InterpolationError::InsufficientData { got: 2, need: 4 };
/// assert!(format!("{}", err).contains("need at least 4"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum InterpolationError {
    /// Not enough nodes for the interpolation scheme.
    #[error("Insufficient data: got {got} points, need at least {need}")]
    InsufficientData {
        /// Number of points supplied
        got: usize,
        /// Minimum required
        need: usize,
    },

    /// Two nodes share an abscissa.
    #[error("Duplicate abscissa at index {index}")]
    DuplicateAbscissa {
        /// Index of the duplicate after sorting
        index: usize,
    },

    /// Abscissa and ordinate lengths differ, or values are not finite.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Solver errors.
///
/// # Examples
/// ```
/// use pricer_core::types::SolverError;
///
/// let err = SolverError::NotConverged { quantity: "YTM", iterations: 100 };
/// assert_eq!(format!("{}", err), "YTM not found after 100 iterations");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SolverError {
    /// The solver stopped without meeting its tolerance.
    #[error("{quantity} not found after {iterations} iterations")]
    NotConverged {
        /// What was being solved for
        quantity: &'static str,
        /// Iterations performed
        iterations: usize,
    },

    /// Numerical breakdown (empty problem, non-finite residual, singular system).
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

/// Umbrella error for pricing and risk operations.
///
/// # Examples
/// ```
/// use pricer_core::types::{DomainError, PricingError};
///
/// let err: PricingError = DomainError::UnknownUnderlying("bond".to_string()).into();
/// assert_eq!(format!("{}", err), "Unknown underlying: bond");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Malformed configuration
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Solver failure
    #[error(transparent)]
    Solver(#[from] SolverError),

    /// Domain violation
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<InterpolationError> for PricingError {
    fn from(err: InterpolationError) -> Self {
        PricingError::Configuration(ConfigurationError::Curve(err))
    }
}

impl PricingError {
    /// Returns true for configuration errors.
    pub fn is_configuration(&self) -> bool {
        matches!(self, PricingError::Configuration(_))
    }

    /// Returns true for solver errors.
    pub fn is_solver(&self) -> bool {
        matches!(self, PricingError::Solver(_))
    }

    /// Returns true for domain errors.
    pub fn is_domain(&self) -> bool {
        matches!(self, PricingError::Domain(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Display Tests
    // ========================================

    #[test]
    fn test_date_error_display() {
        let err = DateError::ParseError("bad".to_string());
        assert_eq!(format!("{}", err), "Date parse error: bad");
    }

    #[test]
    fn test_missing_input_names_key() {
        let err = ConfigurationError::MissingInput {
            key: "forward_rate".to_string(),
        };
        assert!(format!("{}", err).contains("forward_rate"));
    }

    #[test]
    fn test_insufficient_points_display() {
        let err = ConfigurationError::InsufficientCurvePoints {
            method: "cubic",
            got: 3,
            need: 4,
        };
        assert_eq!(
            format!("{}", err),
            "Not enough points in rate curve for cubic: got 3, need at least 4"
        );
    }

    #[test]
    fn test_unknown_underlying_display() {
        let err = DomainError::UnknownUnderlying("commodity".to_string());
        assert_eq!(format!("{}", err), "Unknown underlying: commodity");
    }

    // ========================================
    // Conversion Tests
    // ========================================

    #[test]
    fn test_pricing_error_from_configuration() {
        let err: PricingError = ConfigurationError::UnknownDayCount("30/360".to_string()).into();
        assert!(err.is_configuration());
        assert!(!err.is_solver());
    }

    #[test]
    fn test_pricing_error_from_solver() {
        let err: PricingError = SolverError::NotConverged {
            quantity: "YTM",
            iterations: 10,
        }
        .into();
        assert!(err.is_solver());
        assert_eq!(format!("{}", err), "YTM not found after 10 iterations");
    }

    #[test]
    fn test_pricing_error_from_interpolation() {
        let err: PricingError = InterpolationError::InsufficientData { got: 0, need: 1 }.into();
        match err {
            PricingError::Configuration(ConfigurationError::Curve(_)) => {}
            other => panic!("Expected curve configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_pricing_error_from_domain() {
        let err: PricingError = DomainError::NonPositiveMaturity { years: 0.0 }.into();
        assert!(err.is_domain());
    }
}
