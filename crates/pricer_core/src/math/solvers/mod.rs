//! Optimisation solvers.
//!
//! - [`LeastSquaresSolver`]: Levenberg-Marquardt nonlinear least squares,
//!   configured through [`LeastSquaresConfig`]
//! - [`TargetSolver`]: scalar `f(x) == target` matching, used for bond
//!   yield-to-maturity
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::solvers::TargetSolver;
//!
//! let x = TargetSolver::default().solve(9.0, |x| x * x).unwrap();
//! assert!((x * x - 9.0).abs() < 1e-3);
//! ```

mod levenberg_marquardt;
mod target;

pub use levenberg_marquardt::{LeastSquaresConfig, LeastSquaresResult, LeastSquaresSolver};
pub use target::{TargetSolver, DEFAULT_INITIAL_GUESS, DEFAULT_TARGET_TOLERANCE};
