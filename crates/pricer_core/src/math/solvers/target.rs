//! Scalar target matching on top of the least-squares solver.

use super::{LeastSquaresConfig, LeastSquaresSolver};
use crate::types::SolverError;

/// Default starting point for [`TargetSolver`].
pub const DEFAULT_INITIAL_GUESS: f64 = 0.01;

/// Default acceptance tolerance for [`TargetSolver`].
pub const DEFAULT_TARGET_TOLERANCE: f64 = 1e-3;

/// Finds `x` such that `f(x)` matches a target value.
///
/// Minimises `(target − f(x))²` with [`LeastSquaresSolver`]. The solve is
/// accepted when `|target − f(x)|` is within `tolerance`; anything else is
/// reported as [`SolverError::NotConverged`] under the configured quantity name.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::TargetSolver;
///
/// // continuously-compounded rate giving a discount factor of 0.95 over 2 years
/// let solver = TargetSolver::default();
/// let r = solver.solve(0.95, |r| (-r * 2.0).exp()).unwrap();
/// assert!(((-r * 2.0).exp() - 0.95).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSolver {
    /// Starting point of the search.
    pub initial_guess: f64,
    /// Maximum accepted `|target − f(x)|`.
    pub tolerance: f64,
    /// Iteration cap handed to the least-squares solver.
    pub max_iterations: usize,
    /// Name used in the non-convergence error.
    pub quantity: &'static str,
}

impl Default for TargetSolver {
    fn default() -> Self {
        Self {
            initial_guess: DEFAULT_INITIAL_GUESS,
            tolerance: DEFAULT_TARGET_TOLERANCE,
            max_iterations: 200,
            quantity: "target",
        }
    }
}

impl TargetSolver {
    /// Solver reporting failures under `quantity`, with default guess and tolerance.
    pub fn for_quantity(quantity: &'static str) -> Self {
        Self {
            quantity,
            ..Self::default()
        }
    }

    /// Replace the starting point.
    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    /// Replace the acceptance tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Solve `f(x) == target`.
    ///
    /// # Errors
    ///
    /// `SolverError::NotConverged` when the best point found misses the target
    /// by more than `tolerance`, `SolverError::NumericalInstability` when `f`
    /// is not finite at the starting point.
    pub fn solve<F>(&self, target: f64, f: F) -> Result<f64, SolverError>
    where
        F: Fn(f64) -> f64,
    {
        // Iterate well past the acceptance threshold, then judge the result.
        let config = LeastSquaresConfig::new(self.tolerance * 1e-4, self.max_iterations);
        let result = LeastSquaresSolver::new(config)
            .solve(|p: &[f64]| vec![target - f(p[0])], vec![self.initial_guess])?;

        let x = result.params[0];
        let miss = (target - f(x)).abs();
        if miss.is_finite() && miss <= self.tolerance {
            Ok(x)
        } else {
            Err(SolverError::NotConverged {
                quantity: self.quantity,
                iterations: result.iterations,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let solver = TargetSolver::default();
        assert_eq!(solver.initial_guess, 0.01);
        assert_eq!(solver.tolerance, 1e-3);
    }

    #[test]
    fn test_solve_discount_rate() {
        let solver = TargetSolver::default();
        let r = solver.solve(0.9, |r| (-r * 3.0).exp()).unwrap();
        assert_relative_eq!(r, -(0.9f64).ln() / 3.0, epsilon = 1e-4);
    }

    #[test]
    fn test_solve_bond_like_price() {
        // two cashflows, solve for the flat rate reproducing a price
        let price = |r: f64| 5.0 * (-r).exp() + 105.0 * (-2.0 * r).exp();
        let target = price(0.045);
        let r = TargetSolver::for_quantity("YTM").solve(target, price).unwrap();
        assert!((price(r) - target).abs() < 1e-3);
        assert_relative_eq!(r, 0.045, epsilon = 1e-5);
    }

    #[test]
    fn test_unreachable_target_reports_quantity() {
        let solver = TargetSolver::for_quantity("YTM");
        match solver.solve(-1.0, |x| x * x) {
            Err(SolverError::NotConverged { quantity, .. }) => assert_eq!(quantity, "YTM"),
            other => panic!("Expected NotConverged, got {:?}", other),
        }
    }

    #[test]
    fn test_builder_methods() {
        let solver = TargetSolver::default()
            .with_initial_guess(0.05)
            .with_tolerance(1e-6);
        assert_eq!(solver.initial_guess, 0.05);
        assert_eq!(solver.tolerance, 1e-6);
        let x = solver.solve(4.0, |x| x * x).unwrap();
        assert_relative_eq!(x, 2.0, epsilon = 1e-6);
    }
}
