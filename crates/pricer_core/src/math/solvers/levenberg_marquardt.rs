//! Levenberg-Marquardt nonlinear least-squares solver.
//!
//! Each iteration solves the damped normal equations
//!
//! ```text
//! (J^T J + λI) δ = −J^T r
//! ```
//!
//! with a forward-difference Jacobian `J`, accepting the step when the sum of
//! squared residuals decreases (λ shrinks) and rejecting it otherwise
//! (λ grows).
//!
//! # Example
//!
//! ```
//! use pricer_core::math::solvers::{LeastSquaresConfig, LeastSquaresSolver};
//!
//! // Minimise (p0 − 2)² + (p1 − 3)²
//! let solver = LeastSquaresSolver::new(LeastSquaresConfig::default());
//! let result = solver
//!     .solve(|p: &[f64]| vec![p[0] - 2.0, p[1] - 3.0], vec![0.0, 0.0])
//!     .unwrap();
//!
//! assert!(result.converged);
//! assert!((result.params[0] - 2.0).abs() < 1e-6);
//! ```

use crate::types::SolverError;

/// Configuration for [`LeastSquaresSolver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeastSquaresConfig {
    /// Converged once the residual norm `‖r‖` falls below this value.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// Initial damping factor.
    pub initial_lambda: f64,
    /// Factor applied to λ on a rejected step.
    pub lambda_up: f64,
    /// Factor applied to λ on an accepted step.
    pub lambda_down: f64,
    /// Lower clamp for λ.
    pub min_lambda: f64,
    /// Upper clamp for λ.
    pub max_lambda: f64,
    /// Relative step size used for the finite-difference Jacobian.
    pub jacobian_step: f64,
}

impl Default for LeastSquaresConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 100,
            initial_lambda: 1e-3,
            lambda_up: 10.0,
            lambda_down: 0.1,
            min_lambda: 1e-12,
            max_lambda: 1e12,
            jacobian_step: 1e-8,
        }
    }
}

impl LeastSquaresConfig {
    /// Configuration with the given tolerance and iteration cap.
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..Default::default()
        }
    }
}

/// Outcome of a least-squares solve.
#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquaresResult {
    /// Final parameters.
    pub params: Vec<f64>,
    /// Final residual sum of squares.
    pub residual_ss: f64,
    /// Iterations performed.
    pub iterations: usize,
    /// Whether the residual tolerance was met.
    pub converged: bool,
}

/// Levenberg-Marquardt solver for `min_p ‖r(p)‖²`.
///
/// Hitting the iteration cap, or λ saturating without progress, is not an
/// error: the result comes back with `converged == false` and the caller
/// decides.
#[derive(Debug, Clone, Default)]
pub struct LeastSquaresSolver {
    config: LeastSquaresConfig,
}

impl LeastSquaresSolver {
    /// Create a solver with the given configuration.
    pub fn new(config: LeastSquaresConfig) -> Self {
        Self { config }
    }

    /// Solver configuration.
    pub fn config(&self) -> &LeastSquaresConfig {
        &self.config
    }

    /// Minimise the sum of squared residuals starting from `initial`.
    ///
    /// # Errors
    ///
    /// `SolverError::NumericalInstability` for an empty parameter or residual
    /// vector, or a non-finite residual at the starting point.
    pub fn solve<F>(&self, residuals: F, initial: Vec<f64>) -> Result<LeastSquaresResult, SolverError>
    where
        F: Fn(&[f64]) -> Vec<f64>,
    {
        if initial.is_empty() {
            return Err(SolverError::NumericalInstability(
                "Empty parameter vector".to_string(),
            ));
        }

        let mut params = initial;
        let mut r = residuals(&params);
        if r.is_empty() {
            return Err(SolverError::NumericalInstability(
                "Empty residual vector".to_string(),
            ));
        }
        let mut ss = sum_of_squares(&r);
        if !ss.is_finite() {
            return Err(SolverError::NumericalInstability(
                "Non-finite residual at initial parameters".to_string(),
            ));
        }

        let cfg = &self.config;
        let mut lambda = cfg.initial_lambda;

        for iteration in 0..cfg.max_iterations {
            if ss.sqrt() < cfg.tolerance {
                return Ok(LeastSquaresResult {
                    params,
                    residual_ss: ss,
                    iterations: iteration,
                    converged: true,
                });
            }

            let jacobian = forward_jacobian(&residuals, &params, &r, cfg.jacobian_step);
            let Some(delta) = damped_step(&jacobian, &r, lambda) else {
                if lambda >= cfg.max_lambda {
                    break;
                }
                lambda = (lambda * cfg.lambda_up).min(cfg.max_lambda);
                continue;
            };

            let trial: Vec<f64> = params.iter().zip(&delta).map(|(p, d)| p + d).collect();
            let trial_r = residuals(&trial);
            let trial_ss = sum_of_squares(&trial_r);

            if trial_ss.is_finite() && trial_ss < ss {
                params = trial;
                r = trial_r;
                ss = trial_ss;
                lambda = (lambda * cfg.lambda_down).max(cfg.min_lambda);
            } else if lambda >= cfg.max_lambda {
                break;
            } else {
                lambda = (lambda * cfg.lambda_up).min(cfg.max_lambda);
            }
        }

        let converged = ss.sqrt() < cfg.tolerance;
        Ok(LeastSquaresResult {
            params,
            residual_ss: ss,
            iterations: cfg.max_iterations,
            converged,
        })
    }
}

/// Row-major forward-difference Jacobian, `jac[i][j] = ∂r_i/∂p_j`.
fn forward_jacobian<F>(residuals: &F, params: &[f64], r0: &[f64], step: f64) -> Vec<Vec<f64>>
where
    F: Fn(&[f64]) -> Vec<f64>,
{
    let mut jac = vec![vec![0.0; params.len()]; r0.len()];
    let mut bumped = params.to_vec();
    for j in 0..params.len() {
        let h = step * params[j].abs().max(1.0);
        bumped[j] = params[j] + h;
        let r_plus = residuals(&bumped);
        bumped[j] = params[j];
        for (row, (plus, base)) in jac.iter_mut().zip(r_plus.iter().zip(r0)) {
            row[j] = (plus - base) / h;
        }
    }
    jac
}

/// Solves `(J^T J + λI) δ = −J^T r` by Gaussian elimination with partial pivoting.
fn damped_step(jac: &[Vec<f64>], r: &[f64], lambda: f64) -> Option<Vec<f64>> {
    let n = jac.first()?.len();

    // augmented matrix [A | b]
    let mut a = vec![vec![0.0; n + 1]; n];
    for (i, row) in a.iter_mut().enumerate() {
        for j in 0..n {
            row[j] = jac.iter().map(|jr| jr[i] * jr[j]).sum();
        }
        row[i] += lambda;
        row[n] = -jac.iter().zip(r).map(|(jr, ri)| jr[i] * ri).sum::<f64>();
    }

    for col in 0..n {
        let pivot = (col..n).max_by(|&x, &y| {
            a[x][col]
                .abs()
                .partial_cmp(&a[y][col].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;
        if a[pivot][col].abs() < 1e-300 || !a[pivot][col].is_finite() {
            return None;
        }
        a.swap(col, pivot);
        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            for k in col..=n {
                a[row][k] -= factor * a[col][k];
            }
        }
    }

    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let tail: f64 = ((i + 1)..n).map(|k| a[i][k] * x[k]).sum();
        x[i] = (a[i][n] - tail) / a[i][i];
    }
    x.iter().all(|v| v.is_finite()).then_some(x)
}

#[inline]
fn sum_of_squares(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ========================================
    // Solver Tests
    // ========================================

    #[test]
    fn test_solve_one_dimensional() {
        let solver = LeastSquaresSolver::default();
        let result = solver.solve(|p: &[f64]| vec![p[0] - 3.0], vec![10.0]).unwrap();
        assert!(result.converged);
        assert_relative_eq!(result.params[0], 3.0, epsilon = 1e-8);
    }

    #[test]
    fn test_solve_nonlinear_root() {
        // exp(-p) = 0.5  =>  p = ln 2
        let solver = LeastSquaresSolver::default();
        let result = solver
            .solve(|p: &[f64]| vec![(-p[0]).exp() - 0.5], vec![0.01])
            .unwrap();
        assert!(result.converged);
        assert_relative_eq!(result.params[0], std::f64::consts::LN_2, epsilon = 1e-8);
    }

    #[test]
    fn test_solve_exponential_fit() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys: Vec<f64> = xs.iter().map(|x: &f64| 2.0 * (-0.5 * x).exp()).collect();
        let solver = LeastSquaresSolver::default();
        let result = solver
            .solve(
                |p: &[f64]| {
                    xs.iter()
                        .zip(&ys)
                        .map(|(x, y)| p[0] * (-p[1] * x).exp() - y)
                        .collect()
                },
                vec![1.0, 1.0],
            )
            .unwrap();
        assert!(result.converged);
        assert_relative_eq!(result.params[0], 2.0, epsilon = 1e-6);
        assert_relative_eq!(result.params[1], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_already_optimal_takes_no_iterations() {
        let solver = LeastSquaresSolver::default();
        let result = solver.solve(|p: &[f64]| vec![p[0] - 5.0], vec![5.0]).unwrap();
        assert!(result.converged);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_unreachable_target_not_converged() {
        // p² + 1 never reaches zero
        let solver = LeastSquaresSolver::new(LeastSquaresConfig::new(1e-6, 50));
        let result = solver.solve(|p: &[f64]| vec![p[0] * p[0] + 1.0], vec![2.0]).unwrap();
        assert!(!result.converged);
        assert!(result.params[0].abs() < 0.1);
    }

    #[test]
    fn test_empty_params_rejected() {
        let solver = LeastSquaresSolver::default();
        assert!(solver.solve(|_: &[f64]| vec![1.0], vec![]).is_err());
    }

    #[test]
    fn test_non_finite_start_rejected() {
        let solver = LeastSquaresSolver::default();
        let result = solver.solve(|_: &[f64]| vec![f64::NAN], vec![1.0]);
        match result {
            Err(SolverError::NumericalInstability(_)) => {}
            other => panic!("Expected NumericalInstability, got {:?}", other),
        }
    }

    // ========================================
    // Linear Algebra Tests
    // ========================================

    #[test]
    fn test_damped_step_identity_jacobian() {
        // J = I, λ = 0  =>  δ = −r
        let jac = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let delta = damped_step(&jac, &[3.0, -4.0], 0.0).unwrap();
        assert_relative_eq!(delta[0], -3.0, epsilon = 1e-12);
        assert_relative_eq!(delta[1], 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_damped_step_singular() {
        let jac = vec![vec![0.0, 0.0]];
        assert!(damped_step(&jac, &[1.0], 0.0).is_none());
    }

    #[test]
    fn test_forward_jacobian_linear() {
        let f = |p: &[f64]| vec![2.0 * p[0] + 3.0 * p[1]];
        let params = [1.0, 1.0];
        let r0 = f(&params);
        let jac = forward_jacobian(&f, &params, &r0, 1e-8);
        assert_relative_eq!(jac[0][0], 2.0, epsilon = 1e-5);
        assert_relative_eq!(jac[0][1], 3.0, epsilon = 1e-5);
    }
}
