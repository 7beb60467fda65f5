//! Barycentric Lagrange interpolation.

use super::traits::sorted_nodes;
use super::Interpolator;
use crate::types::InterpolationError;
use num_traits::Float;

/// Polynomial interpolation through all nodes in barycentric form.
///
/// The weights `w_j = 1 / Π_{k≠j} (x_j − x_k)` are computed once; evaluation
/// uses the second (true) barycentric formula, which is exact at the nodes and
/// defined everywhere else, including outside the node range.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::{BarycentricInterpolator, Interpolator};
///
/// // y = x² through three nodes
/// let interp = BarycentricInterpolator::<f64>::new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 4.0]).unwrap();
/// assert!((interp.interpolate(3.0) - 9.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct BarycentricInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
    weights: Vec<T>,
}

impl<T: Float> BarycentricInterpolator<T> {
    /// Construct the interpolant; requires at least one node.
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        let (xs, ys) = sorted_nodes(xs, ys, 1)?;
        let weights = xs
            .iter()
            .enumerate()
            .map(|(j, &xj)| {
                let product = xs
                    .iter()
                    .enumerate()
                    .filter(|&(k, _)| k != j)
                    .fold(T::one(), |acc, (_, &xk)| acc * (xj - xk));
                product.recip()
            })
            .collect();
        Ok(Self { xs, ys, weights })
    }

    /// Returns the barycentric weights, in node order.
    #[inline]
    pub fn weights(&self) -> &[T] {
        &self.weights
    }
}

impl<T: Float> Interpolator<T> for BarycentricInterpolator<T> {
    fn interpolate(&self, x: T) -> T {
        let mut numerator = T::zero();
        let mut denominator = T::zero();
        for ((&xj, &yj), &wj) in self.xs.iter().zip(&self.ys).zip(&self.weights) {
            let diff = x - xj;
            if diff == T::zero() {
                return yj;
            }
            let term = wj / diff;
            numerator = numerator + term * yj;
            denominator = denominator + term;
        }
        numerator / denominator
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}
