//! Krogh (Newton divided-difference) polynomial interpolation.

use super::traits::sorted_nodes;
use super::Interpolator;
use crate::types::InterpolationError;
use num_traits::Float;

/// Interpolating polynomial in Newton form.
///
/// Coefficients are the divided differences `f[x0], f[x0,x1], …`; evaluation
/// is a nested (Horner-style) product. Mathematically this is the same
/// polynomial as [`BarycentricInterpolator`](super::BarycentricInterpolator),
/// built with a different recurrence.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::{Interpolator, KroghInterpolator};
///
/// let interp = KroghInterpolator::<f64>::new(&[0.0, 1.0, 2.0], &[1.0, 3.0, 7.0]).unwrap();
/// // 1 + x + x²
/// assert!((interp.interpolate(1.5) - 4.75).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct KroghInterpolator<T: Float> {
    xs: Vec<T>,
    coefficients: Vec<T>,
}

impl<T: Float> KroghInterpolator<T> {
    /// Construct the interpolant; requires at least one node.
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        let (xs, ys) = sorted_nodes(xs, ys, 1)?;
        let n = xs.len();

        // In-place divided-difference table; column j overwrites entries j..n.
        let mut table = ys;
        for j in 1..n {
            for i in (j..n).rev() {
                table[i] = (table[i] - table[i - 1]) / (xs[i] - xs[i - j]);
            }
        }

        Ok(Self {
            xs,
            coefficients: table,
        })
    }

    /// Newton-form coefficients `f[x0..=xk]`.
    #[inline]
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }
}

impl<T: Float> Interpolator<T> for KroghInterpolator<T> {
    fn interpolate(&self, x: T) -> T {
        let n = self.coefficients.len();
        let mut value = self.coefficients[n - 1];
        for k in (0..n - 1).rev() {
            value = value * (x - self.xs[k]) + self.coefficients[k];
        }
        value
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}
