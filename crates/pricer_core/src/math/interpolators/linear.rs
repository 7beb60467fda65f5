//! Linear interpolation implementation.

use super::traits::sorted_nodes;
use super::Interpolator;
use crate::types::InterpolationError;
use num_traits::Float;

/// Piecewise linear interpolator.
///
/// Data points are sorted by x-coordinate during construction. A single node
/// gives a constant interpolant; outside the node range the first and last
/// segments are extended.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::<f64>::new(&[1.0, 2.0], &[0.02, 0.03]).unwrap();
/// assert!((interp.interpolate(1.5) - 0.025).abs() < 1e-12);
///
/// // extrapolated along the last segment
/// assert!((interp.interpolate(3.0) - 0.04).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
}

impl<T: Float> LinearInterpolator<T> {
    /// Construct a linear interpolator; requires at least one node.
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        let (xs, ys) = sorted_nodes(xs, ys, 1)?;
        Ok(Self { xs, ys })
    }

    /// Returns the sorted x-coordinates.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Returns the number of data points.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Returns true if the interpolator has no data points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

impl<T: Float> Interpolator<T> for LinearInterpolator<T> {
    fn interpolate(&self, x: T) -> T {
        let n = self.xs.len();
        if n == 1 {
            return self.ys[0];
        }

        // segment [i, i+1], clamped so the end segments extrapolate
        let pos = self.xs.partition_point(|&xi| xi <= x);
        let i = pos.saturating_sub(1).min(n - 2);

        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        let weight = (x - x0) / (x1 - x0);
        y0 + weight * (y1 - y0)
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}
