//! Not-a-knot cubic spline interpolation.

use super::traits::{lit, sorted_nodes};
use super::Interpolator;
use crate::types::InterpolationError;
use num_traits::Float;

/// Minimum number of nodes for a cubic spline.
pub const MIN_SPLINE_POINTS: usize = 4;

/// Polynomial coefficients for one spline segment:
/// `y = a + b*(x-xi) + c*(x-xi)² + d*(x-xi)³`.
#[derive(Debug, Clone, Copy)]
struct SplineCoeffs<T: Float> {
    a: T,
    b: T,
    c: T,
    d: T,
}

impl<T: Float> SplineCoeffs<T> {
    #[inline]
    fn eval(&self, dx: T) -> T {
        self.a + dx * (self.b + dx * (self.c + dx * self.d))
    }
}

/// Not-a-knot cubic spline interpolator with C² continuity.
///
/// The third derivative is continuous at the second and the second-to-last
/// nodes, so the first two and the last two segments share one cubic. With
/// four nodes this is the interpolating cubic itself. Points outside the node
/// range are evaluated with the first or last segment polynomial.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::{CubicSplineInterpolator, Interpolator};
///
/// let xs = [0.5, 1.0, 2.0, 5.0];
/// let ys = [0.010, 0.015, 0.020, 0.030];
///
/// let spline = CubicSplineInterpolator::<f64>::new(&xs, &ys).unwrap();
/// assert!((spline.interpolate(2.0) - 0.020).abs() < 1e-12);
///
/// // fewer than four nodes is rejected
/// assert!(CubicSplineInterpolator::<f64>::new(&xs[..3], &ys[..3]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CubicSplineInterpolator<T: Float> {
    xs: Vec<T>,
    coeffs: Vec<SplineCoeffs<T>>,
}

impl<T: Float> CubicSplineInterpolator<T> {
    /// Construct a not-a-knot cubic spline; requires at least four nodes.
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        let (xs, ys) = sorted_nodes(xs, ys, MIN_SPLINE_POINTS)?;
        let coeffs = Self::compute_coefficients(&xs, &ys);
        Ok(Self { xs, coeffs })
    }

    /// Solves the tridiagonal system for the second derivatives `M` with the
    /// Thomas algorithm, then builds per-segment coefficients.
    ///
    /// The not-a-knot conditions
    /// `h[1] M[0] − (h[0] + h[1]) M[1] + h[0] M[2] = 0` (and the mirror image
    /// at the right end) are used to eliminate `M[0]` and `M[n-1]` from the
    /// first and last interior rows.
    fn compute_coefficients(xs: &[T], ys: &[T]) -> Vec<SplineCoeffs<T>> {
        let n = xs.len();
        let two = lit::<T>(2.0);
        let six = lit::<T>(6.0);

        let h: Vec<T> = xs.windows(2).map(|w| w[1] - w[0]).collect();

        // Interior rows k = 1..n-1:
        // h[k-1] M[k-1] + 2(h[k-1] + h[k]) M[k] + h[k] M[k+1] = rhs[k]
        let interior = n - 2;
        let (h0, h1) = (h[0], h[1]);
        let (ha, hb) = (h[n - 3], h[n - 2]);
        let mut c_prime: Vec<T> = Vec::with_capacity(interior);
        let mut d_prime: Vec<T> = Vec::with_capacity(interior);

        for row in 0..interior {
            let k = row + 1;
            let mut sub = h[k - 1];
            let mut diag = two * (h[k - 1] + h[k]);
            let mut sup = h[k];
            if row == 0 {
                sub = T::zero();
                diag = (h0 + h1) * (h0 + two * h1) / h1;
                sup = (h1 * h1 - h0 * h0) / h1;
            }
            if row == interior - 1 {
                sub = (ha * ha - hb * hb) / ha;
                diag = (ha + hb) * (two * ha + hb) / ha;
                sup = T::zero();
            }
            let rhs = six * ((ys[k + 1] - ys[k]) / h[k] - (ys[k] - ys[k - 1]) / h[k - 1]);

            let (prev_c, prev_d) = if row == 0 {
                (T::zero(), T::zero())
            } else {
                (c_prime[row - 1], d_prime[row - 1])
            };
            let denom = diag - sub * prev_c;
            c_prime.push(sup / denom);
            d_prime.push((rhs - sub * prev_d) / denom);
        }

        let mut m = vec![T::zero(); n];
        for row in (0..interior).rev() {
            let k = row + 1;
            m[k] = d_prime[row] - c_prime[row] * m[k + 1];
        }
        m[0] = ((h0 + h1) * m[1] - h0 * m[2]) / h1;
        m[n - 1] = ((ha + hb) * m[n - 2] - hb * m[n - 3]) / ha;

        (0..n - 1)
            .map(|i| SplineCoeffs {
                a: ys[i],
                b: (ys[i + 1] - ys[i]) / h[i] - h[i] * (two * m[i] + m[i + 1]) / six,
                c: m[i] / two,
                d: (m[i + 1] - m[i]) / (six * h[i]),
            })
            .collect()
    }

    /// Segment index for `x`, clamped to the first and last segments.
    #[inline]
    fn find_segment(&self, x: T) -> usize {
        let pos = self.xs.partition_point(|&xi| xi <= x);
        pos.saturating_sub(1).min(self.xs.len() - 2)
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

impl<T: Float> Interpolator<T> for CubicSplineInterpolator<T> {
    fn interpolate(&self, x: T) -> T {
        let i = self.find_segment(x);
        self.coeffs[i].eval(x - self.xs[i])
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}
