//! Interpolator trait and node validation shared by the 1D schemes.

use crate::types::InterpolationError;
use num_traits::Float;

/// One-dimensional interpolation over a set of nodes.
///
/// Node data is validated at construction, so evaluation cannot fail. Every
/// implementation in this module extrapolates: `interpolate` accepts points
/// outside `domain()` and evaluates the scheme's own continuation there (end
/// segments for piecewise schemes, the same polynomial for global ones).
pub trait Interpolator<T: Float> {
    /// Evaluates the interpolant at `x`.
    fn interpolate(&self, x: T) -> T;

    /// Returns `(x_min, x_max)` of the nodes.
    fn domain(&self) -> (T, T);
}

/// Validates node data and returns it sorted by abscissa.
///
/// Rejects mismatched lengths, fewer than `need` nodes, non-finite values and
/// duplicate abscissae.
pub(crate) fn sorted_nodes<T: Float>(
    xs: &[T],
    ys: &[T],
    need: usize,
) -> Result<(Vec<T>, Vec<T>), InterpolationError> {
    if xs.len() != ys.len() {
        return Err(InterpolationError::InvalidInput(format!(
            "xs and ys must have same length: got {} and {}",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < need {
        return Err(InterpolationError::InsufficientData {
            got: xs.len(),
            need,
        });
    }
    if xs.iter().chain(ys).any(|v| !v.is_finite()) {
        return Err(InterpolationError::InvalidInput(
            "nodes must be finite".to_string(),
        ));
    }

    let mut pairs: Vec<(T, T)> = xs.iter().copied().zip(ys.iter().copied()).collect();
    pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    if let Some(index) = pairs.windows(2).position(|w| w[0].0 == w[1].0) {
        return Err(InterpolationError::DuplicateAbscissa { index: index + 1 });
    }

    Ok(pairs.into_iter().unzip())
}

/// Converts an `f64` literal into `T`.
#[inline]
pub(crate) fn lit<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}
