//! Interpolation methods for rate curves.
//!
//! All interpolators are generic over `T: num_traits::Float` and share the
//! [`Interpolator`] trait:
//! - `interpolate(x: T) -> T`, infallible once the nodes are validated
//! - `domain() -> (T, T)`
//!
//! ## Available Interpolators
//!
//! - [`LinearInterpolator`]: Piecewise linear, end segments extended
//! - [`CubicSplineInterpolator`]: Not-a-knot cubic spline, at least four nodes
//! - [`BarycentricInterpolator`]: Global polynomial, barycentric Lagrange form
//! - [`KroghInterpolator`]: Global polynomial, Newton divided differences
//!
//! Every scheme extrapolates outside its node range.
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
//!
//! let xs = [0.0, 1.0, 2.0, 3.0];
//! let ys = [0.0, 1.0, 4.0, 9.0];
//!
//! let interp = LinearInterpolator::<f64>::new(&xs, &ys).unwrap();
//! assert_eq!(interp.domain(), (0.0, 3.0));
//!
//! let y = interp.interpolate(1.5);
//! assert!((y - 2.5).abs() < 1e-10);
//! ```

mod barycentric;
mod cubic_spline;
mod krogh;
mod linear;
mod traits;

pub use barycentric::BarycentricInterpolator;
pub use cubic_spline::{CubicSplineInterpolator, MIN_SPLINE_POINTS};
pub use krogh::KroghInterpolator;
pub use linear::LinearInterpolator;
pub use traits::Interpolator;

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn nodes() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
        (4usize..8).prop_flat_map(|n| {
            (
                proptest::collection::vec(0.05f64..1.0, n),
                proptest::collection::vec(-0.02f64..0.08, n),
            )
                .prop_map(|(gaps, ys)| {
                    let xs = gaps
                        .iter()
                        .scan(0.0, |acc, g| {
                            *acc += g;
                            Some(*acc)
                        })
                        .collect();
                    (xs, ys)
                })
        })
    }

    proptest! {
        #[test]
        fn prop_all_schemes_exact_at_nodes((xs, ys) in nodes()) {
            let linear = LinearInterpolator::new(&xs, &ys).unwrap();
            let spline = CubicSplineInterpolator::new(&xs, &ys).unwrap();
            let bary = BarycentricInterpolator::new(&xs, &ys).unwrap();
            let krogh = KroghInterpolator::new(&xs, &ys).unwrap();
            for (&x, &y) in xs.iter().zip(&ys) {
                prop_assert!((linear.interpolate(x) - y).abs() < 1e-9);
                prop_assert!((spline.interpolate(x) - y).abs() < 1e-9);
                prop_assert!((bary.interpolate(x) - y).abs() < 1e-9);
                prop_assert!((krogh.interpolate(x) - y).abs() < 1e-6);
            }
        }
    }
}
