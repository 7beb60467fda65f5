//! Rate curves built from pillar points.

mod interpolated;

pub use interpolated::{InterpolationMethod, RateCurve};
