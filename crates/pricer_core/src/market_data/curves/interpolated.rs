//! Pillar-based rate curve.

use crate::math::interpolators::{
    BarycentricInterpolator, CubicSplineInterpolator, Interpolator, KroghInterpolator,
    LinearInterpolator, MIN_SPLINE_POINTS,
};
use crate::types::{ConfigurationError, InterpolationError, Maturity};
use std::fmt;
use std::str::FromStr;

/// Interpolation scheme applied to the pillar rates of a [`RateCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InterpolationMethod {
    /// Piecewise linear in the rate.
    #[default]
    Linear,
    /// Not-a-knot cubic spline.
    #[cfg_attr(feature = "serde", serde(rename = "cubic"))]
    CubicSpline,
    /// Global polynomial in barycentric form.
    Barycentric,
    /// Global polynomial in Newton form.
    Krogh,
}

impl InterpolationMethod {
    /// Configuration name of the scheme.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::CubicSpline => "cubic",
            Self::Barycentric => "barycentric",
            Self::Krogh => "krogh",
        }
    }

    /// Minimum number of pillars the scheme accepts.
    pub fn min_points(&self) -> usize {
        match self {
            Self::CubicSpline => MIN_SPLINE_POINTS,
            _ => 1,
        }
    }
}

impl FromStr for InterpolationMethod {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "cubic" => Ok(Self::CubicSpline),
            "barycentric" => Ok(Self::Barycentric),
            "krogh" => Ok(Self::Krogh),
            _ => Err(ConfigurationError::UnknownInterpolation(s.to_string())),
        }
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Built interpolant, one variant per scheme.
#[derive(Debug, Clone)]
enum Interpolant {
    Linear(LinearInterpolator<f64>),
    CubicSpline(CubicSplineInterpolator<f64>),
    Barycentric(BarycentricInterpolator<f64>),
    Krogh(KroghInterpolator<f64>),
}

impl Interpolant {
    fn build(method: InterpolationMethod, xs: &[f64], ys: &[f64]) -> Result<Self, InterpolationError> {
        Ok(match method {
            InterpolationMethod::Linear => Self::Linear(LinearInterpolator::new(xs, ys)?),
            InterpolationMethod::CubicSpline => {
                Self::CubicSpline(CubicSplineInterpolator::new(xs, ys)?)
            }
            InterpolationMethod::Barycentric => {
                Self::Barycentric(BarycentricInterpolator::new(xs, ys)?)
            }
            InterpolationMethod::Krogh => Self::Krogh(KroghInterpolator::new(xs, ys)?),
        })
    }

    fn eval(&self, x: f64) -> f64 {
        match self {
            Self::Linear(i) => i.interpolate(x),
            Self::CubicSpline(i) => i.interpolate(x),
            Self::Barycentric(i) => i.interpolate(x),
            Self::Krogh(i) => i.interpolate(x),
        }
    }
}

/// Annualised rates at pillar maturities, interpolated in between and
/// extrapolated outside the pillar range.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{InterpolationMethod, RateCurve};
/// use pricer_core::types::Maturity;
///
/// let curve = RateCurve::new(
///     &[0.5, 1.0, 2.0, 5.0],
///     &[0.02, 0.025, 0.03, 0.035],
///     InterpolationMethod::Linear,
/// )
/// .unwrap();
///
/// let r = curve.rate(&Maturity::from_years(1.5).unwrap());
/// assert!((r - 0.0275).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct RateCurve {
    tenors: Vec<f64>,
    rates: Vec<f64>,
    method: InterpolationMethod,
    interpolant: Interpolant,
}

impl RateCurve {
    /// Build a curve from pillar tenors (in years) and rates.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError::InsufficientCurvePoints` when there are fewer
    ///   pillars than the method needs
    /// - `ConfigurationError::Curve` for mismatched lengths, duplicate or
    ///   non-finite pillars
    pub fn new(
        tenors: &[f64],
        rates: &[f64],
        method: InterpolationMethod,
    ) -> Result<Self, ConfigurationError> {
        let need = method.min_points();
        if tenors.len() < need {
            return Err(ConfigurationError::InsufficientCurvePoints {
                method: method.name(),
                got: tenors.len(),
                need,
            });
        }
        let interpolant = Interpolant::build(method, tenors, rates)?;
        Ok(Self {
            tenors: tenors.to_vec(),
            rates: rates.to_vec(),
            method,
            interpolant,
        })
    }

    /// Rate at `maturity.years()`, extrapolated outside the pillars.
    pub fn rate(&self, maturity: &Maturity) -> f64 {
        self.interpolant.eval(maturity.years())
    }

    /// Interpolation scheme.
    #[inline]
    pub fn method(&self) -> InterpolationMethod {
        self.method
    }

    /// Pillar tenors, as supplied.
    #[inline]
    pub fn tenors(&self) -> &[f64] {
        &self.tenors
    }

    /// Pillar rates, as supplied.
    #[inline]
    pub fn rates(&self) -> &[f64] {
        &self.rates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn years(y: f64) -> Maturity {
        Maturity::from_years(y).unwrap()
    }

    // ========================================
    // InterpolationMethod Tests
    // ========================================

    #[test]
    fn test_method_from_str() {
        assert_eq!("linear".parse::<InterpolationMethod>().unwrap(), InterpolationMethod::Linear);
        assert_eq!("cubic".parse::<InterpolationMethod>().unwrap(), InterpolationMethod::CubicSpline);
        assert_eq!(
            "Barycentric".parse::<InterpolationMethod>().unwrap(),
            InterpolationMethod::Barycentric
        );
        assert_eq!("krogh".parse::<InterpolationMethod>().unwrap(), InterpolationMethod::Krogh);
    }

    #[test]
    fn test_method_from_str_unknown() {
        match "quadratic".parse::<InterpolationMethod>() {
            Err(ConfigurationError::UnknownInterpolation(s)) => assert_eq!(s, "quadratic"),
            other => panic!("Expected UnknownInterpolation, got {:?}", other),
        }
    }

    #[test]
    fn test_method_display_round_trips() {
        for m in [
            InterpolationMethod::Linear,
            InterpolationMethod::CubicSpline,
            InterpolationMethod::Barycentric,
            InterpolationMethod::Krogh,
        ] {
            assert_eq!(m.to_string().parse::<InterpolationMethod>().unwrap(), m);
        }
    }

    // ========================================
    // RateCurve Tests
    // ========================================

    #[test]
    fn test_cubic_needs_four_pillars() {
        let result = RateCurve::new(&[1.0, 2.0, 3.0], &[0.01, 0.02, 0.03], InterpolationMethod::CubicSpline);
        match result {
            Err(ConfigurationError::InsufficientCurvePoints { method, got, need }) => {
                assert_eq!(method, "cubic");
                assert_eq!(got, 3);
                assert_eq!(need, 4);
            }
            other => panic!("Expected InsufficientCurvePoints, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_curve_rejected() {
        assert!(matches!(
            RateCurve::new(&[], &[], InterpolationMethod::Linear),
            Err(ConfigurationError::InsufficientCurvePoints { need: 1, .. })
        ));
    }

    #[test]
    fn test_duplicate_pillar_rejected() {
        let result = RateCurve::new(&[1.0, 1.0], &[0.01, 0.02], InterpolationMethod::Linear);
        assert!(matches!(result, Err(ConfigurationError::Curve(_))));
    }

    #[test]
    fn test_single_pillar_is_flat() {
        for method in [
            InterpolationMethod::Linear,
            InterpolationMethod::Barycentric,
            InterpolationMethod::Krogh,
        ] {
            let curve = RateCurve::new(&[2.0], &[0.03], method).unwrap();
            assert_relative_eq!(curve.rate(&years(0.5)), 0.03, epsilon = 1e-15);
            assert_relative_eq!(curve.rate(&years(10.0)), 0.03, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_all_methods_hit_pillars() {
        let tenors = [0.5, 1.0, 2.0, 5.0];
        let rates = [0.02, 0.025, 0.03, 0.035];
        for method in [
            InterpolationMethod::Linear,
            InterpolationMethod::CubicSpline,
            InterpolationMethod::Barycentric,
            InterpolationMethod::Krogh,
        ] {
            let curve = RateCurve::new(&tenors, &rates, method).unwrap();
            for (&t, &r) in tenors.iter().zip(&rates) {
                assert_relative_eq!(curve.rate(&years(t)), r, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_cubic_curve_on_four_pillars_is_one_cubic() {
        let tenors = [0.5, 1.0, 2.0, 5.0];
        let rates = [0.01, 0.03, 0.025, 0.04];
        let cubic = RateCurve::new(&tenors, &rates, InterpolationMethod::CubicSpline).unwrap();
        let krogh = RateCurve::new(&tenors, &rates, InterpolationMethod::Krogh).unwrap();
        for t in [1.5, 3.0, 7.0] {
            assert_relative_eq!(cubic.rate(&years(t)), krogh.rate(&years(t)), epsilon = 1e-10);
        }
        assert_relative_eq!(cubic.rate(&years(1.5)), 0.0331944, epsilon = 1e-7);
    }

    #[test]
    fn test_extrapolation_allowed() {
        let curve =
            RateCurve::new(&[1.0, 2.0], &[0.02, 0.03], InterpolationMethod::Linear).unwrap();
        assert_relative_eq!(curve.rate(&years(3.0)), 0.04, epsilon = 1e-12);
        assert_relative_eq!(curve.rate(&years(0.0)), 0.01, epsilon = 1e-12);
    }
}
