//! Standard normal distribution functions.
//!
//! - `norm_cdf`: cumulative distribution function Φ
//! - `norm_pdf`: probability density function φ
//!
//! Both are generic over `T: Float`.

use num_traits::Float;

/// 1 / sqrt(2π)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Chebyshev coefficients of the erfc fit, innermost last.
const ERFC_COEFFS: [f64; 10] = [
    -1.265_512_23,
    1.000_023_68,
    0.374_091_96,
    0.096_784_18,
    -0.186_288_06,
    0.278_868_07,
    -1.135_203_98,
    1.488_515_87,
    -0.822_152_23,
    0.170_872_77,
];

#[inline]
fn c<T: Float>(v: f64) -> T {
    T::from(v).unwrap_or_else(T::nan)
}

/// Complementary error function with fractional error below 1.2e-7
/// everywhere, including the tails.
#[inline]
fn erfc<T: Float>(x: T) -> T {
    let z = x.abs();
    let t = T::one() / (T::one() + c::<T>(0.5) * z);

    let poly = ERFC_COEFFS
        .iter()
        .rev()
        .fold(T::zero(), |acc, &k| c::<T>(k) + t * acc);
    let tail = t * (-z * z + poly).exp();

    if x >= T::zero() {
        tail
    } else {
        c::<T>(2.0) - tail
    }
}

/// Standard normal cumulative distribution function, `Φ(x) = erfc(−x/√2) / 2`.
///
/// # Examples
/// ```
/// use pricer_models::analytical::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(f64::INFINITY) == 1.0);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    c::<T>(0.5) * erfc(-x / c::<T>(std::f64::consts::SQRT_2))
}

/// Standard normal density, `φ(x) = exp(−x²/2) / √(2π)`.
///
/// # Examples
/// ```
/// use pricer_models::analytical::norm_pdf;
///
/// assert!((norm_pdf(1.0_f64) - 0.2419707245).abs() < 1e-9);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    c::<T>(FRAC_1_SQRT_2PI) * (-c::<T>(0.5) * x * x).exp()
}
