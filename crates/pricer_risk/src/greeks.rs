//! Option sensitivities.
//!
//! [`Greeks`] supports the linear arithmetic used to combine leg
//! sensitivities into composite-product sensitivities:
//!
//! ```
//! use pricer_risk::Greeks;
//!
//! let long = Greeks { delta: 0.6, gamma: 0.02, vega: 38.0, theta: -6.0, rho: 45.0 };
//! let short = Greeks { delta: 0.4, gamma: 0.02, vega: 36.0, theta: -5.0, rho: 30.0 };
//!
//! let spread = long - short;
//! assert!((spread.delta - 0.2).abs() < 1e-12);
//! assert_eq!((spread * 2.0).vega, 4.0);
//! ```

use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// First and second order sensitivities of a price.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂σ
    pub vega: f64,
    /// ∂V/∂t
    pub theta: f64,
    /// ∂V/∂r
    pub rho: f64,
}

impl Greeks {
    /// Measure names, in reporting order.
    pub const NAMES: [&'static str; 5] = ["delta", "gamma", "vega", "theta", "rho"];

    /// All sensitivities zero.
    #[inline]
    pub const fn zero() -> Self {
        Self {
            delta: 0.0,
            gamma: 0.0,
            vega: 0.0,
            theta: 0.0,
            rho: 0.0,
        }
    }

    /// `(name, value)` pairs in the order of [`Greeks::NAMES`].
    pub fn measures(&self) -> [(&'static str, f64); 5] {
        [
            ("delta", self.delta),
            ("gamma", self.gamma),
            ("vega", self.vega),
            ("theta", self.theta),
            ("rho", self.rho),
        ]
    }

    fn map2(self, other: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        Self {
            delta: f(self.delta, other.delta),
            gamma: f(self.gamma, other.gamma),
            vega: f(self.vega, other.vega),
            theta: f(self.theta, other.theta),
            rho: f(self.rho, other.rho),
        }
    }
}

impl Add for Greeks {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.map2(rhs, |a, b| a + b)
    }
}

impl AddAssign for Greeks {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Greeks {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.map2(rhs, |a, b| a - b)
    }
}

impl Neg for Greeks {
    type Output = Self;

    fn neg(self) -> Self {
        self * -1.0
    }
}

impl Mul<f64> for Greeks {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.map2(Self::zero(), |a, _| a * rhs)
    }
}

impl Sum for Greeks {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}
