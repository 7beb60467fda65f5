//! Black-Scholes-Merton pricing for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//! - q is a continuous dividend yield (or the foreign rate for FX)

use num_traits::Float;
use pricer_core::types::ConfigurationError;

use super::distributions::{norm_cdf, norm_pdf};
use crate::instruments::OptionType;

#[inline]
fn c<T: Float>(v: f64) -> T {
    T::from(v).unwrap_or_else(T::nan)
}

/// Expiries at or below this are treated as expired.
const EXPIRY_EPSILON: f64 = 1e-10;

/// Black-Scholes-Merton model.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float`
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
/// let call = bs.price_call(100.0, 1.0);
/// let put = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlackScholes<T: Float> {
    spot: T,
    rate: T,
    dividend_yield: T,
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a model without dividend yield.
    ///
    /// # Errors
    /// `ConfigurationError::InvalidParameter` if spot or volatility is not
    /// strictly positive.
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, ConfigurationError> {
        if !(spot > T::zero()) {
            return Err(ConfigurationError::InvalidParameter {
                name: "spot",
                value: format!("{}", spot.to_f64().unwrap_or(f64::NAN)),
            });
        }
        if !(volatility > T::zero()) {
            return Err(ConfigurationError::InvalidParameter {
                name: "volatility",
                value: format!("{}", volatility.to_f64().unwrap_or(f64::NAN)),
            });
        }
        Ok(Self {
            spot,
            rate,
            dividend_yield: T::zero(),
            volatility,
        })
    }

    /// Sets the continuous dividend yield `q`.
    pub fn with_dividend_yield(mut self, dividend_yield: T) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> T {
        self.dividend_yield
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    #[inline]
    fn expired(expiry: T) -> bool {
        expiry <= c(EXPIRY_EPSILON)
    }

    /// `e^(-qT)`
    #[inline]
    fn carry(&self, expiry: T) -> T {
        (-self.dividend_yield * expiry).exp()
    }

    /// `e^(-rT)`
    #[inline]
    fn discount(&self, expiry: T) -> T {
        (-self.rate * expiry).exp()
    }

    /// d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
    ///
    /// At expiry this collapses to ±100 (or 0 at the money).
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            let large = c::<T>(100.0);
            return if self.spot > strike {
                large
            } else if self.spot < strike {
                -large
            } else {
                T::zero()
            };
        }

        let drift = (self.rate - self.dividend_yield
            + c::<T>(0.5) * self.volatility * self.volatility)
            * expiry;
        ((self.spot / strike).ln() + drift) / (self.volatility * expiry.sqrt())
    }

    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return self.d1(strike, expiry);
        }
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// European call price.
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return (self.spot - strike).max(T::zero());
        }
        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        self.spot * self.carry(expiry) * norm_cdf(d1)
            - strike * self.discount(expiry) * norm_cdf(d2)
    }

    /// European put price.
    #[inline]
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return (strike - self.spot).max(T::zero());
        }
        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        strike * self.discount(expiry) * norm_cdf(-d2)
            - self.spot * self.carry(expiry) * norm_cdf(-d1)
    }

    /// Price for the given option type.
    #[inline]
    pub fn price(&self, option_type: OptionType, strike: T, expiry: T) -> T {
        match option_type {
            OptionType::Call => self.price_call(strike, expiry),
            OptionType::Put => self.price_put(strike, expiry),
        }
    }

    /// Delta (∂V/∂S).
    ///
    /// - Call Delta = e^(-qT)·N(d₁)
    /// - Put Delta = e^(-qT)·(N(d₁) - 1)
    #[inline]
    pub fn delta(&self, option_type: OptionType, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return match option_type {
                OptionType::Call if self.spot > strike => T::one(),
                OptionType::Put if self.spot < strike => -T::one(),
                _ => T::zero(),
            };
        }
        let n_d1 = norm_cdf(self.d1(strike, expiry));
        let carry = self.carry(expiry);
        match option_type {
            OptionType::Call => carry * n_d1,
            OptionType::Put => carry * (n_d1 - T::one()),
        }
    }

    /// Gamma (∂²V/∂S²) = e^(-qT)·φ(d₁) / (S·σ·√T); identical for calls and puts.
    #[inline]
    pub fn gamma(&self, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return T::zero();
        }
        let d1 = self.d1(strike, expiry);
        self.carry(expiry) * norm_pdf(d1) / (self.spot * self.volatility * expiry.sqrt())
    }

    /// Vega (∂V/∂σ) = S·e^(-qT)·φ(d₁)·√T; identical for calls and puts.
    #[inline]
    pub fn vega(&self, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return T::zero();
        }
        let d1 = self.d1(strike, expiry);
        self.spot * self.carry(expiry) * norm_pdf(d1) * expiry.sqrt()
    }

    /// Theta (∂V/∂t), usually negative.
    ///
    /// - Call: -S·e^(-qT)·φ(d₁)·σ/(2√T) - r·K·e^(-rT)·N(d₂) + q·S·e^(-qT)·N(d₁)
    /// - Put: -S·e^(-qT)·φ(d₁)·σ/(2√T) + r·K·e^(-rT)·N(-d₂) - q·S·e^(-qT)·N(-d₁)
    #[inline]
    pub fn theta(&self, option_type: OptionType, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return T::zero();
        }
        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        let carried_spot = self.spot * self.carry(expiry);
        let discounted_strike = strike * self.discount(expiry);

        let decay = -(carried_spot * norm_pdf(d1) * self.volatility) / (c::<T>(2.0) * expiry.sqrt());
        match option_type {
            OptionType::Call => {
                decay - self.rate * discounted_strike * norm_cdf(d2)
                    + self.dividend_yield * carried_spot * norm_cdf(d1)
            }
            OptionType::Put => {
                decay + self.rate * discounted_strike * norm_cdf(-d2)
                    - self.dividend_yield * carried_spot * norm_cdf(-d1)
            }
        }
    }

    /// Rho (∂V/∂r).
    ///
    /// - Call Rho = K·T·e^(-rT)·N(d₂)
    /// - Put Rho = -K·T·e^(-rT)·N(-d₂)
    #[inline]
    pub fn rho(&self, option_type: OptionType, strike: T, expiry: T) -> T {
        if Self::expired(expiry) {
            return T::zero();
        }
        let d2 = self.d2(strike, expiry);
        let scale = strike * expiry * self.discount(expiry);
        match option_type {
            OptionType::Call => scale * norm_cdf(d2),
            OptionType::Put => -scale * norm_cdf(-d2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn model() -> BlackScholes<f64> {
        BlackScholes::new(100.0, 0.05, 0.2).unwrap()
    }

    // ========================================
    // Constructor Tests
    // ========================================

    #[test]
    fn test_new_rejects_non_positive_inputs() {
        assert!(BlackScholes::new(0.0_f64, 0.05, 0.2).is_err());
        assert!(BlackScholes::new(100.0_f64, 0.05, -0.1).is_err());
        match BlackScholes::new(100.0_f64, 0.05, 0.0) {
            Err(ConfigurationError::InvalidParameter { name, .. }) => assert_eq!(name, "volatility"),
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    // ========================================
    // Pricing Tests
    // ========================================

    #[test]
    fn test_reference_call_price() {
        // S=100, K=100, r=5%, σ=20%, T=1 → 10.4506
        assert_relative_eq!(model().price_call(100.0, 1.0), 10.450583572185565, epsilon = 1e-4);
    }

    #[test]
    fn test_reference_put_price() {
        assert_relative_eq!(model().price_put(100.0, 1.0), 5.573526022256971, epsilon = 1e-4);
    }

    #[test]
    fn test_put_call_parity_with_dividend_yield() {
        let bs = model().with_dividend_yield(0.03);
        for strike in [80.0, 100.0, 125.0] {
            let lhs = bs.price_call(strike, 0.75) - bs.price_put(strike, 0.75);
            let rhs = 100.0 * (-0.03f64 * 0.75).exp() - strike * (-0.05f64 * 0.75).exp();
            assert_relative_eq!(lhs, rhs, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_expired_returns_intrinsic() {
        assert_eq!(model().price_call(90.0, 0.0), 10.0);
        assert_eq!(model().price_put(90.0, 0.0), 0.0);
        assert_eq!(model().delta(OptionType::Call, 90.0, 0.0), 1.0);
        assert_eq!(model().gamma(90.0, 0.0), 0.0);
    }

    #[test]
    fn test_zero_strike_call_is_forward_spot() {
        let bs = model().with_dividend_yield(0.02);
        assert_relative_eq!(bs.price_call(0.0, 2.0), 100.0 * (-0.04f64).exp(), epsilon = 1e-9);
    }

    // ========================================
    // Greeks Tests
    // ========================================

    #[test]
    fn test_delta_bounds_and_parity() {
        let bs = model().with_dividend_yield(0.01);
        let call = bs.delta(OptionType::Call, 105.0, 0.5);
        let put = bs.delta(OptionType::Put, 105.0, 0.5);
        assert!(call > 0.0 && call < 1.0);
        assert!(put < 0.0 && put > -1.0);
        assert_relative_eq!(call - put, (-0.01f64 * 0.5).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_greeks_vs_finite_difference() {
        let q = 0.02;
        let (k, t) = (102.0, 0.5);
        let bs = |s: f64, r: f64, v: f64| {
            BlackScholes::new(s, r, v).unwrap().with_dividend_yield(q)
        };
        let base = bs(100.0, 0.03, 0.2);
        let h = 1e-4;

        for ot in [OptionType::Call, OptionType::Put] {
            let price = |m: BlackScholes<f64>, t: f64| m.price(ot, k, t);

            let delta_fd = (price(bs(100.0 + h, 0.03, 0.2), t) - price(bs(100.0 - h, 0.03, 0.2), t)) / (2.0 * h);
            assert_relative_eq!(base.delta(ot, k, t), delta_fd, epsilon = 2e-5);

            let gamma_fd = (price(bs(100.0 + 0.01, 0.03, 0.2), t) - 2.0 * price(base, t)
                + price(bs(100.0 - 0.01, 0.03, 0.2), t))
                / 1e-4;
            assert_relative_eq!(base.gamma(k, t), gamma_fd, max_relative = 1e-3);

            let vega_fd = (price(bs(100.0, 0.03, 0.2 + h), t) - price(bs(100.0, 0.03, 0.2 - h), t)) / (2.0 * h);
            assert_relative_eq!(base.vega(k, t), vega_fd, epsilon = 1e-3);

            let rho_fd = (price(bs(100.0, 0.03 + h, 0.2), t) - price(bs(100.0, 0.03 - h, 0.2), t)) / (2.0 * h);
            assert_relative_eq!(base.rho(ot, k, t), rho_fd, epsilon = 1e-3);

            // theta is the derivative with respect to calendar time: −∂V/∂T
            let theta_fd = -(price(base, t + h) - price(base, t - h)) / (2.0 * h);
            assert_relative_eq!(base.theta(ot, k, t), theta_fd, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_call_put_time_decay_difference() {
        let bs = model();
        let h = 1e-3;
        let call_fd = (bs.price_call(100.0, 1.0 + h) - bs.price_call(100.0, 1.0 - h)) / (2.0 * h);
        let put_fd = (bs.price_put(100.0, 1.0 + h) - bs.price_put(100.0, 1.0 - h)) / (2.0 * h);
        // difference is the time derivative of K e^{-rT}
        assert_relative_eq!(call_fd - put_fd, 0.05 * 100.0 * (-0.05f64).exp(), epsilon = 1e-6);
    }
}
