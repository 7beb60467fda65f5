//! Analytical pricing formulas for European options.
//!
//! - Black-Scholes-Merton model with continuous dividend yield
//! - Analytical Greeks (Delta, Gamma, Vega, Theta, Rho)
//! - Standard normal CDF and PDF

pub mod black_scholes;
pub mod distributions;

pub use black_scholes::BlackScholes;
pub use distributions::{norm_cdf, norm_pdf};
