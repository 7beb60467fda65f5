//! # Random Number Generation
//!
//! Seeded pseudo-random generation for Monte Carlo shocks.
//!
//! - **Reproducibility**: the seed is an explicit input; there is no
//!   entropy-seeded constructor
//! - **Batch filling**: shocks are written into caller-owned `&mut [f64]`
//!   buffers
//!
//! ```rust
//! use pricer_pricing::rng::{PricerRng, DEFAULT_SEED};
//!
//! let mut rng = PricerRng::from_seed(DEFAULT_SEED);
//! let mut shocks = vec![0.0; 1000];
//! rng.fill_normal(&mut shocks);
//! ```

mod prng;

pub use prng::{PricerRng, DEFAULT_SEED};
