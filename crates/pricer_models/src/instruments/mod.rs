//! Financial instrument definitions.
//!
//! Products are grouped in a closed [`Product`] enum and dispatched
//! statically: the Monte-Carlo engine only sees the payoff contract
//! ([`Product::payoff_terminal`] and [`Product::payoff_path`]).
//!
//! # Instrument Types
//!
//! - [`VanillaOption`]: European call/put on an [`UnderlyingClass`]
//! - [`BinaryOption`]: digital and touch options
//! - [`BarrierOption`]: knock-out / knock-in calls (path-dependent)
//! - [`Spread`], [`ButterflySpread`]: vertical spreads
//! - [`OptionStrategy`]: straddle, strangle, strip, strap
//! - [`ReverseConvertible`], [`CertificatOutperformance`]: structured products
//! - [`bonds`]: zero-coupon, fixed and floating-rate bonds, swaps
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{OptionType, Product, UnderlyingClass, VanillaOption};
//!
//! let call = VanillaOption::new(OptionType::Call, UnderlyingClass::NoDividendShare, 100.0).unwrap();
//! let product = Product::from(call);
//!
//! assert_eq!(product.payoff_terminal(110.0).unwrap(), 10.0);
//! assert_eq!(product.payoff_path(&[100.0, 95.0, 110.0]), 10.0);
//! assert!(!product.requires_full_path());
//! ```

pub mod bonds;

mod barrier;
mod binary;
mod payoff;
mod spread;
mod strategy;
mod structured;
mod vanilla;

pub use barrier::{BarrierKind, BarrierOption};
pub use binary::{BinaryKind, BinaryOption, BinaryParams};
pub use payoff::{OptionType, UnderlyingClass};
pub use spread::{ButterflySpread, Priced, Spread, SpreadKind};
pub use strategy::{OptionStrategy, Position, StrategyKind};
pub use structured::{CertificatOutperformance, ReverseConvertible};
pub use vanilla::VanillaOption;

use pricer_core::types::ConfigurationError;

/// Every product the Monte-Carlo engine can price.
#[derive(Debug, Clone)]
pub enum Product {
    /// European call or put
    Vanilla(VanillaOption),
    /// Digital or touch option
    Binary(BinaryOption),
    /// Knock-out / knock-in call
    Barrier(BarrierOption),
    /// Call or put spread
    Spread(Spread),
    /// Butterfly spread
    Butterfly(ButterflySpread),
    /// Straddle, strangle, strip or strap
    Strategy(OptionStrategy),
    /// Short put plus fixed-rate bond
    ReverseConvertible(ReverseConvertible),
    /// Outperformance certificate
    Certificate(CertificatOutperformance),
}

impl Product {
    /// Payoff on the terminal spot.
    ///
    /// # Errors
    /// `ConfigurationError::RequiresPathSimulation` for barrier options.
    pub fn payoff_terminal(&self, spot: f64) -> Result<f64, ConfigurationError> {
        Ok(match self {
            Product::Vanilla(p) => p.payoff(spot),
            Product::Binary(p) => p.payoff(spot),
            Product::Barrier(p) => return p.payoff(spot),
            Product::Spread(p) => p.payoff(spot),
            Product::Butterfly(p) => p.payoff(spot),
            Product::Strategy(p) => p.payoff(spot),
            Product::ReverseConvertible(p) => p.payoff(spot),
            Product::Certificate(p) => p.payoff(spot),
        })
    }

    /// Payoff on a full simulated path.
    ///
    /// Path-dependent products look at the whole path, the others at its
    /// last value. An empty path pays nothing.
    pub fn payoff_path(&self, path: &[f64]) -> f64 {
        let terminal = path.last().copied();
        match self {
            Product::Vanilla(p) => terminal.map_or(0.0, |s| p.payoff(s)),
            Product::Binary(p) => p.payoff_path(path),
            Product::Barrier(p) => p.payoff_path(path),
            Product::Spread(p) => terminal.map_or(0.0, |s| p.payoff(s)),
            Product::Butterfly(p) => terminal.map_or(0.0, |s| p.payoff(s)),
            Product::Strategy(p) => terminal.map_or(0.0, |s| p.payoff(s)),
            Product::ReverseConvertible(p) => terminal.map_or(0.0, |s| p.payoff(s)),
            Product::Certificate(p) => terminal.map_or(0.0, |s| p.payoff(s)),
        }
    }

    /// Underlying class driving the drift/spot adjustment, if any.
    ///
    /// Binary and barrier options carry none and are simulated unadjusted.
    pub fn underlying(&self) -> Option<UnderlyingClass> {
        match self {
            Product::Vanilla(p) => Some(p.underlying()),
            Product::Binary(_) | Product::Barrier(_) => None,
            Product::Spread(p) => Some(p.underlying()),
            Product::Butterfly(p) => Some(p.underlying()),
            Product::Strategy(p) => Some(p.underlying()),
            Product::ReverseConvertible(p) => Some(p.underlying()),
            Product::Certificate(p) => Some(p.underlying()),
        }
    }

    /// Whether only full-path simulation can price the product.
    #[inline]
    pub fn requires_full_path(&self) -> bool {
        matches!(self, Product::Barrier(_))
    }

    /// Price carried by the legs of a composite product.
    ///
    /// `None` for single-instrument products, which need the engine or a
    /// closed form.
    pub fn leg_price(&self) -> Option<f64> {
        match self {
            Product::Vanilla(_) | Product::Binary(_) | Product::Barrier(_) => None,
            Product::Spread(p) => Some(p.price()),
            Product::Butterfly(p) => Some(p.price()),
            Product::Strategy(p) => Some(p.price()),
            Product::ReverseConvertible(p) => Some(p.price()),
            Product::Certificate(p) => Some(p.price()),
        }
    }

    /// Short product name.
    pub fn name(&self) -> &'static str {
        match self {
            Product::Vanilla(_) => "vanilla option",
            Product::Binary(_) => "binary option",
            Product::Barrier(p) => p.name(),
            Product::Spread(_) => "spread",
            Product::Butterfly(_) => "butterfly spread",
            Product::Strategy(_) => "option strategy",
            Product::ReverseConvertible(_) => "reverse convertible",
            Product::Certificate(_) => "outperformance certificate",
        }
    }
}

macro_rules! impl_from_product {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Product {
                fn from(value: $ty) -> Self {
                    Product::$variant(value)
                }
            }
        )*
    };
}

impl_from_product! {
    VanillaOption => Vanilla,
    BinaryOption => Binary,
    BarrierOption => Barrier,
    Spread => Spread,
    ButterflySpread => Butterfly,
    OptionStrategy => Strategy,
    ReverseConvertible => ReverseConvertible,
    CertificatOutperformance => Certificate,
}
