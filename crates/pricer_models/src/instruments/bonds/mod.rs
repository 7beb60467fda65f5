//! Discount bonds, coupon bonds and swaps.
//!
//! Every bond is a strip of [`ZeroCouponBond`]s discounted on a
//! [`Rate`](pricer_core::market_data::Rate).

mod fixed_rate;
mod floating_rate;
mod swap;
mod zero_coupon;

pub use fixed_rate::{BondCashflow, FixedRateBond};
pub use floating_rate::FloatingRateBond;
pub use swap::InterestRateSwap;
pub use zero_coupon::ZeroCouponBond;
