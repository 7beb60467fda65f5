//! # Pricer Models (L2: Business Logic)
//!
//! Financial instruments and closed-form models.
//!
//! This crate provides:
//! - Instrument definitions (vanilla, binary, barrier, spreads, strategies,
//!   structured products) behind the [`instruments::Product`] enum
//! - Bonds and swaps discounted on a [`pricer_core::market_data::Rate`]
//! - Black-Scholes closed forms used for Greeks and validation
//!
//! ## Design Principles
//!
//! - **Enum-based products** for static dispatch
//! - **Validated construction**: inconsistent strikes, missing barriers and
//!   wrong leg types fail with a `ConfigurationError` before pricing
//! - **Composite products carry leg prices** so their own price is pure
//!   arithmetic

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
