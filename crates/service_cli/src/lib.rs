//! # Service CLI (S: Service)
//!
//! Pricing desk behind the `pricer` binary.
//!
//! - [`config`]: TOML configuration with environment override
//! - [`desk`]: trade requests, pricing façade and stress runs
//! - [`output`]: table and JSON rendering
//! - [`commands`]: `price` and `stress` subcommands

#![deny(missing_docs)]

pub mod commands;
pub mod config;
pub mod desk;
pub mod error;
pub mod output;

pub use error::{CliError, Result};
