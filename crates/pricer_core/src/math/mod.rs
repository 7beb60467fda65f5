//! Numerical building blocks: interpolation and optimisation.

pub mod interpolators;
pub mod solvers;
