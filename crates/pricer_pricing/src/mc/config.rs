//! Monte Carlo simulation configuration.

use pricer_core::types::ConfigurationError;

use crate::rng::DEFAULT_SEED;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of time steps allowed per path.
pub const MAX_STEPS: usize = 10_000;

/// Monte Carlo simulation configuration.
///
/// Immutable once built; use [`MonteCarloConfig::builder`].
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(1000)
///     .n_steps(252)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.n_paths(), 1000);
/// assert_eq!(config.seed(), 272);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MonteCarloConfig {
    n_paths: usize,
    n_steps: usize,
    seed: u64,
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the number of time steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// `ConfigurationError::InvalidParameter` if:
    /// - `n_paths` is 0 or greater than 10,000,000
    /// - `n_steps` is 0 or greater than 10,000
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(ConfigurationError::InvalidParameter {
                name: "nb_simulations",
                value: format!("{} (must be in range [1, {MAX_PATHS}])", self.n_paths),
            });
        }
        if self.n_steps == 0 || self.n_steps > MAX_STEPS {
            return Err(ConfigurationError::InvalidParameter {
                name: "nb_steps",
                value: format!("{} (must be in range [1, {MAX_STEPS}])", self.n_steps),
            });
        }
        Ok(())
    }
}

/// Builder for [`MonteCarloConfig`].
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    n_paths: Option<usize>,
    n_steps: Option<usize>,
    seed: Option<u64>,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of simulation paths, in [1, 10_000_000].
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the number of time steps per path, in [1, 10_000].
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the seed (default 272).
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError::MissingInput` if `n_paths` or `n_steps` is unset
    /// - `ConfigurationError::InvalidParameter` if either is out of range
    pub fn build(self) -> Result<MonteCarloConfig, ConfigurationError> {
        let n_paths = self.n_paths.ok_or_else(|| ConfigurationError::MissingInput {
            key: "nb_simulations".to_string(),
        })?;
        let n_steps = self.n_steps.ok_or_else(|| ConfigurationError::MissingInput {
            key: "nb_steps".to_string(),
        })?;

        let config = MonteCarloConfig {
            n_paths,
            n_steps,
            seed: self.seed.unwrap_or(DEFAULT_SEED),
        };
        config.validate()?;
        Ok(config)
    }
}
