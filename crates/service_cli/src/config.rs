//! CLI configuration.
//!
//! Loaded from a TOML file (`pricer.toml` by default); every field has a
//! default, so a missing file or a partial one is fine. `PRICER_LOG_LEVEL`
//! overrides the file's log level.
//!
//! ```toml
//! log_level = "info"
//!
//! [simulation]
//! n_paths = 1000
//! n_steps = 100
//! seed = 272
//!
//! [output]
//! decimals = 2
//! format = "table"
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use pricer_pricing::mc::MonteCarloConfig;
use pricer_pricing::rng::DEFAULT_SEED;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// Environment variable overriding [`CliConfig::log_level`].
pub const LOG_LEVEL_ENV: &str = "PRICER_LOG_LEVEL";

/// Log levels accepted in the config file and the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Everything
    Trace,
    /// Engine and solver detail
    Debug,
    /// Command progress
    #[default]
    Info,
    /// Warnings only
    Warn,
    /// Errors only
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(CliError::InvalidSetting {
                key: "log_level",
                value: s.to_string(),
            }),
        }
    }
}

impl LogLevel {
    /// Directive for `tracing_subscriber::EnvFilter`.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        LogLevel::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for LogLevel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_filter_str())
    }
}

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Boxed text table
    #[default]
    Table,
    /// Pretty-printed JSON object
    Json,
}

/// Monte Carlo settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of paths
    pub n_paths: usize,
    /// Time steps per path
    pub n_steps: usize,
    /// RNG seed
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_paths: 1000,
            n_steps: 100,
            seed: DEFAULT_SEED,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Decimal places every measure is rounded to
    pub decimals: u32,
    /// Default output format
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            decimals: 2,
            format: OutputFormat::Table,
        }
    }
}

/// Whole CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level when `RUST_LOG` is unset
    pub log_level: LogLevel,
    /// Monte Carlo settings
    pub simulation: SimulationConfig,
    /// Output settings
    pub output: OutputConfig,
}

impl CliConfig {
    /// Parses a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: CliConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, or the defaults when the file does not exist, then
    /// applies the environment override.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Applies `PRICER_LOG_LEVEL` when set.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            self.log_level = level.parse()?;
        }
        Ok(())
    }

    /// Checks the simulation settings.
    pub fn validate(&self) -> Result<()> {
        self.monte_carlo().map(|_| ())
    }

    /// Engine configuration built from `[simulation]`.
    pub fn monte_carlo(&self) -> Result<MonteCarloConfig> {
        let config = MonteCarloConfig::builder()
            .n_paths(self.simulation.n_paths)
            .n_steps(self.simulation.n_steps)
            .seed(self.simulation.seed)
            .build()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Parsing Tests
    // ========================================

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = CliConfig::from_toml("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.simulation.seed, 272);
        assert_eq!(config.output.decimals, 2);
    }

    #[test]
    fn test_partial_sections() {
        let config = CliConfig::from_toml(
            r#"
            log_level = "debug"

            [simulation]
            n_paths = 5000

            [output]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.simulation.n_paths, 5000);
        assert_eq!(config.simulation.n_steps, 100);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_values() {
        assert!(CliConfig::from_toml("log_level = \"loud\"").is_err());
        let zero_paths = CliConfig::from_toml("[simulation]\nn_paths = 0");
        assert!(matches!(zero_paths, Err(CliError::Pricing(_))));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = CliConfig::load(Path::new("does/not/exist.toml"));
        // PRICER_LOG_LEVEL may be set by the caller; only the simulation is checked
        if let Ok(config) = config {
            assert_eq!(config.simulation, SimulationConfig::default());
        }
    }

    // ========================================
    // Log Level Tests
    // ========================================

    #[test]
    fn test_log_level_round_trip() {
        for level in [LogLevel::Trace, LogLevel::Debug, LogLevel::Info, LogLevel::Warn, LogLevel::Error] {
            assert_eq!(level.to_string().parse::<LogLevel>().unwrap(), level);
        }
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warn);
    }
}
