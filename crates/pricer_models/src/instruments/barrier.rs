//! Up-and-out and up-and-in barrier calls.

use pricer_core::types::ConfigurationError;
use std::fmt;
use std::str::FromStr;

/// Barrier behaviour once the path reaches the barrier level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BarrierKind {
    /// Option dies when the barrier is touched.
    KnockOut,
    /// Option comes alive when the barrier is touched.
    KnockIn,
}

impl FromStr for BarrierKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "knock_out" | "ko" => Ok(Self::KnockOut),
            "knock_in" | "ki" => Ok(Self::KnockIn),
            _ => Err(ConfigurationError::UnknownProductKind(s.to_string())),
        }
    }
}

impl fmt::Display for BarrierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KnockOut => write!(f, "knock_out"),
            Self::KnockIn => write!(f, "knock_in"),
        }
    }
}

/// Call option with an upper barrier monitored along the simulated path.
///
/// The payoff depends on the whole path, so only [`BarrierOption::payoff_path`]
/// produces a value.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{BarrierKind, BarrierOption};
///
/// let ko = BarrierOption::new(BarrierKind::KnockOut, 100.0, 130.0).unwrap();
/// assert_eq!(ko.payoff_path(&[100.0, 120.0, 110.0]), 10.0);
/// assert_eq!(ko.payoff_path(&[100.0, 131.0, 110.0]), 0.0);
/// assert!(ko.payoff(110.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarrierOption {
    kind: BarrierKind,
    strike: f64,
    barrier: f64,
}

impl BarrierOption {
    /// Creates a barrier call.
    ///
    /// # Errors
    /// `ConfigurationError::InvalidParameter` for a non-finite strike or barrier.
    pub fn new(kind: BarrierKind, strike: f64, barrier: f64) -> Result<Self, ConfigurationError> {
        if !strike.is_finite() {
            return Err(ConfigurationError::InvalidParameter {
                name: "strike",
                value: strike.to_string(),
            });
        }
        if !barrier.is_finite() {
            return Err(ConfigurationError::InvalidParameter {
                name: "barrier",
                value: barrier.to_string(),
            });
        }
        Ok(Self {
            kind,
            strike,
            barrier,
        })
    }

    /// Always fails: the payoff needs the whole path.
    pub fn payoff(&self, _spot: f64) -> Result<f64, ConfigurationError> {
        Err(ConfigurationError::RequiresPathSimulation {
            product: self.name(),
        })
    }

    /// Payoff `max(S_T − K, 0)`, switched off (knock-out) or on (knock-in)
    /// by any path value at or above the barrier.
    pub fn payoff_path(&self, path: &[f64]) -> f64 {
        let Some(&terminal) = path.last() else {
            return 0.0;
        };
        let touched = path.iter().any(|&s| s >= self.barrier);
        let alive = match self.kind {
            BarrierKind::KnockOut => !touched,
            BarrierKind::KnockIn => touched,
        };
        if alive {
            (terminal - self.strike).max(0.0)
        } else {
            0.0
        }
    }

    /// Product name used in error messages.
    pub fn name(&self) -> &'static str {
        match self.kind {
            BarrierKind::KnockOut => "knock-out option",
            BarrierKind::KnockIn => "knock-in option",
        }
    }

    /// Returns the barrier kind.
    #[inline]
    pub fn kind(&self) -> BarrierKind {
        self.kind
    }

    /// Returns the strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the barrier level.
    #[inline]
    pub fn barrier(&self) -> f64 {
        self.barrier
    }
}
