//! Binary (digital) and touch options.

use pricer_core::types::ConfigurationError;
use std::fmt;
use std::str::FromStr;

/// Binary option variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BinaryKind {
    /// Pays if S > K.
    BinaryCall,
    /// Pays if S < K.
    BinaryPut,
    /// Pays if S ≥ B.
    OneTouch,
    /// Pays if S < B.
    NoTouch,
    /// Pays if S ≤ L or S ≥ U.
    DoubleOneTouch,
    /// Pays if L < S < U.
    DoubleNoTouch,
}

impl BinaryKind {
    /// Configuration name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BinaryCall => "binary_call",
            Self::BinaryPut => "binary_put",
            Self::OneTouch => "one_touch",
            Self::NoTouch => "no_touch",
            Self::DoubleOneTouch => "double_one_touch",
            Self::DoubleNoTouch => "double_no_touch",
        }
    }
}

impl FromStr for BinaryKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(' ', "_").as_str() {
            "binary_call" => Ok(Self::BinaryCall),
            "binary_put" => Ok(Self::BinaryPut),
            "one_touch" => Ok(Self::OneTouch),
            "no_touch" => Ok(Self::NoTouch),
            "double_one_touch" => Ok(Self::DoubleOneTouch),
            "double_no_touch" => Ok(Self::DoubleNoTouch),
            _ => Err(ConfigurationError::UnknownProductKind(s.to_string())),
        }
    }
}

impl fmt::Display for BinaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw inputs for a [`BinaryOption`]; which fields are required depends on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinaryParams {
    /// Strike, for binary call and put.
    pub strike: Option<f64>,
    /// Amount paid when the condition holds.
    pub payoff_amount: f64,
    /// Single barrier, for one-touch and no-touch.
    pub barrier: Option<f64>,
    /// Lower barrier, for the double variants.
    pub lower_barrier: Option<f64>,
    /// Upper barrier, for the double variants.
    pub upper_barrier: Option<f64>,
}

/// Validated trigger levels, one shape per kind.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Trigger {
    Strike(f64),
    Barrier(f64),
    Range { lower: f64, upper: f64 },
}

/// Pays a fixed amount when a spot condition holds, zero otherwise.
///
/// Parameters are validated at construction. On terminal values every kind
/// looks at the final spot; on full paths the touch kinds look at the path
/// extrema instead.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{BinaryKind, BinaryOption, BinaryParams};
///
/// let params = BinaryParams { barrier: Some(120.0), payoff_amount: 5.0, ..Default::default() };
/// let one_touch = BinaryOption::new(BinaryKind::OneTouch, params).unwrap();
///
/// assert_eq!(one_touch.payoff(125.0), 5.0);
/// assert_eq!(one_touch.payoff(110.0), 0.0);
/// // touched during the path, back below at expiry
/// assert_eq!(one_touch.payoff_path(&[100.0, 121.0, 110.0]), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryOption {
    kind: BinaryKind,
    payoff_amount: f64,
    trigger: Trigger,
}

impl BinaryOption {
    /// Validates the parameters required by `kind`.
    ///
    /// # Errors
    /// - `ConfigurationError::MissingInput` (`strike`) for binary call/put without a strike
    /// - `ConfigurationError::MissingBarrier` for touch kinds missing their barrier(s)
    /// - `ConfigurationError::InvalidParameter` when lower barrier ≥ upper barrier
    pub fn new(kind: BinaryKind, params: BinaryParams) -> Result<Self, ConfigurationError> {
        let trigger = match kind {
            BinaryKind::BinaryCall | BinaryKind::BinaryPut => {
                Trigger::Strike(params.strike.ok_or_else(|| ConfigurationError::MissingInput {
                    key: "strike".to_string(),
                })?)
            }
            BinaryKind::OneTouch | BinaryKind::NoTouch => {
                Trigger::Barrier(params.barrier.ok_or(ConfigurationError::MissingBarrier {
                    kind: kind.name(),
                    detail: "barrier",
                })?)
            }
            BinaryKind::DoubleOneTouch | BinaryKind::DoubleNoTouch => {
                match (params.lower_barrier, params.upper_barrier) {
                    (Some(lower), Some(upper)) if lower < upper => Trigger::Range { lower, upper },
                    (Some(lower), Some(upper)) => {
                        return Err(ConfigurationError::InvalidParameter {
                            name: "lower_barrier",
                            value: format!("{lower} (upper barrier {upper})"),
                        })
                    }
                    _ => {
                        return Err(ConfigurationError::MissingBarrier {
                            kind: kind.name(),
                            detail: "both lower and upper barriers",
                        })
                    }
                }
            }
        };

        Ok(Self {
            kind,
            payoff_amount: params.payoff_amount,
            trigger,
        })
    }

    /// Payoff on the terminal spot.
    pub fn payoff(&self, spot: f64) -> f64 {
        self.pays(spot, spot)
    }

    /// Payoff on a full path; touch kinds observe the path minimum and maximum.
    ///
    /// An empty path pays nothing.
    pub fn payoff_path(&self, path: &[f64]) -> f64 {
        let Some(&last) = path.last() else {
            return 0.0;
        };
        match self.kind {
            BinaryKind::BinaryCall | BinaryKind::BinaryPut => self.payoff(last),
            _ => {
                let (min, max) = path
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| {
                        (lo.min(s), hi.max(s))
                    });
                self.pays(min, max)
            }
        }
    }

    fn pays(&self, low: f64, high: f64) -> f64 {
        let hit = match (self.kind, self.trigger) {
            (BinaryKind::BinaryCall, Trigger::Strike(k)) => high > k,
            (BinaryKind::BinaryPut, Trigger::Strike(k)) => low < k,
            (BinaryKind::OneTouch, Trigger::Barrier(b)) => high >= b,
            (BinaryKind::NoTouch, Trigger::Barrier(b)) => high < b,
            (BinaryKind::DoubleOneTouch, Trigger::Range { lower, upper }) => {
                low <= lower || high >= upper
            }
            (BinaryKind::DoubleNoTouch, Trigger::Range { lower, upper }) => {
                low > lower && high < upper
            }
            _ => false,
        };
        if hit {
            self.payoff_amount
        } else {
            0.0
        }
    }

    /// Returns the kind.
    #[inline]
    pub fn kind(&self) -> BinaryKind {
        self.kind
    }

    /// Returns the amount paid when triggered.
    #[inline]
    pub fn payoff_amount(&self) -> f64 {
        self.payoff_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_strike(kind: BinaryKind) -> BinaryOption {
        BinaryOption::new(
            kind,
            BinaryParams {
                strike: Some(100.0),
                payoff_amount: 10.0,
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn with_range(kind: BinaryKind) -> BinaryOption {
        BinaryOption::new(
            kind,
            BinaryParams {
                lower_barrier: Some(90.0),
                upper_barrier: Some(110.0),
                payoff_amount: 1.0,
                ..Default::default()
            },
        )
        .unwrap()
    }

    // ========================================
    // Validation Tests
    // ========================================

    #[test]
    fn test_one_touch_needs_barrier() {
        let result = BinaryOption::new(BinaryKind::OneTouch, BinaryParams::default());
        assert!(matches!(
            result,
            Err(ConfigurationError::MissingBarrier { kind: "one_touch", .. })
        ));
    }

    #[test]
    fn test_double_kinds_need_both_barriers() {
        let params = BinaryParams {
            lower_barrier: Some(90.0),
            ..Default::default()
        };
        assert!(matches!(
            BinaryOption::new(BinaryKind::DoubleNoTouch, params),
            Err(ConfigurationError::MissingBarrier { .. })
        ));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let params = BinaryParams {
            lower_barrier: Some(110.0),
            upper_barrier: Some(90.0),
            ..Default::default()
        };
        assert!(BinaryOption::new(BinaryKind::DoubleOneTouch, params).is_err());
    }

    #[test]
    fn test_binary_call_needs_strike() {
        assert!(matches!(
            BinaryOption::new(BinaryKind::BinaryCall, BinaryParams::default()),
            Err(ConfigurationError::MissingInput { .. })
        ));
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("double no touch".parse::<BinaryKind>().unwrap(), BinaryKind::DoubleNoTouch);
        assert_eq!("binary_call".parse::<BinaryKind>().unwrap(), BinaryKind::BinaryCall);
        assert!("rainbow".parse::<BinaryKind>().is_err());
    }

    // ========================================
    // Terminal Payoff Tests
    // ========================================

    #[test]
    fn test_binary_call_put() {
        let call = with_strike(BinaryKind::BinaryCall);
        let put = with_strike(BinaryKind::BinaryPut);
        assert_eq!(call.payoff(100.5), 10.0);
        assert_eq!(call.payoff(100.0), 0.0);
        assert_eq!(put.payoff(99.5), 10.0);
        assert_eq!(put.payoff(100.0), 0.0);
    }

    #[test]
    fn test_double_kinds_terminal() {
        let dot = with_range(BinaryKind::DoubleOneTouch);
        let dnt = with_range(BinaryKind::DoubleNoTouch);
        for spot in [85.0, 90.0, 100.0, 110.0, 115.0] {
            // complementary except on the barrier levels, where one-touch pays
            assert_eq!(dot.payoff(spot) + dnt.payoff(spot), 1.0);
        }
        assert_eq!(dnt.payoff(100.0), 1.0);
        assert_eq!(dot.payoff(90.0), 1.0);
    }

    // ========================================
    // Path Payoff Tests
    // ========================================

    #[test]
    fn test_no_touch_path_uses_maximum() {
        let nt = BinaryOption::new(
            BinaryKind::NoTouch,
            BinaryParams {
                barrier: Some(120.0),
                payoff_amount: 3.0,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(nt.payoff(100.0), 3.0);
        assert_eq!(nt.payoff_path(&[100.0, 125.0, 100.0]), 0.0);
        assert_eq!(nt.payoff_path(&[100.0, 119.0, 100.0]), 3.0);
    }

    #[test]
    fn test_double_no_touch_path_uses_extrema() {
        let dnt = with_range(BinaryKind::DoubleNoTouch);
        assert_eq!(dnt.payoff_path(&[100.0, 95.0, 105.0]), 1.0);
        assert_eq!(dnt.payoff_path(&[100.0, 89.0, 105.0]), 0.0);
    }

    #[test]
    fn test_binary_call_path_uses_terminal() {
        let call = with_strike(BinaryKind::BinaryCall);
        assert_eq!(call.payoff_path(&[150.0, 90.0]), 0.0);
        assert_eq!(call.payoff_path(&[]), 0.0);
    }
}
