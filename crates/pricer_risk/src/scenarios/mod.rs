//! Stress scenarios and named result sets.
//!
//! A [`StressScenario`] shifts spot and maturity; [`StressScenario::evaluate`]
//! runs a pricing closure on the base and the stressed inputs and reports
//! both [`ResultSet`]s together with their difference.
//!
//! # Example
//!
//! ```
//! use pricer_risk::scenarios::{ResultSet, StressScenario};
//!
//! let scenario = StressScenario::new().with_spot(110.0);
//! let outcome = scenario
//!     .evaluate(2, |stress| {
//!         let spot = stress.map_or(100.0, |s| s.apply_spot(100.0));
//!         let mut measures = ResultSet::new();
//!         measures.insert("price", spot * 0.1);
//!         Ok::<_, std::convert::Infallible>(measures)
//!     })
//!     .unwrap();
//!
//! assert_eq!(outcome.difference.get("price"), Some(1.0));
//! ```

mod result_set;
mod stress;

pub use result_set::{round_to, ResultSet};
pub use stress::{ScenarioOutcome, StressScenario};
