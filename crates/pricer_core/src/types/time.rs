//! Time types, day-count conventions and instrument maturities.
//!
//! This module provides:
//! - `Date`: Type-safe date wrapper around chrono::NaiveDate
//! - `DayCountConvention`: ACT/360 and ACT/365 year-fraction rules
//! - `Maturity`: Immutable time-to-expiry in years, built directly or from a date pair
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::{Date, DayCountConvention, Maturity};
//!
//! let begin = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 7, 1).unwrap();
//!
//! // 182 days on an ACT/365 basis
//! let maturity = Maturity::from_dates(begin, end, DayCountConvention::Act365).unwrap();
//! assert!((maturity.years() - 0.4986).abs() < 0.001);
//! ```

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::{ConfigurationError, DateError};

/// Type-safe date wrapper around chrono::NaiveDate.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::Date;
///
/// let date = Date::from_ymd(2024, 6, 15).unwrap();
/// let parsed: Date = "2024-06-15".parse().unwrap();
/// assert_eq!(date, parsed);
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let end = Date::from_ymd(2024, 1, 11).unwrap();
/// assert_eq!(end - start, 10);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a Date from year, month, and day components.
    ///
    /// Returns `Err(DateError::InvalidDate)` for impossible dates such as
    /// February 30th.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses a date from ISO 8601 format string (YYYY-MM-DD).
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// assert!(Date::parse("2024-06-15").is_ok());
    /// assert!(Date::parse("15/06/2024").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(e.to_string()))
    }

    /// Returns the underlying NaiveDate.
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Returns the year component.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl Sub for Date {
    type Output = i64;

    /// Returns the signed number of calendar days between two dates.
    fn sub(self, other: Date) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Day Count Convention (year fraction convention).
///
/// # Variants
/// - `Act360`: Actual days / 360 (money market basis, the default)
/// - `Act365`: Actual days / 365
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::DayCountConvention;
///
/// let convention: DayCountConvention = "ACT/365".parse().unwrap();
/// assert_eq!(convention.denominator(), 365.0);
/// assert!("30/360".parse::<DayCountConvention>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DayCountConvention {
    /// Actual/360: actual_days / 360.0
    #[default]
    Act360,

    /// Actual/365 Fixed: actual_days / 365.0
    Act365,
}

impl DayCountConvention {
    /// Returns the standard convention name.
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365 => "ACT/365",
        }
    }

    /// Days per year used as the year-fraction denominator.
    #[inline]
    pub fn denominator(&self) -> f64 {
        match self {
            DayCountConvention::Act360 => 360.0,
            DayCountConvention::Act365 => 365.0,
        }
    }

    /// Year fraction between two dates; negative when `end` precedes `start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::{Date, DayCountConvention};
    ///
    /// let start = Date::from_ymd(2024, 1, 1).unwrap();
    /// let end = Date::from_ymd(2024, 7, 1).unwrap();
    /// let yf = DayCountConvention::Act360.year_fraction(start, end);
    /// assert!((yf - 0.5056).abs() < 0.001);
    /// ```
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        (end - start) as f64 / self.denominator()
    }
}

impl FromStr for DayCountConvention {
    type Err = ConfigurationError;

    /// Parses `"ACT/360"` or `"ACT/365"` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACT/360" => Ok(DayCountConvention::Act360),
            "ACT/365" => Ok(DayCountConvention::Act365),
            _ => Err(ConfigurationError::UnknownDayCount(s.to_string())),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::DayCountConvention;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for DayCountConvention {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for DayCountConvention {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            DayCountConvention::from_str(&s).map_err(de::Error::custom)
        }
    }
}

/// Time to expiry of an instrument, in years.
///
/// A maturity is either given directly as a year count, or derived from a
/// `(begin, end)` date pair under a day-count convention. The convention is
/// kept so that stressed maturities can be derived consistently.
///
/// Zero is a valid maturity (a cashflow paid today); negative and non-finite
/// year counts are rejected. Pricing routines additionally require a strictly
/// positive maturity.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::{DayCountConvention, Maturity};
///
/// let maturity = Maturity::from_years(0.5).unwrap();
/// assert_eq!(maturity.years(), 0.5);
/// assert_eq!(maturity.convention(), DayCountConvention::Act360);
///
/// let stressed = maturity.shifted(None, Some(0.25)).unwrap();
/// assert_eq!(stressed.years(), 0.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Maturity {
    years: f64,
    convention: DayCountConvention,
    end_date: Option<Date>,
}

impl Maturity {
    /// Creates a maturity from an explicit year count (ACT/360 convention).
    pub fn from_years(years: f64) -> Result<Self, ConfigurationError> {
        Self::with_convention(years, DayCountConvention::default())
    }

    /// Creates a maturity from an explicit year count and convention.
    pub fn with_convention(
        years: f64,
        convention: DayCountConvention,
    ) -> Result<Self, ConfigurationError> {
        if !years.is_finite() || years < 0.0 {
            return Err(ConfigurationError::InvalidParameter {
                name: "maturity_in_years",
                value: years.to_string(),
            });
        }
        Ok(Self {
            years,
            convention,
            end_date: None,
        })
    }

    /// Creates a maturity from a date pair: `(end - begin).days / denominator`.
    ///
    /// Fails when `end` precedes `begin`.
    pub fn from_dates(
        begin: Date,
        end: Date,
        convention: DayCountConvention,
    ) -> Result<Self, ConfigurationError> {
        let years = convention.year_fraction(begin, end);
        if years < 0.0 {
            return Err(ConfigurationError::InvalidParameter {
                name: "end_date",
                value: format!("{} precedes begin date {}", end, begin),
            });
        }
        Ok(Self {
            years,
            convention,
            end_date: Some(end),
        })
    }

    /// Resolves a maturity from optional inputs.
    ///
    /// An explicit year count wins; otherwise both dates are required.
    pub fn resolve(
        years: Option<f64>,
        begin: Option<Date>,
        end: Option<Date>,
        convention: DayCountConvention,
    ) -> Result<Self, ConfigurationError> {
        match (years, begin, end) {
            (Some(years), _, _) => Self::with_convention(years, convention),
            (None, Some(begin), Some(end)) => Self::from_dates(begin, end, convention),
            _ => Err(ConfigurationError::MissingInput {
                key: "maturity_in_years or begin_date/end_date".to_string(),
            }),
        }
    }

    /// Time to expiry in years.
    #[inline]
    pub fn years(&self) -> f64 {
        self.years
    }

    /// Day-count convention the maturity was built with.
    #[inline]
    pub fn convention(&self) -> DayCountConvention {
        self.convention
    }

    /// End date, when the maturity was built from dates.
    #[inline]
    pub fn end_date(&self) -> Option<Date> {
        self.end_date
    }

    /// Returns true when the maturity can be priced (strictly positive).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.years > 0.0
    }

    /// Derives a stressed maturity, preserving the day-count convention.
    ///
    /// A new year count used alone takes precedence; otherwise a new begin
    /// date is measured against the stored end date.
    pub fn shifted(
        &self,
        new_begin: Option<Date>,
        new_years: Option<f64>,
    ) -> Result<Self, ConfigurationError> {
        match (new_begin, new_years, self.end_date) {
            (None, Some(years), _) => Self::with_convention(years, self.convention),
            (Some(begin), _, Some(end)) => Self::from_dates(begin, end, self.convention),
            _ => Err(ConfigurationError::MissingInput {
                key: "new maturity_in_years or new begin_date with an end date".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    // ========================================
    // Date Tests
    // ========================================

    #[test]
    fn test_date_invalid() {
        assert!(Date::from_ymd(2023, 2, 29).is_err());
        assert!(Date::from_ymd(2024, 2, 29).is_ok());
    }

    #[test]
    fn test_date_display_round_trip() {
        let d = date(2024, 3, 9);
        assert_eq!(d.to_string(), "2024-03-09");
        assert_eq!("2024-03-09".parse::<Date>().unwrap(), d);
    }

    #[test]
    fn test_date_sub_negative() {
        assert_eq!(date(2024, 1, 1) - date(2024, 1, 11), -10);
    }

    // ========================================
    // DayCountConvention Tests
    // ========================================

    #[test]
    fn test_convention_parse() {
        assert_eq!(
            "act/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act360
        );
        assert_eq!(
            "ACT/365".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act365
        );
    }

    #[test]
    fn test_convention_parse_unknown() {
        match "30/360".parse::<DayCountConvention>() {
            Err(ConfigurationError::UnknownDayCount(s)) => assert_eq!(s, "30/360"),
            other => panic!("Expected UnknownDayCount, got {:?}", other),
        }
    }

    #[test]
    fn test_convention_default_is_act360() {
        assert_eq!(DayCountConvention::default(), DayCountConvention::Act360);
        assert_eq!(DayCountConvention::default().name(), "ACT/360");
    }

    // ========================================
    // Maturity Tests
    // ========================================

    #[test]
    fn test_maturity_from_dates_act360() {
        let m = Maturity::from_dates(date(2024, 1, 1), date(2025, 1, 1), DayCountConvention::Act360)
            .unwrap();
        assert_relative_eq!(m.years(), 366.0 / 360.0, epsilon = 1e-12);
        assert_eq!(m.end_date(), Some(date(2025, 1, 1)));
    }

    #[test]
    fn test_maturity_from_dates_act365() {
        let m = Maturity::from_dates(date(2023, 1, 1), date(2024, 1, 1), DayCountConvention::Act365)
            .unwrap();
        assert_relative_eq!(m.years(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_maturity_rejects_reversed_dates() {
        let result =
            Maturity::from_dates(date(2025, 1, 1), date(2024, 1, 1), DayCountConvention::Act365);
        assert!(result.is_err());
    }

    #[test]
    fn test_maturity_rejects_negative_and_nan() {
        assert!(Maturity::from_years(-0.1).is_err());
        assert!(Maturity::from_years(f64::NAN).is_err());
        assert!(Maturity::from_years(f64::INFINITY).is_err());
    }

    #[test]
    fn test_maturity_zero_allowed_but_not_positive() {
        let m = Maturity::from_years(0.0).unwrap();
        assert!(!m.is_positive());
    }

    #[test]
    fn test_maturity_resolve_requires_inputs() {
        let result = Maturity::resolve(None, Some(date(2024, 1, 1)), None, Default::default());
        match result {
            Err(ConfigurationError::MissingInput { .. }) => {}
            other => panic!("Expected MissingInput, got {:?}", other),
        }
    }

    #[test]
    fn test_maturity_resolve_prefers_years() {
        let m = Maturity::resolve(
            Some(2.0),
            Some(date(2024, 1, 1)),
            Some(date(2024, 2, 1)),
            DayCountConvention::Act365,
        )
        .unwrap();
        assert_eq!(m.years(), 2.0);
        assert_eq!(m.convention(), DayCountConvention::Act365);
    }

    #[test]
    fn test_shifted_with_years_keeps_convention() {
        let m = Maturity::with_convention(1.0, DayCountConvention::Act365).unwrap();
        let s = m.shifted(None, Some(0.5)).unwrap();
        assert_eq!(s.years(), 0.5);
        assert_eq!(s.convention(), DayCountConvention::Act365);
    }

    #[test]
    fn test_shifted_with_begin_date_uses_end_date() {
        let m = Maturity::from_dates(date(2024, 1, 1), date(2024, 12, 27), DayCountConvention::Act360)
            .unwrap();
        let s = m.shifted(Some(date(2024, 6, 30)), None).unwrap();
        assert_relative_eq!(s.years(), 180.0 / 360.0, epsilon = 1e-12);
        assert_eq!(s.end_date(), m.end_date());
    }

    #[test]
    fn test_shifted_begin_date_without_end_date_fails() {
        let m = Maturity::from_years(1.0).unwrap();
        assert!(m.shifted(Some(date(2024, 6, 30)), None).is_err());
        assert!(m.shifted(None, None).is_err());
    }

    proptest! {
        #[test]
        fn prop_year_fraction_scales_with_denominator(days in 0i64..20_000) {
            let begin = date(2000, 1, 1);
            let end = Date(begin.into_inner() + chrono::Duration::days(days));
            let act360 = Maturity::from_dates(begin, end, DayCountConvention::Act360).unwrap();
            let act365 = Maturity::from_dates(begin, end, DayCountConvention::Act365).unwrap();
            prop_assert!((act360.years() * 360.0 - act365.years() * 365.0).abs() < 1e-9);
        }
    }
}
