//! Month key model.
//!
//! Monthly data is keyed by `YYYY-MM` (e.g. `"2025-03"`). [`MonthKey`] is the
//! validated form of that key and the calendar handle the attendance
//! aggregation works from.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A validated calendar month.
///
/// # Example
///
/// ```
/// use points_engine::models::MonthKey;
///
/// let key = MonthKey::new(2025, 3).unwrap();
/// assert_eq!(key.to_string(), "2025-03");
/// assert_eq!("2025-03".parse::<MonthKey>().unwrap(), key);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    first_day: NaiveDate,
}

impl MonthKey {
    /// Creates a month key, rejecting month numbers outside 1..=12.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or(EngineError::InvalidMonth { year, month })
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// The month number, 1..=12.
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// Iterates over every date of the month in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let month = self.month();
        self.first_day
            .iter_days()
            .take_while(move |date| date.month() == month)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidMonthKey { key: s.to_string() };

        let (year_part, month_part) = s.split_once('-').ok_or_else(invalid)?;
        let is_digits = |part: &str, len: usize| {
            part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
        };
        if !is_digits(year_part, 4) || !is_digits(month_part, 2) {
            return Err(invalid());
        }

        let year: i32 = year_part.parse().map_err(|_| invalid())?;
        let month: u32 = month_part.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for MonthKey {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_zero_pads_month() {
        let key = MonthKey::new(2025, 3).unwrap();
        assert_eq!(key.to_string(), "2025-03");

        let key = MonthKey::new(2024, 12).unwrap();
        assert_eq!(key.to_string(), "2024-12");
    }

    #[test]
    fn test_new_rejects_month_thirteen() {
        match MonthKey::new(2025, 13) {
            Err(EngineError::InvalidMonth { year, month }) => {
                assert_eq!(year, 2025);
                assert_eq!(month, 13);
            }
            other => panic!("Expected InvalidMonth, got {:?}", other),
        }
    }

    #[test]
    fn test_new_rejects_month_zero() {
        assert!(MonthKey::new(2025, 0).is_err());
    }

    #[test]
    fn test_parse_valid_key() {
        let key: MonthKey = "2024-02".parse().unwrap();
        assert_eq!(key.year(), 2024);
        assert_eq!(key.month(), 2);
    }

    #[test]
    fn test_parse_rejects_unpadded_month() {
        assert!("2025-3".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_parse_rejects_wrong_separator() {
        match "2025/03".parse::<MonthKey>() {
            Err(EngineError::InvalidMonthKey { key }) => assert_eq!(key, "2025/03"),
            other => panic!("Expected InvalidMonthKey, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range_month() {
        assert!("2025-13".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_days_covers_whole_month() {
        let february = MonthKey::new(2024, 2).unwrap();
        let days: Vec<NaiveDate> = february.days().collect();
        assert_eq!(days.len(), 29);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(days[28], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_days_for_december_stops_at_year_end() {
        let december = MonthKey::new(2025, 12).unwrap();
        assert_eq!(december.days().count(), 31);
    }

    #[test]
    fn test_serializes_as_string() {
        let key = MonthKey::new(2025, 3).unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2025-03\"");

        let parsed: MonthKey = serde_json::from_str("\"2025-03\"").unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn test_deserialize_rejects_malformed_key() {
        assert!(serde_json::from_str::<MonthKey>("\"March 2025\"").is_err());
    }

    #[test]
    fn test_keys_order_chronologically() {
        let earlier = MonthKey::new(2024, 12).unwrap();
        let later = MonthKey::new(2025, 1).unwrap();
        assert!(earlier < later);
    }
}
