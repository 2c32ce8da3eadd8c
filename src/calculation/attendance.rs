//! Attendance aggregation.
//!
//! Turns a sparse day-to-hours log into total worked hours and an
//! expected-hours baseline. Working days are every day of the month except
//! Sunday; statutory holidays are not modeled.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{DailyLogs, MonthKey};

/// The longest month any daily log can describe.
pub const MAX_DAYS_IN_MONTH: u32 = 31;

/// The result of auto-filling a month of attendance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceFill {
    /// One entry per day of the month; Sundays are 0.
    pub daily_logs: DailyLogs,
    /// Sum of the log.
    pub work_hours: Decimal,
    /// working days x daily target.
    pub expected_hours: Decimal,
}

/// The result of merging one day into a log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedLog {
    /// The updated log.
    pub daily_logs: DailyLogs,
    /// Sum of every entry in the updated log.
    pub total_hours: Decimal,
}

/// Returns true unless the date is a Sunday.
pub fn is_working_day(date: NaiveDate) -> bool {
    date.weekday() != Weekday::Sun
}

/// Number of calendar days in the month.
pub fn days_in_month(month: MonthKey) -> u32 {
    month.days().count() as u32
}

/// Counts the days of the month that are not Sundays.
///
/// # Example
///
/// ```
/// use points_engine::calculation::working_days;
/// use points_engine::models::MonthKey;
///
/// // March 2025 has 31 days and five Sundays.
/// assert_eq!(working_days(MonthKey::new(2025, 3).unwrap()), 26);
/// ```
pub fn working_days(month: MonthKey) -> u32 {
    month.days().filter(|date| is_working_day(*date)).count() as u32
}

/// Sums every entry of a daily log.
pub fn total_hours(logs: &DailyLogs) -> Decimal {
    logs.values().copied().sum()
}

/// Sets `day` to `hours` in a copy of the log and recomputes the total.
///
/// Hours must be non-negative and the day must be 1..=31; no upper bound is
/// placed on hours. The input log is left untouched.
///
/// # Example
///
/// ```
/// use points_engine::calculation::merge_daily_log;
/// use points_engine::models::DailyLogs;
/// use rust_decimal::Decimal;
///
/// let mut logs = DailyLogs::new();
/// logs.insert(1, Decimal::from(8));
///
/// let merged = merge_daily_log(&logs, 2, Decimal::from(10)).unwrap();
/// assert_eq!(merged.total_hours, Decimal::from(18));
/// assert_eq!(logs.len(), 1);
/// ```
pub fn merge_daily_log(existing: &DailyLogs, day: u32, hours: Decimal) -> EngineResult<MergedLog> {
    if day == 0 || day > MAX_DAYS_IN_MONTH {
        return Err(EngineError::InvalidDailyLog {
            day,
            message: format!("day must be between 1 and {}", MAX_DAYS_IN_MONTH),
        });
    }
    if hours < Decimal::ZERO {
        return Err(EngineError::InvalidDailyLog {
            day,
            message: format!("hours must not be negative, got {}", hours),
        });
    }

    let mut daily_logs = existing.clone();
    daily_logs.insert(day, hours);
    let total_hours = total_hours(&daily_logs);

    Ok(MergedLog {
        daily_logs,
        total_hours,
    })
}

/// Fills every working day of the month with the daily target and every
/// Sunday with 0.
///
/// Deterministic: the same month and target always produce the same log.
pub fn auto_fill(month: MonthKey, daily_target_hours: Decimal) -> AttendanceFill {
    let mut daily_logs = DailyLogs::new();
    let mut work_hours = Decimal::ZERO;

    for date in month.days() {
        let hours = if is_working_day(date) {
            daily_target_hours
        } else {
            Decimal::ZERO
        };
        daily_logs.insert(date.day(), hours);
        work_hours += hours;
    }

    AttendanceFill {
        daily_logs,
        work_hours,
        expected_hours: Decimal::from(working_days(month)) * daily_target_hours,
    }
}

/// A log with every day from 1 to `days_in_month` set to 0.
pub fn clear_all(days_in_month: u32) -> DailyLogs {
    (1..=days_in_month).map(|day| (day, Decimal::ZERO)).collect()
}
