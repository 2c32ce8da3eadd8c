//! Employee model and related types.
//!
//! This module defines the registry snapshot of an employee that callers hand
//! to the engine when assembling a month's salary records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Expected daily hours used when an employee has no explicit figure.
pub const DEFAULT_EXPECTED_DAILY_HOURS: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Employment status as held in the employee registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Regular active employee.
    #[default]
    Active,
    /// Employee still within the probation period.
    Probation,
    /// Employee on leave.
    Leave,
    /// Employee whose employment has ended.
    Terminated,
}

/// The production section an employee belongs to.
///
/// Each section has its own allocator: styling employees are paid through the
/// proportional allocator, weaving employees through the weaving bonus
/// allocator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// The styling section.
    #[default]
    Styling,
    /// The weaving section.
    Weaving,
}

/// Represents an employee as supplied by the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The section whose allocator pays this employee.
    #[serde(default)]
    pub section: Section,
    /// Current employment status.
    #[serde(default)]
    pub status: EmployeeStatus,
    /// The standardized base score rating.
    pub standard_base_score: Decimal,
    /// Hours the employee is expected to work per working day.
    #[serde(default)]
    pub expected_daily_hours: Option<Decimal>,
}

impl Employee {
    /// Returns true if the employee has been terminated.
    pub fn is_terminated(&self) -> bool {
        self.status == EmployeeStatus::Terminated
    }

    /// Returns true if the employee should hold a styling salary record.
    ///
    /// # Examples
    ///
    /// ```
    /// use points_engine::models::{Employee, EmployeeStatus, Section};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Li Wei".to_string(),
    ///     section: Section::Styling,
    ///     status: EmployeeStatus::Probation,
    ///     standard_base_score: Decimal::from(1000),
    ///     expected_daily_hours: None,
    /// };
    /// assert!(employee.is_styling_eligible());
    /// ```
    pub fn is_styling_eligible(&self) -> bool {
        self.section == Section::Styling && !self.is_terminated()
    }

    /// The expected daily hours, falling back to
    /// [`DEFAULT_EXPECTED_DAILY_HOURS`] when unset or zero.
    pub fn daily_target_hours(&self) -> Decimal {
        match self.expected_daily_hours {
            Some(hours) if !hours.is_zero() => hours,
            _ => DEFAULT_EXPECTED_DAILY_HOURS,
        }
    }
}
