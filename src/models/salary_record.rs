//! Salary record model.
//!
//! A [`SalaryRecord`] is one styling employee's attendance and base-score
//! snapshot for one month. The employee's name, status and base score are
//! copied onto the record when it is created and only change through an
//! explicit re-sync, so edits in the employee registry never rewrite
//! history implicitly.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Employee, EmployeeStatus};

/// Hours logged per day of the month, keyed 1..=days-in-month. Sparse.
pub type DailyLogs = BTreeMap<u32, Decimal>;

/// One employee's attendance and base-score snapshot for a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// The owning employee's identifier.
    pub employee_id: String,
    /// Employee name, copied from the registry.
    pub employee_name: String,
    /// Employee status at the time of the last sync.
    #[serde(default)]
    pub employee_status: EmployeeStatus,
    /// Accumulated hours worked in the month.
    pub work_hours: Decimal,
    /// Attendance baseline: working days x expected daily hours.
    pub expected_hours: Decimal,
    /// The employee's standard base score at the time of the last sync.
    pub base_score_snapshot: Decimal,
    /// Incremented every time the snapshot is explicitly re-synced.
    #[serde(default)]
    pub snapshot_version: u32,
    /// Hours logged per day of the month.
    #[serde(default)]
    pub daily_logs: DailyLogs,
}

impl SalaryRecord {
    /// Creates the record an employee gets when a month is first opened.
    ///
    /// Work hours start equal to the expected baseline (full attendance)
    /// and the daily log starts empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use points_engine::models::{Employee, EmployeeStatus, SalaryRecord, Section};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Li Wei".to_string(),
    ///     section: Section::Styling,
    ///     status: EmployeeStatus::Active,
    ///     standard_base_score: Decimal::from(1000),
    ///     expected_daily_hours: Some(Decimal::from(10)),
    /// };
    ///
    /// let record = SalaryRecord::from_employee(&employee, 26);
    /// assert_eq!(record.expected_hours, Decimal::from(260));
    /// assert_eq!(record.work_hours, record.expected_hours);
    /// ```
    pub fn from_employee(employee: &Employee, working_days: u32) -> Self {
        let expected_hours = Decimal::from(working_days) * employee.daily_target_hours();
        Self {
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            employee_status: employee.status,
            work_hours: expected_hours,
            expected_hours,
            base_score_snapshot: employee.standard_base_score,
            snapshot_version: 0,
            daily_logs: DailyLogs::new(),
        }
    }

    /// Refreshes the denormalized name from the registry.
    pub fn sync_name(&mut self, employee: &Employee) {
        self.employee_name.clone_from(&employee.name);
    }

    /// Re-copies name, status and base score from the registry and bumps
    /// the snapshot version.
    pub fn resync_from(&mut self, employee: &Employee) {
        self.employee_name.clone_from(&employee.name);
        self.employee_status = employee.status;
        self.base_score_snapshot = employee.standard_base_score;
        self.snapshot_version += 1;
    }

    /// Returns true if the snapshot marks the employee as terminated.
    pub fn is_terminated(&self) -> bool {
        self.employee_status == EmployeeStatus::Terminated
    }
}
