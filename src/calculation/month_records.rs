//! Assembly and maintenance of a styling month's salary records.
//!
//! These are the mutation boundaries around [`MonthlyData`]: opening a month
//! from the employee roster, keeping it in sync with later roster edits, and
//! editing attendance. Each returns an [`EngineResult`] where a caller input
//! can be rejected.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    DEFAULT_EXPECTED_DAILY_HOURS, Employee, MonthKey, MonthlyData, MonthlyParams, SalaryRecord,
    Section,
};

use super::attendance::{auto_fill, clear_all, days_in_month, merge_daily_log, working_days};

/// What [`sync_month`] changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Employees that received a new record.
    pub added: Vec<String>,
    /// Employees whose record was dropped.
    pub removed: Vec<String>,
    /// Employees whose record picked up a new name.
    pub renamed: Vec<String>,
}

impl SyncReport {
    /// Returns true if the month was modified.
    pub fn is_changed(&self) -> bool {
        !(self.added.is_empty() && self.removed.is_empty() && self.renamed.is_empty())
    }
}

/// Opens a month with one full-attendance record per eligible employee.
///
/// # Example
///
/// ```
/// use points_engine::calculation::open_month;
/// use points_engine::models::{Employee, EmployeeStatus, MonthKey, MonthlyParams, Section};
/// use rust_decimal::Decimal;
///
/// let roster = vec![Employee {
///     id: "emp_001".to_string(),
///     name: "Li Wei".to_string(),
///     section: Section::Styling,
///     status: EmployeeStatus::Active,
///     standard_base_score: Decimal::from(1000),
///     expected_daily_hours: None,
/// }];
///
/// let key = MonthKey::new(2025, 3).unwrap();
/// let month = open_month(key, MonthlyParams::default(), &roster);
/// assert_eq!(month.records.len(), 1);
/// assert_eq!(month.records[0].expected_hours, Decimal::from(312));
/// ```
pub fn open_month(key: MonthKey, params: MonthlyParams, roster: &[Employee]) -> MonthlyData {
    let days = working_days(key);
    let records: Vec<SalaryRecord> = roster
        .iter()
        .filter(|e| e.is_styling_eligible())
        .map(|e| SalaryRecord::from_employee(e, days))
        .collect();

    info!(
        month = %key,
        working_days = days,
        records = records.len(),
        "Opened month"
    );

    MonthlyData {
        key,
        params,
        records,
    }
}

/// Brings a month's records in line with the current roster.
///
/// Names are refreshed; base scores and statuses are not (see
/// [`resync_employee`]). Records whose employee left the roster or moved
/// section are dropped. A terminated employee keeps an existing record; the
/// allocator skips it once its status snapshot is re-synced. Eligible
/// employees without a record get one, appended in roster order.
pub fn sync_month(data: &mut MonthlyData, roster: &[Employee]) -> SyncReport {
    let mut report = SyncReport::default();

    data.records.retain_mut(|record| {
        match roster.iter().find(|e| e.id == record.employee_id) {
            Some(employee) if employee.section == Section::Styling => {
                if record.employee_name != employee.name {
                    record.sync_name(employee);
                    report.renamed.push(record.employee_id.clone());
                }
                true
            }
            _ => {
                report.removed.push(record.employee_id.clone());
                false
            }
        }
    });

    let days = working_days(data.key);
    for employee in roster.iter().filter(|e| e.is_styling_eligible()) {
        if data.record(&employee.id).is_none() {
            data.records.push(SalaryRecord::from_employee(employee, days));
            report.added.push(employee.id.clone());
        }
    }

    if report.is_changed() {
        info!(
            month = %data.key,
            added = report.added.len(),
            removed = report.removed.len(),
            renamed = report.renamed.len(),
            "Synced month"
        );
    }

    report
}

/// Re-copies an employee's name, status and base score onto their record
/// and bumps the snapshot version.
pub fn resync_employee(data: &mut MonthlyData, employee: &Employee) -> EngineResult<()> {
    let key = data.key;
    let record = data
        .record_mut(&employee.id)
        .ok_or_else(|| record_not_found(&employee.id, key))?;

    record.resync_from(employee);
    debug!(
        employee_id = %employee.id,
        snapshot_version = record.snapshot_version,
        "Resynced salary record"
    );
    Ok(())
}

/// Removes an employee's record from the month, returning it.
pub fn purge_employee(data: &mut MonthlyData, employee_id: &str) -> Option<SalaryRecord> {
    let index = data
        .records
        .iter()
        .position(|r| r.employee_id == employee_id)?;

    warn!(employee_id = %employee_id, month = %data.key, "Purged salary record");
    Some(data.records.remove(index))
}

/// Sets one day's hours on an employee's record and returns the new
/// work-hours total.
pub fn update_daily_log(
    data: &mut MonthlyData,
    employee_id: &str,
    day: u32,
    hours: Decimal,
) -> EngineResult<Decimal> {
    let key = data.key;
    let last_day = days_in_month(key);
    if day > last_day {
        return Err(EngineError::InvalidDailyLog {
            day,
            message: format!("{} has only {} days", key, last_day),
        });
    }

    let record = data
        .record_mut(employee_id)
        .ok_or_else(|| record_not_found(employee_id, key))?;

    let merged = merge_daily_log(&record.daily_logs, day, hours)?;
    record.daily_logs = merged.daily_logs;
    record.work_hours = merged.total_hours;

    Ok(record.work_hours)
}

/// Fills every record with full attendance.
///
/// Each employee's daily target comes from the roster; records without a
/// roster entry use the default daily hours.
pub fn auto_fill_month(data: &mut MonthlyData, roster: &[Employee]) {
    let key = data.key;
    for record in &mut data.records {
        let target = roster
            .iter()
            .find(|e| e.id == record.employee_id)
            .map(Employee::daily_target_hours)
            .unwrap_or(DEFAULT_EXPECTED_DAILY_HOURS);

        let fill = auto_fill(key, target);
        record.daily_logs = fill.daily_logs;
        record.work_hours = fill.work_hours;
        record.expected_hours = fill.expected_hours;
    }

    info!(month = %key, records = data.records.len(), "Auto-filled attendance");
}

/// Zeroes every day of every record.
pub fn clear_month(data: &mut MonthlyData) {
    let days = days_in_month(data.key);
    for record in &mut data.records {
        record.daily_logs = clear_all(days);
        record.work_hours = Decimal::ZERO;
    }

    info!(month = %data.key, records = data.records.len(), "Cleared attendance");
}

fn record_not_found(employee_id: &str, key: MonthKey) -> EngineError {
    EngineError::RecordNotFound {
        employee_id: employee_id.to_string(),
        month: key.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeStatus, Section};

    fn employee(id: &str, section: Section, status: EmployeeStatus) -> Employee {
        Employee {
            id: id.to_string(),
            name: format!("Employee {}", id),
            section,
            status,
            standard_base_score: Decimal::from(1000),
            expected_daily_hours: None,
        }
    }

    fn create_test_roster() -> Vec<Employee> {
        vec![
            employee("emp_001", Section::Styling, EmployeeStatus::Active),
            employee("emp_002", Section::Styling, EmployeeStatus::Probation),
            employee("emp_003", Section::Weaving, EmployeeStatus::Active),
            employee("emp_004", Section::Styling, EmployeeStatus::Terminated),
        ]
    }

    fn march_2025(roster: &[Employee]) -> MonthlyData {
        open_month(
            MonthKey::new(2025, 3).unwrap(),
            MonthlyParams::default(),
            roster,
        )
    }

    fn ids(data: &MonthlyData) -> Vec<&str> {
        data.records.iter().map(|r| r.employee_id.as_str()).collect()
    }

    #[test]
    fn test_open_month_includes_only_eligible_styling_employees() {
        let data = march_2025(&create_test_roster());
        assert_eq!(ids(&data), vec!["emp_001", "emp_002"]);
    }

    #[test]
    fn test_open_month_uses_employee_daily_hours() {
        let mut roster = create_test_roster();
        roster[0].expected_daily_hours = Some(Decimal::from(8));

        let data = march_2025(&roster);

        // 26 working days in March 2025.
        assert_eq!(data.records[0].expected_hours, Decimal::from(208));
        assert_eq!(data.records[0].work_hours, Decimal::from(208));
        assert_eq!(data.records[1].expected_hours, Decimal::from(312));
    }

    #[test]
    fn test_sync_adds_new_and_keeps_terminated_record() {
        let mut roster = create_test_roster();
        let mut data = march_2025(&roster);

        roster[1].status = EmployeeStatus::Terminated;
        roster.push(employee("emp_005", Section::Styling, EmployeeStatus::Active));

        let report = sync_month(&mut data, &roster);

        assert_eq!(report.added, vec!["emp_005".to_string()]);
        assert!(report.removed.is_empty());
        assert!(report.is_changed());
        assert_eq!(ids(&data), vec!["emp_001", "emp_002", "emp_005"]);
    }

    #[test]
    fn test_past_month_keeps_terminated_employee_after_sync() {
        let mut roster = vec![employee("emp_001", Section::Styling, EmployeeStatus::Active)];
        let mut january = open_month(
            MonthKey::new(2025, 1).unwrap(),
            MonthlyParams::default(),
            &roster,
        );

        roster[0].status = EmployeeStatus::Terminated;
        let report = sync_month(&mut january, &roster);

        assert!(!report.is_changed());
        assert_eq!(january.records.len(), 1);
        assert_eq!(ids(&january), vec!["emp_001"]);

        // A month opened after the termination leaves the employee out.
        let february = open_month(
            MonthKey::new(2025, 2).unwrap(),
            MonthlyParams::default(),
            &roster,
        );
        assert!(february.records.is_empty());
    }

    #[test]
    fn test_sync_drops_employee_moved_to_weaving() {
        let mut roster = create_test_roster();
        let mut data = march_2025(&roster);

        roster[0].section = Section::Weaving;
        let report = sync_month(&mut data, &roster);

        assert_eq!(report.removed, vec!["emp_001".to_string()]);
        assert_eq!(ids(&data), vec!["emp_002"]);
    }

    #[test]
    fn test_sync_drops_employee_missing_from_roster() {
        let roster = create_test_roster();
        let mut data = march_2025(&roster);

        let report = sync_month(&mut data, &roster[1..]);

        assert_eq!(report.removed, vec!["emp_001".to_string()]);
        assert_eq!(ids(&data), vec!["emp_002"]);
    }

    #[test]
    fn test_sync_refreshes_name_but_not_base_score() {
        let mut roster = create_test_roster();
        let mut data = march_2025(&roster);

        roster[0].name = "New Name".to_string();
        roster[0].standard_base_score = Decimal::from(5000);

        let report = sync_month(&mut data, &roster);

        assert_eq!(report.renamed, vec!["emp_001".to_string()]);
        let record = data.record("emp_001").unwrap();
        assert_eq!(record.employee_name, "New Name");
        assert_eq!(record.base_score_snapshot, Decimal::from(1000));
        assert_eq!(record.snapshot_version, 0);
    }

    #[test]
    fn test_sync_without_roster_changes_reports_nothing() {
        let roster = create_test_roster();
        let mut data = march_2025(&roster);
        let before = data.clone();

        let report = sync_month(&mut data, &roster);

        assert!(!report.is_changed());
        assert_eq!(data, before);
    }

    #[test]
    fn test_resync_employee_updates_snapshot() {
        let mut roster = create_test_roster();
        let mut data = march_2025(&roster);

        roster[0].standard_base_score = Decimal::from(1500);
        resync_employee(&mut data, &roster[0]).unwrap();

        let record = data.record("emp_001").unwrap();
        assert_eq!(record.base_score_snapshot, Decimal::from(1500));
        assert_eq!(record.snapshot_version, 1);
    }

    #[test]
    fn test_resync_unknown_employee_fails() {
        let roster = create_test_roster();
        let mut data = march_2025(&roster);

        match resync_employee(&mut data, &roster[2]) {
            Err(EngineError::RecordNotFound { employee_id, month }) => {
                assert_eq!(employee_id, "emp_003");
                assert_eq!(month, "2025-03");
            }
            other => panic!("Expected RecordNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_purge_employee_removes_record() {
        let mut data = march_2025(&create_test_roster());

        let purged = purge_employee(&mut data, "emp_001");

        assert_eq!(purged.map(|r| r.employee_id), Some("emp_001".to_string()));
        assert_eq!(ids(&data), vec!["emp_002"]);
        assert!(purge_employee(&mut data, "emp_001").is_none());
    }

    #[test]
    fn test_update_daily_log_sets_work_hours_to_log_total() {
        let mut data = march_2025(&create_test_roster());

        update_daily_log(&mut data, "emp_001", 3, Decimal::from(10)).unwrap();
        let total = update_daily_log(&mut data, "emp_001", 4, Decimal::from(11)).unwrap();

        assert_eq!(total, Decimal::from(21));
        assert_eq!(data.record("emp_001").unwrap().work_hours, Decimal::from(21));
    }

    #[test]
    fn test_update_daily_log_rejects_day_past_month_end() {
        let mut data = open_month(
            MonthKey::new(2025, 2).unwrap(),
            MonthlyParams::default(),
            &create_test_roster(),
        );

        match update_daily_log(&mut data, "emp_001", 29, Decimal::from(8)) {
            Err(EngineError::InvalidDailyLog { day, .. }) => assert_eq!(day, 29),
            other => panic!("Expected InvalidDailyLog, got {:?}", other),
        }
    }

    #[test]
    fn test_update_daily_log_unknown_employee() {
        let mut data = march_2025(&create_test_roster());
        assert!(matches!(
            update_daily_log(&mut data, "emp_404", 1, Decimal::ONE),
            Err(EngineError::RecordNotFound { .. })
        ));
    }

    #[test]
    fn test_auto_fill_month_uses_roster_targets() {
        let mut roster = create_test_roster();
        roster[1].expected_daily_hours = Some(Decimal::from(8));
        let mut data = march_2025(&roster);

        update_daily_log(&mut data, "emp_001", 3, Decimal::ZERO).unwrap();
        auto_fill_month(&mut data, &roster);

        let first = data.record("emp_001").unwrap();
        assert_eq!(first.work_hours, Decimal::from(312));
        assert_eq!(first.daily_logs.len(), 31);

        let second = data.record("emp_002").unwrap();
        assert_eq!(second.work_hours, Decimal::from(208));
        assert_eq!(second.expected_hours, Decimal::from(208));
    }

    #[test]
    fn test_auto_fill_month_defaults_without_roster_entry() {
        let mut data = march_2025(&create_test_roster());
        auto_fill_month(&mut data, &[]);
        assert!(
            data.records
                .iter()
                .all(|r| r.work_hours == Decimal::from(312))
        );
    }

    #[test]
    fn test_clear_month_zeroes_every_record() {
        let mut data = march_2025(&create_test_roster());

        clear_month(&mut data);

        for record in &data.records {
            assert_eq!(record.work_hours, Decimal::ZERO);
            assert_eq!(record.daily_logs.len(), 31);
            assert_eq!(record.expected_hours, Decimal::from(312));
        }
    }
}
