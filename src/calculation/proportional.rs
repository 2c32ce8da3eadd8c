//! Styling section proportional allocation.
//!
//! The styling pool is paid out in two passes. The first pass pays every
//! employee their base score scaled by attendance ("real base"); whatever is
//! left of the pool becomes the bonus pool, which the second pass splits by
//! a weighted blend of each employee's share of hours worked and share of
//! real base.

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::models::{
    AllocatedRecord, AuditTrace, CalculationResult, MonthlyData, MonthlyParams, SalaryRecord,
};

use super::safe_div::safe_div;

const PERCENT: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Warning code raised when terminated records were dropped.
pub const WARN_TERMINATED_EXCLUDED: &str = "TERMINATED_RECORDS_EXCLUDED";
/// Warning code raised when no hours were worked, so the time share of the
/// blend pays nobody.
pub const WARN_ZERO_WORK_HOURS: &str = "ZERO_WORK_HOURS";
/// Warning code raised when the summed real base is zero, so the base share
/// of the blend pays nobody.
pub const WARN_ZERO_REAL_BASE: &str = "ZERO_REAL_BASE";

struct FirstPass<'a> {
    record: &'a SalaryRecord,
    attendance_ratio: Decimal,
    real_base: Decimal,
}

/// Allocates the styling pool across a month's salary records.
///
/// Records whose status snapshot is terminated are excluded from every sum
/// and from the result. Every division is guarded, so the function never
/// fails: degenerate denominators contribute a zero ratio.
///
/// # Example
///
/// ```
/// use points_engine::calculation::calculate_styling_allocation;
/// use points_engine::models::{EmployeeStatus, MonthlyParams, SalaryRecord};
/// use rust_decimal::Decimal;
///
/// let record = SalaryRecord {
///     employee_id: "emp_001".to_string(),
///     employee_name: "Li Wei".to_string(),
///     employee_status: EmployeeStatus::Active,
///     work_hours: Decimal::from(220),
///     expected_hours: Decimal::from(220),
///     base_score_snapshot: Decimal::from(1000),
///     snapshot_version: 0,
///     daily_logs: Default::default(),
/// };
///
/// let result = calculate_styling_allocation(&MonthlyParams::default(), &[record]);
/// assert_eq!(result.total_pool, Decimal::from(67500));
/// assert_eq!(result.bonus_pool, Decimal::from(66500));
/// assert_eq!(result.records[0].final_score, Decimal::from(67500));
/// ```
pub fn calculate_styling_allocation(
    params: &MonthlyParams,
    records: &[SalaryRecord],
) -> CalculationResult {
    let mut audit_trace = AuditTrace::default();

    // Step 1: size the pool
    let total_pool = params.total_pool();
    audit_trace.push_step(
        "pool_sizing",
        "Pool Sizing",
        "area * unit_price + attendance_pack + kpi_score",
        serde_json::json!({
            "area": params.area.normalize().to_string(),
            "unit_price": params.unit_price.normalize().to_string(),
            "attendance_pack": params.attendance_pack.normalize().to_string(),
            "kpi_score": params.kpi_score.normalize().to_string()
        }),
        serde_json::json!({ "total_pool": total_pool.normalize().to_string() }),
        format!("Total pool sized at {} points", total_pool.normalize()),
    );

    // Step 2: drop terminated records
    let included: Vec<&SalaryRecord> = records.iter().filter(|r| !r.is_terminated()).collect();
    let excluded = records.len() - included.len();
    if excluded > 0 {
        audit_trace.warn(
            WARN_TERMINATED_EXCLUDED,
            format!("{} terminated record(s) excluded from the allocation", excluded),
            "low",
        );
    }

    // Step 3: first pass, real base
    let mut sum_work_hours = Decimal::ZERO;
    let mut sum_expected_hours = Decimal::ZERO;
    let mut sum_standard_base = Decimal::ZERO;
    let mut sum_real_base = Decimal::ZERO;

    let first_pass: Vec<FirstPass<'_>> = included
        .into_iter()
        .map(|record| {
            let attendance_ratio =
                safe_div(record.work_hours, record.expected_hours, Decimal::ZERO);
            let real_base = record.base_score_snapshot * attendance_ratio;

            sum_work_hours += record.work_hours;
            sum_expected_hours += record.expected_hours;
            sum_standard_base += record.base_score_snapshot;
            sum_real_base += real_base;

            FirstPass {
                record,
                attendance_ratio,
                real_base,
            }
        })
        .collect();

    audit_trace.push_step(
        "real_base",
        "Real Base (First Pass)",
        "real_base = base_score_snapshot * (work_hours / expected_hours)",
        serde_json::json!({
            "records": first_pass.len(),
            "excluded_terminated": excluded
        }),
        serde_json::json!({
            "sum_work_hours": sum_work_hours.normalize().to_string(),
            "sum_expected_hours": sum_expected_hours.normalize().to_string(),
            "sum_standard_base": sum_standard_base.normalize().to_string(),
            "sum_real_base": sum_real_base.normalize().to_string()
        }),
        format!(
            "Base payout of {} points across {} record(s)",
            sum_real_base.normalize(),
            first_pass.len()
        ),
    );

    // Step 4: whatever the base payout leaves is the bonus pool
    let bonus_pool = (total_pool - sum_real_base).max(Decimal::ZERO);
    if sum_real_base > total_pool {
        debug!(
            total_pool = %total_pool,
            sum_real_base = %sum_real_base,
            "Base payout exceeds pool, bonus pool floored at zero"
        );
    }
    audit_trace.push_step(
        "bonus_pool",
        "Bonus Pool",
        "max(0, total_pool - sum_real_base)",
        serde_json::json!({
            "total_pool": total_pool.normalize().to_string(),
            "sum_real_base": sum_real_base.normalize().to_string()
        }),
        serde_json::json!({ "bonus_pool": bonus_pool.normalize().to_string() }),
        format!("Bonus pool of {} points after base payout", bonus_pool.normalize()),
    );

    // Step 5: second pass, weighted bonus
    let w_time = Decimal::from(params.weight_time()) / PERCENT;
    let w_base = Decimal::from(params.weight_base()) / PERCENT;

    if !first_pass.is_empty() {
        if sum_work_hours.is_zero() && !w_time.is_zero() {
            audit_trace.warn(
                WARN_ZERO_WORK_HOURS,
                "No hours worked; the time share of the bonus is not distributed".to_string(),
                "medium",
            );
        }
        if sum_real_base.is_zero() && !w_base.is_zero() {
            audit_trace.warn(
                WARN_ZERO_REAL_BASE,
                "Summed real base is zero; the base share of the bonus is not distributed"
                    .to_string(),
                "medium",
            );
        }
    }

    let allocated: Vec<AllocatedRecord> = first_pass
        .into_iter()
        .map(|pass| {
            let work_ratio = safe_div(pass.record.work_hours, sum_work_hours, Decimal::ZERO);
            let base_ratio = safe_div(pass.real_base, sum_real_base, Decimal::ZERO);
            let composite_weight = work_ratio * w_time + base_ratio * w_base;
            let bonus = bonus_pool * composite_weight;

            AllocatedRecord {
                employee_id: pass.record.employee_id.clone(),
                employee_name: pass.record.employee_name.clone(),
                work_hours: pass.record.work_hours,
                expected_hours: pass.record.expected_hours,
                base_score_snapshot: pass.record.base_score_snapshot,
                attendance_ratio: pass.attendance_ratio,
                work_ratio,
                base_ratio,
                composite_weight,
                real_base: pass.real_base,
                bonus,
                final_score: pass.real_base + bonus,
            }
        })
        .collect();

    let distributed: Decimal = allocated.iter().map(|r| r.bonus).sum();
    audit_trace.push_step(
        "bonus_distribution",
        "Weighted Bonus Distribution (Second Pass)",
        "bonus = bonus_pool * (work_ratio * weight_time/100 + base_ratio * weight_base/100)",
        serde_json::json!({
            "bonus_pool": bonus_pool.normalize().to_string(),
            "weight_time": params.weight_time(),
            "weight_base": params.weight_base()
        }),
        serde_json::json!({ "bonus_distributed": distributed.normalize().to_string() }),
        format!(
            "Distributed {} of {} bonus points by composite weight",
            distributed.normalize(),
            bonus_pool.normalize()
        ),
    );

    info!(
        records = allocated.len(),
        total_pool = %total_pool,
        bonus_pool = %bonus_pool,
        "Styling allocation completed"
    );

    CalculationResult {
        records: allocated,
        total_pool,
        total_base_payout: sum_real_base,
        bonus_pool,
        sum_work_hours,
        sum_expected_hours,
        sum_standard_base,
        audit_trace,
    }
}

/// Allocates the styling pool for a whole month snapshot.
pub fn calculate_month(data: &MonthlyData) -> CalculationResult {
    debug!(month = %data.key, "Calculating styling month");
    calculate_styling_allocation(&data.params, &data.records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeStatus;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_record(id: &str, work: &str, expected: &str, base: &str) -> SalaryRecord {
        SalaryRecord {
            employee_id: id.to_string(),
            employee_name: format!("Employee {}", id),
            employee_status: EmployeeStatus::Active,
            work_hours: dec(work),
            expected_hours: dec(expected),
            base_score_snapshot: dec(base),
            snapshot_version: 0,
            daily_logs: Default::default(),
        }
    }

    fn assert_close(actual: Decimal, expected: Decimal) {
        let tolerance = dec("0.000001");
        assert!(
            (actual - expected).abs() <= tolerance,
            "Expected {} to be within {} of {}",
            actual,
            tolerance,
            expected
        );
    }

    #[test]
    fn test_lone_full_attendance_employee_exhausts_pool() {
        let params = MonthlyParams::default();
        let records = vec![create_record("emp_001", "220", "220", "1000")];

        let result = calculate_styling_allocation(&params, &records);

        assert_eq!(result.total_pool, dec("67500"));
        assert_eq!(result.total_base_payout, dec("1000"));
        assert_eq!(result.bonus_pool, dec("66500"));

        let record = &result.records[0];
        assert_eq!(record.real_base, dec("1000"));
        assert_eq!(record.work_ratio, Decimal::ONE);
        assert_eq!(record.base_ratio, Decimal::ONE);
        assert_eq!(record.composite_weight, Decimal::ONE);
        assert_eq!(record.bonus, dec("66500"));
        assert_eq!(record.final_score, dec("67500"));
    }

    #[test]
    fn test_partial_attendance_scales_real_base() {
        let params = MonthlyParams::default();
        let records = vec![
            create_record("emp_001", "110", "220", "1000"),
            create_record("emp_002", "220", "220", "1000"),
        ];

        let result = calculate_styling_allocation(&params, &records);

        assert_eq!(result.records[0].attendance_ratio, dec("0.5"));
        assert_eq!(result.records[0].real_base, dec("500"));
        assert_eq!(result.records[1].real_base, dec("1000"));
        assert_eq!(result.total_base_payout, dec("1500"));
        assert_eq!(result.bonus_pool, dec("66000"));
        assert_eq!(result.sum_standard_base, dec("2000"));
        assert_eq!(result.sum_work_hours, dec("330"));
        assert_eq!(result.sum_expected_hours, dec("440"));
    }

    #[test]
    fn test_final_scores_sum_to_real_base_plus_bonus_pool() {
        let params = MonthlyParams::default();
        let records = vec![
            create_record("emp_001", "208", "216", "1200"),
            create_record("emp_002", "190.5", "216", "950"),
            create_record("emp_003", "230", "216", "1100"),
        ];

        let result = calculate_styling_allocation(&params, &records);

        let weights: Decimal = result.records.iter().map(|r| r.composite_weight).sum();
        assert_close(weights, Decimal::ONE);
        assert_close(
            result.total_final_score(),
            result.total_base_payout + result.bonus_pool,
        );
    }

    #[test]
    fn test_bonus_pool_floors_at_zero_when_base_exceeds_pool() {
        let params = MonthlyParams::new(
            Decimal::ZERO,
            Decimal::ZERO,
            dec("1000"),
            Decimal::ZERO,
            50,
        )
        .unwrap();
        let records = vec![
            create_record("emp_001", "220", "220", "800"),
            create_record("emp_002", "220", "220", "800"),
        ];

        let result = calculate_styling_allocation(&params, &records);

        assert_eq!(result.bonus_pool, Decimal::ZERO);
        assert_eq!(result.total_base_payout, dec("1600"));
        assert!(result.records.iter().all(|r| r.bonus.is_zero()));
        assert_eq!(result.records[0].final_score, dec("800"));
    }

    #[test]
    fn test_zero_expected_hours_pays_no_base() {
        let params = MonthlyParams::default();
        let records = vec![
            create_record("emp_001", "100", "0", "1000"),
            create_record("emp_002", "300", "0", "1000"),
        ];

        let result = calculate_styling_allocation(&params, &records);

        assert!(result.records.iter().all(|r| r.attendance_ratio.is_zero()));
        assert!(result.records.iter().all(|r| r.real_base.is_zero()));
        assert_eq!(result.bonus_pool, result.total_pool);
        assert!(result.audit_trace.has_warning(WARN_ZERO_REAL_BASE));

        // Only the time half of the blend is distributed.
        assert_eq!(result.records[0].composite_weight, dec("0.125"));
        assert_eq!(result.records[1].composite_weight, dec("0.375"));
    }

    #[test]
    fn test_zero_work_hours_distributes_only_base_share() {
        let params = MonthlyParams::default();
        let records = vec![create_record("emp_001", "0", "220", "1000")];

        let result = calculate_styling_allocation(&params, &records);

        assert_eq!(result.records[0].work_ratio, Decimal::ZERO);
        assert_eq!(result.records[0].real_base, Decimal::ZERO);
        assert_eq!(result.records[0].composite_weight, Decimal::ZERO);
        assert!(result.audit_trace.has_warning(WARN_ZERO_WORK_HOURS));
    }

    #[test]
    fn test_terminated_records_are_excluded() {
        let params = MonthlyParams::default();
        let mut terminated = create_record("emp_002", "220", "220", "5000");
        terminated.employee_status = EmployeeStatus::Terminated;
        let records = vec![create_record("emp_001", "220", "220", "1000"), terminated];

        let result = calculate_styling_allocation(&params, &records);

        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].employee_id, "emp_001");
        assert_eq!(result.sum_standard_base, dec("1000"));
        assert_eq!(result.records[0].final_score, dec("67500"));
        assert!(result.audit_trace.has_warning(WARN_TERMINATED_EXCLUDED));
    }

    #[test]
    fn test_terminated_marker_in_id_is_not_a_filter() {
        let params = MonthlyParams::default();
        let records = vec![create_record("emp_001-terminated", "220", "220", "1000")];

        let result = calculate_styling_allocation(&params, &records);

        assert_eq!(result.records.len(), 1);
    }

    #[test]
    fn test_time_only_weighting_uses_work_share() {
        let mut params = MonthlyParams::default();
        params.set_weight_time(100).unwrap();
        let records = vec![
            create_record("emp_001", "100", "200", "1000"),
            create_record("emp_002", "300", "200", "1000"),
        ];

        let result = calculate_styling_allocation(&params, &records);

        assert_eq!(result.records[0].composite_weight, dec("0.25"));
        assert_eq!(result.records[1].composite_weight, dec("0.75"));
    }

    #[test]
    fn test_empty_month_keeps_whole_pool_undistributed() {
        let result = calculate_styling_allocation(&MonthlyParams::default(), &[]);

        assert!(result.records.is_empty());
        assert_eq!(result.bonus_pool, dec("67500"));
        assert!(result.audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_negative_pool_inputs_are_not_clamped() {
        let params = MonthlyParams::new(
            Decimal::ZERO,
            Decimal::ZERO,
            dec("-500"),
            Decimal::ZERO,
            50,
        )
        .unwrap();

        let result = calculate_styling_allocation(&params, &[]);

        assert_eq!(result.total_pool, dec("-500"));
        assert_eq!(result.bonus_pool, Decimal::ZERO);
    }

    #[test]
    fn test_audit_trace_records_four_steps() {
        let result = calculate_styling_allocation(
            &MonthlyParams::default(),
            &[create_record("emp_001", "220", "220", "1000")],
        );

        let rule_ids: Vec<&str> = result
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            rule_ids,
            vec!["pool_sizing", "real_base", "bonus_pool", "bonus_distribution"]
        );
        assert_eq!(
            result.audit_trace.steps[2].output["bonus_pool"]
                .as_str()
                .unwrap(),
            "66500"
        );
    }

    #[test]
    fn test_result_is_reproducible() {
        let params = MonthlyParams::default();
        let records = vec![
            create_record("emp_001", "208", "216", "1200"),
            create_record("emp_002", "190.5", "216", "950"),
        ];

        assert_eq!(
            calculate_styling_allocation(&params, &records),
            calculate_styling_allocation(&params, &records)
        );
    }
}
