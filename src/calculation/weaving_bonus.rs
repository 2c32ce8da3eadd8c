//! Weaving section admin-team bonus.
//!
//! The team's bonus pool is the sum of a net-formation quality bonus and an
//! operation-rate bonus, both driven by plant-wide figures. The pool is then
//! split between one leader and the remaining members by fixed allocation
//! coefficients, and each share is added to base pay scaled by attendance.

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::models::{
    AuditTrace, OperationRateScale, WeavingCalculationResult, WeavingConfig, WeavingMonthlyData,
};

use super::safe_div::safe_div;

const PERCENT: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Every full 30 percentage points of net formation above benchmark adds
/// 1.0 to the quality coefficient.
pub const QUALITY_EXCESS_STEP: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Attendance days that count as full attendance for base pay.
pub const FULL_ATTENDANCE_DAYS: Decimal = Decimal::from_parts(26, 0, 0, false, 0);

/// Warning code raised when the allocation coefficients sum to zero or less.
pub const WARN_ZERO_TOTAL_COEF: &str = "ZERO_TOTAL_COEF";

/// The pool split between leader and members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamSplit {
    /// leader coef + member coef x member count.
    pub total_coef: Decimal,
    /// The leader's share.
    pub leader_bonus: Decimal,
    /// Each member's share.
    pub member_bonus: Decimal,
}

/// Computes the net-formation quality bonus coefficient.
///
/// ```text
/// excess = (net_formation_rate - benchmark) / 100
/// coef   = (excess * 100 / 30)
///        * equivalent_output / (target_equivalent_output * active_machines)
///        * operator_quota / actual_operators
/// ```
///
/// The coefficient is 0 when the rate does not exceed the benchmark, when the
/// fleet target is not positive, or when no operators were staffed. It is
/// never negative.
pub fn quality_bonus_coef(data: &WeavingMonthlyData, config: &WeavingConfig) -> Decimal {
    let excess = (data.net_formation_rate - config.net_formation_benchmark) / PERCENT;
    if excess <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let target_total = config.target_equivalent_output * Decimal::from(data.active_machines);
    let actual_operators = Decimal::from(data.actual_operators);
    if target_total <= Decimal::ZERO || actual_operators <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let output_ratio = safe_div(data.equivalent_output, target_total, Decimal::ZERO);
    let operator_ratio = safe_div(
        Decimal::from(config.operator_quota),
        actual_operators,
        Decimal::ZERO,
    );

    let coef = (excess * PERCENT / QUALITY_EXCESS_STEP) * output_ratio * operator_ratio;
    coef.max(Decimal::ZERO)
}

/// Computes the operation-rate bonus for the whole team.
///
/// Under [`OperationRateScale::Percent`] every percentage point above the
/// benchmark pays `bonus_unit`. Under [`OperationRateScale::Fraction`] the
/// rates are fractions and the excess is first converted to percentage
/// points.
///
/// # Example
///
/// ```
/// use points_engine::calculation::operation_bonus;
/// use points_engine::models::OperationRateScale;
/// use rust_decimal::Decimal;
///
/// let bonus = operation_bonus(
///     Decimal::from(73),
///     Decimal::from(72),
///     Decimal::from(500),
///     OperationRateScale::Percent,
/// );
/// assert_eq!(bonus, Decimal::from(500));
/// ```
pub fn operation_bonus(
    operation_rate: Decimal,
    benchmark: Decimal,
    bonus_unit: Decimal,
    scale: OperationRateScale,
) -> Decimal {
    let excess = operation_rate - benchmark;
    if excess <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let excess_points = match scale {
        OperationRateScale::Percent => excess,
        OperationRateScale::Fraction => excess * PERCENT,
    };
    excess_points * bonus_unit
}

/// Splits the pool between one leader and `admin_team_size - 1` members.
///
/// If the coefficients sum to zero or less the pool is divided by 1 instead.
pub fn split_bonus_pool(total_bonus_pool: Decimal, config: &WeavingConfig) -> TeamSplit {
    let member_count = Decimal::from(config.admin_team_size.saturating_sub(1));
    let total_coef = config.leader_coef + config.member_coef * member_count;
    let per_coef = safe_div(total_bonus_pool, total_coef, total_bonus_pool);

    TeamSplit {
        total_coef,
        leader_bonus: per_coef * config.leader_coef,
        member_bonus: per_coef * config.member_coef,
    }
}

/// `min(attendance_days / 26, 1)`.
pub fn attendance_rate(attendance_days: Decimal) -> Decimal {
    (attendance_days / FULL_ATTENDANCE_DAYS).min(Decimal::ONE)
}

/// Computes the weaving admin-team bonus and wages for a month.
///
/// # Example
///
/// ```
/// use points_engine::calculation::calculate_weaving_bonus;
/// use points_engine::models::{WeavingConfig, WeavingMonthlyData};
/// use rust_decimal::Decimal;
///
/// let data = WeavingMonthlyData {
///     net_formation_rate: Decimal::from(68),
///     equivalent_output: Decimal::from(70950),
///     active_machines: 11,
///     actual_operators: 24,
///     operation_rate: Decimal::from(73),
///     attendance_days: Decimal::from(26),
/// };
///
/// let result = calculate_weaving_bonus(&data, &WeavingConfig::default());
/// assert_eq!(result.quality_bonus_total, Decimal::ZERO);
/// assert_eq!(result.operation_bonus_total, Decimal::from(500));
/// ```
pub fn calculate_weaving_bonus(
    data: &WeavingMonthlyData,
    config: &WeavingConfig,
) -> WeavingCalculationResult {
    let mut audit_trace = AuditTrace::default();

    // Step 1: quality bonus
    let quality_coef = quality_bonus_coef(data, config);
    let quality_bonus_total =
        quality_coef * config.avg_target_bonus * Decimal::from(config.admin_team_size);
    audit_trace.push_step(
        "quality_bonus",
        "Net Formation Quality Bonus",
        "coef = ((rate - benchmark) / 100 * 100 / 30) * output / (target * machines) * quota / operators; \
         total = coef * avg_target_bonus * admin_team_size",
        serde_json::json!({
            "net_formation_rate": data.net_formation_rate.normalize().to_string(),
            "net_formation_benchmark": config.net_formation_benchmark.normalize().to_string(),
            "equivalent_output": data.equivalent_output.normalize().to_string(),
            "target_equivalent_output": config.target_equivalent_output.normalize().to_string(),
            "active_machines": data.active_machines,
            "operator_quota": config.operator_quota,
            "actual_operators": data.actual_operators
        }),
        serde_json::json!({
            "quality_bonus_coef": quality_coef.normalize().to_string(),
            "quality_bonus_total": quality_bonus_total.normalize().to_string()
        }),
        if quality_coef.is_zero() {
            "Net formation at or below benchmark, or no fleet target/operators: no quality bonus"
                .to_string()
        } else {
            format!(
                "Quality coefficient {} earns {} points",
                quality_coef.normalize(),
                quality_bonus_total.normalize()
            )
        },
    );

    // Step 2: operation bonus
    let operation_bonus_total = operation_bonus(
        data.operation_rate,
        config.operation_rate_benchmark,
        config.operation_rate_bonus_unit,
        config.operation_rate_scale,
    );
    audit_trace.push_step(
        "operation_bonus",
        "Operation Rate Bonus",
        match config.operation_rate_scale {
            OperationRateScale::Percent => "max(0, rate - benchmark) * unit",
            OperationRateScale::Fraction => "max(0, rate - benchmark) * 100 * unit",
        },
        serde_json::json!({
            "operation_rate": data.operation_rate.normalize().to_string(),
            "operation_rate_benchmark": config.operation_rate_benchmark.normalize().to_string(),
            "operation_rate_bonus_unit": config.operation_rate_bonus_unit.normalize().to_string(),
            "scale": config.operation_rate_scale
        }),
        serde_json::json!({
            "operation_bonus_total": operation_bonus_total.normalize().to_string()
        }),
        format!(
            "Operation rate bonus of {} points",
            operation_bonus_total.normalize()
        ),
    );

    // Step 3: pool and split
    let total_bonus_pool = quality_bonus_total + operation_bonus_total;
    let split = split_bonus_pool(total_bonus_pool, config);
    if split.total_coef <= Decimal::ZERO {
        audit_trace.warn(
            WARN_ZERO_TOTAL_COEF,
            "Allocation coefficients sum to zero; pool divided by 1".to_string(),
            "high",
        );
    }
    audit_trace.push_step(
        "team_split",
        "Team Bonus Split",
        "share = total_bonus_pool / (leader_coef + member_coef * (team_size - 1)) * coef",
        serde_json::json!({
            "total_bonus_pool": total_bonus_pool.normalize().to_string(),
            "leader_coef": config.leader_coef.normalize().to_string(),
            "member_coef": config.member_coef.normalize().to_string(),
            "admin_team_size": config.admin_team_size
        }),
        serde_json::json!({
            "total_coef": split.total_coef.normalize().to_string(),
            "leader_bonus": split.leader_bonus.normalize().to_string(),
            "member_bonus": split.member_bonus.normalize().to_string()
        }),
        format!(
            "Pool of {} points split over total coefficient {}",
            total_bonus_pool.normalize(),
            split.total_coef.normalize()
        ),
    );

    // Step 4: wages
    let rate = attendance_rate(data.attendance_days);
    let leader_total_wage = config.leader_base_salary * rate + split.leader_bonus;
    let member_total_wage = config.member_base_salary * rate + split.member_bonus;
    audit_trace.push_step(
        "wages",
        "Total Wages",
        "base_salary * min(attendance_days / 26, 1) + bonus",
        serde_json::json!({
            "attendance_days": data.attendance_days.normalize().to_string(),
            "leader_base_salary": config.leader_base_salary.normalize().to_string(),
            "member_base_salary": config.member_base_salary.normalize().to_string()
        }),
        serde_json::json!({
            "attendance_rate": rate.normalize().to_string(),
            "leader_total_wage": leader_total_wage.normalize().to_string(),
            "member_total_wage": member_total_wage.normalize().to_string()
        }),
        format!("Base pay scaled by attendance rate {}", rate.normalize()),
    );

    debug!(
        quality_bonus_coef = %quality_coef,
        operation_bonus_total = %operation_bonus_total,
        "Weaving bonus components"
    );
    info!(
        total_bonus_pool = %total_bonus_pool,
        leader_bonus = %split.leader_bonus,
        member_bonus = %split.member_bonus,
        "Weaving bonus completed"
    );

    WeavingCalculationResult {
        quality_bonus_coef: quality_coef,
        quality_bonus_total,
        operation_bonus_total,
        total_bonus_pool,
        total_coef: split.total_coef,
        leader_bonus: split.leader_bonus,
        member_bonus: split.member_bonus,
        leader_total_wage,
        member_total_wage,
        audit_trace,
    }
}
