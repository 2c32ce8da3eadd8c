//! Calculation result models for the Points Allocation Engine.
//!
//! This module contains the styling [`CalculationResult`] and the audit
//! trace types shared by both allocators. Results are read models: they are
//! recomputed on every call and never treated as the authoritative record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a formula
/// application.
///
/// # Example
///
/// ```
/// use points_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "pool_sizing".to_string(),
///     rule_name: "Pool Sizing".to_string(),
///     formula: "area * unit_price + attendance_pack + kpi_score".to_string(),
///     input: serde_json::json!({ "area": "18000" }),
///     output: serde_json::json!({ "total_pool": "67500" }),
///     reasoning: "Sized the pool".to_string(),
/// };
/// assert_eq!(step.rule_id, "pool_sizing");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The formula that was evaluated.
    pub formula: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag degenerate inputs that the engine resolved with a guard
/// but that a reviewer should know about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// Contains no timestamps or generated ids, so the same input always
/// produces the same trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Appends a step, numbering it after the existing steps.
    pub fn push_step(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        formula: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        let step_number = self.steps.len() as u32 + 1;
        self.steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            formula: formula.to_string(),
            input,
            output,
            reasoning,
        });
    }

    /// Appends a warning.
    pub fn warn(&mut self, code: &str, message: String, severity: &str) {
        self.warnings.push(AuditWarning {
            code: code.to_string(),
            message,
            severity: severity.to_string(),
        });
    }

    /// Returns true if a warning with the given code was raised.
    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

/// One employee's share of the styling pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocatedRecord {
    /// The employee this share belongs to.
    pub employee_id: String,
    /// Employee name as held on the salary record.
    pub employee_name: String,
    /// Hours worked.
    pub work_hours: Decimal,
    /// Attendance baseline.
    pub expected_hours: Decimal,
    /// Base score snapshot used.
    pub base_score_snapshot: Decimal,
    /// work hours / expected hours, 0 when no hours were expected.
    pub attendance_ratio: Decimal,
    /// Share of all hours worked.
    pub work_ratio: Decimal,
    /// Share of the summed real base.
    pub base_ratio: Decimal,
    /// Blend of work and base ratios by the month's weights.
    pub composite_weight: Decimal,
    /// base score snapshot x attendance ratio.
    pub real_base: Decimal,
    /// bonus pool x composite weight.
    pub bonus: Decimal,
    /// real base + bonus.
    pub final_score: Decimal,
}

/// The complete result of a styling allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Per-employee shares, in input order, terminated records excluded.
    pub records: Vec<AllocatedRecord>,
    /// area x unit price + attendance pack + KPI score.
    pub total_pool: Decimal,
    /// Sum of real base across the included records.
    pub total_base_payout: Decimal,
    /// Remainder of the pool after the base payout, never negative.
    pub bonus_pool: Decimal,
    /// Sum of work hours across the included records.
    pub sum_work_hours: Decimal,
    /// Sum of expected hours across the included records.
    pub sum_expected_hours: Decimal,
    /// Sum of base score snapshots across the included records.
    pub sum_standard_base: Decimal,
    /// Record of every calculation step.
    pub audit_trace: AuditTrace,
}

impl CalculationResult {
    /// Sum of every included record's final score.
    pub fn total_final_score(&self) -> Decimal {
        self.records.iter().map(|r| r.final_score).sum()
    }
}
