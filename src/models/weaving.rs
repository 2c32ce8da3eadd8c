//! Weaving section models.
//!
//! Configuration, monthly production figures and results for the weaving
//! admin-team bonus, plus the per-machine records used to normalize raw
//! output into equivalent output.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::AuditTrace;

/// How operation rates and their benchmark are expressed.
///
/// The compensation scheme quotes rates as integer percentages (`75` means
/// 75%). Some data sources deliver fractions (`0.75`) instead; those must be
/// flagged with [`OperationRateScale::Fraction`] so the excess is scaled by
/// 100 before the per-percent unit is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationRateScale {
    /// Rates are whole percentages, e.g. `73`.
    #[default]
    Percent,
    /// Rates are fractions of one, e.g. `0.73`.
    Fraction,
}

/// Benchmarks and coefficients for the weaving bonus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeavingConfig {
    /// Net formation rate benchmark, in percent.
    pub net_formation_benchmark: Decimal,
    /// Operation rate benchmark, in percent.
    pub operation_rate_benchmark: Decimal,
    /// Target equivalent output per machine per month (m²).
    pub target_equivalent_output: Decimal,
    /// Planned number of operators.
    pub operator_quota: u32,
    /// Average target bonus per admin team member (points).
    pub avg_target_bonus: Decimal,
    /// Number of people in the admin team, leader included.
    pub admin_team_size: u32,
    /// Points paid per percentage point of operation rate above benchmark.
    pub operation_rate_bonus_unit: Decimal,
    /// Allocation coefficient of the team leader.
    pub leader_coef: Decimal,
    /// Allocation coefficient of each team member.
    pub member_coef: Decimal,
    /// Leader base salary at full attendance (points).
    pub leader_base_salary: Decimal,
    /// Member base salary at full attendance (points).
    pub member_base_salary: Decimal,
    /// Unit convention of the operation rate inputs.
    #[serde(default)]
    pub operation_rate_scale: OperationRateScale,
}

impl Default for WeavingConfig {
    fn default() -> Self {
        Self {
            net_formation_benchmark: Decimal::from(68),
            operation_rate_benchmark: Decimal::from(72),
            target_equivalent_output: Decimal::from(6450),
            operator_quota: 24,
            avg_target_bonus: Decimal::from(4000),
            admin_team_size: 3,
            operation_rate_bonus_unit: Decimal::from(500),
            leader_coef: Decimal::new(13, 1),
            member_coef: Decimal::ONE,
            leader_base_salary: Decimal::from(3500),
            member_base_salary: Decimal::from(2500),
            operation_rate_scale: OperationRateScale::Percent,
        }
    }
}

impl WeavingConfig {
    /// Checks the configuration invariants.
    ///
    /// # Example
    ///
    /// ```
    /// use points_engine::models::WeavingConfig;
    ///
    /// let mut config = WeavingConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.admin_team_size = 0;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.admin_team_size < 1 {
            return Err(EngineError::InvalidConfig {
                field: "admin_team_size".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        for (field, value) in [
            ("leader_coef", self.leader_coef),
            ("member_coef", self.member_coef),
        ] {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: format!("must not be negative, got {}", value),
                });
            }
        }
        Ok(())
    }
}

/// Actual weaving production figures for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeavingMonthlyData {
    /// Net formation rate, in percent.
    pub net_formation_rate: Decimal,
    /// Equivalent output of the whole fleet (m²).
    pub equivalent_output: Decimal,
    /// Number of machines that ran during the month.
    pub active_machines: u32,
    /// Number of operators actually staffed.
    pub actual_operators: u32,
    /// Operation rate, in percent.
    pub operation_rate: Decimal,
    /// Days attended by the admin team.
    pub attendance_days: Decimal,
}

impl WeavingMonthlyData {
    /// Rejects negative production figures.
    pub fn validate(&self) -> EngineResult<()> {
        for (field, value) in [
            ("net_formation_rate", self.net_formation_rate),
            ("equivalent_output", self.equivalent_output),
            ("operation_rate", self.operation_rate),
            ("attendance_days", self.attendance_days),
        ] {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidProductionData {
                    field: field.to_string(),
                    message: format!("must not be negative, got {}", value),
                });
            }
        }
        Ok(())
    }
}

/// The weaving admin-team bonus breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeavingCalculationResult {
    /// Net formation quality bonus coefficient.
    pub quality_bonus_coef: Decimal,
    /// Quality bonus for the whole team.
    pub quality_bonus_total: Decimal,
    /// Operation rate bonus for the whole team.
    pub operation_bonus_total: Decimal,
    /// Quality plus operation bonus.
    pub total_bonus_pool: Decimal,
    /// Sum of the allocation coefficients across the team.
    pub total_coef: Decimal,
    /// Bonus paid to the leader.
    pub leader_bonus: Decimal,
    /// Bonus paid to each member.
    pub member_bonus: Decimal,
    /// Leader base pay scaled by attendance, plus bonus.
    pub leader_total_wage: Decimal,
    /// Member base pay scaled by attendance, plus bonus.
    pub member_total_wage: Decimal,
    /// Record of every calculation step.
    pub audit_trace: AuditTrace,
}

/// Loom speed class.
///
/// Unknown classes deserialize to [`SpeedType::Unknown`] and are treated as
/// the reference speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeedType {
    /// High-speed loom (41 picks/min), the reference class.
    #[default]
    H2,
    /// Low-speed loom.
    H5,
    /// Any class without a configured coefficient.
    #[serde(other)]
    Unknown,
}

/// Raw monthly output of one machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineProductionData {
    /// Machine identifier (H1..H11).
    pub machine_id: String,
    /// Actual output (m²).
    pub actual_output: Decimal,
    /// Weft density of the product woven (picks/cm).
    pub weft_density: Decimal,
    /// Machine width (m).
    pub machine_width: Decimal,
    /// Speed class of the machine.
    pub speed_type: SpeedType,
}

/// Equivalent output of one machine with its coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineEquivalentResult {
    /// Machine identifier.
    pub machine_id: String,
    /// Actual output (m²).
    pub actual_output: Decimal,
    /// weft density / reference density.
    pub output_coef: Decimal,
    /// reference width / machine width.
    pub width_coef: Decimal,
    /// Speed class coefficient.
    pub speed_coef: Decimal,
    /// actual output x output coef x width coef x speed coef.
    pub equivalent_output: Decimal,
}

/// Equivalent output rolled up across the fleet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetEquivalent {
    /// Sum of every machine's equivalent output.
    pub total_equivalent: Decimal,
    /// Per-machine breakdown, in input order.
    pub machine_results: Vec<MachineEquivalentResult>,
}

/// A loom in the weaving fleet registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeavingMachine {
    /// Machine identifier (H1..H11).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Speed class.
    pub speed_type: SpeedType,
    /// Machine width (m).
    pub width: Decimal,
    /// Target monthly output (m²).
    pub target_output: Decimal,
    /// Whether the machine is in service.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}
