//! Core data models for the Points Allocation Engine.
//!
//! All models are value objects. Relationships between them are by stable
//! string identifier (`employee_id`, `machine_id`), resolved by the caller
//! before the engine is invoked.

mod calculation_result;
mod employee;
mod month_key;
mod monthly;
mod salary_record;
mod weaving;

pub use calculation_result::{
    AllocatedRecord, AuditStep, AuditTrace, AuditWarning, CalculationResult,
};
pub use employee::{DEFAULT_EXPECTED_DAILY_HOURS, Employee, EmployeeStatus, Section};
pub use month_key::MonthKey;
pub use monthly::{MonthlyData, MonthlyParams, WEIGHT_TOTAL};
pub use salary_record::{DailyLogs, SalaryRecord};
pub use weaving::{
    FleetEquivalent, MachineEquivalentResult, MachineProductionData, OperationRateScale,
    SpeedType, WeavingCalculationResult, WeavingConfig, WeavingMachine, WeavingMonthlyData,
};
