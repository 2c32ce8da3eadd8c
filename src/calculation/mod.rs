//! Calculation logic for the Points Allocation Engine.
//!
//! This module contains the attendance aggregation, the styling proportional
//! allocator, the weaving admin-team bonus, equivalent output normalization
//! and production target derivation, plus the assembly operations that build
//! and maintain a styling month's salary records.

mod attendance;
mod equivalent_output;
mod month_records;
mod proportional;
mod safe_div;
mod targets;
mod weaving_bonus;

pub use attendance::{
    AttendanceFill, MAX_DAYS_IN_MONTH, MergedLog, auto_fill, clear_all, days_in_month,
    is_working_day, merge_daily_log, total_hours, working_days,
};
pub use equivalent_output::{
    BASE_MACHINE_WIDTH, BASE_WEFT_DENSITY, SPEED_COEF_H2, SPEED_COEF_H5,
    calculate_fleet_equivalent, calculate_machine_equivalent, checked_monthly_data_from_fleet,
    monthly_data_from_fleet, output_coefficient, speed_coefficient, width_coefficient,
};
pub use month_records::{
    SyncReport, auto_fill_month, clear_month, open_month, purge_employee, resync_employee,
    sync_month, update_daily_log,
};
pub use proportional::{
    WARN_TERMINATED_EXCLUDED, WARN_ZERO_REAL_BASE, WARN_ZERO_WORK_HOURS, calculate_month,
    calculate_styling_allocation,
};
pub use safe_div::safe_div;
pub use targets::{
    DEFAULT_EFFECTIVE_WIDTH, DEFAULT_PRODUCTIVE_DAYS, DEFAULT_SPEED_WEFT_PER_MIN,
    DEFAULT_TARGET_EFFICIENCY, daily_capacity, monthly_target,
};
pub use weaving_bonus::{
    FULL_ATTENDANCE_DAYS, QUALITY_EXCESS_STEP, TeamSplit, WARN_ZERO_TOTAL_COEF, attendance_rate,
    calculate_weaving_bonus, operation_bonus, quality_bonus_coef, split_bonus_pool,
};
