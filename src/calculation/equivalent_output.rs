//! Equivalent output normalization.
//!
//! Raw loom output is not comparable across products and machines: a denser
//! weave, a narrower loom or a slower speed class all produce fewer square
//! meters for the same effort. Each machine's output is scaled to the
//! reference product (13 picks/cm on an 8.5 m high-speed loom) before it is
//! compared against the fleet target.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    FleetEquivalent, MachineEquivalentResult, MachineProductionData, SpeedType,
    WeavingMonthlyData,
};

use super::safe_div::safe_div;

/// Reference weft density (picks/cm).
pub const BASE_WEFT_DENSITY: Decimal = Decimal::from_parts(13, 0, 0, false, 0);

/// Reference machine width (m).
pub const BASE_MACHINE_WIDTH: Decimal = Decimal::from_parts(85, 0, 0, false, 1);

/// Speed coefficient of the high-speed class.
pub const SPEED_COEF_H2: Decimal = Decimal::ONE;

/// Speed coefficient of the low-speed class.
pub const SPEED_COEF_H5: Decimal = Decimal::from_parts(56, 0, 0, false, 2);

/// `weft_density / 13`, or 0 when the density is not positive.
pub fn output_coefficient(weft_density: Decimal) -> Decimal {
    if weft_density <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    weft_density / BASE_WEFT_DENSITY
}

/// `8.5 / machine_width`, or 0 when the width is not positive.
pub fn width_coefficient(machine_width: Decimal) -> Decimal {
    safe_div(BASE_MACHINE_WIDTH, machine_width, Decimal::ZERO)
}

/// Speed class multiplier. Unknown classes count as the reference speed.
pub fn speed_coefficient(speed_type: SpeedType) -> Decimal {
    match speed_type {
        SpeedType::H2 => SPEED_COEF_H2,
        SpeedType::H5 => SPEED_COEF_H5,
        SpeedType::Unknown => SPEED_COEF_H2,
    }
}

/// Normalizes one machine's output.
///
/// # Example
///
/// ```
/// use points_engine::calculation::calculate_machine_equivalent;
/// use points_engine::models::{MachineProductionData, SpeedType};
/// use rust_decimal::Decimal;
///
/// let data = MachineProductionData {
///     machine_id: "H1".to_string(),
///     actual_output: Decimal::from(1000),
///     weft_density: Decimal::from(13),
///     machine_width: Decimal::new(85, 1),
///     speed_type: SpeedType::H2,
/// };
///
/// let result = calculate_machine_equivalent(&data);
/// assert_eq!(result.equivalent_output, Decimal::from(1000));
/// ```
pub fn calculate_machine_equivalent(data: &MachineProductionData) -> MachineEquivalentResult {
    let output_coef = output_coefficient(data.weft_density);
    let width_coef = width_coefficient(data.machine_width);
    let speed_coef = speed_coefficient(data.speed_type);
    let equivalent_output = data.actual_output * output_coef * width_coef * speed_coef;

    debug!(
        machine_id = %data.machine_id,
        equivalent_output = %equivalent_output,
        "Machine equivalent output"
    );

    MachineEquivalentResult {
        machine_id: data.machine_id.clone(),
        actual_output: data.actual_output,
        output_coef,
        width_coef,
        speed_coef,
        equivalent_output,
    }
}

/// Normalizes every machine and sums the results.
pub fn calculate_fleet_equivalent(machines: &[MachineProductionData]) -> FleetEquivalent {
    let machine_results: Vec<MachineEquivalentResult> =
        machines.iter().map(calculate_machine_equivalent).collect();
    let total_equivalent = machine_results.iter().map(|r| r.equivalent_output).sum();

    FleetEquivalent {
        total_equivalent,
        machine_results,
    }
}

/// Builds the weaving bonus inputs from per-machine production.
///
/// The equivalent output is the fleet total and every row counts as one
/// active machine.
pub fn monthly_data_from_fleet(
    machines: &[MachineProductionData],
    net_formation_rate: Decimal,
    actual_operators: u32,
    operation_rate: Decimal,
    attendance_days: Decimal,
) -> WeavingMonthlyData {
    let fleet = calculate_fleet_equivalent(machines);

    WeavingMonthlyData {
        net_formation_rate,
        equivalent_output: fleet.total_equivalent,
        active_machines: machines.len() as u32,
        actual_operators,
        operation_rate,
        attendance_days,
    }
}

/// Like [`monthly_data_from_fleet`], but rejects negative machine output and
/// negative plant-wide figures.
///
/// # Example
///
/// ```
/// use points_engine::calculation::checked_monthly_data_from_fleet;
/// use points_engine::error::EngineError;
/// use rust_decimal::Decimal;
///
/// let result = checked_monthly_data_from_fleet(
///     &[],
///     Decimal::from(-1),
///     24,
///     Decimal::from(75),
///     Decimal::from(26),
/// );
/// assert!(matches!(result, Err(EngineError::InvalidProductionData { .. })));
/// ```
pub fn checked_monthly_data_from_fleet(
    machines: &[MachineProductionData],
    net_formation_rate: Decimal,
    actual_operators: u32,
    operation_rate: Decimal,
    attendance_days: Decimal,
) -> EngineResult<WeavingMonthlyData> {
    if let Some(machine) = machines.iter().find(|m| m.actual_output < Decimal::ZERO) {
        return Err(EngineError::InvalidProductionData {
            field: format!("{}.actual_output", machine.machine_id),
            message: format!("must not be negative, got {}", machine.actual_output),
        });
    }

    let data = monthly_data_from_fleet(
        machines,
        net_formation_rate,
        actual_operators,
        operation_rate,
        attendance_days,
    );
    data.validate()?;
    Ok(data)
}
