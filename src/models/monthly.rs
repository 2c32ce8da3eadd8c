//! Monthly styling parameters and month data.
//!
//! [`MonthlyParams`] sizes the styling pool and holds the blend weights used
//! by the proportional allocator. [`MonthlyData`] is the full month snapshot
//! the persistence layer stores under its `YYYY-MM` key.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{MonthKey, SalaryRecord};

/// The total both blend weights must add up to.
pub const WEIGHT_TOTAL: u8 = 100;

/// Pool parameters for one styling month.
///
/// `weight_time + weight_base == 100` always holds: the weights are only
/// reachable through setters that recompute the partner weight, and
/// deserialization rejects inconsistent pairs.
///
/// # Example
///
/// ```
/// use points_engine::models::MonthlyParams;
///
/// let mut params = MonthlyParams::default();
/// params.set_weight_time(70).unwrap();
/// assert_eq!(params.weight_base(), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MonthlyParamsInput")]
pub struct MonthlyParams {
    /// Square-meter yield put into stock for the month.
    pub area: Decimal,
    /// Points per unit of area.
    pub unit_price: Decimal,
    /// Fixed attendance pack added to the pool.
    pub attendance_pack: Decimal,
    /// Fixed KPI score added to the pool.
    pub kpi_score: Decimal,
    weight_time: u8,
    weight_base: u8,
}

/// Unvalidated wire form of [`MonthlyParams`].
#[derive(Debug, Deserialize)]
struct MonthlyParamsInput {
    area: Decimal,
    unit_price: Decimal,
    attendance_pack: Decimal,
    kpi_score: Decimal,
    weight_time: u32,
    weight_base: u32,
}

impl TryFrom<MonthlyParamsInput> for MonthlyParams {
    type Error = EngineError;

    fn try_from(input: MonthlyParamsInput) -> Result<Self, Self::Error> {
        let params = MonthlyParams::new(
            input.area,
            input.unit_price,
            input.attendance_pack,
            input.kpi_score,
            input.weight_time,
        )?;
        if u32::from(params.weight_base) != input.weight_base {
            return Err(EngineError::InvalidWeight {
                field: "weight_base".to_string(),
                value: input.weight_base,
            });
        }
        Ok(params)
    }
}

fn checked_weight(field: &str, value: u32) -> EngineResult<u8> {
    u8::try_from(value)
        .ok()
        .filter(|weight| *weight <= WEIGHT_TOTAL)
        .ok_or_else(|| EngineError::InvalidWeight {
            field: field.to_string(),
            value,
        })
}

impl MonthlyParams {
    /// Creates parameters with the given time weight; the base weight is
    /// derived as `100 - weight_time`.
    pub fn new(
        area: Decimal,
        unit_price: Decimal,
        attendance_pack: Decimal,
        kpi_score: Decimal,
        weight_time: u32,
    ) -> EngineResult<Self> {
        let weight_time = checked_weight("weight_time", weight_time)?;
        Ok(Self {
            area,
            unit_price,
            attendance_pack,
            kpi_score,
            weight_time,
            weight_base: WEIGHT_TOTAL - weight_time,
        })
    }

    /// Weight (0..=100) of the attendance share in the bonus blend.
    pub fn weight_time(&self) -> u8 {
        self.weight_time
    }

    /// Weight (0..=100) of the base-score share in the bonus blend.
    pub fn weight_base(&self) -> u8 {
        self.weight_base
    }

    /// Sets the time weight and recomputes the base weight.
    pub fn set_weight_time(&mut self, value: u32) -> EngineResult<()> {
        self.weight_time = checked_weight("weight_time", value)?;
        self.weight_base = WEIGHT_TOTAL - self.weight_time;
        Ok(())
    }

    /// Sets the base weight and recomputes the time weight.
    pub fn set_weight_base(&mut self, value: u32) -> EngineResult<()> {
        self.weight_base = checked_weight("weight_base", value)?;
        self.weight_time = WEIGHT_TOTAL - self.weight_base;
        Ok(())
    }

    /// `area * unit_price + attendance_pack + kpi_score`, unclamped.
    pub fn total_pool(&self) -> Decimal {
        self.area * self.unit_price + self.attendance_pack + self.kpi_score
    }
}

impl Default for MonthlyParams {
    fn default() -> Self {
        Self {
            area: Decimal::from(18000),
            unit_price: Decimal::new(25, 1),
            attendance_pack: Decimal::from(20000),
            kpi_score: Decimal::from(2500),
            weight_time: 50,
            weight_base: 50,
        }
    }
}

/// A styling month: its key, pool parameters and salary records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyData {
    /// The month this data belongs to, serialized as `YYYY-MM`.
    pub key: MonthKey,
    /// Pool parameters.
    pub params: MonthlyParams,
    /// One record per employee.
    pub records: Vec<SalaryRecord>,
}

impl MonthlyData {
    /// Finds the record for an employee.
    pub fn record(&self, employee_id: &str) -> Option<&SalaryRecord> {
        self.records.iter().find(|r| r.employee_id == employee_id)
    }

    /// Finds the record for an employee, mutably.
    pub fn record_mut(&mut self, employee_id: &str) -> Option<&mut SalaryRecord> {
        self.records.iter_mut().find(|r| r.employee_id == employee_id)
    }
}
