//! Production target derivation.
//!
//! The per-machine monthly target in the weaving policy comes from the
//! theoretical capacity of a reference loom running around the clock,
//! discounted by a target efficiency.

use rust_decimal::Decimal;

use super::safe_div::safe_div;

/// Reference loom speed (picks/min).
pub const DEFAULT_SPEED_WEFT_PER_MIN: Decimal = Decimal::from_parts(42, 0, 0, false, 0);

/// Effective woven width of the reference loom (m).
pub const DEFAULT_EFFECTIVE_WIDTH: Decimal = Decimal::from_parts(77, 0, 0, false, 1);

/// Target efficiency applied to theoretical capacity.
pub const DEFAULT_TARGET_EFFICIENCY: Decimal = Decimal::from_parts(72, 0, 0, false, 2);

/// Productive days per month.
pub const DEFAULT_PRODUCTIVE_DAYS: Decimal = Decimal::from_parts(25, 0, 0, false, 0);

const MINUTES_PER_DAY: Decimal = Decimal::from_parts(1440, 0, 0, false, 0);
const CM_PER_M: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Square meters one loom weaves in a day at 100% efficiency.
///
/// `speed / base_weft_density` gives cm of fabric per minute; 0 when the
/// density is not positive.
///
/// # Example
///
/// ```
/// use points_engine::calculation::{daily_capacity, DEFAULT_EFFECTIVE_WIDTH, DEFAULT_SPEED_WEFT_PER_MIN};
/// use points_engine::calculation::BASE_WEFT_DENSITY;
/// use rust_decimal::Decimal;
///
/// let capacity = daily_capacity(DEFAULT_SPEED_WEFT_PER_MIN, DEFAULT_EFFECTIVE_WIDTH, BASE_WEFT_DENSITY);
/// assert_eq!(capacity.round(), Decimal::from(358));
/// ```
pub fn daily_capacity(
    speed_weft_per_min: Decimal,
    effective_width: Decimal,
    base_weft_density: Decimal,
) -> Decimal {
    let cm_per_min = safe_div(speed_weft_per_min, base_weft_density, Decimal::ZERO);
    cm_per_min * MINUTES_PER_DAY / CM_PER_M * effective_width
}

/// `daily_capacity x target_efficiency x productive_days`.
pub fn monthly_target(
    daily_capacity: Decimal,
    target_efficiency: Decimal,
    productive_days: Decimal,
) -> Decimal {
    daily_capacity * target_efficiency * productive_days
}
