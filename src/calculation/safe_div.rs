//! Guarded division shared by every allocator.

use rust_decimal::Decimal;

/// Divides `numerator` by `denominator`, returning `fallback` when the
/// denominator is zero or negative, or when the quotient does not fit in a
/// [`Decimal`].
///
/// Every ratio in the engine goes through this helper so that degenerate
/// inputs resolve the same way everywhere instead of panicking.
///
/// # Examples
///
/// ```
/// use points_engine::calculation::safe_div;
/// use rust_decimal::Decimal;
///
/// assert_eq!(safe_div(Decimal::from(220), Decimal::from(200), Decimal::ZERO), Decimal::new(11, 1));
/// assert_eq!(safe_div(Decimal::from(220), Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
/// ```
pub fn safe_div(numerator: Decimal, denominator: Decimal, fallback: Decimal) -> Decimal {
    if denominator <= Decimal::ZERO {
        return fallback;
    }
    numerator.checked_div(denominator).unwrap_or(fallback)
}
