//! Monetary constants. All amounts in cents (1 unit = 100 cents).

use crate::error::EstateError;

pub const CENTS_PER_UNIT: u64 = 100;

/// Largest estate accepted, in cents.
///
/// One trillion units. Stays exactly representable as an `f64` on the wire.
pub const MAX_ESTATE_CENTS: u64 = 1_000_000_000_000 * CENTS_PER_UNIT;

/// Percentage scale used for derived `share_percentage` values.
pub const PERCENT: f64 = 100.0;

/// Convert a major-unit amount (as carried on the wire) to cents.
///
/// Rounds to the nearest cent. Rejects NaN, infinities, non-positive values,
/// amounts that round to zero cents, and amounts above [`MAX_ESTATE_CENTS`].
///
/// # Examples
///
/// ```
/// use heir_core::constants::to_cents;
/// assert_eq!(to_cents(1_000_000.0).unwrap(), 100_000_000);
/// assert_eq!(to_cents(0.016).unwrap(), 2);
/// assert!(to_cents(-1.0).is_err());
/// ```
pub fn to_cents(value: f64) -> Result<u64, EstateError> {
    if !value.is_finite() {
        return Err(EstateError::NotFinite);
    }
    if value <= 0.0 {
        return Err(EstateError::NotPositive(value.to_string()));
    }
    let cents = (value * CENTS_PER_UNIT as f64).round();
    if cents > MAX_ESTATE_CENTS as f64 {
        return Err(EstateError::TooLarge(value.to_string()));
    }
    let cents = cents as u64;
    if cents == 0 {
        return Err(EstateError::ZeroValue);
    }
    Ok(cents)
}

/// Cents to major units (for display and the wire).
pub fn cents_to_units(cents: u64) -> f64 {
    cents as f64 / CENTS_PER_UNIT as f64
}

/// `part` as a percentage of `whole`, or 0 when `whole` is zero.
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 * PERCENT / whole as f64
}
