//! Booking price derivation.

use chrono::NaiveDate;

use crate::error::DomainError;

/// Compute the total charge for a stay.
///
/// Nights are whole calendar days between check-in and check-out; time of day
/// and timezone offsets play no part. The result is rounded half-away-from-
/// zero to 2 decimal places.
///
/// Fails with [`DomainError::InvalidDateRange`] when the range contains no
/// nights (check-out on or before check-in).
pub fn total_price(
    rate_per_night: f64,
    check_in: NaiveDate,
    check_out: NaiveDate,
) -> Result<f64, DomainError> {
    let nights = (check_out - check_in).num_days();
    if nights <= 0 {
        return Err(DomainError::InvalidDateRange(
            "Check-out date must be after check-in date.".to_string(),
        ));
    }
    Ok(round2(rate_per_night * nights as f64))
}

/// Round to 2 decimal places, half away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
