//! Date-range predicates for booking conflict detection.
//!
//! A booking occupies the half-open interval `[check_in, check_out)`: the
//! check-out day is not a booked night, so a range ending exactly where
//! another begins does not conflict with it.
//!
//! Three rules gate every create/update, in order:
//!
//! 1. the user must hold no other booking overlapping the candidate range;
//! 2. the user must hold no other booking in the Monday-Sunday week(s) the
//!    candidate touches (the week guard);
//! 3. the property must have no other booking overlapping the candidate
//!    range.
//!
//! These checks are advisory: the database's exclusion constraint is the
//! authoritative guard against racing inserts. They exist to produce precise
//! error messages before the write is attempted.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::{ConflictScope, DomainError};

/// A half-open calendar date range `[check_in, check_out)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting empty or inverted ones.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, DomainError> {
        if check_out <= check_in {
            return Err(DomainError::InvalidDateRange(
                "Check-out date must be after check-in date.".to_string(),
            ));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Number of booked nights.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Half-open interval intersection. Adjacent ranges do not overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        !(other.check_out <= self.check_in || other.check_in >= self.check_out)
    }

    /// Expand to the Monday-Sunday calendar week(s) this range touches.
    ///
    /// The window runs from the Monday on or before `check_in` to the Sunday
    /// of `check_out`'s week, and is compared with the same half-open
    /// predicate as a plain range.
    pub fn week_window(&self) -> DateRange {
        let start = monday_of(self.check_in);
        let end = monday_of(self.check_out) + Days::new(6);
        DateRange {
            check_in: start,
            check_out: end,
        }
    }
}

/// Parse a wire-format (`YYYY-MM-DD`) calendar date.
///
/// Format is checked at the validation boundary; this is where calendar
/// validity (month 13, Feb 30) is finally enforced.
pub fn parse_date(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidDateRange(format!("Invalid calendar date: {value}")))
}

/// Validate a requested stay against the current date.
///
/// A check-in before `today` (date-only comparison, local midnight) is
/// rejected first, then an empty or inverted range.
pub fn validate_stay(
    check_in: NaiveDate,
    check_out: NaiveDate,
    today: NaiveDate,
) -> Result<DateRange, DomainError> {
    if check_in < today {
        return Err(DomainError::InvalidDateRange(
            "Check-in date cannot be in the past.".to_string(),
        ));
    }
    DateRange::new(check_in, check_out)
}

/// The Monday on or before the given date.
fn monday_of(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

/// Verify a candidate range against the caller's and the property's existing
/// bookings.
///
/// `user_ranges` are the caller's other bookings across all properties;
/// `property_ranges` are other bookings on the target property. On update the
/// caller excludes the booking being edited from both collections.
///
/// Checks run in order (user overlap, week guard, property overlap) and the
/// first failure wins, so the reported scope identifies the tightest violated
/// constraint.
pub fn verify_no_conflicts(
    candidate: &DateRange,
    user_ranges: &[DateRange],
    property_ranges: &[DateRange],
) -> Result<(), DomainError> {
    if user_ranges.iter().any(|r| candidate.overlaps(r)) {
        return Err(DomainError::DateConflict(ConflictScope::UserOverlap));
    }

    let window = candidate.week_window();
    if user_ranges.iter().any(|r| window.overlaps(r)) {
        return Err(DomainError::DateConflict(ConflictScope::WeeklyLimit));
    }

    if property_ranges.iter().any(|r| candidate.overlaps(r)) {
        return Err(DomainError::DateConflict(ConflictScope::PropertyOverlap));
    }

    Ok(())
}
