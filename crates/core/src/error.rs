use std::fmt;

use crate::types::DbId;

/// Which overlap rule a booking request collided with.
///
/// The user-facing message identifies the failed constraint so the client can
/// show it verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictScope {
    /// The user already holds a booking overlapping the candidate range.
    UserOverlap,
    /// The user already holds a booking in the same Monday-Sunday week.
    WeeklyLimit,
    /// Another booking on the same property overlaps the candidate range.
    PropertyOverlap,
}

impl fmt::Display for ConflictScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConflictScope::UserOverlap => "You already have a booking that overlaps these dates.",
            ConflictScope::WeeklyLimit => "You already have a booking in the same week.",
            ConflictScope::PropertyOverlap => "These dates are already booked for this property.",
        };
        f.write_str(msg)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    InvalidDateRange(String),

    #[error("You cannot book your own property.")]
    SelfBookingForbidden,

    #[error("{0}")]
    DateConflict(ConflictScope),

    #[error("You already have a listing with the same name or image.")]
    DuplicateListing,

    #[error("{0}")]
    Upstream(String),
}
