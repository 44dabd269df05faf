//! Domain logic for the booking marketplace.
//!
//! Pure, I/O-free building blocks shared by the persistence and HTTP layers:
//!
//! - [`sanitize`] -- Unicode cleanup for inbound text and upload filenames.
//! - [`validate`] -- request payload shapes with field-level validation.
//! - [`pricing`] -- total price derivation from a nightly rate and date range.
//! - [`booking`] -- date-range overlap predicates and the week guard.
//! - [`error`] -- the domain error taxonomy.

pub mod booking;
pub mod error;
pub mod pricing;
pub mod sanitize;
pub mod types;
pub mod validate;
