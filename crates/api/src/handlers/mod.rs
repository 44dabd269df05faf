//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod bookings;
pub mod properties;
