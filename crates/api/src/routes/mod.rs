//! Route definitions.

pub mod auth;
pub mod bookings;
pub mod health;
pub mod properties;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                   register (public)
/// /auth/login                      login (public)
/// /auth/me                         resolved identity or null (public)
/// /auth/logout                     clear session cookies (public)
///
/// /properties                      list all (public), create
/// /properties/my                   caller's listings
/// /properties/others               other users' available listings
/// /properties/upload-image         image upload (multipart)
/// /properties/{id}                 get (public), patch, delete (owner)
/// /properties/{id}/is-booked       booked status (public, ?from&to)
///
/// /bookings                        list own, create
/// /bookings/{id}                   get, patch, delete (booking owner)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/properties", properties::router())
        .nest("/bookings", bookings::router())
}
