//! Route definitions for bookings.

use axum::routing::get;
use axum::Router;

use crate::handlers::bookings;
use crate::state::AppState;

/// Booking routes mounted at `/bookings`. Every endpoint requires a session.
///
/// ```text
/// GET    /        -> list_own
/// POST   /        -> create
/// GET    /{id}    -> get_one
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bookings::list_own).post(bookings::create))
        .route(
            "/{id}",
            get(bookings::get_one)
                .patch(bookings::update)
                .delete(bookings::delete),
        )
}
