//! Route definitions for property listings.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::properties;
use crate::state::AppState;

/// Property routes mounted at `/properties`.
///
/// ```text
/// GET    /                  -> list_all (public)
/// POST   /                  -> create
/// GET    /my                -> list_my
/// GET    /others            -> list_others
/// POST   /upload-image      -> upload_image (multipart)
/// GET    /{id}              -> get_one (public)
/// PATCH  /{id}              -> update (owner only)
/// DELETE /{id}              -> delete (owner only)
/// GET    /{id}/is-booked    -> is_booked (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(properties::list_all).post(properties::create))
        .route("/my", get(properties::list_my))
        .route("/others", get(properties::list_others))
        .route("/upload-image", post(properties::upload_image))
        .route(
            "/{id}",
            get(properties::get_one)
                .patch(properties::update)
                .delete(properties::delete),
        )
        .route("/{id}/is-booked", get(properties::is_booked))
}
