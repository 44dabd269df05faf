//! Handlers for the `/bookings` resource.
//!
//! Create and update run the full rule set: payload validation, past-date and
//! range checks, property lookup, self-booking rejection, then the three
//! overlap checks (user, week guard, property). The database's exclusion
//! constraint remains the authoritative overlap guard; its violation is
//! translated to the same date-conflict error the pre-checks produce.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Local;
use hyra_core::booking::{parse_date, validate_stay, verify_no_conflicts, DateRange};
use hyra_core::error::DomainError;
use hyra_core::pricing::total_price;
use hyra_core::types::DbId;
use hyra_core::validate::BookingCreateInput;
use hyra_db::models::booking::{Booking, BookingWithProperty, CreateBooking};
use hyra_db::repositories::{BookingRepo, PropertyRepo};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::OkResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of `GET /bookings`.
#[derive(Debug, Serialize)]
pub struct BookingsResponse {
    pub bookings: Vec<BookingWithProperty>,
}

/// Body of the single-booking endpoints.
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub booking: BookingWithProperty,
}

/// Body of `PATCH /bookings/{id}`. Both dates are required.
#[derive(Debug, Deserialize)]
pub struct UpdateBookingInput {
    pub check_in_date: Option<String>,
    pub check_out_date: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /bookings
///
/// The caller's bookings, each joined with its property, newest first.
pub async fn list_own(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<BookingsResponse>> {
    let bookings = BookingRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(BookingsResponse { bookings }))
}

/// GET /bookings/{id}
///
/// Fetch one booking, only if the caller owns it. A booking owned by someone
/// else reads as 404, not 403, so existence is not leaked.
pub async fn get_one(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<BookingResponse>> {
    let booking = BookingRepo::find_with_property_for_user(&state.pool, id, auth.user_id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "Booking",
            id,
        })?;
    Ok(Json(BookingResponse { booking }))
}

/// POST /bookings
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<BookingCreateInput>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    let property_id = Uuid::parse_str(&input.property_id)
        .map_err(|_| DomainError::Validation("Invalid UUID".to_string()))?;

    // 1. Candidate range: past-date check, then inversion check.
    let check_in = parse_date(&input.check_in_date)?;
    let check_out = parse_date(&input.check_out_date)?;
    let range = validate_stay(check_in, check_out, Local::now().date_naive())?;

    // 2. The property must exist and belong to someone else.
    let property = PropertyRepo::find_by_id(&state.pool, property_id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "Property",
            id: property_id,
        })?;
    if property.owner_id == auth.user_id {
        return Err(DomainError::SelfBookingForbidden.into());
    }

    // 3. Overlap checks: user range, week guard, property range.
    let user_bookings = BookingRepo::list_by_user(&state.pool, auth.user_id, None).await?;
    let property_bookings = BookingRepo::list_by_property(&state.pool, property_id, None).await?;
    verify_no_conflicts(
        &range,
        &booking_ranges(&user_bookings),
        &booking_ranges(&property_bookings),
    )?;

    // 4. Price and persist. A racing insert is stopped by the exclusion
    //    constraint and surfaces as the property-overlap conflict.
    let price = total_price(property.price_per_night, check_in, check_out)?;
    let created = BookingRepo::create(
        &state.pool,
        &CreateBooking {
            user_id: auth.user_id,
            property_id,
            check_in_date: check_in,
            check_out_date: check_out,
            total_price: price,
        },
    )
    .await?;

    tracing::info!(booking_id = %created.id, user_id = %auth.user_id, "Booking created");

    // 5. Return the booking joined with its property.
    let booking = BookingRepo::find_with_property(&state.pool, created.id)
        .await?
        .ok_or_else(|| AppError::Internal("Created booking vanished".to_string()))?;

    Ok((StatusCode::CREATED, Json(BookingResponse { booking })))
}

/// PATCH /bookings/{id}
///
/// Change a booking's dates. Re-runs the create-time rule set with the edited
/// booking excluded from its own overlap checks, and recomputes the price.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBookingInput>,
) -> AppResult<Json<BookingResponse>> {
    let (Some(check_in_raw), Some(check_out_raw)) = (input.check_in_date, input.check_out_date)
    else {
        return Err(AppError::BadRequest(
            "check_in_date and check_out_date are required.".to_string(),
        ));
    };

    // 1. Candidate range.
    let check_in = parse_date(&check_in_raw)?;
    let check_out = parse_date(&check_out_raw)?;
    let range = validate_stay(check_in, check_out, Local::now().date_naive())?;

    // 2. Ownership: a missing booking is 404, someone else's is 403.
    let booking = BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "Booking",
            id,
        })?;
    if booking.user_id != auth.user_id {
        return Err(DomainError::Forbidden(
            "You do not have permission to modify this booking.".to_string(),
        )
        .into());
    }

    // 3. The property still backs the price.
    let property = PropertyRepo::find_by_id(&state.pool, booking.property_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("Property missing for this booking.".to_string()))?;

    // 4. Overlap checks, excluding the booking being edited.
    let user_bookings = BookingRepo::list_by_user(&state.pool, auth.user_id, Some(id)).await?;
    let property_bookings =
        BookingRepo::list_by_property(&state.pool, booking.property_id, Some(id)).await?;
    verify_no_conflicts(
        &range,
        &booking_ranges(&user_bookings),
        &booking_ranges(&property_bookings),
    )?;

    // 5. Recompute and persist.
    let price = total_price(property.price_per_night, check_in, check_out)?;
    BookingRepo::update_dates(&state.pool, id, check_in, check_out, price)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "Booking",
            id,
        })?;

    let booking = BookingRepo::find_with_property(&state.pool, id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "Booking",
            id,
        })?;

    Ok(Json(BookingResponse { booking }))
}

/// DELETE /bookings/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<OkResponse>> {
    let booking = BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "Booking",
            id,
        })?;
    if booking.user_id != auth.user_id {
        return Err(DomainError::Forbidden(
            "You do not have permission to delete this booking.".to_string(),
        )
        .into());
    }

    BookingRepo::delete(&state.pool, id).await?;

    tracing::info!(booking_id = %id, user_id = %auth.user_id, "Booking deleted");

    Ok(Json(OkResponse::ok()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Project persisted bookings onto their date ranges.
fn booking_ranges(bookings: &[Booking]) -> Vec<DateRange> {
    bookings
        .iter()
        .map(|b| DateRange {
            check_in: b.check_in_date,
            check_out: b.check_out_date,
        })
        .collect()
}
