//! Handlers for the `/properties` resource.
//!
//! Listing CRUD with ownership enforcement, duplicate-listing detection,
//! booked-status reporting, and image upload. Image cleanup on delete and on
//! rejected creates is best-effort: the record operation is never failed by a
//! storage hiccup.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Local;
use hyra_core::booking::parse_date;
use hyra_core::error::DomainError;
use hyra_core::sanitize::safe_filename;
use hyra_core::types::DbId;
use hyra_core::validate::{PropertyCreateInput, PropertyPatchInput, DATE_FORMAT};
use hyra_db::models::property::{CreateProperty, Property, UpdateProperty};
use hyra_db::repositories::{BookingRepo, PropertyRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{collect_issues, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::response::OkResponse;
use crate::state::AppState;
use crate::storage::StorageError;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Body of every property list endpoint.
#[derive(Debug, Serialize)]
pub struct PropertiesResponse {
    pub properties: Vec<Property>,
}

/// Body of the single-property endpoints.
#[derive(Debug, Serialize)]
pub struct PropertyResponse {
    pub property: Property,
}

/// Query parameters for `GET /properties/{id}/is-booked`.
#[derive(Debug, Deserialize, Validate)]
pub struct IsBookedParams {
    #[validate(regex(path = *DATE_FORMAT, message = "Format YYYY-MM-DD"))]
    pub from: Option<String>,
    #[validate(regex(path = *DATE_FORMAT, message = "Format YYYY-MM-DD"))]
    pub to: Option<String>,
}

/// The date window a booked-status answer applies to.
#[derive(Debug, Serialize)]
pub struct BookedScope {
    pub from: String,
    pub to: String,
}

/// Body of `GET /properties/{id}/is-booked`.
#[derive(Debug, Serialize)]
pub struct IsBookedResponse {
    pub is_booked: bool,
    pub count: i64,
    /// `null` when the count covers all time.
    pub scope: Option<BookedScope>,
}

/// Body of `POST /properties/upload-image`.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

// ---------------------------------------------------------------------------
// List endpoints
// ---------------------------------------------------------------------------

/// GET /properties
///
/// Every property, newest first. Public.
pub async fn list_all(State(state): State<AppState>) -> AppResult<Json<PropertiesResponse>> {
    let properties = PropertyRepo::list_all(&state.pool).await?;
    Ok(Json(PropertiesResponse { properties }))
}

/// GET /properties/my
///
/// The caller's own listings, newest first.
pub async fn list_my(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<PropertiesResponse>> {
    let properties = PropertyRepo::list_by_owner(&state.pool, auth.user_id).await?;
    Ok(Json(PropertiesResponse { properties }))
}

/// GET /properties/others
///
/// Bookable listings belonging to other users (available, not caller-owned).
pub async fn list_others(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<PropertiesResponse>> {
    let properties =
        PropertyRepo::list_available_excluding_owner(&state.pool, auth.user_id).await?;
    Ok(Json(PropertiesResponse { properties }))
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /properties
///
/// Create a listing owned by the caller, rejecting duplicates among their own
/// listings (case-insensitive, trimmed name or image URL). A rejected create
/// removes the candidate's freshly uploaded image from storage first.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<PropertyCreateInput>,
) -> AppResult<(StatusCode, Json<PropertyResponse>)> {
    // 1. Duplicate detection against the caller's own listings only.
    let normalized_name = input.name.trim().to_lowercase();
    let normalized_image = input
        .image_url
        .as_deref()
        .map(|u| u.trim().to_lowercase())
        .unwrap_or_default();

    let existing = PropertyRepo::list_by_owner(&state.pool, auth.user_id).await?;
    let has_duplicate = existing.iter().any(|p| {
        let same_name = p.name.trim().to_lowercase() == normalized_name;
        let same_image =
            p.image_url.as_deref().unwrap_or("").trim().to_lowercase() == normalized_image;
        same_name || (!normalized_image.is_empty() && same_image)
    });

    if has_duplicate {
        remove_unreferenced_image(&state, input.image_url.as_deref()).await;
        return Err(DomainError::DuplicateListing.into());
    }

    // 2. Persist, rolling back the uploaded image on any failure.
    let create = CreateProperty {
        owner_id: auth.user_id,
        name: input.name,
        description: input.description,
        location: input.location,
        price_per_night: input.price_per_night,
        availability: input.availability.unwrap_or(true),
        image_url: input.image_url,
    };

    match PropertyRepo::create(&state.pool, &create).await {
        Ok(property) => {
            tracing::info!(property_id = %property.id, owner_id = %auth.user_id, "Property created");
            Ok((StatusCode::CREATED, Json(PropertyResponse { property })))
        }
        Err(e) => {
            remove_unreferenced_image(&state, create.image_url.as_deref()).await;
            Err(e.into())
        }
    }
}

/// PATCH /properties/{id}
///
/// Apply a partial patch; only the owner may update.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(patch): ValidatedJson<PropertyPatchInput>,
) -> AppResult<Json<PropertyResponse>> {
    let existing = PropertyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "Property",
            id,
        })?;

    if existing.owner_id != auth.user_id {
        return Err(DomainError::Forbidden("Forbidden".to_string()).into());
    }

    let update = UpdateProperty {
        name: patch.name,
        description: patch.description,
        location: patch.location,
        price_per_night: patch.price_per_night,
        availability: patch.availability,
        image_url: patch.image_url,
    };

    let property = PropertyRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "Property",
            id,
        })?;

    Ok(Json(PropertyResponse { property }))
}

/// DELETE /properties/{id}
///
/// Delete a listing, then best-effort delete its stored image. A failed image
/// deletion is logged and swallowed; the record is already gone.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<OkResponse>> {
    let property = PropertyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "Property",
            id,
        })?;

    if property.owner_id != auth.user_id {
        return Err(DomainError::Forbidden("Forbidden".to_string()).into());
    }

    PropertyRepo::delete(&state.pool, id).await?;

    if let Some(url) = property.image_url.as_deref() {
        match state.store.path_from_url(url) {
            Some(path) => match state.store.remove(&path).await {
                Ok(()) => tracing::debug!(%path, "Removed stored image"),
                Err(e) => tracing::warn!(%path, error = %e, "Failed to remove stored image"),
            },
            None => tracing::warn!(%url, "No object path recognised in image URL"),
        }
    }

    tracing::info!(property_id = %id, owner_id = %auth.user_id, "Property deleted");

    Ok(Json(OkResponse::ok()))
}

/// GET /properties/{id}
///
/// Fetch a single listing. Public.
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<PropertyResponse>> {
    let property = PropertyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "Property",
            id,
        })?;
    Ok(Json(PropertyResponse { property }))
}

// ---------------------------------------------------------------------------
// Booked status
// ---------------------------------------------------------------------------

/// GET /properties/{id}/is-booked
///
/// Report whether any booking exists for the property: within `[from, to)`
/// when both bounds are given, across all time otherwise. Public.
pub async fn is_booked(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<IsBookedParams>,
) -> AppResult<Json<IsBookedResponse>> {
    params
        .validate()
        .map_err(|errors| AppError::Validation(collect_issues(&errors)))?;

    if let Some(from) = params.from.as_deref() {
        let from_date = parse_date(from)?;
        if from_date < Local::now().date_naive() {
            return Err(DomainError::InvalidDateRange(
                "Check-in date cannot be in the past.".to_string(),
            )
            .into());
        }
    }

    let (count, scope) = match (params.from.as_deref(), params.to.as_deref()) {
        (Some(from), Some(to)) => {
            let count = BookingRepo::count_for_property_in_range(
                &state.pool,
                id,
                parse_date(from)?,
                parse_date(to)?,
            )
            .await?;
            let scope = BookedScope {
                from: from.to_string(),
                to: to.to_string(),
            };
            (count, Some(scope))
        }
        _ => (BookingRepo::count_for_property(&state.pool, id).await?, None),
    };

    Ok(Json(IsBookedResponse {
        is_booked: count > 0,
        count,
        scope,
    }))
}

// ---------------------------------------------------------------------------
// Image upload
// ---------------------------------------------------------------------------

/// POST /properties/upload-image
///
/// Accept a single image file and store it under the caller's namespace.
/// Re-uploading a same-named file is rejected; names are never uniquified.
pub async fn upload_image(
    auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().unwrap_or("").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            file = Some((filename, content_type, data.to_vec()));
        }
        // Unknown fields are ignored.
    }

    let Some((filename, content_type, data)) = file else {
        return Err(AppError::BadRequest("No file provided.".to_string()));
    };
    if !content_type.starts_with("image/") {
        return Err(AppError::BadRequest(
            "Only image files are allowed.".to_string(),
        ));
    }
    if data.is_empty() {
        return Err(AppError::BadRequest("No file provided.".to_string()));
    }

    let safe_name = safe_filename(&filename);
    let namespace = auth.account_id.to_string();

    if state.store.exists(&namespace, &safe_name).await? {
        return Err(StorageError::AlreadyExists.into());
    }

    let path = state.store.put(&namespace, &safe_name, &data).await?;

    tracing::info!(%path, account_id = %auth.account_id, "Image uploaded");

    Ok(Json(UploadResponse {
        url: state.store.public_url(&path),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Best-effort removal of an uploaded image that will never be referenced
/// (duplicate listing, failed insert).
async fn remove_unreferenced_image(state: &AppState, image_url: Option<&str>) {
    let Some(url) = image_url else { return };
    let Some(path) = state.store.path_from_url(url) else {
        return;
    };
    if let Err(e) = state.store.remove(&path).await {
        tracing::warn!(%path, error = %e, "Failed to remove unreferenced image");
    }
}
