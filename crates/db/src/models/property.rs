//! Property (listing) model and DTOs.

use hyra_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full property row from the `properties` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Property {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub price_per_night: f64,
    pub availability: bool,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a property. The owner is always the authenticated caller.
#[derive(Debug)]
pub struct CreateProperty {
    pub owner_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    pub price_per_night: f64,
    pub availability: bool,
    pub image_url: Option<String>,
}

/// DTO for a partial update. Only non-`None` fields are applied.
#[derive(Debug, Default)]
pub struct UpdateProperty {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub price_per_night: Option<f64>,
    pub availability: Option<bool>,
    pub image_url: Option<String>,
}
