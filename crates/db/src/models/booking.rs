//! Booking model and DTOs.

use chrono::NaiveDate;
use hyra_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::property::Property;

/// Full booking row from the `bookings` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Booking {
    pub id: DbId,
    /// The booking user (never the property owner).
    pub user_id: DbId,
    pub property_id: DbId,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub total_price: f64,
    pub created_at: Timestamp,
}

/// DTO for inserting a booking. The total price is computed by the handler
/// before the insert.
#[derive(Debug)]
pub struct CreateBooking {
    pub user_id: DbId,
    pub property_id: DbId,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub total_price: f64,
}

/// A booking joined with its property, as returned by the booking endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct BookingWithProperty {
    #[serde(flatten)]
    pub booking: Booking,
    pub property: Property,
}

/// Flat row produced by the bookings-join-properties queries. Property
/// columns are aliased with a `property_` prefix to avoid name collisions.
#[derive(Debug, FromRow)]
pub struct BookingPropertyRow {
    pub id: DbId,
    pub user_id: DbId,
    pub property_id: DbId,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub total_price: f64,
    pub created_at: Timestamp,
    pub property_owner_id: DbId,
    pub property_name: String,
    pub property_description: Option<String>,
    pub property_location: Option<String>,
    pub property_price_per_night: f64,
    pub property_availability: bool,
    pub property_image_url: Option<String>,
    pub property_created_at: Timestamp,
    pub property_updated_at: Timestamp,
}

impl From<BookingPropertyRow> for BookingWithProperty {
    fn from(row: BookingPropertyRow) -> Self {
        BookingWithProperty {
            booking: Booking {
                id: row.id,
                user_id: row.user_id,
                property_id: row.property_id,
                check_in_date: row.check_in_date,
                check_out_date: row.check_out_date,
                total_price: row.total_price,
                created_at: row.created_at,
            },
            property: Property {
                id: row.property_id,
                owner_id: row.property_owner_id,
                name: row.property_name,
                description: row.property_description,
                location: row.property_location,
                price_per_night: row.property_price_per_night,
                availability: row.property_availability,
                image_url: row.property_image_url,
                created_at: row.property_created_at,
                updated_at: row.property_updated_at,
            },
        }
    }
}
