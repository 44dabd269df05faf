//! Repository for the `bookings` table.

use chrono::NaiveDate;
use hyra_core::types::DbId;
use sqlx::PgPool;

use crate::models::booking::{Booking, BookingPropertyRow, BookingWithProperty, CreateBooking};

/// Column list shared across plain booking queries.
const COLUMNS: &str = "id, user_id, property_id, check_in_date, check_out_date, \
                        total_price, created_at";

/// Column list for bookings joined with their property. Property columns are
/// aliased with a `property_` prefix; see [`BookingPropertyRow`].
const JOIN_COLUMNS: &str = "b.id, b.user_id, b.property_id, b.check_in_date, b.check_out_date, \
     b.total_price, b.created_at, \
     p.owner_id AS property_owner_id, p.name AS property_name, \
     p.description AS property_description, p.location AS property_location, \
     p.price_per_night AS property_price_per_night, \
     p.availability AS property_availability, p.image_url AS property_image_url, \
     p.created_at AS property_created_at, p.updated_at AS property_updated_at";

/// Provides CRUD and overlap-lookup operations for bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a new booking, returning the created row.
    ///
    /// The `bookings_no_overlap_per_property` exclusion constraint may reject
    /// the insert; callers translate that violation into a date conflict.
    pub async fn create(pool: &PgPool, input: &CreateBooking) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings (user_id, property_id, check_in_date, check_out_date, total_price)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(input.user_id)
            .bind(input.property_id)
            .bind(input.check_in_date)
            .bind(input.check_out_date)
            .bind(input.total_price)
            .fetch_one(pool)
            .await
    }

    /// Find a booking by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a booking joined with its property.
    pub async fn find_with_property(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BookingWithProperty>, sqlx::Error> {
        let query = format!(
            "SELECT {JOIN_COLUMNS} FROM bookings b
             JOIN properties p ON p.id = b.property_id
             WHERE b.id = $1"
        );
        let row = sqlx::query_as::<_, BookingPropertyRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(BookingWithProperty::from))
    }

    /// Find a booking joined with its property, only if owned by `user_id`.
    pub async fn find_with_property_for_user(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<BookingWithProperty>, sqlx::Error> {
        let query = format!(
            "SELECT {JOIN_COLUMNS} FROM bookings b
             JOIN properties p ON p.id = b.property_id
             WHERE b.id = $1 AND b.user_id = $2"
        );
        let row = sqlx::query_as::<_, BookingPropertyRow>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(BookingWithProperty::from))
    }

    /// List a user's bookings joined with their properties, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<BookingWithProperty>, sqlx::Error> {
        let query = format!(
            "SELECT {JOIN_COLUMNS} FROM bookings b
             JOIN properties p ON p.id = b.property_id
             WHERE b.user_id = $1
             ORDER BY b.created_at DESC"
        );
        let rows = sqlx::query_as::<_, BookingPropertyRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(BookingWithProperty::from).collect())
    }

    /// List a user's bookings across all properties, optionally excluding one
    /// booking (the one being edited).
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
        exclude: Option<DbId>,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings
             WHERE user_id = $1 AND ($2::uuid IS NULL OR id <> $2)"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(user_id)
            .bind(exclude)
            .fetch_all(pool)
            .await
    }

    /// List a property's bookings, optionally excluding one booking.
    pub async fn list_by_property(
        pool: &PgPool,
        property_id: DbId,
        exclude: Option<DbId>,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings
             WHERE property_id = $1 AND ($2::uuid IS NULL OR id <> $2)"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(property_id)
            .bind(exclude)
            .fetch_all(pool)
            .await
    }

    /// Count all bookings for a property.
    pub async fn count_for_property(pool: &PgPool, property_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM bookings WHERE property_id = $1")
                .bind(property_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }

    /// Count a property's bookings intersecting the half-open range
    /// `[from, to)`.
    pub async fn count_for_property_in_range(
        pool: &PgPool,
        property_id: DbId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM bookings
             WHERE property_id = $1
               AND NOT (check_out_date <= $2 OR check_in_date >= $3)",
        )
        .bind(property_id)
        .bind(from)
        .bind(to)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Update a booking's dates and recomputed price.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_dates(
        pool: &PgPool,
        id: DbId,
        check_in_date: NaiveDate,
        check_out_date: NaiveDate,
        total_price: f64,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings
             SET check_in_date = $2, check_out_date = $3, total_price = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(check_in_date)
            .bind(check_out_date)
            .bind(total_price)
            .fetch_optional(pool)
            .await
    }

    /// Delete a booking. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
