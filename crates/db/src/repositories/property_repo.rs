//! Repository for the `properties` table.

use hyra_core::types::DbId;
use sqlx::PgPool;

use crate::models::property::{CreateProperty, Property, UpdateProperty};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, name, description, location, price_per_night, \
                        availability, image_url, created_at, updated_at";

/// Provides CRUD operations for properties.
pub struct PropertyRepo;

impl PropertyRepo {
    /// Insert a new property, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProperty) -> Result<Property, sqlx::Error> {
        let query = format!(
            "INSERT INTO properties (owner_id, name, description, location, price_per_night, availability, image_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(input.owner_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.price_per_night)
            .bind(input.availability)
            .bind(&input.image_url)
            .fetch_one(pool)
            .await
    }

    /// Find a property by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Property>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM properties WHERE id = $1");
        sqlx::query_as::<_, Property>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every property, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Property>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM properties ORDER BY created_at DESC");
        sqlx::query_as::<_, Property>(&query).fetch_all(pool).await
    }

    /// List the properties owned by a user, newest first.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Property>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM properties WHERE owner_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// List bookable properties belonging to other users: not owned by
    /// `owner_id` and currently available. Newest first.
    pub async fn list_available_excluding_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<Property>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM properties
             WHERE owner_id <> $1 AND availability = true
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial patch. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProperty,
    ) -> Result<Option<Property>, sqlx::Error> {
        let query = format!(
            "UPDATE properties SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                location = COALESCE($4, location),
                price_per_night = COALESCE($5, price_per_night),
                availability = COALESCE($6, availability),
                image_url = COALESCE($7, image_url),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.price_per_night)
            .bind(input.availability)
            .bind(&input.image_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a property. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
