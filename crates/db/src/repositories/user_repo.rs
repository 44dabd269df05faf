//! Repository for the `users` table.

use hyra_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, auth_user_id, name, email, is_admin, created_at";

/// Provides CRUD operations for application users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new mirror row, returning the created user.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (auth_user_id, name, email, is_admin)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(input.auth_user_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(input.is_admin)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the mirror row for an identity-provider account id.
    pub async fn find_by_auth_id(
        pool: &PgPool,
        auth_user_id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE auth_user_id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(auth_user_id)
            .fetch_optional(pool)
            .await
    }
}
