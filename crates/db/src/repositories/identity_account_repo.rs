//! Repository for the `identity_accounts` table.
//!
//! Used only by the Postgres identity provider; application handlers go
//! through the provider interface.

use hyra_core::types::DbId;
use sqlx::PgPool;

use crate::models::identity::IdentityAccount;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, created_at, updated_at";

/// Provides operations on identity-provider credential accounts.
pub struct IdentityAccountRepo;

impl IdentityAccountRepo {
    /// Insert a new account, returning the created row.
    ///
    /// Fails with a unique violation if the email is already registered.
    pub async fn create(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
    ) -> Result<IdentityAccount, sqlx::Error> {
        let query = format!(
            "INSERT INTO identity_accounts (email, password_hash)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IdentityAccount>(&query)
            .bind(email)
            .bind(password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find an account by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<IdentityAccount>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM identity_accounts WHERE id = $1");
        sqlx::query_as::<_, IdentityAccount>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an account by email (emails are stored lower-cased).
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<IdentityAccount>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM identity_accounts WHERE email = $1");
        sqlx::query_as::<_, IdentityAccount>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
