//! Repository for the `identity_sessions` table.

use sqlx::PgPool;

use crate::models::identity::{CreateSession, IdentitySession};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, account_id, refresh_token_hash, expires_at, is_revoked, created_at";

/// Provides operations on refresh-token sessions.
pub struct IdentitySessionRepo;

impl IdentitySessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSession,
    ) -> Result<IdentitySession, sqlx::Error> {
        let query = format!(
            "INSERT INTO identity_sessions (account_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, IdentitySession>(&query)
            .bind(input.account_id)
            .bind(&input.refresh_token_hash)
            .bind(input.expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find an active session by its refresh token hash.
    ///
    /// Only returns sessions that are not revoked and not expired.
    pub async fn find_active_by_refresh_hash(
        pool: &PgPool,
        hash: &str,
    ) -> Result<Option<IdentitySession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM identity_sessions
             WHERE refresh_token_hash = $1
               AND is_revoked = false
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, IdentitySession>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }
}
