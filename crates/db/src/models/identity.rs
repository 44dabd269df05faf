//! Identity-provider rows: credential accounts and refresh-token sessions.
//!
//! These tables are private to the provider implementation; application
//! handlers only see provider-level types, never these rows.

use hyra_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A credential account from the `identity_accounts` table.
///
/// Contains the password hash -- never serialize this type.
#[derive(Debug, Clone, FromRow)]
pub struct IdentityAccount {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A refresh-token session from the `identity_sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct IdentitySession {
    pub id: DbId,
    pub account_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub is_revoked: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a refresh-token session.
#[derive(Debug)]
pub struct CreateSession {
    pub account_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
