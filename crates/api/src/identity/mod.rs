//! The identity-provider capability interface.
//!
//! The application treats authentication as an external collaborator exposing
//! four operations: account creation, password sign-in, access-token
//! resolution, and session restoration from a token pair. Any provider with
//! equivalent operations can stand behind [`IdentityProvider`]; this crate
//! ships [`postgres::PgIdentityProvider`], backed by the `identity_accounts`
//! and `identity_sessions` tables.

pub mod postgres;

use async_trait::async_trait;
use hyra_core::types::DbId;

pub use postgres::PgIdentityProvider;

/// The identity a provider resolved for a request or operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityUser {
    /// The provider's account id (mirrored into `users.auth_user_id`).
    pub id: DbId,
}

/// Credentials issued by a successful sign-in.
#[derive(Debug, Clone)]
pub struct ProviderSession {
    pub access_token: String,
    pub refresh_token: String,
    pub user: IdentityUser,
}

/// Errors surfaced by an identity provider.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Email is already registered.")]
    EmailTaken,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing/verification backend failure.
    #[error("Credential error: {0}")]
    Credential(String),
}

/// Capability interface over the external identity system.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create a new account for the given (cleaned, lower-cased) email.
    async fn sign_up(&self, email: &str, password: &str) -> Result<IdentityUser, IdentityError>;

    /// Verify credentials and issue a fresh access/refresh pair.
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, IdentityError>;

    /// Resolve the identity behind a valid access token, or `None`.
    async fn get_user(&self, access_token: &str) -> Result<Option<IdentityUser>, IdentityError>;

    /// Restore a session from the cookie pair.
    ///
    /// A valid access token resolves directly; an expired or invalid one
    /// falls back to the refresh credential's server-side session. Returns
    /// `None` when neither identifies an account.
    async fn set_session(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<Option<IdentityUser>, IdentityError>;
}
