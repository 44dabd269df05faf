//! Postgres-backed identity provider.

use async_trait::async_trait;
use chrono::Utc;
use hyra_db::models::identity::CreateSession;
use hyra_db::repositories::{IdentityAccountRepo, IdentitySessionRepo};
use hyra_db::DbPool;

use crate::auth::jwt::{
    generate_access_token, generate_refresh_token, hash_refresh_token, validate_token, JwtConfig,
};
use crate::auth::password::{hash_password, verify_password};

use super::{IdentityError, IdentityProvider, IdentityUser, ProviderSession};

/// Identity provider over the `identity_accounts`/`identity_sessions` tables.
///
/// Access tokens are stateless HS256 JWTs; refresh credentials are opaque
/// tokens whose SHA-256 digest is stored in a session row.
#[derive(Clone)]
pub struct PgIdentityProvider {
    pool: DbPool,
    jwt: JwtConfig,
}

impl PgIdentityProvider {
    pub fn new(pool: DbPool, jwt: JwtConfig) -> Self {
        Self { pool, jwt }
    }
}

#[async_trait]
impl IdentityProvider for PgIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<IdentityUser, IdentityError> {
        if IdentityAccountRepo::find_by_email(&self.pool, email)
            .await?
            .is_some()
        {
            return Err(IdentityError::EmailTaken);
        }

        let password_hash =
            hash_password(password).map_err(|e| IdentityError::Credential(e.to_string()))?;

        let account = IdentityAccountRepo::create(&self.pool, email, &password_hash).await?;

        tracing::info!(account_id = %account.id, "Identity account created");

        Ok(IdentityUser { id: account.id })
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, IdentityError> {
        // 1. Find the account; an unknown email reads the same as a bad
        //    password.
        let account = IdentityAccountRepo::find_by_email(&self.pool, email)
            .await?
            .ok_or(IdentityError::InvalidCredentials)?;

        // 2. Verify the password.
        let password_valid = verify_password(password, &account.password_hash)
            .map_err(|e| IdentityError::Credential(e.to_string()))?;
        if !password_valid {
            return Err(IdentityError::InvalidCredentials);
        }

        // 3. Issue the token pair and persist the refresh session.
        let access_token = generate_access_token(account.id, &self.jwt)
            .map_err(|e| IdentityError::Credential(e.to_string()))?;

        let (refresh_plaintext, refresh_hash) = generate_refresh_token();
        let expires_at = Utc::now() + chrono::Duration::days(self.jwt.refresh_token_expiry_days);

        IdentitySessionRepo::create(
            &self.pool,
            &CreateSession {
                account_id: account.id,
                refresh_token_hash: refresh_hash,
                expires_at,
            },
        )
        .await?;

        Ok(ProviderSession {
            access_token,
            refresh_token: refresh_plaintext,
            user: IdentityUser { id: account.id },
        })
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<IdentityUser>, IdentityError> {
        match validate_token(access_token, &self.jwt) {
            Ok(claims) => Ok(Some(IdentityUser { id: claims.sub })),
            Err(_) => Ok(None),
        }
    }

    async fn set_session(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<Option<IdentityUser>, IdentityError> {
        // A valid access token settles it.
        if let Ok(claims) = validate_token(access_token, &self.jwt) {
            return Ok(Some(IdentityUser { id: claims.sub }));
        }

        // Otherwise fall back to the refresh credential's session.
        if refresh_token.is_empty() {
            return Ok(None);
        }
        let hash = hash_refresh_token(refresh_token);
        let session = IdentitySessionRepo::find_active_by_refresh_hash(&self.pool, &hash).await?;
        Ok(session.map(|s| IdentityUser { id: s.account_id }))
    }
}
