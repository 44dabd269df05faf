//! Session-resolving extractors for Axum handlers.
//!
//! The session travels as the cookie pair issued at login, with a Bearer
//! `Authorization` header accepted as a fallback for the access credential.
//! Resolution is delegated to the injected identity provider; no handler
//! touches tokens directly.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use hyra_core::error::DomainError;
use hyra_core::types::DbId;
use hyra_db::repositories::UserRepo;

use crate::auth::cookies::{ACCESS_COOKIE, REFRESH_COOKIE};
use crate::error::AppError;
use crate::identity::IdentityUser;
use crate::state::AppState;

/// Authenticated caller with a resolved local user row.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication; requests without a valid session are rejected with 401.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// The local `users` row id (owner of properties and bookings).
    pub user_id: DbId,
    /// The identity provider's account id.
    pub account_id: DbId,
}

/// Optional identity, for endpoints that answer both ways (`/auth/me`).
///
/// Never rejects: an absent or invalid session resolves to `None`.
#[derive(Debug, Clone, Copy)]
pub struct MaybeAuthIdentity(pub Option<IdentityUser>);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = resolve_identity(parts, state)
            .await?
            .ok_or_else(|| AppError::Domain(DomainError::Unauthorized("Unauthorized".into())))?;

        // The mirror row is created at registration; a session without one
        // points at provider/application drift, not a client mistake.
        let user = UserRepo::find_by_auth_id(&state.pool, identity.id)
            .await?
            .ok_or_else(|| AppError::Internal("User mapping missing".into()))?;

        Ok(AuthUser {
            user_id: user.id,
            account_id: identity.id,
        })
    }
}

impl FromRequestParts<AppState> for MaybeAuthIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthIdentity(resolve_identity(parts, state).await?))
    }
}

/// Resolve the request's identity through the provider.
///
/// An access cookie is restored together with its refresh credential
/// (`set_session`), so a just-expired access token still authenticates while
/// its refresh session is alive. A bare Bearer token resolves directly.
async fn resolve_identity(
    parts: &Parts,
    state: &AppState,
) -> Result<Option<IdentityUser>, AppError> {
    let jar = CookieJar::from_headers(&parts.headers);

    if let Some(access) = jar.get(ACCESS_COOKIE) {
        let refresh = jar
            .get(REFRESH_COOKIE)
            .map(|c| c.value().to_string())
            .unwrap_or_default();
        return Ok(state
            .identity
            .set_session(access.value(), &refresh)
            .await?);
    }

    let bearer = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match bearer {
        Some(token) => Ok(state.identity.get_user(token).await?),
        None => Ok(None),
    }
}
