//! Handlers for the `/auth` resource (register, login, me, logout).
//!
//! Credential verification and session issuance are delegated entirely to the
//! injected identity provider; these handlers only orchestrate the mirror row
//! and the session cookie pair.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use hyra_core::types::DbId;
use hyra_core::validate::{LoginInput, RegisterInput};
use hyra_db::models::user::CreateUser;
use hyra_db::repositories::UserRepo;
use serde::Serialize;

use crate::auth::cookies::{removal_cookies, session_cookies};
use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::middleware::auth::MaybeAuthIdentity;
use crate::response::OkResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Identity payload of `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct MeUser {
    pub id: DbId,
}

/// Body of `GET /auth/me`: the resolved identity, or `null`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: Option<MeUser>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /auth/register
///
/// Create a provider account, then mirror it into the local `users` table so
/// properties and bookings have a foreign key to reference.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RegisterInput>,
) -> AppResult<(StatusCode, Json<OkResponse>)> {
    // 1. Account creation belongs to the provider.
    let identity = state
        .identity
        .sign_up(&input.email, &input.password)
        .await?;

    // 2. Mirror row. If this insert fails the provider account stays behind
    //    with no local row; there is no compensating deletion.
    let mirror = CreateUser {
        auth_user_id: identity.id,
        name: input.name,
        email: input.email,
        is_admin: false,
    };
    if let Err(e) = UserRepo::create(&state.pool, &mirror).await {
        tracing::warn!(
            account_id = %identity.id,
            error = %e,
            "User mirror insert failed; provider account is orphaned"
        );
        return Err(e.into());
    }

    Ok((StatusCode::CREATED, Json(OkResponse::ok())))
}

/// POST /auth/login
///
/// Verify credentials with the provider and set the session cookie pair:
/// a short-lived access credential and a longer-lived refresh credential.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(input): ValidatedJson<LoginInput>,
) -> AppResult<(CookieJar, Json<OkResponse>)> {
    let session = state
        .identity
        .sign_in_with_password(&input.email, &input.password)
        .await?;

    let (access, refresh) =
        session_cookies(&state.config, session.access_token, session.refresh_token);

    tracing::info!(account_id = %session.user.id, "User logged in");

    Ok((jar.add(access).add(refresh), Json(OkResponse::ok())))
}

/// GET /auth/me
///
/// Report the identity the middleware resolved, or `null` without a session.
pub async fn me(identity: MaybeAuthIdentity) -> Json<MeResponse> {
    Json(MeResponse {
        user: identity.0.map(|u| MeUser { id: u.id }),
    })
}

/// POST /auth/logout
///
/// Clear both session cookies. The provider is not told; the access token
/// simply ages out.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<OkResponse>) {
    let (access, refresh) = removal_cookies(&state.config);
    (jar.add(access).add(refresh), Json(OkResponse::ok()))
}
