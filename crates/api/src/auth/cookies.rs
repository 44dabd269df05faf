//! The session cookie pair.
//!
//! Login issues two HTTP-only cookies: a short-lived access credential and a
//! longer-lived refresh credential. Both are `SameSite=Lax`, scoped to the
//! root path, and `Secure` outside local development. Logout replaces them
//! with immediately-expiring removal cookies.

use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::config::ServerConfig;

/// Name of the short-lived access-token cookie.
pub const ACCESS_COOKIE: &str = "hyra-access-token";

/// Name of the longer-lived refresh-token cookie.
pub const REFRESH_COOKIE: &str = "hyra-refresh-token";

/// Build the cookie pair set on successful login.
pub fn session_cookies(
    config: &ServerConfig,
    access_token: String,
    refresh_token: String,
) -> (Cookie<'static>, Cookie<'static>) {
    let mut access = base_cookie(config, ACCESS_COOKIE, access_token);
    access.set_max_age(time::Duration::minutes(config.jwt.access_token_expiry_mins));

    let mut refresh = base_cookie(config, REFRESH_COOKIE, refresh_token);
    refresh.set_max_age(time::Duration::days(config.jwt.refresh_token_expiry_days));

    (access, refresh)
}

/// Build removal cookies that clear the session pair.
pub fn removal_cookies(config: &ServerConfig) -> (Cookie<'static>, Cookie<'static>) {
    let mut access = base_cookie(config, ACCESS_COOKIE, String::new());
    access.set_max_age(time::Duration::ZERO);

    let mut refresh = base_cookie(config, REFRESH_COOKIE, String::new());
    refresh.set_max_age(time::Duration::ZERO);

    (access, refresh)
}

fn base_cookie(config: &ServerConfig, name: &'static str, value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);
    cookie.set_http_only(true);
    cookie.set_secure(config.cookie_secure);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");
    cookie
}
