//! Authentication middleware extractors.
//!
//! - [`auth::AuthUser`] -- requires a session and resolves the local user row.
//! - [`auth::MaybeAuthIdentity`] -- optional identity, never rejects.

pub mod auth;
