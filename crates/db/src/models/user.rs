//! Application user model and DTOs.
//!
//! A `users` row mirrors an identity-provider account so properties and
//! bookings have a local foreign key to hang off. Credentials never live
//! here; `password` management belongs entirely to the provider.

use hyra_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: DbId,
    /// The identity provider's account id this row mirrors.
    pub auth_user_id: DbId,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: Timestamp,
}

/// DTO for inserting a mirror row at registration.
#[derive(Debug)]
pub struct CreateUser {
    pub auth_user_id: DbId,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}
