use std::sync::Arc;

use crate::config::ServerConfig;
use crate::identity::IdentityProvider;
use crate::storage::ObjectStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). The identity
/// provider and object store are injected here so handlers depend on the
/// capability interfaces, never on a concrete backend.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: hyra_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Identity provider (registration, credential checks, session resolution).
    pub identity: Arc<dyn IdentityProvider>,
    /// Object store for property images.
    pub store: Arc<dyn ObjectStore>,
}
