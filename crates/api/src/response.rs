//! Shared response types for API handlers.

use serde::Serialize;

/// Standard `{ "ok": true }` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub const fn ok() -> Self {
        Self { ok: true }
    }
}
