//! Axum route handlers.

use axum::response::Json;
use serde::Serialize;
use smartmemo_core::core_version;

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}

// GET /api/version
pub async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: core_version(),
    })
}
