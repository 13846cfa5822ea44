//! Companion HTTP service for the Smart Memo UI.
//!
//! Serves a single informational route, `GET /api/version`. Memo data never
//! passes through this service.

pub mod routes;

use axum::routing::get;
use axum::Router;

/// Builds the service router.
pub fn router() -> Router {
    Router::new().route("/api/version", get(routes::version))
}
