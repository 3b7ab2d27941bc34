//! API route configuration.

use crate::api::handlers::{resolve_batch_handler, resolve_handler};
use crate::state::AppState;
use axum::{Router, routing::post};

/// Attribution API routes.
///
/// # Endpoints
///
/// - `POST /resolve`        - Resolve a single visit
/// - `POST /resolve/batch`  - Resolve several visits in one call
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/resolve", post(resolve_handler))
        .route("/resolve/batch", post(resolve_batch_handler))
}
