#![allow(dead_code)]

use attribution_resolver::api::handlers::{health_handler, resolve_batch_handler, resolve_handler};
use attribution_resolver::application::services::AttributionService;
use attribution_resolver::domain::entities::ResolutionOptions;
use attribution_resolver::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use axum_test::TestServer;
use std::sync::Arc;

pub fn create_test_state() -> AppState {
    create_test_state_with(ResolutionOptions::default(), 100)
}

pub fn create_test_state_with(defaults: ResolutionOptions, max_batch_size: usize) -> AppState {
    AppState::new(Arc::new(AttributionService::new(defaults)), max_batch_size)
}

pub fn resolve_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/api/resolve", post(resolve_handler))
        .route("/api/resolve/batch", post(resolve_batch_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

pub fn health_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}
