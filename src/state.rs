use std::sync::Arc;

use crate::application::services::AttributionService;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub attribution_service: Arc<AttributionService>,
    pub max_batch_size: usize,
}

impl AppState {
    pub fn new(attribution_service: Arc<AttributionService>, max_batch_size: usize) -> Self {
        Self {
            attribution_service,
            max_batch_size,
        }
    }
}
