//! DTOs for attribution endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::domain::entities::{OptionsOverride, ResolverResult};

/// Request to resolve a single visit.
///
/// `input` is accepted as arbitrary JSON and coerced by
/// [`crate::domain::entities::RawInput::from_value`], so malformed input
/// degrades to a direct attribution instead of being rejected.
#[derive(Debug, Deserialize, Validate)]
pub struct ResolveRequest {
    #[serde(default)]
    pub input: Value,

    /// Per-call overrides applied over the service defaults.
    #[validate(nested)]
    pub options: Option<OptionsOverride>,
}

/// Request to resolve several visits in one call.
#[derive(Debug, Deserialize, Validate)]
pub struct BatchResolveRequest {
    #[validate(nested)]
    pub items: Vec<ResolveRequest>,
}

/// Response containing one result per request item, in request order.
#[derive(Debug, Serialize)]
pub struct BatchResolveResponse {
    pub summary: BatchSummary,
    pub results: Vec<ResolverResult>,
}

/// Summary statistics for batch processing.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub total: usize,
}
