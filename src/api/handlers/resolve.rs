//! Handlers for attribution endpoints.

use axum::{Json, extract::State};
use serde_json::json;
use validator::Validate;

use crate::api::dto::resolve::{
    BatchResolveRequest, BatchResolveResponse, BatchSummary, ResolveRequest,
};
use crate::domain::entities::{RawInput, ResolverResult};
use crate::error::AppError;
use crate::state::AppState;

/// Resolves one visit to its attribution record and cleaned URL.
///
/// # Endpoint
///
/// `POST /api/resolve`
///
/// # Request Body
///
/// ```json
/// {
///   "input": {
///     "page_location": "https://example.com/?utm_source=newsletter&utm_medium=email",
///     "page_referrer": "https://mail.example.net/"
///   },
///   "options": {
///     "consent": { "adStorageGranted": false },
///     "selfReferralHosts": ["example.com"]
///   }
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "version": "1.0.0",
///   "input": { "page_location": "...", "page_referrer": "..." },
///   "signals": { "click_ids": {}, "utm": { "utm_source": "newsletter", "utm_medium": "email" } },
///   "attribution": {
///     "channel": "email",
///     "source": "newsletter",
///     "medium": "email",
///     "campaign": null,
///     "content": null,
///     "term": null,
///     "click_id": null,
///     "touch_type": "last_touch",
///     "reason": "utm_present"
///   },
///   "cleaned_url": "https://example.com/"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the option overrides fail validation.
pub async fn resolve_handler(
    State(state): State<AppState>,
    Json(payload): Json<ResolveRequest>,
) -> Result<Json<ResolverResult>, AppError> {
    payload.validate()?;

    Ok(Json(resolve_item(&state, &payload)))
}

/// Resolves several visits, returning results in request order.
///
/// # Endpoint
///
/// `POST /api/resolve/batch`
///
/// # Request Body
///
/// ```json
/// {
///   "items": [
///     { "input": { "page_location": "https://example.com/?gclid=abc" } },
///     { "input": { "page_location": "https://example.com/" }, "options": { "precedence": ["utm"] } }
///   ]
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if `items` is empty, exceeds the configured
/// `MAX_BATCH_SIZE`, or any item's overrides fail validation.
pub async fn resolve_batch_handler(
    State(state): State<AppState>,
    Json(payload): Json<BatchResolveRequest>,
) -> Result<Json<BatchResolveResponse>, AppError> {
    payload.validate()?;

    if payload.items.is_empty() {
        return Err(AppError::bad_request(
            "At least one item is required",
            json!({}),
        ));
    }

    if payload.items.len() > state.max_batch_size {
        return Err(AppError::bad_request(
            "Batch is too large",
            json!({ "max": state.max_batch_size, "got": payload.items.len() }),
        ));
    }

    let results: Vec<ResolverResult> = payload
        .items
        .iter()
        .map(|item| resolve_item(&state, item))
        .collect();

    Ok(Json(BatchResolveResponse {
        summary: BatchSummary {
            total: results.len(),
        },
        results,
    }))
}

fn resolve_item(state: &AppState, item: &ResolveRequest) -> ResolverResult {
    let input = RawInput::from_value(&item.input);
    state
        .attribution_service
        .resolve(&input, item.options.as_ref())
}
