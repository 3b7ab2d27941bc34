//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::domain::entities::{
    CONTRACT_VERSION, PrecedenceRule, RawInput, Reason, ResolutionOptions,
};
use crate::state::AppState;

/// Page used to exercise the resolver; carries a single `gclid`.
const PROBE_PAGE: &str = "https://health.invalid/?gclid=health-check";

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Resolver**: Resolves a `gclid`-tagged page with the configured
///    defaults and compares the reason with what the configured precedence
///    and consent imply
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "contract_version": "1.0.0",
///   "checks": {
///     "resolver": {
///       "status": "ok",
///       "message": "Resolved gclid_present"
///     }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let resolver_check = check_resolver(&state);

    let all_healthy = resolver_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        contract_version: CONTRACT_VERSION.to_string(),
        checks: HealthChecks {
            resolver: resolver_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

fn check_resolver(state: &AppState) -> CheckStatus {
    let service = &state.attribution_service;
    let probe = RawInput::new(Some(PROBE_PAGE), None);
    let result = service.resolve(&probe, None);

    compare_reason(expected_probe_reason(service.defaults()), result.attribution.reason)
}

/// Reason the probe page must resolve to under `options`.
///
/// The page carries only a `gclid`, so it is credited to Google Ads when the
/// gclid rule is enabled and ad storage is granted, and falls back to direct
/// otherwise.
fn expected_probe_reason(options: &ResolutionOptions) -> Reason {
    if options.allows(PrecedenceRule::Gclid) && options.consent.ad_storage_granted {
        Reason::GclidPresent
    } else {
        Reason::NoSignals
    }
}

fn compare_reason(expected: Reason, actual: Reason) -> CheckStatus {
    if actual == expected {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("Resolved {}", actual)),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some(format!("Probe resolved {}, expected {}", actual, expected)),
        }
    }
}
