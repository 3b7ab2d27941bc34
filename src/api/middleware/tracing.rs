//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

/// Creates a tracing middleware for HTTP requests.
///
/// Request spans carry method, URI and HTTP version. Request bodies are never
/// logged: page URLs may contain click identifiers.
///
/// - Request start is logged at `DEBUG`
/// - Responses are logged at `INFO` with latency in microseconds
/// - Server errors are logged at `ERROR`
///
/// # Example Logs
///
/// ```text
/// INFO request{method=POST uri=/api/resolve version=HTTP/1.1}: finished processing request latency=87 μs status=200
/// ```
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Micros),
        )
        .on_failure(DefaultOnFailure::new().level(Level::ERROR))
}
