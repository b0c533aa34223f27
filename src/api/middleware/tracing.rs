//! Per-request tracing for the HTTP router.

use std::time::Duration;

use axum::http::{Request, Response};
use tower_http::classify::{ServerErrorsAsFailures, ServerErrorsFailureClass, SharedClassifier};
use tower_http::trace::{MakeSpan, OnFailure, OnRequest, OnResponse, TraceLayer};
use tracing::{Level, Span};

/// Span per request carrying `method` and `path`; the query string is left
/// out so redirect lookups are logged by code only.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::span!(
            Level::INFO,
            "request",
            method = %request.method(),
            path = %request.uri().path(),
        )
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogRequest;

impl<B> OnRequest<B> for LogRequest {
    fn on_request(&mut self, _request: &Request<B>, _span: &Span) {
        tracing::debug!("Processing request");
    }
}

/// Logs status and latency; 4xx and 5xx are raised to `WARN`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogResponse;

impl<B> OnResponse<B> for LogResponse {
    fn on_response(self, response: &Response<B>, latency: Duration, _span: &Span) {
        let status = response.status().as_u16();
        let latency_ms = latency.as_millis() as u64;

        if response.status().is_client_error() || response.status().is_server_error() {
            tracing::warn!(status, latency_ms, "Request finished");
        } else {
            tracing::info!(status, latency_ms, "Request finished");
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogFailure;

impl OnFailure<ServerErrorsFailureClass> for LogFailure {
    fn on_failure(&mut self, class: ServerErrorsFailureClass, latency: Duration, _span: &Span) {
        tracing::error!(%class, latency_ms = latency.as_millis() as u64, "Request failed");
    }
}

/// Trace layer type installed by [`crate::routes::build_router`].
pub type RequestTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    RequestSpan,
    LogRequest,
    LogResponse,
    tower_http::trace::DefaultOnBodyChunk,
    tower_http::trace::DefaultOnEos,
    LogFailure,
>;

/// Creates the tracing middleware.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=POST path=/shorten}: Request finished status=201 latency_ms=3
/// WARN request{method=GET path=/nope}: Request finished status=404 latency_ms=1
/// ```
pub fn layer() -> RequestTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(RequestSpan)
        .on_request(LogRequest)
        .on_response(LogResponse)
        .on_failure(LogFailure)
}
