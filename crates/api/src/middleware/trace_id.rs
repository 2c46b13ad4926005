//! Request ID propagation and per-request tracing spans.
//!
//! An incoming `X-Request-ID` is kept, otherwise a UUID v4 is generated.
//! The id is echoed on the response and recorded on the request span so
//! every log line of a request can be correlated.

use axum::{
    body::Body,
    http::{HeaderName, Request},
    Router,
};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

/// Header name for request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

fn request_id_header() -> HeaderName {
    HeaderName::from_static(REQUEST_ID_HEADER)
}

/// Reads the request id set by [`SetRequestIdLayer`].
pub fn request_id_of<B>(req: &Request<B>) -> String {
    req.extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

fn make_request_span(req: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        request_id = %request_id_of(req),
        method = %req.method(),
        path = %req.uri().path(),
    )
}

/// Wraps the router with request-id assignment, propagation and tracing.
///
/// Layers apply bottom-up, so the id is set before the trace span opens.
pub fn with_request_tracing<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(PropagateRequestIdLayer::new(request_id_header()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_request_span)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
}
