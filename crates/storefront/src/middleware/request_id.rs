//! Request ID handling for tracing and error correlation.
//!
//! `tower-http` assigns the ID: an `x-request-id` sent by an upstream proxy
//! is kept, otherwise a UUID v4 is generated, and the value is echoed on the
//! response. [`record_request_id`] copies it into the tracing span and the
//! Sentry scope.

use axum::{
    extract::Request,
    http::HeaderName,
    middleware::Next,
    response::Response,
};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tracing::Span;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const fn header_name() -> HeaderName {
    HeaderName::from_static(REQUEST_ID_HEADER)
}

/// Layer that assigns an ID to requests that arrive without one.
#[must_use]
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(header_name(), MakeRequestUuid)
}

/// Layer that copies the request ID onto the response.
#[must_use]
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(header_name())
}

/// Record the request ID in the current span and the Sentry scope.
///
/// Must run inside [`set_request_id_layer`].
pub async fn record_request_id(request: Request, next: Next) -> Response {
    if let Some(request_id) = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
    {
        Span::current().record("request_id", request_id);
        sentry::configure_scope(|scope| {
            scope.set_tag("request_id", request_id);
        });
    }

    next.run(request).await
}
