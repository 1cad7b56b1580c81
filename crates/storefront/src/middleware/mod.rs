//! HTTP middleware stack for the storefront API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP context), added by the binary
//! 2. CORS, when origins are configured
//! 3. Request ID (assign, then propagate to the response)
//! 4. `TraceLayer` (request span with `request_id` and `user_id` fields)
//! 5. Request ID recording (span field + Sentry tag)
//! 6. Security headers
//!
//! Authentication is not a layer: handlers opt in through the
//! [`RequireAuth`], [`RequireVendor`] and [`OptionalAuth`] extractors.

pub mod auth;
pub mod request_id;
pub mod security_headers;

pub use auth::{
    OptionalAuth, RequireAuth, RequireVendor, ensure_can_view, ensure_owner, require_vendor,
    resolve_caller,
};
pub use request_id::{propagate_request_id_layer, record_request_id, set_request_id_layer};
pub use security_headers::security_headers_middleware;
