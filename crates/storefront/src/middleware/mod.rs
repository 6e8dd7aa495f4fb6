//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (hub per request, capture errors)
//! 2. `TraceLayer` (request span, see [`make_request_span`])
//! 3. Request ID (add unique ID to each request, recorded in the span)
//! 4. Security headers (CSP, COOP/COEP, etc.)
//! 5. Session layer (tower-sessions with `MemoryStore`)

pub mod request_id;
pub mod security_headers;
pub mod session;

pub use request_id::{RequestId, make_request_span, request_id_middleware};
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
