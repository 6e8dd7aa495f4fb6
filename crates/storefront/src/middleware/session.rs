//! Session middleware configuration.
//!
//! Sessions live in the in-process `MemoryStore`; a restart drops every cart
//! reference, which only costs visitors their cart link, never the cart.

use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "tahuu_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Inactivity expiry for session cookies.
#[must_use]
pub fn session_expiry() -> Expiry {
    Expiry::OnInactivity(Duration::seconds(SESSION_EXPIRY_SECONDS))
}

/// Create the session layer backed by an in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    session_layer(MemoryStore::default(), config.is_https())
}

pub(crate) fn session_layer(store: MemoryStore, secure: bool) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(session_expiry())
        .with_secure(secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, body::Body, http::Request, http::header, routing::get};
    use tower::ServiceExt;
    use tower_sessions::Session;

    use super::*;

    #[tokio::test]
    async fn test_cookie_attributes() {
        let app = Router::new()
            .route(
                "/",
                get(|session: Session| async move {
                    session.insert("cart_id", "gid://shopify/Cart/c1").await.unwrap();
                    "ok"
                }),
            )
            .layer(session_layer(MemoryStore::default(), true));

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("tahuu_session="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("Path=/"));
    }
}
