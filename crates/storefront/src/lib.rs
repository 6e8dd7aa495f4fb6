//! Tahuu Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod shopify;
pub mod state;

use axum::Router;
use axum::middleware::from_fn;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router with its middleware stack.
///
/// Sentry layers are added by the binary, since they need an initialized
/// client to be useful.
pub fn build_app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());
    let static_files = ServeDir::new(&state.config().static_dir);

    routes::routes()
        .nest_service("/static", static_files)
        .layer(session_layer)
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(middleware::make_request_span))
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;
    use crate::middleware::request_id::REQUEST_ID_HEADER;

    fn app() -> Router {
        build_app(AppState::new(config::tests::config("http://localhost:3000")))
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
        assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_unknown_cart_action_fails_before_any_call() {
        let response = app()
            .oneshot(
                Request::post("/cart")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("cartAction=EMPTY_CART&redirectTo=%2Fcart"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!response.headers().contains_key(header::SET_COOKIE));
    }

    #[tokio::test]
    async fn test_remove_without_cart_fails() {
        let response = app()
            .oneshot(
                Request::post("/cart")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(
                        "cartAction=REMOVE_FROM_CART&linesIds=%5B%22gid%3A%2F%2Fshopify%2FCartLine%2Fl1%22%5D",
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = app()
            .oneshot(Request::get("/collections").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
