//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Product listing (first 16)
//! GET  /products/{handle}      - Product detail with add-to-cart form
//!
//! # Cart
//! GET  /cart                   - Cart page
//! POST /cart                   - Cart action (JSON, or 303 to `redirectTo`)
//! ```

pub mod cart;
pub mod home;
pub mod layout;
pub mod products;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{handle}", get(products::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .nest("/products", product_routes())
        .route("/cart", get(cart::show).post(cart::action))
}

/// Liveness check.
async fn health() -> &'static str {
    "ok"
}
