//! Shopify Storefront API client.
//!
//! # Architecture
//!
//! - Uses `graphql_client` request/response envelopes with hand-declared operations
//! - Shopify is source of truth - NO local sync, direct API calls
//! - In-memory caching via `moka` for product reads only
//!
//! # Storefront API
//!
//! - Layout metaobject, products, cart query
//! - Cart mutations behind the [`CartApi`] seam
//! - Private access token for server-side operations
//!
//! # Example
//!
//! ```rust,ignore
//! use tahuu_storefront::shopify::{CartApi, StorefrontClient};
//!
//! let client = StorefrontClient::new(&config.shopify, config.product_cache_ttl);
//!
//! let layout = client.get_layout().await?;
//! let created = client.create_cart(CartInput {
//!     lines: Some(vec![line]),
//!     buyer_identity: None,
//! }).await?;
//! ```

mod storefront;
pub mod types;

use std::future::Future;

pub use storefront::{PRODUCT_LISTING_SIZE, StorefrontClient};
pub use types::*;

use tahuu_core::{CartId, CartLineId};
use thiserror::Error;

/// Errors that can occur when interacting with Shopify APIs.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// User error from mutation (e.g., invalid input) with no cart returned.
    #[error("User error: {0}")]
    UserError(String),

    /// Response data did not have the shape the query asked for.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// A GraphQL error returned by the Shopify API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

impl GraphQLError {
    /// An error carrying only a message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locations: vec![],
            path: vec![],
        }
    }
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut parts = Vec::new();

            if !e.message.is_empty() {
                parts.push(e.message.clone());
            }

            if !e.path.is_empty() {
                let path_str = e
                    .path
                    .iter()
                    .map(|p| match p {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                parts.push(format!("path: {path_str}"));
            }

            if let Some(loc) = e.locations.first() {
                parts.push(format!("at line {}:{}", loc.line, loc.column));
            }

            if parts.is_empty() {
                format!("[error {}]: (no details)", i + 1)
            } else {
                parts.join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// CartApi - cart mutation seam
// =============================================================================

/// Cart mutations the cart action dispatcher drives.
///
/// Each call is one Storefront API round-trip. Implemented by
/// [`StorefrontClient`]; tests substitute a recording fake.
pub trait CartApi: Send + Sync {
    /// `cartCreate`.
    fn create_cart(
        &self,
        input: CartInput,
    ) -> impl Future<Output = Result<CartMutation, ShopifyError>> + Send;

    /// `cartLinesAdd`.
    fn add_lines(
        &self,
        cart_id: &CartId,
        lines: Vec<CartLineInput>,
    ) -> impl Future<Output = Result<CartMutation, ShopifyError>> + Send;

    /// `cartLinesRemove`.
    fn remove_lines(
        &self,
        cart_id: &CartId,
        line_ids: Vec<CartLineId>,
    ) -> impl Future<Output = Result<CartMutation, ShopifyError>> + Send;

    /// `cartLinesUpdate`.
    fn update_lines(
        &self,
        cart_id: &CartId,
        lines: Vec<CartLineUpdateInput>,
    ) -> impl Future<Output = Result<CartMutation, ShopifyError>> + Send;

    /// `cartDiscountCodesUpdate`.
    fn update_discount_codes(
        &self,
        cart_id: &CartId,
        discount_codes: Vec<String>,
    ) -> impl Future<Output = Result<CartMutation, ShopifyError>> + Send;

    /// `cartBuyerIdentityUpdate`.
    fn update_buyer_identity(
        &self,
        cart_id: &CartId,
        buyer_identity: CartBuyerIdentityInput,
    ) -> impl Future<Output = Result<CartMutation, ShopifyError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shopify_error_display() {
        let err = ShopifyError::NotFound("product 70-dark-chocolate".to_string());
        assert_eq!(err.to_string(), "Not found: product 70-dark-chocolate");
    }

    #[test]
    fn test_graphql_error_formatting() {
        let errors = vec![
            GraphQLError::message("Field not found"),
            GraphQLError::message("Invalid ID"),
        ];
        let err = ShopifyError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: Field not found; Invalid ID"
        );
    }

    #[test]
    fn test_graphql_error_empty_messages() {
        let errors = vec![GraphQLError {
            message: String::new(),
            locations: vec![GraphQLErrorLocation { line: 5, column: 10 }],
            path: vec![
                serde_json::Value::String("layout".to_string()),
                serde_json::Value::Number(0.into()),
            ],
        }];
        let err = ShopifyError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: path: layout.0 at line 5:10"
        );
    }

    #[test]
    fn test_graphql_error_no_details() {
        let err = ShopifyError::GraphQL(vec![GraphQLError::message("")]);
        assert_eq!(err.to_string(), "GraphQL errors: [error 1]: (no details)");
    }

    #[test]
    fn test_graphql_error_empty_vec() {
        let err = ShopifyError::GraphQL(vec![]);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: (no error details provided)"
        );
    }

    #[test]
    fn test_malformed_response_error() {
        let err = ShopifyError::MalformedResponse("logo has no image".to_string());
        assert_eq!(err.to_string(), "Malformed response: logo has no image");
    }
}
