//! Shopify Storefront API client implementation.
//!
//! Uses `graphql_client` envelopes with `reqwest` 0.13 for HTTP.
//! Caches product reads using `moka`; the layout and carts always hit the API.

mod cache;
mod conversions;

pub mod queries;

use std::sync::Arc;
use std::time::Duration;

use graphql_client::{GraphQLQuery, Response};
use moka::future::Cache;
use secrecy::ExposeSecret;
use tahuu_core::{CartId, CartLineId};
use tracing::{debug, instrument};

use crate::config::{I18n, ShopifyStorefrontConfig};
use crate::shopify::types::{
    Cart, CartBuyerIdentityInput, CartInput, CartLineInput, CartLineUpdateInput, CartMutation,
    Layout, Product, ProductSummary,
};
use crate::shopify::{CartApi, GraphQLError, GraphQLErrorLocation, ShopifyError};

use cache::{CacheKey, CacheValue};
use conversions::{
    convert_cart, convert_mutation, convert_product, convert_product_list, normalize_layout,
};
use queries::{
    CartBuyerIdentityUpdate, CartCreate, CartDiscountCodesUpdate, CartLinesAdd, CartLinesRemove,
    CartLinesUpdate, GetCart, GetLayout, GetProductByHandle, GetProducts,
    cart_buyer_identity_update, cart_create, cart_discount_codes_update, cart_lines_add,
    cart_lines_remove, cart_lines_update, get_cart, get_layout, get_product_by_handle,
    get_products,
};

/// Number of products on the listing page.
pub const PRODUCT_LISTING_SIZE: i64 = 16;

/// Longest response body excerpt written to logs.
const LOG_BODY_LIMIT: usize = 500;

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Provides typed access to the layout metaobject, products and cart
/// operations. Cheap to clone.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl StorefrontClient {
    /// Create a new Storefront API client whose product cache entries live
    /// for `product_cache_ttl`.
    #[must_use]
    pub fn new(config: &ShopifyStorefrontConfig, product_cache_ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(product_cache_ttl)
            .build();

        Self {
            inner: Arc::new(StorefrontClientInner {
                client: reqwest::Client::new(),
                endpoint: config.endpoint(),
                access_token: config.storefront_private_token.expose_secret().to_string(),
                cache,
            }),
        }
    }

    /// Execute a GraphQL operation.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, ShopifyError> {
        let request_body = Q::build_query(variables);
        let operation = request_body.operation_name;

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            // Private access tokens use a different header than public tokens
            .header(
                "Shopify-Storefront-Private-Token",
                &self.inner.access_token,
            )
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Read as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                operation,
                status = %status,
                body = %excerpt(&response_text, LOG_BODY_LIMIT),
                "Shopify API returned non-success status"
            );
            return Err(ShopifyError::GraphQL(vec![GraphQLError::message(format!(
                "HTTP {status}: {}",
                excerpt(&response_text, 200)
            ))]));
        }

        let response: Response<Q::ResponseData> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    operation,
                    error = %e,
                    body = %excerpt(&response_text, LOG_BODY_LIMIT),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(ShopifyError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            debug!(operation, errors = ?errors, "GraphQL errors in response");
            return Err(ShopifyError::GraphQL(
                errors.into_iter().map(convert_graphql_error).collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                operation,
                body = %excerpt(&response_text, LOG_BODY_LIMIT),
                "Shopify GraphQL response has no data and no errors"
            );
            ShopifyError::GraphQL(vec![GraphQLError::message("No data in response")])
        })
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Fetch and normalize the `main-layout` metaobject.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the metaobject does not exist, `MalformedResponse`
    /// if a known field has the wrong shape, or a transport/API error.
    #[instrument(skip(self))]
    pub async fn get_layout(&self) -> Result<Layout, ShopifyError> {
        let data = self.execute::<GetLayout>(get_layout::Variables {}).await?;

        let layout = data
            .layout
            .ok_or_else(|| ShopifyError::NotFound("Layout metaobject main-layout".to_string()))?;

        normalize_layout(layout)
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get the product listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self, first: i64) -> Result<Vec<ProductSummary>, ShopifyError> {
        let cache_key = CacheKey::Products { first };

        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let data = self
            .execute::<GetProducts>(get_products::Variables { first: Some(first) })
            .await?;

        let products = convert_product_list(data.products);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get a product by its handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_product_by_handle(&self, handle: &str) -> Result<Product, ShopifyError> {
        let cache_key = CacheKey::Product(handle.to_string());

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let variables = get_product_by_handle::Variables {
            handle: handle.to_string(),
        };

        let data = self.execute::<GetProductByHandle>(variables).await?;

        let product = data
            .product
            .map(convert_product)
            .ok_or_else(|| ShopifyError::NotFound(format!("Product not found: {handle}")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    // =========================================================================
    // Cart Methods (not cached - mutable state)
    // =========================================================================

    /// Get an existing cart in the storefront's country and language context.
    ///
    /// Returns `None` when the platform no longer knows the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, i18n), fields(cart_id = %cart_id))]
    pub async fn get_cart(
        &self,
        cart_id: &CartId,
        i18n: &I18n,
    ) -> Result<Option<Cart>, ShopifyError> {
        let variables = get_cart::Variables {
            cart_id: cart_id.clone(),
            country: Some(i18n.country.clone()),
            language: Some(i18n.language.clone()),
        };

        let data = self.execute::<GetCart>(variables).await?;

        Ok(data.cart.map(convert_cart))
    }
}

impl CartApi for StorefrontClient {
    #[instrument(skip(self, input))]
    async fn create_cart(&self, input: CartInput) -> Result<CartMutation, ShopifyError> {
        let data = self
            .execute::<CartCreate>(cart_create::Variables { input })
            .await?;
        convert_mutation(data.cart_create, "cartCreate")
    }

    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    async fn add_lines(
        &self,
        cart_id: &CartId,
        lines: Vec<CartLineInput>,
    ) -> Result<CartMutation, ShopifyError> {
        let variables = cart_lines_add::Variables {
            cart_id: cart_id.clone(),
            lines,
        };
        let data = self.execute::<CartLinesAdd>(variables).await?;
        convert_mutation(data.cart_lines_add, "cartLinesAdd")
    }

    #[instrument(skip(self, line_ids), fields(cart_id = %cart_id))]
    async fn remove_lines(
        &self,
        cart_id: &CartId,
        line_ids: Vec<CartLineId>,
    ) -> Result<CartMutation, ShopifyError> {
        let variables = cart_lines_remove::Variables {
            cart_id: cart_id.clone(),
            line_ids,
        };
        let data = self.execute::<CartLinesRemove>(variables).await?;
        convert_mutation(data.cart_lines_remove, "cartLinesRemove")
    }

    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    async fn update_lines(
        &self,
        cart_id: &CartId,
        lines: Vec<CartLineUpdateInput>,
    ) -> Result<CartMutation, ShopifyError> {
        let variables = cart_lines_update::Variables {
            cart_id: cart_id.clone(),
            lines,
        };
        let data = self.execute::<CartLinesUpdate>(variables).await?;
        convert_mutation(data.cart_lines_update, "cartLinesUpdate")
    }

    #[instrument(skip(self, discount_codes), fields(cart_id = %cart_id))]
    async fn update_discount_codes(
        &self,
        cart_id: &CartId,
        discount_codes: Vec<String>,
    ) -> Result<CartMutation, ShopifyError> {
        let variables = cart_discount_codes_update::Variables {
            cart_id: cart_id.clone(),
            discount_codes,
        };
        let data = self.execute::<CartDiscountCodesUpdate>(variables).await?;
        convert_mutation(data.cart_discount_codes_update, "cartDiscountCodesUpdate")
    }

    #[instrument(skip(self, buyer_identity), fields(cart_id = %cart_id))]
    async fn update_buyer_identity(
        &self,
        cart_id: &CartId,
        buyer_identity: CartBuyerIdentityInput,
    ) -> Result<CartMutation, ShopifyError> {
        let variables = cart_buyer_identity_update::Variables {
            cart_id: cart_id.clone(),
            buyer_identity,
        };
        let data = self.execute::<CartBuyerIdentityUpdate>(variables).await?;
        convert_mutation(data.cart_buyer_identity_update, "cartBuyerIdentityUpdate")
    }
}

fn convert_graphql_error(e: graphql_client::Error) -> GraphQLError {
    GraphQLError {
        message: e.message,
        locations: e.locations.map_or_else(Vec::new, |locs| {
            locs.into_iter()
                .map(|l| GraphQLErrorLocation {
                    line: i64::from(l.line),
                    column: i64::from(l.column),
                })
                .collect()
        }),
        path: e.path.map_or_else(Vec::new, |p| {
            p.into_iter()
                .map(|fragment| match fragment {
                    graphql_client::PathFragment::Key(s) => serde_json::Value::String(s),
                    graphql_client::PathFragment::Index(i) => serde_json::Value::Number(i.into()),
                })
                .collect()
        }),
    }
}

/// First `limit` characters of a response body.
fn excerpt(body: &str, limit: usize) -> String {
    body.chars().take(limit).collect()
}
