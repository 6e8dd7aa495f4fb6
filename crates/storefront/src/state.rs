//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::shopify::StorefrontClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    storefront: StorefrontClient,
}

impl AppState {
    /// Create a new application state, building the Storefront API client
    /// from the configuration.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let storefront = StorefrontClient::new(&config.shopify, config.product_cache_ttl);

        Self {
            inner: Arc::new(AppStateInner { config, storefront }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the Shopify Storefront API client.
    #[must_use]
    pub fn storefront(&self) -> &StorefrontClient {
        &self.inner.storefront
    }
}
