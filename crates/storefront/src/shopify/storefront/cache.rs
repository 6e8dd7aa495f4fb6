//! Cache types for Storefront API responses.

use crate::shopify::types::{Product, ProductSummary};

/// Cache key for product reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(String),
    Products { first: i64 },
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(Vec<ProductSummary>),
}
