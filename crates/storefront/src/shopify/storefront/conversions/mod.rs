//! Type conversion functions for Shopify Storefront API responses.

pub mod cart;
pub mod layout;
pub mod products;

pub use cart::{convert_cart, convert_mutation};
pub use layout::normalize_layout;
pub use products::{convert_product, convert_product_list};
