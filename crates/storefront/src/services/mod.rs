//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart` - Cart action dispatch (form validation, one Shopify mutation,
//!   session update)

pub mod cart;
