//! Tahuu Core - Shared types library.
//!
//! This crate provides the types shared by the storefront and its tests:
//! - Shopify global-id newtypes for carts, cart lines and merchandise
//! - Decimal prices parsed from Storefront API money strings
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
