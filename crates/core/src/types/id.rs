//! Newtype IDs for Shopify global identifiers.
//!
//! Shopify identifies every object with an opaque global id string
//! (e.g. `gid://shopify/Cart/c1-abc?key=123`). Use the `define_gid!` macro to
//! create type-safe wrappers that prevent accidentally passing a cart line id
//! where a cart id is expected.

/// Prefix shared by all Shopify global ids.
pub const GID_PREFIX: &str = "gid://shopify/";

/// Macro to define a type-safe Shopify global id wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`, `resource_type()`
/// - `From<String>`, `From<&str>` and `Into<String>` implementations
///
/// # Example
///
/// ```rust
/// # use tahuu_core::define_gid;
/// define_gid!(CartId);
/// define_gid!(CartLineId);
///
/// let cart = CartId::new("gid://shopify/Cart/1");
/// let line = CartLineId::new("gid://shopify/CartLine/1");
///
/// assert_eq!(cart.resource_type(), Some("Cart"));
/// // These are different types, so this won't compile:
/// // let _: CartId = line;
/// ```
#[macro_export]
macro_rules! define_gid {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a global id string.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the underlying id string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the id string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }

            /// The object type segment of the id (`Cart` for
            /// `gid://shopify/Cart/abc`), if the id is a Shopify gid.
            #[must_use]
            pub fn resource_type(&self) -> Option<&str> {
                self.0
                    .strip_prefix($crate::types::id::GID_PREFIX)
                    .and_then(|rest| rest.split('/').next())
                    .filter(|segment| !segment.is_empty())
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_gid!(CartId);
define_gid!(CartLineId);
define_gid!(MerchandiseId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_type() {
        let id = CartId::new("gid://shopify/Cart/c1-7f3a?key=abc");
        assert_eq!(id.resource_type(), Some("Cart"));

        let id = MerchandiseId::new("gid://shopify/ProductVariant/44457543860544");
        assert_eq!(id.resource_type(), Some("ProductVariant"));
    }

    #[test]
    fn test_resource_type_not_a_gid() {
        assert_eq!(CartId::new("abc").resource_type(), None);
        assert_eq!(CartId::new("gid://shopify/").resource_type(), None);
    }

    #[test]
    fn test_serde_transparent() {
        let id = CartLineId::new("gid://shopify/CartLine/1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"gid://shopify/CartLine/1\"");

        let back: CartLineId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_display() {
        let id = CartId::from("gid://shopify/Cart/1");
        assert_eq!(id.to_string(), "gid://shopify/Cart/1");
        assert_eq!(String::from(id), "gid://shopify/Cart/1");
    }
}
