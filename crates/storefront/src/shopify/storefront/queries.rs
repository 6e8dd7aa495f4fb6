//! GraphQL operation definitions for Shopify Storefront API.
//!
//! Documents live in `graphql/storefront/queries/`. Each operation is a unit
//! struct implementing [`GraphQLQuery`], with its variables and response
//! shapes in a snake_case module named after it (`GetLayout` →
//! [`get_layout`]). Response shapes mirror the selection sets exactly.

use graphql_client::{GraphQLQuery, QueryBody};

const LAYOUT_DOCUMENT: &str = include_str!("../../../graphql/storefront/queries/layout.graphql");
const PRODUCTS_DOCUMENT: &str =
    include_str!("../../../graphql/storefront/queries/products.graphql");
const CART_DOCUMENT: &str = include_str!("../../../graphql/storefront/queries/cart.graphql");

/// Declare an operation struct bound to a document and a shape module.
///
/// The operation name sent to Shopify is the struct name, so it must match
/// the `query`/`mutation` name in the document.
macro_rules! storefront_operation {
    ($(#[$meta:meta])* $name:ident, $module:ident, $document:expr) => {
        $(#[$meta])*
        pub struct $name;

        impl GraphQLQuery for $name {
            type Variables = $module::Variables;
            type ResponseData = $module::ResponseData;

            fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
                QueryBody {
                    variables,
                    query: $document,
                    operation_name: stringify!($name),
                }
            }
        }
    };
}

// Layout
storefront_operation!(
    /// Main layout metaobject.
    GetLayout,
    get_layout,
    LAYOUT_DOCUMENT
);

// Product queries
storefront_operation!(
    /// Product listing.
    GetProducts,
    get_products,
    PRODUCTS_DOCUMENT
);
storefront_operation!(
    /// Product detail by handle.
    GetProductByHandle,
    get_product_by_handle,
    PRODUCTS_DOCUMENT
);

// Cart mutations and queries
storefront_operation!(GetCart, get_cart, CART_DOCUMENT);
storefront_operation!(CartCreate, cart_create, CART_DOCUMENT);
storefront_operation!(CartLinesAdd, cart_lines_add, CART_DOCUMENT);
storefront_operation!(CartLinesRemove, cart_lines_remove, CART_DOCUMENT);
storefront_operation!(CartLinesUpdate, cart_lines_update, CART_DOCUMENT);
storefront_operation!(
    CartDiscountCodesUpdate,
    cart_discount_codes_update,
    CART_DOCUMENT
);
storefront_operation!(
    CartBuyerIdentityUpdate,
    cart_buyer_identity_update,
    CART_DOCUMENT
);

pub mod get_layout {
    use serde::{Deserialize, Serialize};

    use crate::shopify::types::Image;

    #[derive(Debug, Clone, Default, Serialize)]
    pub struct Variables {}

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub layout: Option<Metaobject>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Metaobject {
        pub fields: Vec<MetaobjectField>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct MetaobjectField {
        #[serde(rename = "type")]
        pub field_type: String,
        pub key: String,
        pub reference: Option<FieldReference>,
        pub references: Option<FieldReferences>,
    }

    /// `reference` union, narrowed to what the query selects.
    #[derive(Debug, Clone, Deserialize)]
    #[serde(tag = "__typename")]
    pub enum FieldReference {
        MediaImage { image: Option<Image> },
        #[serde(other)]
        Other,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct FieldReferences {
        pub nodes: Vec<ReferenceNode>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(tag = "__typename")]
    pub enum ReferenceNode {
        Metaobject(NestedMetaobject),
        #[serde(other)]
        Other,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct NestedMetaobject {
        pub handle: String,
        #[serde(rename = "type")]
        pub metaobject_type: String,
        pub fields: Vec<NestedMetaobjectField>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct NestedMetaobjectField {
        #[serde(rename = "type")]
        pub field_type: String,
        pub key: String,
        pub value: Option<String>,
        pub reference: Option<FieldReference>,
    }
}

pub mod get_products {
    use serde::{Deserialize, Serialize};

    use crate::shopify::types::{Image, PriceRange};

    #[derive(Debug, Clone, Default, Serialize)]
    pub struct Variables {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub first: Option<i64>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub products: ProductConnection,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductConnection {
        pub nodes: Vec<ProductNode>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductNode {
        pub handle: String,
        pub title: String,
        pub available_for_sale: bool,
        pub price_range: PriceRange,
        pub featured_image: Option<Image>,
    }
}

pub mod get_product_by_handle {
    use serde::{Deserialize, Serialize};
    use tahuu_core::MerchandiseId;

    use crate::shopify::types::{Image, Money, PriceRange};

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub handle: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub product: Option<ProductNode>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductNode {
        pub handle: String,
        pub title: String,
        pub description: String,
        pub available_for_sale: bool,
        pub price_range: PriceRange,
        pub total_inventory: Option<i64>,
        pub variants: VariantConnection,
        pub featured_image: Option<Image>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct VariantConnection {
        pub nodes: Vec<VariantNode>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct VariantNode {
        pub id: MerchandiseId,
        pub price: Money,
        pub sku: Option<String>,
    }
}

/// Shapes of the `CartFields` and `CartUserErrorFields` fragments.
pub mod cart_fields {
    use serde::Deserialize;
    use tahuu_core::{CartId, CartLineId};

    use crate::shopify::types::{
        Attribute, CartBuyerIdentity, CartCost, CartDiscountCode, CartLineCost, CartMerchandise,
        CartUserError,
    };

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CartFields {
        pub id: CartId,
        pub checkout_url: String,
        pub total_quantity: i64,
        pub note: Option<String>,
        pub buyer_identity: CartBuyerIdentity,
        pub lines: CartLineConnection,
        pub cost: CartCost,
        pub discount_codes: Vec<CartDiscountCode>,
        pub attributes: Vec<Attribute>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CartLineConnection {
        pub nodes: Vec<CartLineNode>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CartLineNode {
        pub id: CartLineId,
        pub quantity: i64,
        pub attributes: Vec<Attribute>,
        pub cost: CartLineCost,
        pub merchandise: Merchandise,
    }

    /// `Merchandise` union, narrowed to what the fragment selects.
    #[derive(Debug, Clone, Deserialize)]
    #[serde(tag = "__typename")]
    pub enum Merchandise {
        ProductVariant(CartMerchandise),
        #[serde(other)]
        Other,
    }

    /// Common payload of every cart mutation (`errors` aliases `userErrors`).
    #[derive(Debug, Clone, Deserialize)]
    pub struct CartMutationPayload {
        pub cart: Option<CartFields>,
        #[serde(default)]
        pub errors: Vec<CartUserError>,
    }
}

pub mod get_cart {
    use serde::{Deserialize, Serialize};
    use tahuu_core::CartId;

    pub use super::cart_fields::CartFields;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: CartId,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub country: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub language: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub cart: Option<CartFields>,
    }
}

pub mod cart_create {
    use serde::{Deserialize, Serialize};

    pub use super::cart_fields::CartMutationPayload;
    use crate::shopify::types::CartInput;

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub input: CartInput,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_create: Option<CartMutationPayload>,
    }
}

pub mod cart_lines_add {
    use serde::{Deserialize, Serialize};
    use tahuu_core::CartId;

    pub use super::cart_fields::CartMutationPayload;
    use crate::shopify::types::CartLineInput;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: CartId,
        pub lines: Vec<CartLineInput>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_lines_add: Option<CartMutationPayload>,
    }
}

pub mod cart_lines_remove {
    use serde::{Deserialize, Serialize};
    use tahuu_core::{CartId, CartLineId};

    pub use super::cart_fields::CartMutationPayload;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: CartId,
        pub line_ids: Vec<CartLineId>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_lines_remove: Option<CartMutationPayload>,
    }
}

pub mod cart_lines_update {
    use serde::{Deserialize, Serialize};
    use tahuu_core::CartId;

    pub use super::cart_fields::CartMutationPayload;
    use crate::shopify::types::CartLineUpdateInput;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: CartId,
        pub lines: Vec<CartLineUpdateInput>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_lines_update: Option<CartMutationPayload>,
    }
}

pub mod cart_discount_codes_update {
    use serde::{Deserialize, Serialize};
    use tahuu_core::CartId;

    pub use super::cart_fields::CartMutationPayload;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: CartId,
        pub discount_codes: Vec<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_discount_codes_update: Option<CartMutationPayload>,
    }
}

pub mod cart_buyer_identity_update {
    use serde::{Deserialize, Serialize};
    use tahuu_core::CartId;

    pub use super::cart_fields::CartMutationPayload;
    use crate::shopify::types::CartBuyerIdentityInput;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: CartId,
        pub buyer_identity: CartBuyerIdentityInput,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_buyer_identity_update: Option<CartMutationPayload>,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tahuu_core::{CartId, CartLineId, MerchandiseId};

    use super::*;
    use crate::shopify::types::CartLineInput;

    #[test]
    fn test_operation_names_exist_in_documents() {
        let cases = [
            (GetLayout::build_query(get_layout::Variables {}).operation_name, LAYOUT_DOCUMENT),
            (
                GetProducts::build_query(get_products::Variables::default()).operation_name,
                PRODUCTS_DOCUMENT,
            ),
            (
                GetProductByHandle::build_query(get_product_by_handle::Variables {
                    handle: "70-dark-chocolate".to_string(),
                })
                .operation_name,
                PRODUCTS_DOCUMENT,
            ),
        ];

        for (name, document) in cases {
            assert!(
                document.contains(&format!("query {name}")),
                "{name} missing from document"
            );
        }

        for name in [
            "CartCreate",
            "CartLinesAdd",
            "CartLinesRemove",
            "CartLinesUpdate",
            "CartDiscountCodesUpdate",
            "CartBuyerIdentityUpdate",
        ] {
            assert!(CART_DOCUMENT.contains(&format!("mutation {name}(")));
        }
        assert!(CART_DOCUMENT.contains("query GetCart("));
    }

    #[test]
    fn test_lines_add_variables_use_platform_names() {
        let body = CartLinesAdd::build_query(cart_lines_add::Variables {
            cart_id: CartId::new("gid://shopify/Cart/1"),
            lines: vec![CartLineInput {
                merchandise_id: MerchandiseId::new("gid://shopify/ProductVariant/2"),
                quantity: Some(1),
                attributes: None,
                selling_plan_id: None,
            }],
        });

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["operationName"], "CartLinesAdd");
        assert_eq!(
            json["variables"],
            serde_json::json!({
                "cartId": "gid://shopify/Cart/1",
                "lines": [{"merchandiseId": "gid://shopify/ProductVariant/2", "quantity": 1}]
            })
        );
    }

    #[test]
    fn test_lines_remove_variables() {
        let body = CartLinesRemove::build_query(cart_lines_remove::Variables {
            cart_id: CartId::new("gid://shopify/Cart/1"),
            line_ids: vec![CartLineId::new("gid://shopify/CartLine/9")],
        });
        let json = serde_json::to_value(&body.variables).unwrap();
        assert_eq!(json["lineIds"][0], "gid://shopify/CartLine/9");
    }

    #[test]
    fn test_get_cart_omits_missing_context() {
        let body = GetCart::build_query(get_cart::Variables {
            cart_id: CartId::new("gid://shopify/Cart/1"),
            country: None,
            language: Some("EN".to_string()),
        });
        let json = serde_json::to_value(&body.variables).unwrap();
        assert!(json.get("country").is_none());
        assert_eq!(json["language"], "EN");
    }

    #[test]
    fn test_layout_variables_serialize_as_object() {
        let body = GetLayout::build_query(get_layout::Variables {});
        let json = serde_json::to_value(&body.variables).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn test_mutation_payload_errors_default_empty() {
        let data: cart_create::ResponseData =
            serde_json::from_str(r#"{"cartCreate": {"cart": null}}"#).unwrap();
        let payload = data.cart_create.unwrap();
        assert!(payload.cart.is_none());
        assert!(payload.errors.is_empty());
    }
}
