//! Product type conversion functions.

use crate::shopify::types::{Product, ProductSummary, ProductVariant};

use super::super::queries::{get_product_by_handle, get_products};

// =============================================================================
// get_products conversions
// =============================================================================

pub fn convert_product_list(conn: get_products::ProductConnection) -> Vec<ProductSummary> {
    conn.nodes.into_iter().map(convert_product_summary).collect()
}

fn convert_product_summary(p: get_products::ProductNode) -> ProductSummary {
    ProductSummary {
        handle: p.handle,
        title: p.title,
        available_for_sale: p.available_for_sale,
        price_range: p.price_range,
        featured_image: p.featured_image,
    }
}

// =============================================================================
// get_product_by_handle conversions
// =============================================================================

pub fn convert_product(p: get_product_by_handle::ProductNode) -> Product {
    Product {
        handle: p.handle,
        title: p.title,
        description: p.description,
        available_for_sale: p.available_for_sale,
        price_range: p.price_range,
        total_inventory: p.total_inventory,
        variants: p
            .variants
            .nodes
            .into_iter()
            .map(|v| ProductVariant {
                id: v.id,
                price: v.price,
                sku: v.sku,
            })
            .collect(),
        featured_image: p.featured_image,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_product_detail() {
        let data: get_product_by_handle::ResponseData = serde_json::from_value(serde_json::json!({
            "product": {
                "handle": "70-dark-chocolate",
                "title": "70% Dark Chocolate",
                "description": "Single origin cacao.",
                "availableForSale": true,
                "priceRange": {"maxVariantPrice": {"amount": "12.0", "currencyCode": "USD"}},
                "totalInventory": 42,
                "variants": {"nodes": [{
                    "id": "gid://shopify/ProductVariant/44457543860544",
                    "price": {"amount": "12.0", "currencyCode": "USD"},
                    "sku": null
                }]},
                "featuredImage": null
            }
        }))
        .unwrap();

        let product = convert_product(data.product.unwrap());
        assert_eq!(product.title, "70% Dark Chocolate");
        assert_eq!(product.total_inventory, Some(42));
        assert_eq!(product.price_range.max_variant_price.display(), "$12.00");
        assert_eq!(
            product.first_variant().unwrap().id.as_str(),
            "gid://shopify/ProductVariant/44457543860544"
        );
    }

    #[test]
    fn test_convert_product_list_keeps_order() {
        let data: get_products::ResponseData = serde_json::from_value(serde_json::json!({
            "products": {"nodes": [
                {
                    "handle": "a", "title": "A", "availableForSale": true,
                    "priceRange": {"maxVariantPrice": {"amount": "1.0", "currencyCode": "USD"}},
                    "featuredImage": {"url": "https://cdn.shopify.com/a.png", "altText": null, "width": 10, "height": 10}
                },
                {
                    "handle": "b", "title": "B", "availableForSale": false,
                    "priceRange": {"maxVariantPrice": {"amount": "2.0", "currencyCode": "USD"}},
                    "featuredImage": null
                }
            ]}
        }))
        .unwrap();

        let products = convert_product_list(data.products);
        let handles: Vec<_> = products.iter().map(|p| p.handle.as_str()).collect();
        assert_eq!(handles, ["a", "b"]);
        assert!(!products[1].available_for_sale);
        assert!(products[0].featured_image.is_some());
    }
}
