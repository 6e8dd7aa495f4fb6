//! Cart type conversion functions.

use tracing::warn;

use crate::shopify::ShopifyError;
use crate::shopify::types::{Cart, CartLine, CartMutation};

use super::super::queries::cart_fields::{
    CartFields, CartLineNode, CartMutationPayload, Merchandise,
};

/// Convert the `CartFields` fragment into a domain cart.
pub fn convert_cart(cart: CartFields) -> Cart {
    Cart {
        id: cart.id,
        checkout_url: cart.checkout_url,
        total_quantity: cart.total_quantity,
        note: cart.note,
        buyer_identity: cart.buyer_identity,
        cost: cart.cost,
        discount_codes: cart.discount_codes,
        attributes: cart.attributes,
        lines: cart
            .lines
            .nodes
            .into_iter()
            .filter_map(convert_cart_line)
            .collect(),
    }
}

fn convert_cart_line(line: CartLineNode) -> Option<CartLine> {
    match line.merchandise {
        Merchandise::ProductVariant(merchandise) => Some(CartLine {
            id: line.id,
            quantity: line.quantity,
            attributes: line.attributes,
            cost: line.cost,
            merchandise,
        }),
        Merchandise::Other => {
            warn!(line_id = %line.id, "Skipping cart line with non-variant merchandise");
            None
        }
    }
}

/// Convert a cart mutation payload.
///
/// User errors ride along with the cart. A payload without a cart is an
/// error: `UserError` when the platform explained why, otherwise
/// `MalformedResponse`.
pub fn convert_mutation(
    payload: Option<CartMutationPayload>,
    operation: &str,
) -> Result<CartMutation, ShopifyError> {
    let payload = payload.ok_or_else(|| {
        ShopifyError::MalformedResponse(format!("{operation} returned no payload"))
    })?;

    match payload.cart {
        Some(cart) => Ok(CartMutation {
            cart: convert_cart(cart),
            errors: payload.errors,
        }),
        None if !payload.errors.is_empty() => Err(ShopifyError::UserError(
            payload
                .errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; "),
        )),
        None => Err(ShopifyError::MalformedResponse(format!(
            "{operation} returned no cart"
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn money(amount: &str) -> serde_json::Value {
        serde_json::json!({"amount": amount, "currencyCode": "USD"})
    }

    fn cart_json(lines: Vec<serde_json::Value>) -> serde_json::Value {
        serde_json::json!({
            "id": "gid://shopify/Cart/c1-abc?key=123",
            "checkoutUrl": "https://tahuu.myshopify.com/cart/c/c1-abc",
            "totalQuantity": 2,
            "note": null,
            "buyerIdentity": {"email": null, "phone": null, "countryCode": "US", "customer": null},
            "lines": {"nodes": lines},
            "cost": {
                "subtotalAmount": money("24.0"),
                "totalAmount": money("24.0"),
                "totalTaxAmount": null,
                "totalDutyAmount": null
            },
            "discountCodes": [],
            "attributes": []
        })
    }

    fn variant_line() -> serde_json::Value {
        serde_json::json!({
            "id": "gid://shopify/CartLine/1",
            "quantity": 2,
            "attributes": [],
            "cost": {
                "amountPerQuantity": money("12.0"),
                "compareAtAmountPerQuantity": null,
                "totalAmount": money("24.0")
            },
            "merchandise": {
                "__typename": "ProductVariant",
                "id": "gid://shopify/ProductVariant/2",
                "title": "Default Title",
                "availableForSale": true,
                "price": money("12.0"),
                "image": null,
                "product": {"id": "gid://shopify/Product/3", "handle": "70-dark-chocolate", "title": "70% Dark"},
                "selectedOptions": []
            }
        })
    }

    #[test]
    fn test_convert_cart_flattens_lines() {
        let raw: CartFields = serde_json::from_value(cart_json(vec![variant_line()])).unwrap();
        let cart = convert_cart(raw);

        assert_eq!(cart.id.as_str(), "gid://shopify/Cart/c1-abc?key=123");
        assert_eq!(cart.total_quantity, 2);
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].merchandise.product.handle, "70-dark-chocolate");
        assert_eq!(cart.cost.total_amount.display(), "$24.00");
    }

    #[test]
    fn test_convert_cart_skips_non_variant_merchandise() {
        let other = serde_json::json!({
            "id": "gid://shopify/CartLine/2",
            "quantity": 1,
            "attributes": [],
            "cost": {
                "amountPerQuantity": money("5.0"),
                "compareAtAmountPerQuantity": null,
                "totalAmount": money("5.0")
            },
            "merchandise": {"__typename": "GiftCard"}
        });
        let raw: CartFields =
            serde_json::from_value(cart_json(vec![variant_line(), other])).unwrap();

        let cart = convert_cart(raw);
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].id.as_str(), "gid://shopify/CartLine/1");
    }

    #[test]
    fn test_convert_mutation_keeps_user_errors() {
        let payload: CartMutationPayload = serde_json::from_value(serde_json::json!({
            "cart": cart_json(vec![]),
            "errors": [{"code": "INVALID", "field": ["discountCodes"], "message": "Code invalid"}]
        }))
        .unwrap();

        let result = convert_mutation(Some(payload), "cartDiscountCodesUpdate").unwrap();
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].message, "Code invalid");
        assert!(result.cart.lines.is_empty());
    }

    #[test]
    fn test_convert_mutation_without_cart() {
        let payload: CartMutationPayload = serde_json::from_value(serde_json::json!({
            "cart": null,
            "errors": [{"code": null, "field": null, "message": "Merchandise does not exist"}]
        }))
        .unwrap();
        let err = convert_mutation(Some(payload), "cartCreate").unwrap_err();
        assert!(matches!(err, ShopifyError::UserError(msg) if msg == "Merchandise does not exist"));

        let payload: CartMutationPayload =
            serde_json::from_value(serde_json::json!({"cart": null, "errors": []})).unwrap();
        let err = convert_mutation(Some(payload), "cartCreate").unwrap_err();
        assert!(matches!(err, ShopifyError::MalformedResponse(_)));

        let err = convert_mutation(None, "cartLinesAdd").unwrap_err();
        assert!(matches!(err, ShopifyError::MalformedResponse(msg) if msg.contains("cartLinesAdd")));
    }
}
