//! Domain types for Shopify Storefront API.
//!
//! These types provide a clean, ergonomic API separate from the raw
//! response shapes declared in `storefront::queries`. They serialize with the
//! platform's camelCase field names so the cart JSON returned to the browser
//! looks like the Storefront API's own `Cart`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tahuu_core::{CartId, CartLineId, MerchandiseId, Price};

// =============================================================================
// Money Types
// =============================================================================

/// Monetary amount with currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    /// Decimal amount as string (preserves precision).
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl Money {
    /// Parse into a decimal price.
    #[must_use]
    pub fn price(&self) -> Option<Price> {
        Price::parse(&self.amount, &self.currency_code).ok()
    }

    /// Amount without currency (e.g., "35.00"), falling back to the raw string.
    #[must_use]
    pub fn amount_display(&self) -> String {
        self.price()
            .map_or_else(|| self.amount.clone(), |price| price.amount_display())
    }

    /// Amount with currency symbol (e.g., "$35.00").
    #[must_use]
    pub fn display(&self) -> String {
        self.price()
            .map_or_else(|| format!("${}", self.amount), |price| price.to_string())
    }
}

/// Price range for a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    /// Maximum price among all variants.
    pub max_variant_price: Money,
}

// =============================================================================
// Image Types
// =============================================================================

/// Product, media or metaobject image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    pub alt_text: Option<String>,
    /// Image width in pixels.
    pub width: Option<i64>,
    /// Image height in pixels.
    pub height: Option<i64>,
}

impl Image {
    /// Alt text or the empty string.
    #[must_use]
    pub fn alt(&self) -> &str {
        self.alt_text.as_deref().unwrap_or_default()
    }
}

// =============================================================================
// Layout Types
// =============================================================================

/// Site layout content, normalized from the `main-layout` metaobject.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Layout {
    /// Full-page background image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<Image>,
    /// Shop logo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<Image>,
    /// Navigation tiles.
    pub nav_links: Vec<NavLink>,
}

/// A value copied out of a metaobject field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// `single_line_text_field` value.
    Text(String),
    /// `file_reference` resolved to its image.
    Image(Image),
}

/// A navigation entry: the fields of one `nav_link` metaobject keyed by field key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NavLink {
    fields: BTreeMap<String, FieldValue>,
}

impl NavLink {
    /// Build a nav link from normalized fields.
    #[must_use]
    pub const fn new(fields: BTreeMap<String, FieldValue>) -> Self {
        Self { fields }
    }

    /// Look up a field by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    fn text(&self, key: &str) -> Option<&str> {
        match self.fields.get(key) {
            Some(FieldValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    /// Link target.
    #[must_use]
    pub fn href(&self) -> &str {
        self.text("href").unwrap_or("#")
    }

    /// Link label.
    #[must_use]
    pub fn name(&self) -> &str {
        self.text("name").unwrap_or_default()
    }

    /// Link tile image.
    #[must_use]
    pub fn image(&self) -> Option<&Image> {
        match self.fields.get("image") {
            Some(FieldValue::Image(image)) => Some(image),
            _ => None,
        }
    }
}

// =============================================================================
// Product Types
// =============================================================================

/// A product as shown in the listing grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    /// URL handle.
    pub handle: String,
    /// Product title.
    pub title: String,
    /// Whether any variant can be purchased.
    pub available_for_sale: bool,
    /// Price range.
    pub price_range: PriceRange,
    /// Featured image.
    pub featured_image: Option<Image>,
}

/// A purchasable product variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    /// Variant ID (the cart line merchandise ID).
    pub id: MerchandiseId,
    /// Variant price.
    pub price: Money,
    /// Stock keeping unit.
    pub sku: Option<String>,
}

/// A product detail record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// URL handle.
    pub handle: String,
    /// Product title.
    pub title: String,
    /// Plain-text description.
    pub description: String,
    /// Whether any variant can be purchased.
    pub available_for_sale: bool,
    /// Price range.
    pub price_range: PriceRange,
    /// Units in stock across variants, when tracked.
    pub total_inventory: Option<i64>,
    /// Variants (the query requests the first one).
    pub variants: Vec<ProductVariant>,
    /// Featured image.
    pub featured_image: Option<Image>,
}

impl Product {
    /// The variant added to the cart from the product page.
    #[must_use]
    pub fn first_variant(&self) -> Option<&ProductVariant> {
        self.variants.first()
    }
}

// =============================================================================
// Cart Types
// =============================================================================

/// Custom key-value attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute key.
    pub key: String,
    /// Attribute value.
    pub value: Option<String>,
}

/// Selected option on a product variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedOption {
    /// Option name (e.g., "Size").
    pub name: String,
    /// Selected value (e.g., "18 pieces").
    pub value: String,
}

/// Product reference on cart merchandise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartMerchandiseProduct {
    /// Product ID.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Product title.
    pub title: String,
}

/// Product variant in a cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMerchandise {
    /// Variant ID.
    pub id: MerchandiseId,
    /// Variant title ("Default Title" for single-variant products).
    pub title: String,
    /// Whether the variant is available.
    pub available_for_sale: bool,
    /// Variant price.
    pub price: Money,
    /// Variant image.
    pub image: Option<Image>,
    /// Parent product.
    pub product: CartMerchandiseProduct,
    /// Selected options.
    pub selected_options: Vec<SelectedOption>,
}

/// Cost for a cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineCost {
    /// Price per unit.
    pub amount_per_quantity: Money,
    /// Compare-at price per unit.
    pub compare_at_amount_per_quantity: Option<Money>,
    /// Total (after discounts).
    pub total_amount: Money,
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Cart line ID.
    pub id: CartLineId,
    /// Quantity.
    pub quantity: i64,
    /// Custom attributes.
    pub attributes: Vec<Attribute>,
    /// Line cost.
    pub cost: CartLineCost,
    /// Product variant.
    pub merchandise: CartMerchandise,
}

/// Cart cost summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCost {
    /// Subtotal before tax/shipping.
    pub subtotal_amount: Money,
    /// Total amount.
    pub total_amount: Money,
    /// Total tax amount.
    pub total_tax_amount: Option<Money>,
    /// Total duty amount.
    pub total_duty_amount: Option<Money>,
}

/// Discount code applied to cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartDiscountCode {
    /// The discount code.
    pub code: String,
    /// Whether the code is applicable.
    pub applicable: bool,
}

/// Customer info in buyer identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCustomer {
    /// Customer ID.
    pub id: String,
    /// Email.
    pub email: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Display name.
    pub display_name: Option<String>,
}

/// Buyer identity for the cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartBuyerIdentity {
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Country code.
    pub country_code: Option<String>,
    /// Logged-in customer.
    pub customer: Option<CartCustomer>,
}

/// A shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Cart ID.
    pub id: CartId,
    /// Checkout URL.
    pub checkout_url: String,
    /// Total item quantity.
    pub total_quantity: i64,
    /// Cart note.
    pub note: Option<String>,
    /// Buyer identity.
    pub buyer_identity: CartBuyerIdentity,
    /// Cart cost summary.
    pub cost: CartCost,
    /// Applied discount codes.
    pub discount_codes: Vec<CartDiscountCode>,
    /// Custom attributes.
    pub attributes: Vec<Attribute>,
    /// Cart lines.
    pub lines: Vec<CartLine>,
}

/// User error from cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartUserError {
    /// Error code.
    pub code: Option<String>,
    /// Field path that caused the error.
    pub field: Option<Vec<String>>,
    /// Human-readable error message.
    pub message: String,
}

/// Result of a cart mutation: the updated cart and any user errors.
#[derive(Debug, Clone)]
pub struct CartMutation {
    /// The cart after the mutation.
    pub cart: Cart,
    /// Errors the platform reported for the submitted input.
    pub errors: Vec<CartUserError>,
}

// =============================================================================
// Cart Inputs
// =============================================================================

/// Custom attribute input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeInput {
    /// Attribute key.
    pub key: String,
    /// Attribute value.
    pub value: String,
}

/// Input for adding a line to cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    /// Product variant ID.
    pub merchandise_id: MerchandiseId,
    /// Quantity to add.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    /// Custom attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<AttributeInput>>,
    /// Selling plan ID (for subscriptions).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selling_plan_id: Option<String>,
}

/// Input for updating a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineUpdateInput {
    /// Cart line ID.
    pub id: CartLineId,
    /// New quantity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    /// New merchandise ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchandise_id: Option<MerchandiseId>,
    /// New attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<AttributeInput>>,
    /// New selling plan ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selling_plan_id: Option<String>,
}

/// Buyer identity input for cart creation and updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartBuyerIdentityInput {
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Country code used for pricing context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    /// Customer access token associating the cart with a customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_access_token: Option<String>,
}

/// Input for cart creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartInput {
    /// Initial lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<CartLineInput>>,
    /// Initial buyer identity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_identity: Option<CartBuyerIdentityInput>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_money_display() {
        let money = Money {
            amount: "35.0".to_string(),
            currency_code: "USD".to_string(),
        };
        assert_eq!(money.amount_display(), "35.00");
        assert_eq!(money.display(), "$35.00");
    }

    #[test]
    fn test_money_display_unparseable_amount() {
        let money = Money {
            amount: "n/a".to_string(),
            currency_code: "USD".to_string(),
        };
        assert_eq!(money.amount_display(), "n/a");
        assert_eq!(money.display(), "$n/a");
    }

    #[test]
    fn test_cart_line_input_from_form_json() {
        let lines: Vec<CartLineInput> = serde_json::from_str(
            r#"[{"quantity":1,"merchandiseId":"gid://shopify/ProductVariant/44457543860544"}]"#,
        )
        .unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0].merchandise_id.as_str(),
            "gid://shopify/ProductVariant/44457543860544"
        );
        assert_eq!(lines[0].quantity, Some(1));

        let json = serde_json::to_value(&lines[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "merchandiseId": "gid://shopify/ProductVariant/44457543860544",
                "quantity": 1
            })
        );
    }

    #[test]
    fn test_nav_link_accessors() {
        let mut fields = BTreeMap::new();
        fields.insert("href".to_string(), FieldValue::Text("/about".to_string()));
        fields.insert("name".to_string(), FieldValue::Text("About".to_string()));
        let link = NavLink::new(fields);

        assert_eq!(link.href(), "/about");
        assert_eq!(link.name(), "About");
        assert!(link.image().is_none());
        assert_eq!(NavLink::default().href(), "#");
    }
}
