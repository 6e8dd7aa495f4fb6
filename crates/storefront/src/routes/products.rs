//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tower_sessions::Session;
use tracing::instrument;

use super::layout::{Shell, load_shell};
use crate::error::{AppError, Result};
use crate::filters;
use crate::services::cart::CartAction;
use crate::shopify::PRODUCT_LISTING_SIZE;
use crate::shopify::types::{CartLineInput, Image, Product, ProductSummary};
use crate::state::AppState;

/// Product card in the listing grid.
#[derive(Debug, Clone)]
pub struct ProductCard {
    pub handle: String,
    pub title: String,
    /// Max variant price without currency.
    pub price: String,
    pub available: bool,
    pub image: Option<Image>,
}

impl From<ProductSummary> for ProductCard {
    fn from(product: ProductSummary) -> Self {
        Self {
            price: product.price_range.max_variant_price.amount_display(),
            handle: product.handle,
            title: product.title,
            available: product.available_for_sale,
            image: product.featured_image,
        }
    }
}

/// Hidden fields of the product page's add-to-cart form.
#[derive(Debug, Clone)]
pub struct AddToCartForm {
    pub cart_action: &'static str,
    pub country_code: String,
    /// `CartLineInput` list as JSON.
    pub lines: String,
    pub redirect_to: String,
}

impl AddToCartForm {
    /// One unit of the product's first variant, or `None` when the product
    /// has no variant to sell.
    fn for_product(product: &Product, country_code: &str) -> Result<Option<Self>> {
        let Some(variant) = product.first_variant() else {
            return Ok(None);
        };

        let lines = serde_json::to_string(&[CartLineInput {
            merchandise_id: variant.id.clone(),
            quantity: Some(1),
            attributes: None,
            selling_plan_id: None,
        }])
        .map_err(|e| AppError::Internal(format!("encode cart lines: {e}")))?;

        Ok(Some(Self {
            cart_action: CartAction::AddToCart.as_str(),
            country_code: country_code.to_string(),
            lines,
            redirect_to: format!("/products/{}", product.handle),
        }))
    }
}

/// Product detail display data.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub handle: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub available: bool,
    pub image: Option<Image>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            handle: product.handle.clone(),
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price_range.max_variant_price.amount_display(),
            available: product.available_for_sale,
            image: product.featured_image.clone(),
        }
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub shell: Shell,
    pub products: Vec<ProductCard>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub shell: Shell,
    pub product: ProductView,
    pub add_to_cart: Option<AddToCartForm>,
}

/// Display product listing page.
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let (shell, products) = tokio::try_join!(load_shell(&state, &session), async {
        Ok::<_, AppError>(state.storefront().get_products(PRODUCT_LISTING_SIZE).await?)
    })?;

    Ok(ProductsIndexTemplate {
        shell,
        products: products.into_iter().map(ProductCard::from).collect(),
    })
}

/// Display product detail page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(handle): Path<String>,
) -> Result<impl IntoResponse> {
    let (shell, product) = tokio::try_join!(load_shell(&state, &session), async {
        Ok::<_, AppError>(state.storefront().get_product_by_handle(&handle).await?)
    })?;

    let add_to_cart = if product.available_for_sale {
        AddToCartForm::for_product(&product, &state.config().i18n.country)?
    } else {
        None
    };

    Ok(ProductShowTemplate {
        shell,
        product: ProductView::from(&product),
        add_to_cart,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product() -> Product {
        serde_json::from_value(serde_json::json!({
            "handle": "70-dark-chocolate",
            "title": "70% Dark Chocolate",
            "description": "The Original Chocalate.",
            "availableForSale": true,
            "priceRange": {"maxVariantPrice": {"amount": "35.0", "currencyCode": "USD"}},
            "totalInventory": 5,
            "variants": [{
                "id": "gid://shopify/ProductVariant/44457543860544",
                "price": {"amount": "35.0", "currencyCode": "USD"},
                "sku": "135668549887633"
            }],
            "featuredImage": null
        }))
        .unwrap()
    }

    #[test]
    fn test_add_to_cart_form_for_first_variant() {
        let form = AddToCartForm::for_product(&product(), "US").unwrap().unwrap();

        assert_eq!(form.cart_action, "ADD_TO_CART");
        assert_eq!(form.country_code, "US");
        assert_eq!(form.redirect_to, "/products/70-dark-chocolate");
        assert_eq!(
            form.lines,
            r#"[{"merchandiseId":"gid://shopify/ProductVariant/44457543860544","quantity":1}]"#
        );
    }

    #[test]
    fn test_add_to_cart_form_without_variants() {
        let product = Product {
            variants: Vec::new(),
            ..product()
        };
        assert!(AddToCartForm::for_product(&product, "US").unwrap().is_none());
    }

    #[test]
    fn test_product_view_price_without_currency() {
        let view = ProductView::from(&product());
        assert_eq!(view.price, "35.00");
        assert!(view.available);
    }

    #[test]
    fn test_product_card_from_summary() {
        let summary: ProductSummary = serde_json::from_value(serde_json::json!({
            "handle": "sea-salt-caramel",
            "title": "Sea Salt Caramel",
            "availableForSale": false,
            "priceRange": {"maxVariantPrice": {"amount": "28.5", "currencyCode": "USD"}},
            "featuredImage": null
        }))
        .unwrap();

        let card = ProductCard::from(summary);
        assert_eq!(card.price, "28.50");
        assert!(!card.available);
    }

    #[test]
    fn test_listing_renders_out_of_stock() {
        let page = ProductsIndexTemplate {
            shell: Shell::default(),
            products: vec![ProductCard {
                handle: "sea-salt-caramel".to_string(),
                title: "Sea Salt Caramel".to_string(),
                price: "28.50".to_string(),
                available: false,
                image: None,
            }],
        };

        let html = page.render().unwrap();
        assert!(html.contains(r#"href="/products/sea-salt-caramel""#));
        assert!(html.contains("Out of Stock"));
    }
}
