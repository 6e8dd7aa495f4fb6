//! Cart route handlers.
//!
//! `GET /cart` renders the session's cart; every form on that page posts
//! back to `POST /cart` with `redirectTo=/cart`, which runs the cart action
//! dispatcher.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use super::layout::{Shell, load_shell};
use crate::error::{AppError, Result};
use crate::filters;
use crate::services::cart::{self, CartAction, CartActionOutcome, CartForm};
use crate::shopify::types::{Cart, CartLine, CartLineUpdateInput, Image};
use crate::state::AppState;

/// Where cart page forms send the browser afterwards.
const CART_PATH: &str = "/cart";

/// One cart line with its pre-encoded form payloads.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub product_handle: String,
    pub product_title: String,
    /// Variant title, omitted for single-variant products.
    pub variant_title: Option<String>,
    pub quantity: i64,
    pub line_total: String,
    pub image: Option<Image>,
    /// `linesIds` JSON for the remove form.
    pub remove_ids: String,
    /// `lines` JSON for the quantity forms.
    pub decrement_lines: String,
    pub increment_lines: String,
}

impl CartLineView {
    fn from_line(line: &CartLine) -> Result<Self> {
        let variant_title = Some(line.merchandise.title.clone())
            .filter(|title| title != "Default Title");

        Ok(Self {
            product_handle: line.merchandise.product.handle.clone(),
            product_title: line.merchandise.product.title.clone(),
            variant_title,
            quantity: line.quantity,
            line_total: line.cost.total_amount.display(),
            image: line.merchandise.image.clone(),
            remove_ids: encode(&[&line.id])?,
            decrement_lines: quantity_lines(line, line.quantity - 1)?,
            increment_lines: quantity_lines(line, line.quantity + 1)?,
        })
    }
}

/// Cart page display data.
#[derive(Debug, Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
    pub total: String,
    pub discount_code: String,
    pub checkout_url: String,
}

impl CartView {
    fn from_cart(cart: &Cart) -> Result<Self> {
        Ok(Self {
            lines: cart
                .lines
                .iter()
                .map(CartLineView::from_line)
                .collect::<Result<_>>()?,
            subtotal: cart.cost.subtotal_amount.display(),
            total: cart.cost.total_amount.display(),
            discount_code: cart
                .discount_codes
                .first()
                .map(|code| code.code.clone())
                .unwrap_or_default(),
            checkout_url: cart.checkout_url.clone(),
        })
    }

    fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub shell: Shell,
    pub cart: Option<CartView>,
    pub redirect_to: &'static str,
    pub remove_action: &'static str,
    pub update_action: &'static str,
    pub discount_action: &'static str,
}

/// Display the cart page.
#[instrument(skip_all)]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let shell = load_shell(&state, &session).await?;
    let cart = shell
        .cart()
        .map(CartView::from_cart)
        .transpose()?
        .filter(|cart| !cart.is_empty());

    Ok(CartShowTemplate {
        shell,
        cart,
        redirect_to: CART_PATH,
        remove_action: CartAction::RemoveFromCart.as_str(),
        update_action: CartAction::UpdateCart.as_str(),
        discount_action: CartAction::UpdateDiscount.as_str(),
    })
}

/// Apply a cart action posted from any page.
#[instrument(skip_all)]
pub async fn action(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CartForm>,
) -> Result<CartActionOutcome> {
    cart::dispatch(state.storefront(), &session, form).await
}

fn quantity_lines(line: &CartLine, quantity: i64) -> Result<String> {
    encode(&[CartLineUpdateInput {
        id: line.id.clone(),
        quantity: Some(quantity.max(0)),
        merchandise_id: None,
        attributes: None,
        selling_plan_id: None,
    }])
}

fn encode<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| AppError::Internal(format!("encode cart form: {e}")))
}
