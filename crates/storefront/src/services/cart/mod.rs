//! Cart action dispatcher.
//!
//! Validates a posted [`CartForm`], runs exactly one cart mutation through
//! [`CartApi`], stores the returned cart id in the session and answers with
//! the cart JSON, optionally as a 303 redirect.

mod error;
mod form;

pub use error::CartActionError;
pub use form::{CartAction, CartCommand, CartForm, CartRequest};

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tahuu_core::{CartId, CartLineId};
use tower_sessions::Session;
use tracing::{debug, instrument};
use url::Url;

use crate::error::{AppError, add_breadcrumb};
use crate::middleware::session::session_expiry;
use crate::models::session;
use crate::shopify::types::{
    Cart, CartBuyerIdentityInput, CartInput, CartLineInput, CartLineUpdateInput, CartMutation,
    CartUserError,
};
use crate::shopify::{CartApi, ShopifyError};

/// Whether `url` stays on this site.
///
/// Anything that parses as an absolute URL is external. Protocol-relative
/// (`//host`) and backslash-prefixed values are external too, since browsers
/// resolve them against another origin.
#[must_use]
pub fn is_local_path(url: &str) -> bool {
    if url.starts_with("//") || url.starts_with('\\') || url.starts_with("/\\") {
        return false;
    }
    Url::parse(url).is_err()
}

/// Result of a dispatched cart action.
#[derive(Debug, Clone)]
pub struct CartActionOutcome {
    /// The cart returned by the mutation.
    pub cart: Cart,
    /// User errors reported by the platform.
    pub errors: Vec<CartUserError>,
    /// Local redirect target, if one was submitted.
    pub redirect_to: Option<String>,
}

#[derive(Serialize)]
struct CartActionBody<'a> {
    cart: &'a Cart,
    errors: &'a [CartUserError],
    analytics: CartAnalytics<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartAnalytics<'a> {
    cart_id: &'a CartId,
}

impl IntoResponse for CartActionOutcome {
    fn into_response(self) -> Response {
        let body = Json(CartActionBody {
            cart: &self.cart,
            errors: &self.errors,
            analytics: CartAnalytics {
                cart_id: &self.cart.id,
            },
        })
        .into_response();

        match self.redirect_to {
            Some(location) => (
                StatusCode::SEE_OTHER,
                [(header::LOCATION, location)],
                body,
            )
                .into_response(),
            None => body,
        }
    }
}

/// Run one cart action.
///
/// The form is validated and the session read before any mutation; a
/// rejected form leaves both the platform and the session untouched.
///
/// # Errors
///
/// Returns `AppError::CartAction` for invalid forms or a missing cart id,
/// `AppError::Shopify` when the mutation fails, and `AppError::Session`
/// when the session cannot be read or committed.
#[instrument(skip_all, fields(cart_action = tracing::field::Empty))]
pub async fn dispatch<C: CartApi>(
    api: &C,
    session: &Session,
    form: CartForm,
) -> Result<CartActionOutcome, AppError> {
    let request = form.into_request()?;
    let action = request.command.action();

    let (cart_id, customer_access_token) = tokio::try_join!(
        session::cart_id(session),
        session::customer_access_token(session),
    )?;

    if request.command.requires_cart() && cart_id.is_none() {
        return Err(CartActionError::MissingCartId.into());
    }

    tracing::Span::current().record("cart_action", action.as_str());
    add_breadcrumb("cart", "Cart action", Some(&[("action", action.as_str())]));

    let mutation = match request.command {
        CartCommand::AddLines {
            lines,
            country_code,
        } => add_to_cart(api, cart_id.as_ref(), lines, country_code).await?,
        CartCommand::RemoveLines { line_ids } => {
            remove_from_cart(api, cart_id.as_ref(), line_ids).await?
        }
        CartCommand::UpdateLines { lines } => update_cart(api, cart_id.as_ref(), lines).await?,
        CartCommand::UpdateDiscount { code } => {
            update_discount(api, cart_id.as_ref(), code).await?
        }
        CartCommand::UpdateBuyerIdentity { buyer_identity } => {
            update_buyer_identity(api, cart_id.as_ref(), buyer_identity, customer_access_token)
                .await?
        }
    };

    // The cart id may change after any mutation
    session::set_cart_id(session, &mutation.cart.id).await?;
    // Marks the session modified so the cookie is reissued even when the id
    // is unchanged
    session.set_expiry(Some(session_expiry()));
    session.save().await?;

    debug!(
        action = action.as_str(),
        cart_id = %mutation.cart.id,
        user_errors = mutation.errors.len(),
        "Cart action applied"
    );

    let redirect_to = request.redirect_to.filter(|to| is_local_path(to));

    Ok(CartActionOutcome {
        cart: mutation.cart,
        errors: mutation.errors,
        redirect_to,
    })
}

fn existing_cart(cart_id: Option<&CartId>) -> Result<&CartId, AppError> {
    cart_id.ok_or_else(|| CartActionError::MissingCartId.into())
}

async fn add_to_cart<C: CartApi>(
    api: &C,
    cart_id: Option<&CartId>,
    lines: Vec<CartLineInput>,
    country_code: Option<String>,
) -> Result<CartMutation, ShopifyError> {
    match cart_id {
        Some(cart_id) => api.add_lines(cart_id, lines).await,
        None => {
            let buyer_identity = country_code.map(|country_code| CartBuyerIdentityInput {
                country_code: Some(country_code),
                ..CartBuyerIdentityInput::default()
            });
            api.create_cart(CartInput {
                lines: Some(lines),
                buyer_identity,
            })
            .await
        }
    }
}

async fn remove_from_cart<C: CartApi>(
    api: &C,
    cart_id: Option<&CartId>,
    line_ids: Vec<CartLineId>,
) -> Result<CartMutation, AppError> {
    Ok(api.remove_lines(existing_cart(cart_id)?, line_ids).await?)
}

async fn update_cart<C: CartApi>(
    api: &C,
    cart_id: Option<&CartId>,
    lines: Vec<CartLineUpdateInput>,
) -> Result<CartMutation, AppError> {
    Ok(api.update_lines(existing_cart(cart_id)?, lines).await?)
}

async fn update_discount<C: CartApi>(
    api: &C,
    cart_id: Option<&CartId>,
    code: String,
) -> Result<CartMutation, AppError> {
    Ok(api
        .update_discount_codes(existing_cart(cart_id)?, vec![code])
        .await?)
}

async fn update_buyer_identity<C: CartApi>(
    api: &C,
    cart_id: Option<&CartId>,
    buyer_identity: CartBuyerIdentityInput,
    customer_access_token: Option<String>,
) -> Result<CartMutation, ShopifyError> {
    // The session's token always wins over a submitted one
    let buyer_identity = CartBuyerIdentityInput {
        customer_access_token,
        ..buyer_identity
    };

    match cart_id {
        Some(cart_id) => api.update_buyer_identity(cart_id, buyer_identity).await,
        None => {
            api.create_cart(CartInput {
                lines: None,
                buyer_identity: Some(buyer_identity),
            })
            .await
        }
    }
}
