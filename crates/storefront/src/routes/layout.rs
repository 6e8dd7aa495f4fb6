//! Layout shell shared by every page.
//!
//! The shell carries the normalized site layout (background, logo, nav tiles)
//! and the header's cart slot. The session read and the layout query run
//! concurrently; the cart query runs afterwards under the configured
//! `cart_timeout`, and a slow or failing cart never fails the page.

use std::future::Future;
use std::time::Duration;

use tower_sessions::Session;
use tracing::{instrument, warn};

use crate::error::AppError;
use crate::models::session;
use crate::shopify::ShopifyError;
use crate::shopify::types::{Cart, Image, Layout, NavLink};
use crate::state::AppState;

/// The header cart, as far as it could be resolved for this request.
#[derive(Debug, Clone, Default)]
pub enum CartSlot {
    /// No cart in the session, or the platform no longer knows it.
    #[default]
    Empty,
    /// Cart fetched in time.
    Ready(Box<Cart>),
    /// Cart fetch exceeded its budget and was dropped.
    Pending,
    /// Cart fetch failed.
    Failed,
}

/// Everything the base template needs.
#[derive(Debug, Clone, Default)]
pub struct Shell {
    pub layout: Layout,
    pub cart: CartSlot,
}

impl Shell {
    /// Full-page background image.
    #[must_use]
    pub const fn background_image(&self) -> Option<&Image> {
        self.layout.background_image.as_ref()
    }

    /// Shop logo.
    #[must_use]
    pub const fn logo(&self) -> Option<&Image> {
        self.layout.logo.as_ref()
    }

    /// Navigation tiles.
    #[must_use]
    pub fn nav_links(&self) -> &[NavLink] {
        &self.layout.nav_links
    }

    /// Badge text for the header cart link.
    #[must_use]
    pub fn cart_badge(&self) -> String {
        match &self.cart {
            CartSlot::Empty | CartSlot::Pending => "0".to_string(),
            CartSlot::Ready(cart) => cart.total_quantity.to_string(),
            CartSlot::Failed => "Cart fetch error".to_string(),
        }
    }

    /// The resolved cart, if any.
    #[must_use]
    pub fn cart(&self) -> Option<&Cart> {
        match &self.cart {
            CartSlot::Ready(cart) => Some(cart),
            _ => None,
        }
    }

    /// Whether the cart fetch timed out.
    #[must_use]
    pub const fn cart_pending(&self) -> bool {
        matches!(self.cart, CartSlot::Pending)
    }
}

/// Load the shell for the current request.
///
/// # Errors
///
/// Fails when the layout query fails or the session cannot be read. Cart
/// failures only degrade the cart slot.
#[instrument(skip_all)]
pub async fn load_shell(state: &AppState, session: &Session) -> Result<Shell, AppError> {
    let storefront = state.storefront();
    let (cart_id, layout) = tokio::join!(session::cart_id(session), storefront.get_layout());
    let layout = layout?;

    let cart = match cart_id? {
        Some(cart_id) => {
            let config = state.config();
            resolve_cart(
                storefront.get_cart(&cart_id, &config.i18n),
                config.cart_timeout,
            )
            .await
        }
        None => CartSlot::Empty,
    };

    Ok(Shell { layout, cart })
}

/// Await a cart fetch within `budget`.
async fn resolve_cart<F>(fetch: F, budget: Duration) -> CartSlot
where
    F: Future<Output = Result<Option<Cart>, ShopifyError>>,
{
    match tokio::time::timeout(budget, fetch).await {
        Ok(Ok(Some(cart))) => CartSlot::Ready(Box::new(cart)),
        Ok(Ok(None)) => CartSlot::Empty,
        Ok(Err(e)) => {
            warn!(error = %e, "Cart fetch failed");
            CartSlot::Failed
        }
        Err(_) => {
            warn!(?budget, "Cart fetch timed out");
            CartSlot::Pending
        }
    }
}
