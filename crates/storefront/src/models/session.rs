//! Session-related types.
//!
//! The session holds the visitor's cart id and, when a customer is signed in,
//! their Storefront customer access token. Both are opaque strings issued by
//! Shopify.

use tahuu_core::CartId;
use tower_sessions::Session;
use tower_sessions::session::Error;

/// Session keys for storefront data.
pub mod keys {
    /// Key for storing the Shopify cart ID.
    pub const CART_ID: &str = "cart_id";

    /// Key for the Shopify customer access token.
    pub const CUSTOMER_ACCESS_TOKEN: &str = "customer_access_token";
}

/// Get the cart ID from the session.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn cart_id(session: &Session) -> Result<Option<CartId>, Error> {
    session.get::<CartId>(keys::CART_ID).await
}

/// Set the cart ID in the session.
///
/// # Errors
///
/// Returns an error if the value cannot be written to the session.
pub async fn set_cart_id(session: &Session, cart_id: &CartId) -> Result<(), Error> {
    session.insert(keys::CART_ID, cart_id).await
}

/// Get the customer access token from the session.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn customer_access_token(session: &Session) -> Result<Option<String>, Error> {
    session.get::<String>(keys::CUSTOMER_ACCESS_TOKEN).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_cart_id_round_trip() {
        let session = session();
        assert!(cart_id(&session).await.unwrap().is_none());

        let id = CartId::new("gid://shopify/Cart/c1-abc?key=123");
        set_cart_id(&session, &id).await.unwrap();
        assert_eq!(cart_id(&session).await.unwrap(), Some(id));
    }

    #[tokio::test]
    async fn test_customer_access_token_reads_stored_value() {
        let session = session();
        assert!(customer_access_token(&session).await.unwrap().is_none());

        session
            .insert(keys::CUSTOMER_ACCESS_TOKEN, "token-abc")
            .await
            .unwrap();
        assert_eq!(
            customer_access_token(&session).await.unwrap().as_deref(),
            Some("token-abc")
        );
    }
}
