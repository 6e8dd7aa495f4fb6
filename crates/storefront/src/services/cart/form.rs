//! Cart form parsing.
//!
//! The cart endpoint receives a url-encoded form whose JSON-valued fields
//! (`lines`, `linesIds`, `buyerIdentity`) carry Storefront API inputs as JSON
//! strings. [`CartForm::into_request`] turns it into a [`CartRequest`] or
//! rejects it without side effects.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tahuu_core::CartLineId;

use super::CartActionError;
use crate::shopify::types::{CartBuyerIdentityInput, CartLineInput, CartLineUpdateInput};

/// The five cart actions, keyed by the `cartAction` form tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    AddToCart,
    RemoveFromCart,
    UpdateCart,
    UpdateDiscount,
    UpdateBuyerIdentity,
}

impl CartAction {
    /// The form tag for this action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddToCart => "ADD_TO_CART",
            Self::RemoveFromCart => "REMOVE_FROM_CART",
            Self::UpdateCart => "UPDATE_CART",
            Self::UpdateDiscount => "UPDATE_DISCOUNT",
            Self::UpdateBuyerIdentity => "UPDATE_BUYER_IDENTITY",
        }
    }
}

impl fmt::Display for CartAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CartAction {
    type Err = CartActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADD_TO_CART" => Ok(Self::AddToCart),
            "REMOVE_FROM_CART" => Ok(Self::RemoveFromCart),
            "UPDATE_CART" => Ok(Self::UpdateCart),
            "UPDATE_DISCOUNT" => Ok(Self::UpdateDiscount),
            "UPDATE_BUYER_IDENTITY" => Ok(Self::UpdateBuyerIdentity),
            other => Err(CartActionError::UnknownAction(other.to_string())),
        }
    }
}

/// Raw cart form as posted by the browser.
///
/// Every field is optional at this layer; empty values count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartForm {
    pub cart_action: Option<String>,
    pub lines: Option<String>,
    pub lines_ids: Option<String>,
    pub discount_code: Option<String>,
    pub buyer_identity: Option<String>,
    pub country_code: Option<String>,
    pub redirect_to: Option<String>,
}

/// One validated cart command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    /// Add lines, creating the cart when the session has none.
    AddLines {
        lines: Vec<CartLineInput>,
        country_code: Option<String>,
    },
    /// Remove lines from the existing cart.
    RemoveLines { line_ids: Vec<CartLineId> },
    /// Update lines on the existing cart.
    UpdateLines { lines: Vec<CartLineUpdateInput> },
    /// Replace the discount codes with `code` (empty clears them).
    UpdateDiscount { code: String },
    /// Update buyer identity, creating the cart when the session has none.
    UpdateBuyerIdentity {
        buyer_identity: CartBuyerIdentityInput,
    },
}

impl CartCommand {
    /// The action tag this command came from.
    #[must_use]
    pub const fn action(&self) -> CartAction {
        match self {
            Self::AddLines { .. } => CartAction::AddToCart,
            Self::RemoveLines { .. } => CartAction::RemoveFromCart,
            Self::UpdateLines { .. } => CartAction::UpdateCart,
            Self::UpdateDiscount { .. } => CartAction::UpdateDiscount,
            Self::UpdateBuyerIdentity { .. } => CartAction::UpdateBuyerIdentity,
        }
    }

    /// Whether the command can only run against an existing cart.
    #[must_use]
    pub const fn requires_cart(&self) -> bool {
        matches!(
            self,
            Self::RemoveLines { .. } | Self::UpdateLines { .. } | Self::UpdateDiscount { .. }
        )
    }
}

/// A validated cart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRequest {
    pub command: CartCommand,
    /// Where to send the browser afterwards, if submitted.
    pub redirect_to: Option<String>,
}

impl CartForm {
    /// Validate the form and build the command it describes.
    ///
    /// # Errors
    ///
    /// Returns `CartActionError` when the action tag is missing or unknown,
    /// a required list is empty, or a JSON field does not parse.
    pub fn into_request(self) -> Result<CartRequest, CartActionError> {
        let action: CartAction = present(self.cart_action)
            .ok_or(CartActionError::MissingAction)?
            .parse()?;

        let command = match action {
            CartAction::AddToCart => CartCommand::AddLines {
                lines: required_list(self.lines, "lines")?,
                country_code: present(self.country_code),
            },
            CartAction::RemoveFromCart => CartCommand::RemoveLines {
                line_ids: required_list(self.lines_ids, "linesIds")?,
            },
            CartAction::UpdateCart => CartCommand::UpdateLines {
                lines: required_list(self.lines, "lines")?,
            },
            CartAction::UpdateDiscount => CartCommand::UpdateDiscount {
                code: present(self.discount_code).unwrap_or_default(),
            },
            CartAction::UpdateBuyerIdentity => CartCommand::UpdateBuyerIdentity {
                buyer_identity: optional_json(self.buyer_identity, "buyerIdentity")?
                    .unwrap_or_default(),
            },
        };

        Ok(CartRequest {
            command,
            redirect_to: present(self.redirect_to),
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn optional_json<T: DeserializeOwned>(
    value: Option<String>,
    field: &'static str,
) -> Result<Option<T>, CartActionError> {
    present(value)
        .map(|raw| {
            serde_json::from_str(&raw).map_err(|source| CartActionError::InvalidJson { field, source })
        })
        .transpose()
}

fn required_list<T: DeserializeOwned>(
    value: Option<String>,
    field: &'static str,
) -> Result<Vec<T>, CartActionError> {
    let list: Vec<T> = optional_json(value, field)?.unwrap_or_default();
    if list.is_empty() {
        return Err(CartActionError::EmptyField(field));
    }
    Ok(list)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(action: &str) -> CartForm {
        CartForm {
            cart_action: Some(action.to_string()),
            ..CartForm::default()
        }
    }

    #[test]
    fn test_action_tags() {
        for action in [
            CartAction::AddToCart,
            CartAction::RemoveFromCart,
            CartAction::UpdateCart,
            CartAction::UpdateDiscount,
            CartAction::UpdateBuyerIdentity,
        ] {
            assert_eq!(action.as_str().parse::<CartAction>().unwrap(), action);
        }
        assert!(matches!(
            "add_to_cart".parse::<CartAction>(),
            Err(CartActionError::UnknownAction(tag)) if tag == "add_to_cart"
        ));
    }

    #[test]
    fn test_missing_or_empty_action() {
        assert!(matches!(
            CartForm::default().into_request(),
            Err(CartActionError::MissingAction)
        ));
        assert!(matches!(
            form("").into_request(),
            Err(CartActionError::MissingAction)
        ));
    }

    #[test]
    fn test_add_to_cart_parses_lines_and_country() {
        let request = CartForm {
            lines: Some(
                r#"[{"quantity":1,"merchandiseId":"gid://shopify/ProductVariant/44457543860544"}]"#
                    .to_string(),
            ),
            country_code: Some("US".to_string()),
            redirect_to: Some("/products/70-dark-chocolate".to_string()),
            ..form("ADD_TO_CART")
        }
        .into_request()
        .unwrap();

        let CartCommand::AddLines {
            lines,
            country_code,
        } = request.command
        else {
            panic!("expected AddLines");
        };
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, Some(1));
        assert_eq!(country_code.as_deref(), Some("US"));
        assert_eq!(
            request.redirect_to.as_deref(),
            Some("/products/70-dark-chocolate")
        );
    }

    #[test]
    fn test_empty_lists_are_rejected() {
        let err = CartForm {
            lines: Some("[]".to_string()),
            ..form("ADD_TO_CART")
        }
        .into_request()
        .unwrap_err();
        assert!(matches!(err, CartActionError::EmptyField("lines")));

        let err = form("REMOVE_FROM_CART").into_request().unwrap_err();
        assert!(matches!(err, CartActionError::EmptyField("linesIds")));

        let err = CartForm {
            lines: Some(String::new()),
            ..form("UPDATE_CART")
        }
        .into_request()
        .unwrap_err();
        assert!(matches!(err, CartActionError::EmptyField("lines")));
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let err = CartForm {
            lines_ids: Some("not json".to_string()),
            ..form("REMOVE_FROM_CART")
        }
        .into_request()
        .unwrap_err();
        assert!(matches!(
            err,
            CartActionError::InvalidJson {
                field: "linesIds",
                ..
            }
        ));

        let err = CartForm {
            buyer_identity: Some("{".to_string()),
            ..form("UPDATE_BUYER_IDENTITY")
        }
        .into_request()
        .unwrap_err();
        assert!(matches!(
            err,
            CartActionError::InvalidJson {
                field: "buyerIdentity",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_discount_code_becomes_empty() {
        let request = form("UPDATE_DISCOUNT").into_request().unwrap();
        assert_eq!(
            request.command,
            CartCommand::UpdateDiscount {
                code: String::new()
            }
        );
        assert!(request.command.requires_cart());
    }

    #[test]
    fn test_buyer_identity_defaults_to_empty() {
        let request = form("UPDATE_BUYER_IDENTITY").into_request().unwrap();
        assert_eq!(
            request.command,
            CartCommand::UpdateBuyerIdentity {
                buyer_identity: CartBuyerIdentityInput::default()
            }
        );
        assert!(!request.command.requires_cart());
    }

    #[test]
    fn test_empty_redirect_is_absent() {
        let request = CartForm {
            redirect_to: Some(String::new()),
            ..form("UPDATE_DISCOUNT")
        }
        .into_request()
        .unwrap();
        assert!(request.redirect_to.is_none());
    }
}
