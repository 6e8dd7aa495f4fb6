//! Cart action error types.

use thiserror::Error;

/// Errors raised while validating a cart form, before any API call.
#[derive(Debug, Error)]
pub enum CartActionError {
    /// The form has no `cartAction`.
    #[error("no cartAction defined")]
    MissingAction,

    /// The `cartAction` tag is not one the dispatcher knows.
    #[error("{0} cart action is not defined")]
    UnknownAction(String),

    /// A required list field is missing or empty.
    #[error("no {0} submitted")]
    EmptyField(&'static str),

    /// A JSON-valued field does not parse.
    #[error("invalid JSON in {field}: {source}")]
    InvalidJson {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The action needs an existing cart and the session has none.
    #[error("missing cartId")]
    MissingCartId,
}
