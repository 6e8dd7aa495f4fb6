//! Type-safe price representation using decimal arithmetic.
//!
//! The Storefront API returns money as a decimal string plus an ISO 4217
//! currency code (`{"amount": "35.0", "currencyCode": "USD"}`). [`Price`]
//! parses that pair once so templates never format floats.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when parsing a price.
#[derive(Debug, Error)]
pub enum PriceError {
    #[error("Invalid amount '{0}': {1}")]
    InvalidAmount(String, rust_decimal::Error),
    #[error("Invalid currency code '{0}'")]
    InvalidCurrency(String),
}

/// A price with currency information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: String) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Parse a Storefront API money pair.
    ///
    /// # Errors
    ///
    /// Returns `PriceError` if the amount is not a decimal or the currency
    /// code is not three ASCII letters.
    pub fn parse(amount: &str, currency_code: &str) -> Result<Self, PriceError> {
        let decimal = Decimal::from_str(amount.trim())
            .map_err(|e| PriceError::InvalidAmount(amount.to_string(), e))?;

        if currency_code.len() != 3 || !currency_code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(PriceError::InvalidCurrency(currency_code.to_string()));
        }

        Ok(Self::new(decimal, currency_code.to_ascii_uppercase()))
    }

    /// Currency symbol for the currencies the shop sells in.
    #[must_use]
    pub fn symbol(&self) -> Option<&'static str> {
        match self.currency_code.as_str() {
            "USD" | "CAD" | "AUD" | "NZD" => Some("$"),
            "EUR" => Some("€"),
            "GBP" => Some("£"),
            _ => None,
        }
    }

    /// Amount with two decimals and no currency (e.g., "35.00").
    #[must_use]
    pub fn amount_display(&self) -> String {
        format!("{:.2}", self.amount.round_dp(2))
    }
}

impl fmt::Display for Price {
    /// Format for display (e.g., "$35.00", or "35.00 CHF" without a known symbol).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Some(symbol) => write!(f, "{symbol}{}", self.amount_display()),
            None => write!(f, "{} {}", self.amount_display(), self.currency_code),
        }
    }
}
