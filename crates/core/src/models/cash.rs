use serde::{Deserialize, Serialize};

/// A cash balance held alongside the stock positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashHolding {
    /// Backend-assigned row id.
    pub id: i64,

    /// ISO 4217 code, e.g. "USD", "EUR".
    pub currency: String,

    pub amount: f64,

    #[serde(default)]
    pub description: Option<String>,
}

/// Payload for creating or updating a cash holding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CashDraft {
    pub currency: String,
    pub amount: f64,
    pub description: Option<String>,
}

impl CashDraft {
    pub fn new(currency: impl Into<String>, amount: f64) -> Self {
        Self {
            currency: currency.into().to_uppercase(),
            amount,
            description: None,
        }
    }
}
