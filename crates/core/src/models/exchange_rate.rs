use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A manually maintained conversion rate between two currencies.
/// Used by the backend when valuing cash holdings in the base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Backend-assigned row id.
    pub id: i64,

    /// Currency being converted from, e.g. "EUR".
    pub base: String,

    /// Currency being converted to, e.g. "USD".
    pub quote: String,

    /// Units of `quote` per one unit of `base`.
    pub rate: f64,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for saving a rate. The backend upserts on (base, quote).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRateDraft {
    pub base: String,
    pub quote: String,
    pub rate: f64,
}

impl ExchangeRateDraft {
    pub fn new(base: impl Into<String>, quote: impl Into<String>, rate: f64) -> Self {
        Self {
            base: base.into().to_uppercase(),
            quote: quote.into().to_uppercase(),
            rate,
        }
    }
}
