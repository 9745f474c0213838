use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An AI-generated write-up for a single stock.
/// The client never interprets the content; it requests, lists, shows,
/// and deletes these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Backend-assigned row id.
    pub id: i64,

    /// The stock this assessment covers.
    pub stock_id: i64,

    /// Markdown body produced by the model.
    pub content: String,

    /// Short verdict, e.g. "buy", "hold", when the model gave one.
    #[serde(default)]
    pub rating: Option<String>,

    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}
