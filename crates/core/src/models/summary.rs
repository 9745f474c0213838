use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The dashboard header payload (`GET /portfolio/summary`).
///
/// Everything in here is computed server-side; the client caches the whole
/// response and renders it as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// When the backend computed this snapshot.
    pub generated_at: DateTime<Utc>,

    /// Currency all monetary values are expressed in.
    pub base_currency: String,

    pub metrics: SummaryMetrics,

    /// Allocation breakdown by sector, largest first.
    #[serde(default)]
    pub by_sector: Vec<SectorSlice>,
}

/// Headline numbers for the whole account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    /// Market value of all stock positions.
    pub total_market_value: f64,

    /// Total purchase cost of all positions.
    pub total_cost_basis: f64,

    /// Absolute unrealized gain/loss.
    pub unrealized_gain: f64,

    /// Percentage unrealized gain/loss relative to cost basis.
    pub unrealized_gain_pct: f64,

    /// Cash holdings converted into the base currency.
    pub cash_total: f64,

    pub position_count: usize,
}

/// One sector's share of the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorSlice {
    pub sector: String,
    pub market_value: f64,
    pub allocation_pct: f64,
}

/// Backend health payload (`GET /api-status`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiStatus {
    /// Overall state reported by the backend, e.g. "ok" or "degraded".
    pub status: String,

    pub version: String,

    /// Whether the backend currently reaches its market-data feed.
    pub price_feed_connected: bool,

    /// Whether AI assessment generation is available.
    pub assessments_enabled: bool,

    pub checked_at: DateTime<Utc>,
}

impl ApiStatus {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
