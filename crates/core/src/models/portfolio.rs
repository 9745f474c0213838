use serde::{Deserialize, Serialize};

/// A named grouping of stock positions (e.g. "Long term", "Dividend").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Backend-assigned row id.
    pub id: i64,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Payload for creating or updating a portfolio.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioDraft {
    pub name: String,
    pub description: Option<String>,
}

impl PortfolioDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

/// Aggregate figures for one portfolio, computed server-side.
/// Fetched per portfolio; the dashboard requests all of them concurrently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioStats {
    pub portfolio_id: i64,

    /// Number of stock positions assigned to this portfolio.
    pub stock_count: usize,

    /// Current market value of all positions.
    pub market_value: f64,

    /// Total purchase cost of all positions.
    pub cost_basis: f64,

    /// Absolute gain/loss: market_value - cost_basis.
    pub gain_loss: f64,

    /// Percentage return relative to cost basis.
    pub gain_loss_pct: f64,
}
