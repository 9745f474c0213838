use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::assessment::Assessment;
use crate::models::cash::{CashDraft, CashHolding};
use crate::models::exchange_rate::{ExchangeRate, ExchangeRateDraft};
use crate::models::portfolio::{Portfolio, PortfolioDraft, PortfolioStats};
use crate::models::stock::{
    BulkStockUpdate, FieldValue, Stock, StockDraft, StockField, StockUpdate,
};
use crate::models::summary::{ApiStatus, SummaryResponse};

/// Trait abstraction over the dashboard's REST backend.
///
/// The facade talks only to this trait. The one real implementation is
/// [`RestPortfolioApi`](super::rest::RestPortfolioApi); tests swap in
/// mocks. The backend computes everything analytical (expected value,
/// Kelly fraction, buy zones, portfolio stats) — this side just carries
/// the results.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PortfolioApi: Send + Sync {
    // ── Cached reads ────────────────────────────────────────────────

    /// The dashboard header payload.
    async fn fetch_summary(&self) -> Result<SummaryResponse, CoreError>;

    /// Backend health.
    async fn fetch_api_status(&self) -> Result<ApiStatus, CoreError>;

    // ── Stocks ──────────────────────────────────────────────────────

    async fn list_stocks(&self) -> Result<Vec<Stock>, CoreError>;

    async fn create_stock(&self, draft: &StockDraft) -> Result<Stock, CoreError>;

    /// Partial update; `None` fields in `update` stay untouched.
    async fn update_stock(&self, id: i64, update: &StockUpdate) -> Result<Stock, CoreError>;

    /// Delete a stock, recording `reason` in the backend's audit log.
    async fn delete_stock(&self, id: i64, reason: &str) -> Result<(), CoreError>;

    /// Write a single editable field. `None` clears it.
    async fn patch_stock_field(
        &self,
        id: i64,
        field: StockField,
        value: Option<FieldValue>,
    ) -> Result<Stock, CoreError>;

    /// Write just the current market price.
    async fn patch_stock_price(&self, id: i64, price: f64) -> Result<Stock, CoreError>;

    /// Apply several partial updates in one request.
    async fn bulk_update_stocks(
        &self,
        updates: &[BulkStockUpdate],
    ) -> Result<Vec<Stock>, CoreError>;

    // ── Portfolios ──────────────────────────────────────────────────

    async fn list_portfolios(&self) -> Result<Vec<Portfolio>, CoreError>;

    async fn create_portfolio(&self, draft: &PortfolioDraft) -> Result<Portfolio, CoreError>;

    async fn update_portfolio(
        &self,
        id: i64,
        draft: &PortfolioDraft,
    ) -> Result<Portfolio, CoreError>;

    async fn delete_portfolio(&self, id: i64) -> Result<(), CoreError>;

    /// Server-computed aggregates for one portfolio.
    async fn fetch_portfolio_stats(&self, id: i64) -> Result<PortfolioStats, CoreError>;

    // ── Cash holdings ───────────────────────────────────────────────

    async fn list_cash(&self) -> Result<Vec<CashHolding>, CoreError>;

    async fn create_cash(&self, draft: &CashDraft) -> Result<CashHolding, CoreError>;

    async fn update_cash(&self, id: i64, draft: &CashDraft) -> Result<CashHolding, CoreError>;

    async fn delete_cash(&self, id: i64) -> Result<(), CoreError>;

    // ── Exchange rates ──────────────────────────────────────────────

    async fn list_exchange_rates(&self) -> Result<Vec<ExchangeRate>, CoreError>;

    /// Upsert on (base, quote).
    async fn save_exchange_rate(
        &self,
        draft: &ExchangeRateDraft,
    ) -> Result<ExchangeRate, CoreError>;

    async fn delete_exchange_rate(&self, id: i64) -> Result<(), CoreError>;

    // ── Assessments ─────────────────────────────────────────────────

    async fn list_assessments(&self) -> Result<Vec<Assessment>, CoreError>;

    /// The stored assessment for one stock, or `None` when it has none.
    async fn fetch_assessment(&self, stock_id: i64) -> Result<Option<Assessment>, CoreError>;

    /// Ask the backend to generate a fresh assessment for one stock.
    async fn request_assessment(&self, stock_id: i64) -> Result<Assessment, CoreError>;

    async fn delete_assessment(&self, id: i64) -> Result<(), CoreError>;
}
