pub mod api;
pub mod cache;
pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use std::collections::HashMap;

use futures::future;
use tracing::warn;

use api::rest::RestPortfolioApi;
use api::traits::PortfolioApi;
use cache::{keys, ResponseCache};
use models::{
    assessment::Assessment,
    cash::{CashDraft, CashHolding},
    exchange_rate::{ExchangeRate, ExchangeRateDraft},
    layout::{default_layout, ColumnPref},
    merge::{MergePlan, TickerResolution},
    portfolio::{Portfolio, PortfolioDraft, PortfolioStats},
    settings::Settings,
    stock::{BulkStockUpdate, FieldValue, Stock, StockDraft, StockField, StockUpdate},
    summary::{ApiStatus, SummaryResponse},
};
use services::merge_service::MergeService;
use storage::layout_store::{LayoutStore, MemoryLayoutStore, COLUMN_LAYOUT_KEY};

use errors::CoreError;

/// Main entry point for the portfolio dashboard core library.
/// Holds the backend API client, the response cache, and the services
/// that operate on them.
#[must_use]
pub struct PortfolioDashboard {
    settings: Settings,
    api: Box<dyn PortfolioApi>,
    cache: ResponseCache,
    merge_service: MergeService,
    layout_store: Box<dyn LayoutStore>,
}

impl std::fmt::Debug for PortfolioDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioDashboard")
            .field("api_base_url", &self.settings.api_base_url)
            .field("cached_responses", &self.cache.entry_count())
            .finish()
    }
}

impl PortfolioDashboard {
    /// Create a dashboard talking to the backend named in `settings`.
    /// Column layout preferences are kept in memory; use
    /// [`Self::with_components`] to persist them elsewhere.
    pub fn new(settings: Settings) -> Self {
        let api = Box::new(RestPortfolioApi::from_settings(&settings));
        Self::build(settings, api, Box::new(MemoryLayoutStore::new()))
    }

    /// Create a dashboard with a custom API client and layout store.
    /// This is the seam used by tests and by hosts that supply their
    /// own transport or persistence.
    pub fn with_components(
        settings: Settings,
        api: Box<dyn PortfolioApi>,
        layout_store: Box<dyn LayoutStore>,
    ) -> Self {
        Self::build(settings, api, layout_store)
    }

    // ── Cached Reads ────────────────────────────────────────────────

    /// Get the portfolio summary, served from cache when a fresh copy
    /// (under 30 seconds old) is available.
    pub async fn get_summary(&self) -> Result<SummaryResponse, CoreError> {
        if let Some(value) = self.cache.get(keys::PORTFOLIO_SUMMARY, keys::SUMMARY_TTL) {
            if let Ok(summary) = serde_json::from_value(value) {
                return Ok(summary);
            }
        }
        let summary = self.api.fetch_summary().await?;
        if let Ok(value) = serde_json::to_value(&summary) {
            self.cache.set(keys::PORTFOLIO_SUMMARY, value);
        }
        Ok(summary)
    }

    /// Get backend health, served from cache when a fresh copy
    /// (under 60 seconds old) is available.
    pub async fn get_api_status(&self) -> Result<ApiStatus, CoreError> {
        if let Some(value) = self.cache.get(keys::API_STATUS, keys::STATUS_TTL) {
            if let Ok(status) = serde_json::from_value(value) {
                return Ok(status);
            }
        }
        let status = self.api.fetch_api_status().await?;
        if let Ok(value) = serde_json::to_value(&status) {
            self.cache.set(keys::API_STATUS, value);
        }
        Ok(status)
    }

    /// Drop any cached summary and fetch a fresh one from the backend.
    pub async fn refresh_summary(&self) -> Result<SummaryResponse, CoreError> {
        self.cache.invalidate(keys::PORTFOLIO_SUMMARY);
        self.get_summary().await
    }

    // ── Stocks ──────────────────────────────────────────────────────

    /// Get all stocks across all portfolios.
    pub async fn get_stocks(&self) -> Result<Vec<Stock>, CoreError> {
        self.api.list_stocks().await
    }

    /// Add a new stock position.
    pub async fn add_stock(&self, draft: &StockDraft) -> Result<Stock, CoreError> {
        let stock = self.api.create_stock(draft).await?;
        self.invalidate_portfolio_reads();
        Ok(stock)
    }

    /// Apply a batch of field changes to one stock.
    pub async fn update_stock(&self, id: i64, update: &StockUpdate) -> Result<Stock, CoreError> {
        let stock = self.api.update_stock(id, update).await?;
        self.invalidate_portfolio_reads();
        Ok(stock)
    }

    /// Remove a stock, recording why.
    pub async fn remove_stock(&self, id: i64, reason: &str) -> Result<(), CoreError> {
        self.api.delete_stock(id, reason).await?;
        self.invalidate_portfolio_reads();
        Ok(())
    }

    /// Set or clear a single field on a stock.
    pub async fn set_stock_field(
        &self,
        id: i64,
        field: StockField,
        value: Option<FieldValue>,
    ) -> Result<Stock, CoreError> {
        let stock = self.api.patch_stock_field(id, field, value).await?;
        self.invalidate_portfolio_reads();
        Ok(stock)
    }

    /// Set the current price of a stock.
    pub async fn set_stock_price(&self, id: i64, price: f64) -> Result<Stock, CoreError> {
        let stock = self.api.patch_stock_price(id, price).await?;
        self.invalidate_portfolio_reads();
        Ok(stock)
    }

    /// Apply changes to many stocks in one request.
    pub async fn bulk_update_stocks(
        &self,
        updates: &[BulkStockUpdate],
    ) -> Result<Vec<Stock>, CoreError> {
        let stocks = self.api.bulk_update_stocks(updates).await?;
        self.invalidate_portfolio_reads();
        Ok(stocks)
    }

    // ── Ticker Changes ──────────────────────────────────────────────

    /// Work out what renaming `current` to `proposed` means: a plain
    /// rename, or a merge with the stock already holding that ticker.
    /// Pure computation; nothing is applied until the caller asks.
    #[must_use]
    pub fn resolve_ticker_change(
        &self,
        proposed: &str,
        current: &Stock,
        all_stocks: &[Stock],
    ) -> TickerResolution {
        self.merge_service.resolve(proposed, current, all_stocks)
    }

    /// Apply a plain ticker rename.
    pub async fn rename_stock(&self, stock_id: i64, new_ticker: &str) -> Result<Stock, CoreError> {
        let update = StockUpdate::new().with_ticker(new_ticker);
        let stock = self.api.update_stock(stock_id, &update).await?;
        self.invalidate_portfolio_reads();
        Ok(stock)
    }

    /// Apply a merge plan: write the combined record to the target,
    /// then delete the source. The two writes are separate requests.
    /// If the delete fails after the update succeeded, the result is
    /// `CoreError::MergePartiallyApplied` and the source stock is left
    /// in place for the caller to retry or remove by hand.
    pub async fn apply_merge(&self, plan: &MergePlan) -> Result<Stock, CoreError> {
        let updated = self.api.update_stock(plan.target.id, &plan.to_update()).await?;
        self.invalidate_portfolio_reads();

        if let Err(e) = self
            .api
            .delete_stock(plan.source.id, &plan.deletion_reason())
            .await
        {
            return Err(CoreError::MergePartiallyApplied {
                ticker: plan.new_ticker.clone(),
                source_id: plan.source.id,
                detail: e.to_string(),
            });
        }
        self.invalidate_portfolio_reads();
        Ok(updated)
    }

    // ── Portfolios ──────────────────────────────────────────────────

    /// Get all portfolios.
    pub async fn get_portfolios(&self) -> Result<Vec<Portfolio>, CoreError> {
        self.api.list_portfolios().await
    }

    /// Create a new portfolio.
    pub async fn add_portfolio(&self, draft: &PortfolioDraft) -> Result<Portfolio, CoreError> {
        let portfolio = self.api.create_portfolio(draft).await?;
        self.invalidate_portfolio_reads();
        Ok(portfolio)
    }

    /// Rename or re-describe a portfolio.
    pub async fn update_portfolio(
        &self,
        id: i64,
        draft: &PortfolioDraft,
    ) -> Result<Portfolio, CoreError> {
        let portfolio = self.api.update_portfolio(id, draft).await?;
        self.invalidate_portfolio_reads();
        Ok(portfolio)
    }

    /// Delete a portfolio.
    pub async fn remove_portfolio(&self, id: i64) -> Result<(), CoreError> {
        self.api.delete_portfolio(id).await?;
        self.invalidate_portfolio_reads();
        Ok(())
    }

    /// Get the aggregate stats for one portfolio.
    pub async fn get_portfolio_stats(&self, id: i64) -> Result<PortfolioStats, CoreError> {
        self.api.fetch_portfolio_stats(id).await
    }

    /// Get stats for every portfolio, fetched concurrently.
    /// Portfolios whose stats request fails are left out of the map.
    pub async fn get_all_portfolio_stats(
        &self,
    ) -> Result<HashMap<i64, PortfolioStats>, CoreError> {
        let portfolios = self.get_portfolios().await?;
        let requests = portfolios.iter().map(|p| self.api.fetch_portfolio_stats(p.id));
        let results = future::join_all(requests).await;

        let mut stats = HashMap::with_capacity(portfolios.len());
        for (portfolio, result) in portfolios.iter().zip(results) {
            match result {
                Ok(s) => {
                    stats.insert(portfolio.id, s);
                }
                Err(e) => warn!("Failed to fetch stats for portfolio {}: {}", portfolio.id, e),
            }
        }
        Ok(stats)
    }

    // ── Cash Holdings ───────────────────────────────────────────────

    /// Get all cash holdings.
    pub async fn get_cash_holdings(&self) -> Result<Vec<CashHolding>, CoreError> {
        self.api.list_cash().await
    }

    /// Add a cash holding.
    pub async fn add_cash(&self, draft: &CashDraft) -> Result<CashHolding, CoreError> {
        let holding = self.api.create_cash(draft).await?;
        self.invalidate_portfolio_reads();
        Ok(holding)
    }

    /// Update a cash holding.
    pub async fn update_cash(&self, id: i64, draft: &CashDraft) -> Result<CashHolding, CoreError> {
        let holding = self.api.update_cash(id, draft).await?;
        self.invalidate_portfolio_reads();
        Ok(holding)
    }

    /// Remove a cash holding.
    pub async fn remove_cash(&self, id: i64) -> Result<(), CoreError> {
        self.api.delete_cash(id).await?;
        self.invalidate_portfolio_reads();
        Ok(())
    }

    // ── Exchange Rates ──────────────────────────────────────────────

    /// Get all stored exchange rates.
    pub async fn get_exchange_rates(&self) -> Result<Vec<ExchangeRate>, CoreError> {
        self.api.list_exchange_rates().await
    }

    /// Create or update the rate for a currency pair.
    pub async fn save_exchange_rate(
        &self,
        draft: &ExchangeRateDraft,
    ) -> Result<ExchangeRate, CoreError> {
        let rate = self.api.save_exchange_rate(draft).await?;
        self.invalidate_portfolio_reads();
        Ok(rate)
    }

    /// Remove a stored exchange rate.
    pub async fn remove_exchange_rate(&self, id: i64) -> Result<(), CoreError> {
        self.api.delete_exchange_rate(id).await?;
        self.invalidate_portfolio_reads();
        Ok(())
    }

    // ── Assessments ─────────────────────────────────────────────────

    /// Get all stored assessments.
    pub async fn get_assessments(&self) -> Result<Vec<Assessment>, CoreError> {
        self.api.list_assessments().await
    }

    /// Get the assessment for a stock, or `None` if it has none yet.
    pub async fn get_assessment(&self, stock_id: i64) -> Result<Option<Assessment>, CoreError> {
        self.api.fetch_assessment(stock_id).await
    }

    /// Ask the backend to generate a fresh assessment for a stock.
    pub async fn request_assessment(&self, stock_id: i64) -> Result<Assessment, CoreError> {
        self.api.request_assessment(stock_id).await
    }

    /// Remove a stored assessment.
    pub async fn remove_assessment(&self, id: i64) -> Result<(), CoreError> {
        self.api.delete_assessment(id).await
    }

    // ── Column Layout ───────────────────────────────────────────────

    /// Get the saved dashboard column layout. A missing or unreadable
    /// saved layout falls back to the default column set.
    #[must_use]
    pub fn get_column_layout(&self) -> Vec<ColumnPref> {
        match self.layout_store.get(COLUMN_LAYOUT_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(prefs) => prefs,
                Err(e) => {
                    warn!("Stored column layout is unreadable, using defaults: {}", e);
                    default_layout()
                }
            },
            Ok(None) => default_layout(),
            Err(e) => {
                warn!("Failed to read column layout, using defaults: {}", e);
                default_layout()
            }
        }
    }

    /// Save the dashboard column layout.
    pub fn set_column_layout(&self, prefs: &[ColumnPref]) -> Result<(), CoreError> {
        let json = serde_json::to_string(prefs).map_err(|e| {
            CoreError::Serialization(format!("Failed to serialize column layout: {e}"))
        })?;
        self.layout_store.put(COLUMN_LAYOUT_KEY, &json)
    }

    /// Discard the saved column layout, reverting to defaults.
    pub fn reset_column_layout(&self) -> Result<(), CoreError> {
        self.layout_store.remove(COLUMN_LAYOUT_KEY)
    }

    // ── Cache Management ────────────────────────────────────────────

    /// Get the number of cached responses currently held.
    #[must_use]
    pub fn cache_entry_count(&self) -> usize {
        self.cache.entry_count()
    }

    /// Drop cached responses whose key contains `pattern`.
    /// Returns the number of entries removed.
    pub fn cache_invalidate(&self, pattern: &str) -> usize {
        self.cache.invalidate(pattern)
    }

    /// Drop all cached responses.
    pub fn cache_clear(&self) {
        self.cache.clear();
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Get current settings.
    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.settings
    }

    /// Set or clear the API bearer token.
    /// Rebuilds the REST client so the new token takes effect immediately.
    pub fn set_api_token(&mut self, token: Option<String>) {
        self.settings.api_token = token;
        self.api = Box::new(RestPortfolioApi::from_settings(&self.settings));
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(settings: Settings, api: Box<dyn PortfolioApi>, layout_store: Box<dyn LayoutStore>) -> Self {
        Self {
            settings,
            api,
            cache: ResponseCache::new(),
            merge_service: MergeService::new(),
            layout_store,
        }
    }

    /// Every successful portfolio mutation lands here: stale summary
    /// data must not outlive the write that changed it.
    fn invalidate_portfolio_reads(&self) {
        self.cache.invalidate(keys::PORTFOLIO_PREFIX);
    }
}
