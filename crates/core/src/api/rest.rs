use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::debug;

use super::traits::PortfolioApi;
use crate::errors::CoreError;
use crate::models::assessment::Assessment;
use crate::models::cash::{CashDraft, CashHolding};
use crate::models::exchange_rate::{ExchangeRate, ExchangeRateDraft};
use crate::models::portfolio::{Portfolio, PortfolioDraft, PortfolioStats};
use crate::models::settings::Settings;
use crate::models::stock::{
    BulkStockUpdate, FieldValue, Stock, StockDraft, StockField, StockUpdate,
};
use crate::models::summary::{ApiStatus, SummaryResponse};

/// REST client for the dashboard backend.
///
/// JSON both ways, optional bearer token on every request. Non-2xx
/// responses are decoded into `CoreError::Api` carrying the server's
/// error detail when the body has one.
pub struct RestPortfolioApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl RestPortfolioApi {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.api_base_url.clone(), settings.api_token.clone())
    }

    /// The normalized base URL requests are built on.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut req = self.client.request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    /// Pass 2xx responses through; decode anything else into `CoreError::Api`.
    async fn check_status(resp: Response) -> Result<Response, CoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(Self::api_error(status, &body))
    }

    /// Prefer the server's own error detail, fall back to the status text.
    fn api_error(status: StatusCode, body: &str) -> CoreError {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error.or(b.message))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        CoreError::Api {
            status: status.as_u16(),
            message,
        }
    }

    async fn decode<T: DeserializeOwned>(resp: Response, path: &str) -> Result<T, CoreError> {
        let resp = Self::check_status(resp).await?;
        resp.json::<T>().await.map_err(|e| {
            CoreError::Deserialization(format!("Unexpected response from {path}: {e}"))
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CoreError> {
        debug!("GET {}", path);
        let resp = self.request(Method::GET, path).send().await?;
        Self::decode(resp, path).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, CoreError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("{} {}", method, path);
        let resp = self.request(method, path).json(body).send().await?;
        Self::decode(resp, path).await
    }

    async fn send_no_content<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), CoreError> {
        debug!("{} {}", method, path);
        let mut req = self.request(method, path);
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await?;
        Self::check_status(resp).await?;
        Ok(())
    }
}

// ── Request/response body types ─────────────────────────────────────

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

#[derive(Serialize)]
struct DeleteBody<'a> {
    reason: &'a str,
}

#[derive(Serialize)]
struct FieldPatch<'a> {
    field: &'a str,
    value: Option<&'a FieldValue>,
}

#[derive(Serialize)]
struct PricePatch {
    price: f64,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PortfolioApi for RestPortfolioApi {
    async fn fetch_summary(&self) -> Result<SummaryResponse, CoreError> {
        self.get_json("/portfolio/summary").await
    }

    async fn fetch_api_status(&self) -> Result<ApiStatus, CoreError> {
        self.get_json("/api-status").await
    }

    async fn list_stocks(&self) -> Result<Vec<Stock>, CoreError> {
        self.get_json("/stocks").await
    }

    async fn create_stock(&self, draft: &StockDraft) -> Result<Stock, CoreError> {
        self.send_json(Method::POST, "/stocks", draft).await
    }

    async fn update_stock(&self, id: i64, update: &StockUpdate) -> Result<Stock, CoreError> {
        self.send_json(Method::PUT, &format!("/stocks/{id}"), update)
            .await
    }

    async fn delete_stock(&self, id: i64, reason: &str) -> Result<(), CoreError> {
        self.send_no_content(
            Method::DELETE,
            &format!("/stocks/{id}"),
            Some(&DeleteBody { reason }),
        )
        .await
    }

    async fn patch_stock_field(
        &self,
        id: i64,
        field: StockField,
        value: Option<FieldValue>,
    ) -> Result<Stock, CoreError> {
        let body = FieldPatch {
            field: field.name(),
            value: value.as_ref(),
        };
        self.send_json(Method::PATCH, &format!("/stocks/{id}/field"), &body)
            .await
    }

    async fn patch_stock_price(&self, id: i64, price: f64) -> Result<Stock, CoreError> {
        self.send_json(
            Method::PATCH,
            &format!("/stocks/{id}/price"),
            &PricePatch { price },
        )
        .await
    }

    async fn bulk_update_stocks(
        &self,
        updates: &[BulkStockUpdate],
    ) -> Result<Vec<Stock>, CoreError> {
        self.send_json(Method::PUT, "/stocks/bulk", updates).await
    }

    async fn list_portfolios(&self) -> Result<Vec<Portfolio>, CoreError> {
        self.get_json("/portfolios").await
    }

    async fn create_portfolio(&self, draft: &PortfolioDraft) -> Result<Portfolio, CoreError> {
        self.send_json(Method::POST, "/portfolios", draft).await
    }

    async fn update_portfolio(
        &self,
        id: i64,
        draft: &PortfolioDraft,
    ) -> Result<Portfolio, CoreError> {
        self.send_json(Method::PUT, &format!("/portfolios/{id}"), draft)
            .await
    }

    async fn delete_portfolio(&self, id: i64) -> Result<(), CoreError> {
        self.send_no_content::<()>(Method::DELETE, &format!("/portfolios/{id}"), None)
            .await
    }

    async fn fetch_portfolio_stats(&self, id: i64) -> Result<PortfolioStats, CoreError> {
        self.get_json(&format!("/portfolios/{id}/stats")).await
    }

    async fn list_cash(&self) -> Result<Vec<CashHolding>, CoreError> {
        self.get_json("/cash").await
    }

    async fn create_cash(&self, draft: &CashDraft) -> Result<CashHolding, CoreError> {
        self.send_json(Method::POST, "/cash", draft).await
    }

    async fn update_cash(&self, id: i64, draft: &CashDraft) -> Result<CashHolding, CoreError> {
        self.send_json(Method::PUT, &format!("/cash/{id}"), draft)
            .await
    }

    async fn delete_cash(&self, id: i64) -> Result<(), CoreError> {
        self.send_no_content::<()>(Method::DELETE, &format!("/cash/{id}"), None)
            .await
    }

    async fn list_exchange_rates(&self) -> Result<Vec<ExchangeRate>, CoreError> {
        self.get_json("/exchange-rates").await
    }

    async fn save_exchange_rate(
        &self,
        draft: &ExchangeRateDraft,
    ) -> Result<ExchangeRate, CoreError> {
        self.send_json(Method::PUT, "/exchange-rates", draft).await
    }

    async fn delete_exchange_rate(&self, id: i64) -> Result<(), CoreError> {
        self.send_no_content::<()>(Method::DELETE, &format!("/exchange-rates/{id}"), None)
            .await
    }

    async fn list_assessments(&self) -> Result<Vec<Assessment>, CoreError> {
        self.get_json("/assessments").await
    }

    async fn fetch_assessment(&self, stock_id: i64) -> Result<Option<Assessment>, CoreError> {
        let path = format!("/stocks/{stock_id}/assessment");
        debug!("GET {}", path);
        let resp = self.request(Method::GET, &path).send().await?;
        // Absence is a normal answer here, not an error.
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let assessment = Self::decode(resp, &path).await?;
        Ok(Some(assessment))
    }

    async fn request_assessment(&self, stock_id: i64) -> Result<Assessment, CoreError> {
        let path = format!("/stocks/{stock_id}/assessment");
        debug!("POST {}", path);
        let resp = self.request(Method::POST, &path).send().await?;
        Self::decode(resp, &path).await
    }

    async fn delete_assessment(&self, id: i64) -> Result<(), CoreError> {
        self.send_no_content::<()>(Method::DELETE, &format!("/assessments/{id}"), None)
            .await
    }
}
