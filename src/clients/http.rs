//! # HTTP Store API
//!
//! [`StoreApi`] over HTTP with `reqwest`. Bodies are JSON both ways; a non-2xx response
//! is decoded as `{ "error": "..." }` when possible and kept as raw text otherwise.

use crate::clients::store_api::{ApiError, StoreApi};
use crate::model::{OrderRequest, OrderResult, ProductList};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};

/// HTTP client for the store service.
#[derive(Debug, Clone)]
pub struct HttpStoreApi {
    base_url: String,
    http: Client,
}

impl HttpStoreApi {
    /// Creates a client rooted at `base_url`, e.g. `"https://shop.example/api"`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Same as [`HttpStoreApi::new`] with a preconfigured `reqwest` client.
    pub fn with_client(base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl StoreApi for HttpStoreApi {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn list_products(&self) -> Result<ProductList, ApiError> {
        debug!("Sending request");
        let response = self.http.get(self.url("/products")).send().await?;
        read_json(response).await
    }

    #[instrument(skip(self, order), fields(base_url = %self.base_url, items = order.items.len()))]
    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderResult, ApiError> {
        debug!(?order, "Sending request");
        let response = self.http.post(self.url("/order/")).json(order).send().await?;
        read_json(response).await
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();
    Err(ApiError::Rejected {
        status: status.as_u16(),
        message: error_message(&text),
    })
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|parsed| parsed.error)
        .unwrap_or_else(|_| body.trim().to_string())
}
