use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::Value;
use tracing::{debug, warn};

use super::models::{normalize_feed, FeedError};
use crate::models::TransactionRecord;

/// Anything that can hand over the current transaction list
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_records(&self) -> Result<Vec<TransactionRecord>, FeedError>;
}

/// HTTP client for the spreadsheet-backed transaction feed
pub struct FeedClient {
    http_client: HttpClient,
    endpoint: String,
}

impl FeedClient {
    /// Create a new feed client for the given endpoint
    pub fn new(endpoint: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> FeedError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            500..=599 => {
                warn!("Server error {}: {}", status_code, body_text);
                FeedError::ServerError(status_code, body_text)
            }
            _ => FeedError::HttpError(status_code, body_text),
        }
    }

    /// GET the feed endpoint
    ///
    /// # Returns
    /// * `Ok(Value)` - The raw JSON body, envelope not yet inspected
    /// * `Err(FeedError)` - Transport failure, non-success status or non-JSON body
    pub async fn fetch_envelope(&self) -> Result<Value, FeedError> {
        debug!("Fetching data from {}", self.endpoint);

        let response = self
            .http_client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| FeedError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FeedError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl FeedSource for FeedClient {
    async fn fetch_records(&self) -> Result<Vec<TransactionRecord>, FeedError> {
        let raw = self.fetch_envelope().await?;
        Ok(normalize_feed(raw))
    }
}

/// A fixed feed response, served on every fetch
pub struct StaticFeed {
    response: Result<Value, (u16, String)>,
}

impl StaticFeed {
    pub fn new(raw: Value) -> Self {
        Self { response: Ok(raw) }
    }

    /// A feed that always answers with the given HTTP status
    pub fn failing(status: u16, body: impl Into<String>) -> Self {
        Self {
            response: Err((status, body.into())),
        }
    }
}

#[async_trait]
impl FeedSource for StaticFeed {
    async fn fetch_records(&self) -> Result<Vec<TransactionRecord>, FeedError> {
        match &self.response {
            Ok(raw) => Ok(normalize_feed(raw.clone())),
            Err((status, body)) if *status >= 500 => Err(FeedError::ServerError(*status, body.clone())),
            Err((status, body)) => Err(FeedError::HttpError(*status, body.clone())),
        }
    }
}
