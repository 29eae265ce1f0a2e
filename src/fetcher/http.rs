// Spreadsheet web-app client: plain JSON first, JSONP callback as fallback.
use crate::config::AppConfig;
use crate::fetcher::traits::ListingSource;
use crate::model::{FetchError, ListingsResponse, Record};

use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

pub struct HttpListingSource {
    client: Client,
    api_url: String,
    jsonp_callback: Option<String>,
    deadline: Duration,
}

impl HttpListingSource {
    pub fn new(config: &AppConfig) -> Result<Self, FetchError> {
        Self::with_deadline(
            &config.api_url,
            config.jsonp_callback.clone(),
            Duration::from_secs(config.request_timeout_seconds),
        )
    }

    pub fn with_deadline(api_url: &str, jsonp_callback: Option<String>, deadline: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) OreaListings/0.1")
            .timeout(deadline)
            .build()
            .map_err(|e| FetchError::Http(e.to_string()))?;

        Ok(Self {
            client,
            api_url: api_url.trim().to_string(),
            jsonp_callback,
            deadline,
        })
    }

    async fn fetch_json(&self) -> Result<Vec<Record>, FetchError> {
        let response = self
            .client
            .get(&self.api_url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body = response.text().await.map_err(transport_error)?;
        decode_listings(&body)
    }

    async fn fetch_jsonp(&self, callback: &str) -> Result<Vec<Record>, FetchError> {
        let request = async {
            let response = self
                .client
                .get(&self.api_url)
                .query(&[("callback", callback)])
                .header(CACHE_CONTROL, "no-store")
                .send()
                .await
                .map_err(transport_error)?;
            if !response.status().is_success() {
                return Err(FetchError::Status(response.status().as_u16()));
            }
            let body = response.text().await.map_err(transport_error)?;
            Ok::<_, FetchError>(body)
        };

        let body = match timeout(self.deadline, request).await {
            Ok(result) => result?,
            Err(_) => {
                warn!("⏳ JSONP request gave no answer within {:?}", self.deadline);
                return Err(FetchError::Timeout);
            }
        };

        decode_listings(unwrap_jsonp(&body, callback)?)
    }
}

#[async_trait::async_trait]
impl ListingSource for HttpListingSource {
    async fn fetch(&self) -> Result<Vec<Record>, FetchError> {
        info!("Fetching listings from {}", self.api_url);
        let err = match self.fetch_json().await {
            Ok(records) => return Ok(records),
            Err(e) => e,
        };

        match &self.jsonp_callback {
            Some(callback) => {
                warn!("Plain fetch failed ({}), retrying with callback '{}'", err, callback);
                self.fetch_jsonp(callback).await
            }
            None => Err(err),
        }
    }
}

fn transport_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Http(e.to_string())
    }
}

pub fn decode_listings(body: &str) -> Result<Vec<Record>, FetchError> {
    let response: ListingsResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(response.into_records())
}

/// Strips `callback( ... );` down to the JSON payload.
pub fn unwrap_jsonp<'a>(body: &'a str, callback: &str) -> Result<&'a str, FetchError> {
    let malformed = || FetchError::Jsonp(format!("expected a call to '{}'", callback));

    let inner = body
        .trim()
        .strip_prefix(callback)
        .ok_or_else(malformed)?
        .trim_start()
        .strip_prefix('(')
        .ok_or_else(malformed)?;
    let inner = inner.trim_end();
    let inner = inner.strip_suffix(';').unwrap_or(inner).trim_end();
    let inner = inner.strip_suffix(')').ok_or_else(malformed)?;
    Ok(inner.trim())
}
