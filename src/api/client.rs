// src/api/client.rs
//! HTTP implementation of [`GraphSource`] against the remote graph API.
//!
//! A thin wrapper around reqwest: bearer authentication, one GET per
//! capability call, response classification into the [`FetchError`]
//! taxonomy, and a bounded retry loop for retryable failures. No
//! crawl logic lives here.

use super::responses::{ObjectEnvelope, PageCursor, PageEnvelope};
use super::GraphSource;
use crate::constants::{
    FETCH_RETRY_ATTEMPTS, GRAPH_API_BASE_URL, RETRY_INITIAL_DELAY_MS, RETRY_MAX_DELAY_MS,
};
use crate::error::{AppError, FetchError, GraphApiErrorCode};
use crate::error_recovery::retry_with_backoff;
use crate::types::{AccessToken, GraphPath};
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Production graph API client.
#[derive(Clone)]
pub struct GraphHttpClient {
    client: Client,
    base_url: String,
}

impl GraphHttpClient {
    /// Creates a client against the default graph API endpoint.
    pub fn new(token: &AccessToken) -> Result<Self, AppError> {
        Self::with_base_url(token, GRAPH_API_BASE_URL)
    }

    /// Creates a client against a specific endpoint, for staging hosts
    /// and tests.
    pub fn with_base_url(token: &AccessToken, base_url: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(token)?)
            .build()
            .map_err(|e| AppError::InvalidConfiguration(format!("HTTP client setup: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn create_headers(token: &AccessToken) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", token.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::InvalidConfiguration(format!("access token is not header-safe: {}", e))
            })?,
        );

        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Builds the request URL for a path, threading a pagination cursor
    /// when one is given. A cursor that is already an absolute URL (a
    /// `paging.next` link) is followed as-is.
    fn request_url(&self, path: &GraphPath, cursor: Option<&PageCursor>) -> String {
        if let Some(cursor) = cursor {
            if cursor.as_str().starts_with("http://") || cursor.as_str().starts_with("https://") {
                return cursor.as_str().to_string();
            }
        }

        let mut url = format!("{}/{}", self.base_url, path.as_str().trim_start_matches('/'));
        if let Some(cursor) = cursor {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str("after=");
            url.push_str(cursor.as_str());
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        retry_with_backoff(
            || self.try_get_json(url),
            FETCH_RETRY_ATTEMPTS,
            Duration::from_millis(RETRY_INITIAL_DELAY_MS),
            Duration::from_millis(RETRY_MAX_DELAY_MS),
        )
        .await
    }

    async fn try_get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Self::classify_failure(status, &body));
        }

        serde_json::from_str(&body).map_err(FetchError::from)
    }

    /// Maps a non-success response into the fetch error taxonomy using
    /// the graph API error body when one is present.
    fn classify_failure(status: StatusCode, body: &str) -> FetchError {
        let error_body: Option<Value> = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("error").cloned());

        let code = match &error_body {
            Some(error) => {
                let error_type = error.get("type").and_then(Value::as_str).unwrap_or("");
                let error_code = error.get("code").and_then(Value::as_u64);
                GraphApiErrorCode::from_api_response(error_type, error_code)
            }
            None => GraphApiErrorCode::from_http_status(status.as_u16()),
        };

        let message = error_body
            .as_ref()
            .and_then(|e| e.get("message").and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status));

        if code.is_auth() {
            FetchError::Auth { code, message }
        } else {
            FetchError::Transport {
                code: Some(code),
                message,
            }
        }
    }
}

#[async_trait::async_trait]
impl GraphSource for GraphHttpClient {
    async fn fetch_object(&self, path: &GraphPath) -> Result<ObjectEnvelope, FetchError> {
        self.get_json(&self.request_url(path, None)).await
    }

    async fn fetch_page(
        &self,
        path: &GraphPath,
        cursor: Option<&PageCursor>,
    ) -> Result<PageEnvelope, FetchError> {
        self.get_json(&self.request_url(path, cursor)).await
    }
}
