//! # HTTP Helpers
//!
//! Shared `reqwest` client construction and response checking for every provider.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::domain::error::ProviderError;

/// Builds a client whose every request is bounded by `timeout`.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to create HTTP client")
}

/// Sends the request and checks for a success status.
pub async fn send(
    provider: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<reqwest::Response, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|source| ProviderError::Http { provider, source })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::debug!("{} replied {}: {}", provider, status, body);
        return Err(ProviderError::Status { provider, status });
    }
    Ok(response)
}

/// Sends the request and decodes a JSON body into `T`.
pub async fn get_json<T: DeserializeOwned>(
    provider: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<T, ProviderError> {
    let response = send(provider, request).await?;
    let body = response
        .text()
        .await
        .map_err(|source| ProviderError::Http { provider, source })?;
    decode(provider, &body)
}

pub fn decode<T: DeserializeOwned>(provider: &'static str, body: &str) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::payload(provider, e.to_string()))
}
