//! # Error Types
//!
//! Failures raised by the external providers and by the country lookup table.

use thiserror::Error;

/// A failed call to one of the external providers.
///
/// Timeouts surface as [`ProviderError::Http`] and are handled like any other failure.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider}: request failed: {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider}: unexpected status {status}")]
    Status {
        provider: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("{provider}: malformed payload: {reason}")]
    Payload {
        provider: &'static str,
        reason: String,
    },
}

impl ProviderError {
    pub fn payload(provider: &'static str, reason: impl Into<String>) -> Self {
        ProviderError::Payload {
            provider,
            reason: reason.into(),
        }
    }

    pub fn provider(&self) -> &'static str {
        match self {
            ProviderError::Http { provider, .. }
            | ProviderError::Status { provider, .. }
            | ProviderError::Payload { provider, .. } => provider,
        }
    }
}

/// A country code that is missing from the static table.
///
/// Signals a data/table mismatch rather than an outage.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CountryError {
    #[error("Country code not in table: {0}")]
    UnknownCode(String),
}
