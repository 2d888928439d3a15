//! # Open Notify Adapter
//!
//! Current ISS position from the `iss-now` endpoint.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::error::ProviderError;
use crate::domain::traits::OrbitalProvider;
use crate::domain::types::{IssFix, ObservationTime, Position};
use crate::infrastructure::http;

const PROVIDER: &str = "open-notify";

#[derive(Clone)]
pub struct OpenNotifyService {
    http: reqwest::Client,
    url: String,
}

impl OpenNotifyService {
    pub fn new(http: reqwest::Client, url: &str) -> Self {
        Self {
            http,
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl OrbitalProvider for OpenNotifyService {
    async fn current_position(&self) -> Result<IssFix, ProviderError> {
        let body: Value = http::get_json(PROVIDER, self.http.get(&self.url)).await?;
        parse_iss_now(&body)
    }
}

/// Extracts the fix from an `iss-now` payload. Coordinates may arrive as strings or numbers.
pub fn parse_iss_now(body: &Value) -> Result<IssFix, ProviderError> {
    if let Some(message) = body.get("message").and_then(Value::as_str)
        && message != "success"
    {
        return Err(ProviderError::payload(PROVIDER, format!("message '{message}'")));
    }

    let position = body
        .get("iss_position")
        .ok_or_else(|| ProviderError::payload(PROVIDER, "missing iss_position"))?;
    let latitude = coordinate(position, "latitude")?;
    let longitude = coordinate(position, "longitude")?;
    let timestamp = body
        .get("timestamp")
        .and_then(Value::as_i64)
        .ok_or_else(|| ProviderError::payload(PROVIDER, "missing timestamp"))?;

    Ok(IssFix {
        position: Position::new(latitude, longitude),
        time: ObservationTime::new(timestamp),
    })
}

fn coordinate(position: &Value, field: &str) -> Result<String, ProviderError> {
    match position.get(field) {
        Some(Value::String(s)) if s.trim().parse::<f64>().is_ok() => Ok(s.trim().to_string()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(ProviderError::payload(PROVIDER, format!("missing {field}"))),
    }
}
