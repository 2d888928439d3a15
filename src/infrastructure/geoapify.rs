//! # Geoapify Adapter
//!
//! Reverse geocoding through the Geoapify `geocode/reverse` endpoint.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::error::ProviderError;
use crate::domain::traits::GeocodeProvider;
use crate::domain::types::{GeocodeRecord, Position};
use crate::infrastructure::http;

const PROVIDER: &str = "geoapify";

#[derive(Clone)]
pub struct GeoapifyService {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl GeoapifyService {
    pub fn new(http: reqwest::Client, url: &str, api_key: String) -> Self {
        Self {
            http,
            url: url.to_string(),
            api_key,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    results: Vec<ReverseResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReverseResult {
    country_code: Option<String>,
    state: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    street: Option<String>,
}

impl From<ReverseResult> for GeocodeRecord {
    fn from(r: ReverseResult) -> Self {
        GeocodeRecord {
            country_code: r.country_code,
            state: r.state,
            city: r.city,
            town: r.town,
            village: r.village,
            street: r.street,
        }
    }
}

fn records(response: ReverseResponse) -> Vec<GeocodeRecord> {
    response.results.into_iter().map(GeocodeRecord::from).collect()
}

#[async_trait]
impl GeocodeProvider for GeoapifyService {
    async fn reverse(&self, position: &Position) -> Result<Vec<GeocodeRecord>, ProviderError> {
        let request = self.http.get(&self.url).query(&[
            ("lat", position.latitude.as_str()),
            ("lon", position.longitude.as_str()),
            ("format", "json"),
            ("apiKey", self.api_key.as_str()),
        ]);
        let response: ReverseResponse = http::get_json(PROVIDER, request).await?;
        Ok(records(response))
    }
}
