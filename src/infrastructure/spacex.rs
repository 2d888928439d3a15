//! # SpaceX Launch Adapter
//!
//! Next launch plus rocket and launch pad lookups from the SpaceX v4 API.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::error::ProviderError;
use crate::domain::traits::LaunchProvider;
use crate::domain::types::{LaunchRecord, LaunchpadRecord, RocketRecord};
use crate::infrastructure::http;

const PROVIDER: &str = "spacex";

#[derive(Clone)]
pub struct SpaceXService {
    http: reqwest::Client,
    base_url: String,
}

impl SpaceXService {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ProviderError> {
        let url = format!("{}/{}", self.base_url, path);
        http::get_json(PROVIDER, self.http.get(url)).await
    }
}

#[derive(Debug, Deserialize)]
struct Launch {
    name: String,
    date_utc: String,
    #[serde(default)]
    rocket: Option<String>,
    #[serde(default)]
    launchpad: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Rocket {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Launchpad {
    name: String,
    #[serde(default)]
    locality: Option<String>,
}

impl From<Launch> for LaunchRecord {
    fn from(l: Launch) -> Self {
        LaunchRecord {
            name: l.name,
            date_utc: l.date_utc,
            rocket: l.rocket.filter(|id| !id.is_empty()),
            launchpad: l.launchpad.filter(|id| !id.is_empty()),
        }
    }
}

#[async_trait]
impl LaunchProvider for SpaceXService {
    async fn next_launch(&self) -> Result<LaunchRecord, ProviderError> {
        self.get::<Launch>("launches/next").await.map(LaunchRecord::from)
    }

    async fn rocket(&self, id: &str) -> Result<RocketRecord, ProviderError> {
        let rocket: Rocket = self.get(&format!("rockets/{id}")).await?;
        Ok(RocketRecord { name: rocket.name })
    }

    async fn launchpad(&self, id: &str) -> Result<LaunchpadRecord, ProviderError> {
        let pad: Launchpad = self.get(&format!("launchpads/{id}")).await?;
        Ok(LaunchpadRecord {
            name: pad.name,
            locality: pad.locality,
        })
    }
}
