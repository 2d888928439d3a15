//! # Webex Service Adapter
//!
//! Implements the `ChatProvider` trait against the Webex REST API.
//! Every call carries the bearer token the service was created with.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::error::ProviderError;
use crate::domain::traits::ChatProvider;
use crate::domain::types::{ChatMessage, RoomInfo};
use crate::infrastructure::http;

const PROVIDER: &str = "webex";

#[derive(Clone)]
pub struct WebexService {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl WebexService {
    pub fn new(http: reqwest::Client, base_url: &str, token: String) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[derive(Debug, Deserialize)]
struct Page<T> {
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct WebexMessage {
    id: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WebexRoom {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(rename = "type", default)]
    kind: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PostMessage<'a> {
    room_id: &'a str,
    text: &'a str,
}

fn latest_from_page(page: Page<WebexMessage>) -> Option<ChatMessage> {
    page.items.into_iter().next().map(|m| ChatMessage {
        id: m.id,
        // File-only messages have no text; they can never be commands.
        text: m.text.unwrap_or_default(),
    })
}

fn rooms_from_page(page: Page<WebexRoom>) -> Vec<RoomInfo> {
    page.items
        .into_iter()
        .map(|r| RoomInfo {
            id: r.id,
            title: r.title,
            kind: r.kind,
        })
        .collect()
}

#[async_trait]
impl ChatProvider for WebexService {
    async fn latest_message(&self, room_id: &str) -> Result<Option<ChatMessage>, ProviderError> {
        let request = self
            .http
            .get(self.url("messages"))
            .bearer_auth(&self.token)
            .query(&[("roomId", room_id), ("max", "1")]);
        let page: Page<WebexMessage> = http::get_json(PROVIDER, request).await?;
        Ok(latest_from_page(page))
    }

    async fn send_message(&self, room_id: &str, text: &str) -> Result<(), ProviderError> {
        let request = self
            .http
            .post(self.url("messages"))
            .bearer_auth(&self.token)
            .json(&PostMessage { room_id, text });
        http::send(PROVIDER, request).await.map(|_| ())
    }

    async fn list_rooms(&self) -> Result<Vec<RoomInfo>, ProviderError> {
        let request = self.http.get(self.url("rooms")).bearer_auth(&self.token);
        let page: Page<WebexRoom> = http::get_json(PROVIDER, request).await?;
        Ok(rooms_from_page(page))
    }
}
