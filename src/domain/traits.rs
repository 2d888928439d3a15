//! # Domain Traits
//!
//! Abstract interfaces for the chat service, the data providers and the clock.
//! Allows for pluggable implementations in the Infrastructure layer.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::error::ProviderError;
use crate::domain::types::{
    ChatMessage, GeocodeRecord, IssFix, LaunchRecord, LaunchpadRecord, Position, RocketRecord,
    RoomInfo,
};

/// Abstract interface for a Chat Provider (e.g., Webex)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Most recent message in the room, if any
    async fn latest_message(&self, room_id: &str) -> Result<Option<ChatMessage>, ProviderError>;

    /// Post a plain text message to the room
    async fn send_message(&self, room_id: &str, text: &str) -> Result<(), ProviderError>;

    /// Rooms visible to the credential
    async fn list_rooms(&self) -> Result<Vec<RoomInfo>, ProviderError>;
}

#[async_trait]
pub trait OrbitalProvider: Send + Sync {
    async fn current_position(&self) -> Result<IssFix, ProviderError>;
}

#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    /// Reverse geocode a position. An empty list means nothing matched.
    async fn reverse(&self, position: &Position) -> Result<Vec<GeocodeRecord>, ProviderError>;
}

#[async_trait]
pub trait LaunchProvider: Send + Sync {
    async fn next_launch(&self) -> Result<LaunchRecord, ProviderError>;
    async fn rocket(&self, id: &str) -> Result<RocketRecord, ProviderError>;
    async fn launchpad(&self, id: &str) -> Result<LaunchpadRecord, ProviderError>;
}

/// Sleep source for the poll loop, so tests can run without real delays.
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}
