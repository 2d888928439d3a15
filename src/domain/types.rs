//! # Domain Types
//!
//! Common data structures and enums used across the application logic.

use chrono::DateTime;

/// Marker for a place field the geocoder did not provide.
pub const UNKNOWN: &str = "Unknown";

/// Country code reported when reverse geocoding found no landmass.
pub const WATER_SENTINEL: &str = "XZ";

pub const UNKNOWN_ROCKET: &str = "Unknown Rocket";

/// A classified chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Wait this many seconds (already clamped) and then report the ISS position.
    NumericWait(u64),
    LaunchInfoQuery,
    Unrecognized,
}

/// The latest message in a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInfo {
    pub id: String,
    pub title: String,
    pub kind: String,
}

/// Coordinates in decimal degrees, kept as the provider reported them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub latitude: String,
    pub longitude: String,
}

impl Position {
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationTime {
    pub epoch_seconds: i64,
}

impl ObservationTime {
    pub fn new(epoch_seconds: i64) -> Self {
        Self { epoch_seconds }
    }

    /// Renders the instant the way C `ctime()` does, in UTC: `Thu Jun 18 18:42:36 2020`.
    pub fn render(&self) -> String {
        match DateTime::from_timestamp(self.epoch_seconds, 0) {
            Some(dt) => dt.format("%a %b %e %H:%M:%S %Y").to_string(),
            None => format!("epoch {}", self.epoch_seconds),
        }
    }
}

/// A single ISS position report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssFix {
    pub position: Position,
    pub time: ObservationTime,
}

/// One reverse-geocoding match as returned by the provider. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeocodeRecord {
    pub country_code: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub street: Option<String>,
}

/// Best-effort description of the place below a position.
///
/// Missing fields hold [`UNKNOWN`]; a water description never carries place terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceDescription {
    pub country_code: String,
    /// Full country name, or the raw code when the table has no entry for it.
    pub country: String,
    pub state: String,
    pub city: String,
    pub street: String,
}

impl PlaceDescription {
    pub fn water() -> Self {
        Self {
            country_code: WATER_SENTINEL.to_string(),
            country: WATER_SENTINEL.to_string(),
            state: UNKNOWN.to_string(),
            city: UNKNOWN.to_string(),
            street: UNKNOWN.to_string(),
        }
    }

    pub fn is_water(&self) -> bool {
        self.country_code == WATER_SENTINEL
    }

    pub fn has_street(&self) -> bool {
        is_known(&self.street)
    }

    pub fn has_city(&self) -> bool {
        is_known(&self.city)
    }

    pub fn has_state(&self) -> bool {
        is_known(&self.state)
    }
}

pub fn is_known(field: &str) -> bool {
    field != UNKNOWN
}

/// Primary launch record. `rocket` and `launchpad` are references for the follow-up lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRecord {
    pub name: String,
    pub date_utc: String,
    pub rocket: Option<String>,
    pub launchpad: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RocketRecord {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchpadRecord {
    pub name: String,
    pub locality: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSummary {
    pub mission_name: String,
    pub utc_date: String,
    pub rocket_name: String,
    pub pad_name: String,
    pub pad_locality: String,
}
