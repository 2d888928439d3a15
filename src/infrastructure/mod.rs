//! # Infrastructure Layer
//!
//! Handles interactions with external systems and services.
//! Implements the traits defined in the Domain layer (ChatProvider, OrbitalProvider, ...).

pub mod clock;
pub mod geoapify;
pub mod http;
pub mod open_notify;
pub mod spacex;
pub mod webex;
