//! # Application Layer
//!
//! Contains the core logic and orchestration of the bot.
//! This includes command parsing, the ISS and launch pipelines, and the poll loop.

pub mod geocode;
pub mod launch;
pub mod logging;
pub mod orbital;
pub mod parsing;
pub mod report;
pub mod router;
