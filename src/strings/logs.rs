//! # Log Strings
//!
//! Messages written to the console and session log.

pub const STARTING: &str = "Starting Orbit Herald...";
pub const SHUTDOWN: &str = "Interrupted, shutting down...";

pub fn shutdown_fail(err: &str) -> String {
    format!("Unable to listen for shutdown signal: {err}")
}

pub fn config_loaded(path: &str) -> String {
    format!("Loaded configuration from {path}")
}

pub fn room_found(title: &str, id: &str) -> String {
    format!("Found room: {title} ({id})")
}

pub fn monitoring_room(room_id: &str, trigger: char) -> String {
    format!("Monitoring room {room_id} for '{trigger}' commands")
}

pub const NO_MESSAGES: &str = "No messages found yet.";

pub fn latest_message(text: &str) -> String {
    format!("Most recent message: {text}")
}

pub fn not_a_number(trigger: char) -> String {
    format!("Ignoring message: text after '{trigger}' must be a number or the launch keyword.")
}

pub fn sending(text: &str) -> String {
    format!("Sending to room: {text}")
}

pub const SENT: &str = "Message successfully sent to room.";
