//! # Messages
//!
//! Contains the texts posted back to the chat room: the ISS location sentences
//! and the launch summary.

use crate::domain::types::LaunchSummary;

pub const LAUNCH_UNAVAILABLE: &str = "Unable to retrieve launch information right now.";

pub fn iss_over_water(time: &str, lat: &str, lng: &str) -> String {
    format!("On {time}, the ISS was flying over a body of water at latitude {lat}° and longitude {lng}°.")
}

pub fn iss_over_street(
    time: &str,
    street: &str,
    city: &str,
    state: &str,
    country: &str,
    lat: &str,
    lng: &str,
) -> String {
    format!(
        "On {time}, the ISS was flying over the following location: \n{street} \n{city}, {state} \n{country}\n({lat}°, {lng}°)"
    )
}

pub fn iss_over_city(
    time: &str,
    city: &str,
    state: &str,
    country: &str,
    lat: &str,
    lng: &str,
) -> String {
    format!(
        "On {time}, the ISS was flying over the following location: \n{city}, {state} \n{country}\n({lat}°, {lng}°)"
    )
}

pub fn iss_over_state(time: &str, state: &str, country: &str, lat: &str, lng: &str) -> String {
    format!(
        "On {time}, the ISS was flying over the following location: \n{state} \n{country}\n({lat}°, {lng}°)"
    )
}

pub fn iss_over_country(time: &str, country: &str, lat: &str, lng: &str) -> String {
    format!("On {time}, the ISS was flying over the following country: {country}\n({lat}°, {lng}°)")
}

pub fn launch_summary(summary: &LaunchSummary) -> String {
    format!(
        "Next launch: {}\nDate (UTC): {}\nRocket: {}\nLaunch pad: {}, {}",
        summary.mission_name,
        summary.utc_date,
        summary.rocket_name,
        summary.pad_name,
        summary.pad_locality
    )
}
