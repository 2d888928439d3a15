//! # Launch Info Fetcher
//!
//! Builds the next-launch summary. The launch record itself is mandatory; the
//! rocket and launch pad lookups are independent enrichments that fall back to
//! their "Unknown" defaults when they fail.

use crate::domain::error::ProviderError;
use crate::domain::traits::LaunchProvider;
use crate::domain::types::{
    LaunchRecord, LaunchSummary, LaunchpadRecord, RocketRecord, UNKNOWN, UNKNOWN_ROCKET,
};
use crate::strings::messages;

/// Text posted for the launch command: the summary, or the fixed failure string.
pub async fn launch_info(launches: &dyn LaunchProvider) -> String {
    match launch_summary(launches).await {
        Ok(summary) => messages::launch_summary(&summary),
        Err(e) => {
            tracing::warn!("Launch lookup failed: {}", e);
            messages::LAUNCH_UNAVAILABLE.to_string()
        }
    }
}

pub async fn launch_summary(launches: &dyn LaunchProvider) -> Result<LaunchSummary, ProviderError> {
    let record = launches.next_launch().await?;

    let rocket = match record.rocket.as_deref() {
        Some(id) => enrichment("rocket", launches.rocket(id).await),
        None => None,
    };
    let pad = match record.launchpad.as_deref() {
        Some(id) => enrichment("launchpad", launches.launchpad(id).await),
        None => None,
    };

    Ok(summarize(record, rocket, pad))
}

fn enrichment<T>(what: &str, result: Result<T, ProviderError>) -> Option<T> {
    result
        .inspect_err(|e| tracing::warn!("Could not resolve {}: {}", what, e))
        .ok()
}

fn summarize(
    record: LaunchRecord,
    rocket: Option<RocketRecord>,
    pad: Option<LaunchpadRecord>,
) -> LaunchSummary {
    let (pad_name, pad_locality) = match pad {
        Some(pad) => (pad.name, pad.locality.unwrap_or_else(|| UNKNOWN.to_string())),
        None => (UNKNOWN.to_string(), UNKNOWN.to_string()),
    };
    LaunchSummary {
        mission_name: record.name,
        utc_date: record.date_utc,
        rocket_name: rocket.map_or_else(|| UNKNOWN_ROCKET.to_string(), |r| r.name),
        pad_name,
        pad_locality,
    }
}
