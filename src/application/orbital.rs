//! # Orbital Fetcher
//!
//! Single best-effort read of the current ISS position. No retries: a failure
//! just means this cycle has nothing to report.

use crate::domain::traits::OrbitalProvider;
use crate::domain::types::IssFix;

pub async fn fetch_fix(orbital: &dyn OrbitalProvider) -> Option<IssFix> {
    match orbital.current_position().await {
        Ok(fix) => {
            tracing::debug!(
                "ISS at ({}, {}) epoch {}",
                fix.position.latitude,
                fix.position.longitude,
                fix.time.epoch_seconds
            );
            Some(fix)
        }
        Err(e) => {
            tracing::warn!(provider = e.provider(), "Error retrieving ISS data: {}", e);
            None
        }
    }
}
