//! # Geocode Resolver
//!
//! Turns a position into a [`PlaceDescription`]. Provider failures and empty
//! result lists both degrade to the water description; only a country code
//! missing from the static table is reported as its own error class.

use crate::domain::countries::country_name;
use crate::domain::error::CountryError;
use crate::domain::traits::GeocodeProvider;
use crate::domain::types::{GeocodeRecord, PlaceDescription, Position, UNKNOWN, WATER_SENTINEL};

pub async fn resolve_place(geocoder: &dyn GeocodeProvider, position: &Position) -> PlaceDescription {
    let records = match geocoder.reverse(position).await {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!("Geolocation lookup failed, assuming water: {}", e);
            return PlaceDescription::water();
        }
    };

    let Some(record) = records.first() else {
        tracing::info!(
            "No geolocation data found for ({}, {})",
            position.latitude,
            position.longitude
        );
        return PlaceDescription::water();
    };

    let (place, country_error) = place_from_record(record);
    if let Some(e) = country_error {
        tracing::error!(code = %place.country_code, "Country table mismatch: {}", e);
    }
    place
}

/// Builds a description from one geocoder match.
///
/// The country name falls back to the raw code when the table lacks it; the
/// lookup error is returned alongside so the caller can report it.
pub fn place_from_record(record: &GeocodeRecord) -> (PlaceDescription, Option<CountryError>) {
    let code = known(record.country_code.as_deref())
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or_else(|| WATER_SENTINEL.to_string());

    if code == WATER_SENTINEL {
        return (PlaceDescription::water(), None);
    }

    let (country, country_error) = match country_name(&code) {
        Ok(name) => (name.to_string(), None),
        Err(e) => (code.clone(), Some(e)),
    };

    let city = known(record.city.as_deref())
        .or_else(|| known(record.town.as_deref()))
        .or_else(|| known(record.village.as_deref()));

    let place = PlaceDescription {
        country_code: code,
        country,
        state: or_unknown(known(record.state.as_deref())),
        city: or_unknown(city),
        street: or_unknown(known(record.street.as_deref())),
    };
    (place, country_error)
}

fn known(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|v| !v.is_empty())
}

fn or_unknown(field: Option<&str>) -> String {
    field.unwrap_or(UNKNOWN).to_string()
}
