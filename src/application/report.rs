//! # Location Reporter
//!
//! Formats an ISS position into the sentence posted to the room. The wording is
//! picked from an ordered list of tiers, most specific first; the first tier
//! whose predicate holds wins.

use crate::domain::types::{ObservationTime, PlaceDescription, Position};
use crate::strings::messages;

struct Report<'a> {
    time: &'a str,
    position: &'a Position,
    place: &'a PlaceDescription,
}

struct Tier {
    name: &'static str,
    applies: fn(&PlaceDescription) -> bool,
    render: fn(&Report<'_>) -> String,
}

static TIERS: [Tier; 5] = [
    Tier {
        name: "water",
        applies: PlaceDescription::is_water,
        render: |r| messages::iss_over_water(r.time, &r.position.latitude, &r.position.longitude),
    },
    Tier {
        name: "street",
        applies: PlaceDescription::has_street,
        render: |r| {
            messages::iss_over_street(
                r.time,
                &r.place.street,
                &r.place.city,
                &r.place.state,
                &r.place.country,
                &r.position.latitude,
                &r.position.longitude,
            )
        },
    },
    Tier {
        name: "city",
        applies: PlaceDescription::has_city,
        render: |r| {
            messages::iss_over_city(
                r.time,
                &r.place.city,
                &r.place.state,
                &r.place.country,
                &r.position.latitude,
                &r.position.longitude,
            )
        },
    },
    Tier {
        name: "state",
        applies: PlaceDescription::has_state,
        render: |r| {
            messages::iss_over_state(
                r.time,
                &r.place.state,
                &r.place.country,
                &r.position.latitude,
                &r.position.longitude,
            )
        },
    },
    Tier {
        name: "country",
        applies: |_| true,
        render: |r| {
            messages::iss_over_country(
                r.time,
                &r.place.country,
                &r.position.latitude,
                &r.position.longitude,
            )
        },
    },
];

pub fn location_message(
    position: &Position,
    time: &ObservationTime,
    place: &PlaceDescription,
) -> String {
    let rendered = time.render();
    let report = Report {
        time: &rendered,
        position,
        place,
    };
    let tier = TIERS
        .iter()
        .find(|tier| (tier.applies)(place))
        .unwrap_or(&TIERS[TIERS.len() - 1]);
    tracing::debug!("Location tier: {}", tier.name);
    (tier.render)(&report)
}
