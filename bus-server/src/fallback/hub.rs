//! Catalog scan for hub stops.
//!
//! A hub appears on nearly every route but is not indexed by pair
//! upstream, so its trips are found by walking the whole catalog.

use tracing::{debug, trace};

use crate::domain::{DayType, SearchQuery};
use crate::upstream::{RawTrip, parse_timetable};

/// Route-level time given to synthesized trips.
const PLACEHOLDER_TIME: &str = "00h00";

/// Which end of the query is the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubEnd {
    Origin,
    Destination,
}

/// Catalog trips that run from the query's origin to its destination.
///
/// Each match is a copy of the catalog entry retitled to the query's stops,
/// with placeholder start/end times: the catalog only carries the route's
/// own times, not this leg's.
pub fn scan_catalog(catalog: &[RawTrip], query: &SearchQuery, hub: HubEnd) -> Vec<RawTrip> {
    let origin = query.origin.as_str();
    let destination = query.destination.as_str();

    let matches: Vec<RawTrip> = catalog
        .iter()
        .filter(|trip| !trip.is_disabled() && runs_on(trip, query.day))
        .filter(|trip| {
            let timetable = match parse_timetable(trip) {
                Ok(timetable) => timetable,
                Err(e) => {
                    trace!(trip = trip.id, error = %e, "skipping catalog entry");
                    return false;
                }
            };
            let (Some(from), Some(to)) =
                (timetable.position(origin), timetable.position(destination))
            else {
                return false;
            };
            match hub {
                HubEnd::Origin => from < to,
                HubEnd::Destination => to > from,
            }
        })
        .map(|trip| RawTrip {
            origin: origin.to_string(),
            destination: destination.to_string(),
            start: PLACEHOLDER_TIME.to_string(),
            end: PLACEHOLDER_TIME.to_string(),
            placeholder_times: true,
            ..trip.clone()
        })
        .collect();

    debug!(
        catalog = catalog.len(),
        matches = matches.len(),
        ?hub,
        "hub scan complete"
    );
    matches
}

fn runs_on(trip: &RawTrip, day: DayType) -> bool {
    trip.type_of_day
        .parse::<DayType>()
        .is_ok_and(|trip_day| trip_day == day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Language, StopTime};
    use crate::upstream::Embedded;

    fn trip(id: i64, stops: &[(&str, &str)], day: &str, disabled: Option<bool>) -> RawTrip {
        let literal = stops
            .iter()
            .map(|(stop, time)| format!("'{stop}': '{time}'"))
            .collect::<Vec<_>>()
            .join(", ");
        RawTrip {
            id,
            route: "318".to_string(),
            origin: stops[0].0.to_string(),
            destination: stops[stops.len() - 1].0.to_string(),
            start: stops[0].1.to_string(),
            end: stops[stops.len() - 1].1.to_string(),
            stops: Embedded::Text(format!("{{{literal}}}")),
            type_of_day: day.to_string(),
            information: None,
            disabled,
            placeholder_times: false,
        }
    }

    fn catalog() -> Vec<RawTrip> {
        vec![
            // Povoação → Furnas
            trip(
                1,
                &[("Povoação", "07h00"), ("Furnas", "07h20"), ("Ponta Delgada", "08h30")],
                "WEEKDAY",
                Some(false),
            ),
            // Furnas → Povoação
            trip(
                2,
                &[("Ponta Delgada", "09h00"), ("Furnas", "10h10"), ("Povoação", "10h30")],
                "WEEKDAY",
                Some(false),
            ),
            // Disabled
            trip(
                3,
                &[("Povoação", "12h00"), ("Furnas", "12h20")],
                "WEEKDAY",
                Some(true),
            ),
            // Saturday only
            trip(
                4,
                &[("Povoação", "13h00"), ("Furnas", "13h20")],
                "SATURDAY",
                None,
            ),
            // Does not reach Furnas
            trip(5, &[("Povoação", "14h00"), ("Faial da Terra", "14h25")], "WEEKDAY", None),
        ]
    }

    fn query(origin: &str, destination: &str, day: DayType) -> SearchQuery {
        SearchQuery::new(origin, destination, day, StopTime::midnight(), Language::Pt)
    }

    #[test]
    fn hub_as_origin_keeps_outbound_trips() {
        let found = scan_catalog(&catalog(), &query("Povoação", "Furnas", DayType::Weekday), HubEnd::Origin);
        let ids: Vec<_> = found.iter().map(|t| t.id).collect();
        assert_eq!(ids, [1]);
    }

    #[test]
    fn hub_as_destination_keeps_inbound_trips() {
        let found = scan_catalog(
            &catalog(),
            &query("Furnas", "Povoação", DayType::Weekday),
            HubEnd::Destination,
        );
        let ids: Vec<_> = found.iter().map(|t| t.id).collect();
        assert_eq!(ids, [2]);
    }

    #[test]
    fn matches_are_retitled_with_placeholder_times() {
        let found = scan_catalog(&catalog(), &query("Povoação", "Furnas", DayType::Weekday), HubEnd::Origin);
        let trip = &found[0];

        assert_eq!(trip.origin, "Povoação");
        assert_eq!(trip.destination, "Furnas");
        assert_eq!(trip.start, "00h00");
        assert_eq!(trip.end, "00h00");
        assert!(trip.placeholder_times);
        assert_eq!(trip.stops, catalog()[0].stops);
    }

    #[test]
    fn day_filter_applies() {
        let found = scan_catalog(&catalog(), &query("Povoação", "Furnas", DayType::Saturday), HubEnd::Origin);
        let ids: Vec<_> = found.iter().map(|t| t.id).collect();
        assert_eq!(ids, [4]);

        let found = scan_catalog(&catalog(), &query("Povoação", "Furnas", DayType::Sunday), HubEnd::Origin);
        assert!(found.is_empty());
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let mut broken = trip(9, &[("Povoação", "07h00"), ("Furnas", "07h20")], "WEEKDAY", None);
        broken.stops = Embedded::Text("{'Povoação': ".to_string());
        let mut entries = catalog();
        entries.insert(0, broken);

        let found = scan_catalog(&entries, &query("Povoação", "Furnas", DayType::Weekday), HubEnd::Origin);
        let ids: Vec<_> = found.iter().map(|t| t.id).collect();
        assert_eq!(ids, [1]);
    }
}
