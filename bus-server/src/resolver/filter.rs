//! Candidate filtering.

use tracing::{debug, warn};

use crate::domain::{SearchQuery, StopTimetable};
use crate::upstream::{RawTrip, parse_timetable};

/// Longest plausible ride; anything longer is a bad record.
const MAX_TRAVEL_MINS: u32 = 12 * 60;

/// A raw trip whose timetable calls at the query's origin, then its
/// destination.
#[derive(Debug, Clone)]
pub struct FilteredTrip {
    pub raw: RawTrip,
    pub timetable: StopTimetable,
}

/// Keep only trips whose own itinerary runs from the query's origin to its
/// destination.
///
/// Upstream records can match a query nominally without calling at both
/// stops, or call at them in the opposite order. Trips with an unparseable
/// timetable or a ride over twelve hours are dropped.
pub fn filter_candidates(trips: Vec<RawTrip>, query: &SearchQuery) -> Vec<FilteredTrip> {
    let origin = query.origin.as_str();
    let destination = query.destination.as_str();

    trips
        .into_iter()
        .filter_map(|raw| {
            let timetable = match parse_timetable(&raw) {
                Ok(timetable) => timetable,
                Err(e) => {
                    warn!(trip = raw.id, error = %e, "dropping trip with malformed stops");
                    return None;
                }
            };

            let (Some(from), Some(to)) =
                (timetable.position(origin), timetable.position(destination))
            else {
                debug!(trip = raw.id, origin, destination, "trip does not call at both stops");
                return None;
            };
            if from > to {
                debug!(trip = raw.id, origin, destination, "trip runs the other way");
                return None;
            }

            let ride = timetable
                .time_at(origin)
                .zip(timetable.time_at(destination))
                .map(|(board, alight)| board.minutes_until(alight));
            if ride.is_some_and(|mins| mins > MAX_TRAVEL_MINS) {
                debug!(trip = raw.id, origin, destination, ?ride, "implausible travel time");
                return None;
            }

            Some(FilteredTrip { raw, timetable })
        })
        .collect()
}
