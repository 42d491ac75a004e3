//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{StopTime, TripCandidate};

/// Query string of `GET /api/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    pub origin: String,

    pub destination: String,

    /// Day code: 1 weekday, 2 Saturday, 3 Sunday (defaults to 1)
    pub day: Option<String>,

    /// Earliest departure, "HH:MM" (defaults to 00:00)
    pub time: Option<String>,

    /// Notice language (defaults to pt)
    pub lang: Option<String>,
}

/// Response of `GET /api/search`.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Canonical origin name
    pub origin: String,

    /// Canonical destination name
    pub destination: String,

    /// Day code as sent
    pub day: u8,

    /// "HH:MM"
    pub time: String,

    pub count: usize,

    /// Which data source answered
    pub source: &'static str,

    pub trips: Vec<TripResult>,
}

/// One trip in search results.
#[derive(Debug, Serialize)]
pub struct TripResult {
    pub id: i64,

    /// Route code, e.g. "316"
    pub route: String,

    /// Nominal first stop of the route
    pub origin: String,

    /// Nominal last stop of the route
    pub destination: String,

    /// Route start, "HHhMM"
    pub start: String,

    /// Route end, "HHhMM"
    pub end: String,

    /// False when start/end are placeholders
    pub authoritative_times: bool,

    /// Departure from the requested origin
    pub departure: String,

    /// Arrival at the requested destination
    pub arrival: String,

    pub duration_mins: u32,

    /// "WEEKDAY", "SATURDAY" or "SUNDAY"
    pub type_of_day: String,

    /// Notice in the requested language, or empty
    pub notice: String,

    /// Stops from origin to destination
    pub leg: Vec<StopResult>,

    /// The trip's whole itinerary
    pub stops: Vec<StopResult>,
}

/// A stop and its time.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub name: String,

    /// "HHhMM"
    pub time: String,
}

impl StopResult {
    fn from_pairs(pairs: &[(String, StopTime)]) -> Vec<Self> {
        pairs
            .iter()
            .map(|(name, time)| StopResult {
                name: name.clone(),
                time: time.to_string(),
            })
            .collect()
    }
}

impl From<&TripCandidate> for TripResult {
    fn from(trip: &TripCandidate) -> Self {
        let header = trip.header();

        TripResult {
            id: header.id,
            route: header.route_code.clone(),
            origin: header.origin.clone(),
            destination: header.destination.clone(),
            start: header.start.to_string(),
            end: header.end.to_string(),
            authoritative_times: header.authoritative_times,
            departure: trip.boarding_time().to_string(),
            arrival: trip.alighting_time().to_string(),
            duration_mins: trip.travel_minutes(),
            type_of_day: header.day_type.to_string(),
            notice: trip.notice().to_string(),
            leg: trip.leg().map(StopResult::from_pairs).unwrap_or_default(),
            stops: trip
                .timetable()
                .iter()
                .map(|(name, time)| StopResult {
                    name: name.to_string(),
                    time: time.to_string(),
                })
                .collect(),
        }
    }
}

/// Query string of `GET /api/stops`.
#[derive(Debug, Deserialize)]
pub struct StopSearchRequest {
    /// Search text
    pub q: String,

    /// Maximum results (default 10, capped at 50)
    pub limit: Option<usize>,
}

/// Response of `GET /api/stops`.
#[derive(Debug, Serialize)]
pub struct StopSearchResponse {
    pub stops: Vec<String>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
