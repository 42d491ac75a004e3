//! Conversion from upstream DTOs to domain types.
//!
//! The nested `stops`/`information` payloads are Python dict literals
//! (`{'Povoação': '08h45'}`), so they are rewritten into JSON before
//! parsing. Any failure here condemns a single trip, never a whole
//! response.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domain::{DayType, LocalizedText, StopTime, StopTimetable, TimetableError, TripHeader};

use super::error::UpstreamError;
use super::types::{Embedded, RawTrip, StopPairs};

/// Literal marking a trip without a notice.
const NO_INFORMATION: &str = "None";

/// Error converting one trip's payloads.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// Nested literal could not be parsed
    #[error("malformed {field} payload: {source}")]
    Literal {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Stop timetable had a bad entry
    #[error(transparent)]
    Timetable(#[from] TimetableError),

    /// Route-level time could not be parsed
    #[error("invalid {field} time: {value:?}")]
    Time { field: &'static str, value: String },

    /// Unknown day name
    #[error("unknown type_of_day: {0:?}")]
    DayType(String),
}

/// Rewrite a Python literal (single-quoted strings, `None`, `True`,
/// `False`) into JSON.
///
/// ```
/// use bus_server::upstream::literal_to_json;
///
/// assert_eq!(literal_to_json("{'a': 'b'}"), r#"{"a": "b"}"#);
/// assert_eq!(literal_to_json(r#"{'x': "Pico d'Água"}"#), r#"{"x": "Pico d'Água"}"#);
/// ```
pub fn literal_to_json(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut quote: Option<char> = None;

    while let Some(c) = chars.next() {
        match quote {
            Some(delim) => match c {
                '\\' => match chars.next() {
                    Some('\'') => out.push('\''),
                    Some(next) => {
                        out.push('\\');
                        out.push(next);
                    }
                    None => out.push('\\'),
                },
                '"' if delim == '\'' => out.push_str("\\\""),
                c if c == delim => {
                    out.push('"');
                    quote = None;
                }
                c => out.push(c),
            },
            None => match c {
                '\'' | '"' => {
                    out.push('"');
                    quote = Some(c);
                }
                c if c.is_alphabetic() => {
                    let mut word = String::from(c);
                    while let Some(&next) = chars.peek() {
                        if !next.is_alphanumeric() {
                            break;
                        }
                        word.push(next);
                        chars.next();
                    }
                    out.push_str(match word.as_str() {
                        "None" => "null",
                        "True" => "true",
                        "False" => "false",
                        other => other,
                    });
                }
                c => out.push(c),
            },
        }
    }

    out
}

fn parse_embedded<T: DeserializeOwned>(
    payload: &Embedded<T>,
    field: &'static str,
) -> Result<T, PayloadError>
where
    T: Clone,
{
    match payload {
        Embedded::Inline(value) => Ok(value.clone()),
        Embedded::Text(text) => serde_json::from_str(&literal_to_json(text))
            .map_err(|source| PayloadError::Literal { field, source }),
    }
}

/// Parse a trip's stop timetable.
pub fn parse_timetable(trip: &RawTrip) -> Result<StopTimetable, PayloadError> {
    let StopPairs(pairs) = parse_embedded(&trip.stops, "stops")?;
    Ok(StopTimetable::from_pairs(pairs)?)
}

/// Parse a trip's multi-language notice. "None", empty text and `null`
/// all mean no notice.
pub fn parse_information(trip: &RawTrip) -> Result<LocalizedText, PayloadError> {
    match &trip.information {
        None => Ok(LocalizedText::none()),
        Some(Embedded::Text(text)) if text.trim().is_empty() || text.trim() == NO_INFORMATION => {
            Ok(LocalizedText::none())
        }
        Some(payload) => {
            let map: HashMap<String, String> = parse_embedded(payload, "information")?;
            Ok(LocalizedText::from_map(map))
        }
    }
}

/// Parse a trip's route-level fields.
pub fn parse_header(trip: &RawTrip) -> Result<TripHeader, PayloadError> {
    let time = |field: &'static str, value: &str| {
        StopTime::parse(value).map_err(|_| PayloadError::Time {
            field,
            value: value.to_string(),
        })
    };

    let day_type: DayType = trip
        .type_of_day
        .parse()
        .map_err(|_| PayloadError::DayType(trip.type_of_day.clone()))?;

    Ok(TripHeader {
        id: trip.id,
        route_code: trip.route.clone(),
        origin: trip.origin.clone(),
        destination: trip.destination.clone(),
        start: time("start", &trip.start)?,
        end: time("end", &trip.end)?,
        authoritative_times: !trip.placeholder_times,
        day_type,
    })
}

/// Decode a JSON array of trips, dropping records that fail to decode.
///
/// A body that is not an array at all is an error.
pub fn decode_trips(body: &str) -> Result<Vec<RawTrip>, UpstreamError> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(body).map_err(|e| UpstreamError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

    let mut trips = Vec::with_capacity(values.len());
    for value in values {
        match serde_json::from_value::<RawTrip>(value) {
            Ok(trip) => trips.push(trip),
            Err(e) => warn!(error = %e, "dropping undecodable trip record"),
        }
    }

    Ok(trips)
}
