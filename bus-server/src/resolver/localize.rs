//! Turning filtered trips into candidates in the caller's language.

use tracing::warn;

use crate::domain::{SearchQuery, TripCandidate};
use crate::upstream::{parse_header, parse_information};

use super::filter::FilteredTrip;

/// Build candidates, resolving each trip's notice in the query's language.
///
/// A missing translation is an empty notice. A trip whose header or notice
/// payload is malformed is dropped.
pub fn localize_trips(trips: Vec<FilteredTrip>, query: &SearchQuery) -> Vec<TripCandidate> {
    trips
        .into_iter()
        .filter_map(|FilteredTrip { raw, timetable }| {
            let header = match parse_header(&raw) {
                Ok(header) => header,
                Err(e) => {
                    warn!(trip = raw.id, error = %e, "dropping trip with malformed header");
                    return None;
                }
            };
            let notice = match parse_information(&raw) {
                Ok(notice) => notice,
                Err(e) => {
                    warn!(trip = raw.id, error = %e, "dropping trip with malformed information");
                    return None;
                }
            };

            match TripCandidate::for_stops(
                header,
                timetable,
                notice.get(query.lang).to_string(),
                &query.origin,
                &query.destination,
            ) {
                Ok(candidate) => Some(candidate),
                Err(e) => {
                    warn!(error = %e, "dropping trip");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DayType, Language, StopTime};
    use crate::resolver::filter::filter_candidates;
    use crate::upstream::{Embedded, RawTrip};

    fn raw(id: i64, information: Option<&str>) -> RawTrip {
        RawTrip {
            id,
            route: "322".to_string(),
            origin: "Lomba do Loução".to_string(),
            destination: "Povoação".to_string(),
            start: "07h40".to_string(),
            end: "07h55".to_string(),
            stops: Embedded::Text("{'Lomba do Loução': '07h40', 'Povoação': '07h55'}".to_string()),
            type_of_day: "WEEKDAY".to_string(),
            information: information.map(|s| Embedded::Text(s.to_string())),
            disabled: None,
            placeholder_times: false,
        }
    }

    fn localize(trips: Vec<RawTrip>, lang: Language) -> Vec<TripCandidate> {
        let query = SearchQuery::new(
            "Lomba do Loução",
            "Povoação",
            DayType::Weekday,
            StopTime::midnight(),
            lang,
        );
        localize_trips(filter_candidates(trips, &query), &query)
    }

    #[test]
    fn selects_requested_language() {
        let trips = vec![raw(1, Some("{'pt': 'Período Escolar', 'en': 'School Period'}"))];

        assert_eq!(localize(trips.clone(), Language::En)[0].notice(), "School Period");
        assert_eq!(localize(trips, Language::Pt)[0].notice(), "Período Escolar");
    }

    #[test]
    fn missing_language_is_empty() {
        let trips = vec![raw(1, Some("{'pt': 'Período Escolar'}"))];
        let candidates = localize(trips, Language::De);

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].notice(), "");
    }

    #[test]
    fn absent_information_is_empty() {
        let candidates = localize(vec![raw(1, Some("None")), raw(2, None)], Language::Fr);
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|c| c.notice().is_empty()));
    }

    #[test]
    fn malformed_payloads_drop_the_trip() {
        let mut bad_day = raw(2, None);
        bad_day.type_of_day = "HOLIDAY".to_string();

        let trips = vec![raw(1, Some("{'pt': ")), bad_day, raw(3, None)];
        let candidates = localize(trips, Language::Pt);

        let ids: Vec<_> = candidates.iter().map(|c| c.id()).collect();
        assert_eq!(ids, [3]);
    }
}
