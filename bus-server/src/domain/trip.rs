//! Trip candidates and search queries.

use super::day_type::DayType;
use super::language::Language;
use super::stop::Stop;
use super::time::StopTime;
use super::timetable::StopTimetable;

/// A search as received from the caller, after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub origin: Stop,
    pub destination: Stop,
    pub day: DayType,
    /// Earliest departure the caller is interested in.
    pub time: StopTime,
    pub lang: Language,
}

impl SearchQuery {
    /// Normalize raw stop names into a query.
    pub fn new(origin: &str, destination: &str, day: DayType, time: StopTime, lang: Language) -> Self {
        Self {
            origin: Stop::normalized(origin),
            destination: Stop::normalized(destination),
            day,
            time,
            lang,
        }
    }

    /// Key into the fallback table: `"<origin>:<destination>:<DAYTYPE>"`.
    pub fn fallback_key(&self) -> String {
        format!("{}:{}:{}", self.origin, self.destination, self.day)
    }
}

/// Route-level facts about a trip, as published upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripHeader {
    pub id: i64,
    pub route_code: String,
    /// Nominal first stop of the route.
    pub origin: String,
    /// Nominal last stop of the route.
    pub destination: String,
    pub start: StopTime,
    pub end: StopTime,
    /// False when `start`/`end` are placeholders rather than published times.
    pub authoritative_times: bool,
    pub day_type: DayType,
}

/// Why a trip cannot serve a query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("trip {trip_id} does not call at {stop:?}")]
pub struct MissingStop {
    pub trip_id: i64,
    pub stop: String,
}

/// One scheduled trip that serves a query's stop pair.
///
/// Can only be built for a query whose origin and destination both appear
/// in the trip's timetable, so the boarding and alighting times are always
/// known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripCandidate {
    header: TripHeader,
    timetable: StopTimetable,
    notice: String,
    boarding: (String, StopTime),
    alighting: (String, StopTime),
}

impl TripCandidate {
    /// Pair a trip with the stops a query boards and alights at.
    pub fn for_stops(
        header: TripHeader,
        timetable: StopTimetable,
        notice: String,
        origin: &Stop,
        destination: &Stop,
    ) -> Result<Self, MissingStop> {
        let missing = |stop: &Stop| MissingStop {
            trip_id: header.id,
            stop: stop.to_string(),
        };
        let board = timetable.time_at(origin.as_str()).ok_or_else(|| missing(origin))?;
        let alight = timetable
            .time_at(destination.as_str())
            .ok_or_else(|| missing(destination))?;

        Ok(Self {
            boarding: (origin.to_string(), board),
            alighting: (destination.to_string(), alight),
            header,
            timetable,
            notice,
        })
    }

    pub fn header(&self) -> &TripHeader {
        &self.header
    }

    pub fn id(&self) -> i64 {
        self.header.id
    }

    pub fn route_code(&self) -> &str {
        &self.header.route_code
    }

    pub fn timetable(&self) -> &StopTimetable {
        &self.timetable
    }

    /// Notice in the query's language, or empty.
    pub fn notice(&self) -> &str {
        &self.notice
    }

    /// When the bus leaves the requested origin.
    pub fn boarding_time(&self) -> StopTime {
        self.boarding.1
    }

    /// When the bus reaches the requested destination.
    pub fn alighting_time(&self) -> StopTime {
        self.alighting.1
    }

    /// Minutes on board, wrapping past midnight.
    pub fn travel_minutes(&self) -> u32 {
        self.boarding.1.minutes_until(self.alighting.1)
    }

    /// Stops from boarding through alighting, when they run in that order.
    pub fn leg(&self) -> Option<&[(String, StopTime)]> {
        self.timetable.leg(&self.boarding.0, &self.alighting.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(id: i64) -> TripHeader {
        TripHeader {
            id,
            route_code: "316".to_string(),
            origin: "Ponta Garça".to_string(),
            destination: "Vila Franca".to_string(),
            start: StopTime::parse("06h40").unwrap(),
            end: StopTime::parse("07h05").unwrap(),
            authoritative_times: true,
            day_type: DayType::Weekday,
        }
    }

    fn timetable() -> StopTimetable {
        StopTimetable::from_pairs([
            ("Ponta Garça", "06h40"),
            ("Caminho Novo", "06h45"),
            ("Ribeira das Tainhas", "06h55"),
            ("Vila Franca", "07h05"),
        ])
        .unwrap()
    }

    #[test]
    fn fallback_key_format() {
        let q = SearchQuery::new(
            "ponta garça",
            "VILA FRANCA",
            DayType::Weekday,
            StopTime::midnight(),
            Language::Pt,
        );
        assert_eq!(q.fallback_key(), "Ponta Garça:Vila Franca:WEEKDAY");
    }

    #[test]
    fn boarding_uses_stop_time_not_route_start() {
        let trip = TripCandidate::for_stops(
            header(1),
            timetable(),
            String::new(),
            &Stop::normalized("caminho novo"),
            &Stop::normalized("vila franca"),
        )
        .unwrap();

        assert_eq!(trip.boarding_time().to_string(), "06h45");
        assert_eq!(trip.alighting_time().to_string(), "07h05");
        assert_eq!(trip.travel_minutes(), 20);
        assert_eq!(trip.leg().unwrap().len(), 3);
    }

    #[test]
    fn missing_stop_is_rejected() {
        let err = TripCandidate::for_stops(
            header(7),
            timetable(),
            String::new(),
            &Stop::normalized("Povoação"),
            &Stop::normalized("Vila Franca"),
        )
        .unwrap_err();
        assert_eq!(err.trip_id, 7);
        assert_eq!(err.stop, "Povoação");
    }

    #[test]
    fn reversed_pair_has_no_leg() {
        let trip = TripCandidate::for_stops(
            header(2),
            timetable(),
            String::new(),
            &Stop::normalized("Vila Franca"),
            &Stop::normalized("Ponta Garça"),
        )
        .unwrap();
        assert!(trip.leg().is_none());
    }
}
