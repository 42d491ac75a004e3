//! Mock upstream for testing without API access.
//!
//! Serves route lookups, the catalog and the stop list from JSON fixtures
//! and records what it was asked, so tests can assert on the calls the
//! resolver made.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::domain::{DayType, StopTime};

use super::convert::decode_trips;
use super::error::UpstreamError;
use super::source::{QueryBeacon, RouteSource};
use super::types::RawTrip;

/// Calls observed by a [`MockUpstream`].
#[derive(Debug, Clone, Default)]
pub struct MockCalls {
    /// (origin, destination, day, time) as received, upstream spelling.
    pub route_queries: Vec<(String, String, DayType, StopTime)>,
    pub catalog_fetches: usize,
    pub stop_fetches: usize,
    pub beacons: Vec<QueryBeacon>,
}

/// Mock upstream that serves data from fixtures.
///
/// Route responses are keyed by `"<origin>:<destination>:<DAYTYPE>"` in
/// the upstream spelling; pairs without an entry return an empty list.
#[derive(Debug, Clone, Default)]
pub struct MockUpstream {
    routes: HashMap<String, Vec<RawTrip>>,
    catalog: Vec<RawTrip>,
    stops: Vec<String>,
    offline: bool,
    calls: Arc<Mutex<MockCalls>>,
}

impl MockUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load fixtures from a directory.
    ///
    /// Reads any of `routes.json` (object of key → trip array),
    /// `catalog.json` (trip array) and `stops.json` (string array); at
    /// least one must exist.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, UpstreamError> {
        let data_dir = data_dir.as_ref();
        let read = |name: &str| -> Result<Option<String>, UpstreamError> {
            let path = data_dir.join(name);
            if !path.is_file() {
                return Ok(None);
            }
            std::fs::read_to_string(&path)
                .map(Some)
                .map_err(|e| UpstreamError::Fixture(format!("failed to read {path:?}: {e}")))
        };

        let routes_json = read("routes.json")?;
        let catalog_json = read("catalog.json")?;
        let stops_json = read("stops.json")?;

        if routes_json.is_none() && catalog_json.is_none() && stops_json.is_none() {
            return Err(UpstreamError::Fixture(format!(
                "no fixture files found in {data_dir:?}"
            )));
        }

        let mut mock = Self::new();

        if let Some(json) = routes_json {
            let keyed: HashMap<String, serde_json::Value> = serde_json::from_str(&json)
                .map_err(|e| UpstreamError::Fixture(format!("routes.json: {e}")))?;
            for (key, trips) in keyed {
                mock.routes.insert(key, decode_trips(&trips.to_string())?);
            }
        }
        if let Some(json) = catalog_json {
            mock.catalog = decode_trips(&json)?;
        }
        if let Some(json) = stops_json {
            mock.stops = serde_json::from_str(&json)
                .map_err(|e| UpstreamError::Fixture(format!("stops.json: {e}")))?;
        }

        Ok(mock)
    }

    /// Serve `trips` for one pair, in upstream spelling.
    pub fn with_route(
        mut self,
        origin: &str,
        destination: &str,
        day: DayType,
        trips: Vec<RawTrip>,
    ) -> Self {
        self.routes
            .insert(format!("{origin}:{destination}:{day}"), trips);
        self
    }

    pub fn with_catalog(mut self, catalog: Vec<RawTrip>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_stops<S: Into<String>>(mut self, stops: impl IntoIterator<Item = S>) -> Self {
        self.stops = stops.into_iter().map(Into::into).collect();
        self
    }

    /// Fail every request as if the network were down.
    pub fn offline(mut self) -> Self {
        self.offline = true;
        self
    }

    /// Snapshot of the calls made so far.
    pub fn calls(&self) -> MockCalls {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockCalls> {
        // A panicking test thread can poison the lock; the data is still usable.
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_online(&self) -> Result<(), UpstreamError> {
        if self.offline {
            return Err(UpstreamError::Status {
                status: 503,
                message: "mock upstream offline".to_string(),
            });
        }
        Ok(())
    }
}

impl RouteSource for MockUpstream {
    async fn fetch_routes(
        &self,
        origin: &str,
        destination: &str,
        day: DayType,
        time: StopTime,
    ) -> Result<Vec<RawTrip>, UpstreamError> {
        self.lock().route_queries.push((
            origin.to_string(),
            destination.to_string(),
            day,
            time,
        ));
        self.check_online()?;

        let key = format!("{origin}:{destination}:{day}");
        Ok(self.routes.get(&key).cloned().unwrap_or_default())
    }

    async fn fetch_catalog(&self) -> Result<Vec<RawTrip>, UpstreamError> {
        self.lock().catalog_fetches += 1;
        self.check_online()?;
        Ok(self.catalog.clone())
    }

    async fn fetch_stops(&self) -> Result<Vec<String>, UpstreamError> {
        self.lock().stop_fetches += 1;
        self.check_online()?;
        Ok(self.stops.clone())
    }

    async fn record_query(&self, beacon: &QueryBeacon) -> Result<(), UpstreamError> {
        self.lock().beacons.push(beacon.clone());
        self.check_online()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Language;
    use tempfile::tempdir;

    const TRIP: &str = r#"{"id": 10, "route": "110", "origin": "Ponta Delgada",
        "destination": "Lagoa", "start": "08h00", "end": "08h20",
        "stops": "{'Ponta Delgada': '08h00', 'Lagoa': '08h20'}",
        "type_of_day": "WEEKDAY", "information": "None"}"#;

    #[tokio::test]
    async fn load_fixture_dir() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("routes.json"),
            format!(r#"{{"Ponta Delgada:Lagoa:WEEKDAY": [{TRIP}]}}"#),
        )
        .unwrap();
        std::fs::write(dir.path().join("catalog.json"), format!("[{TRIP}]")).unwrap();
        std::fs::write(dir.path().join("stops.json"), r#"["Ponta Delgada", "Lagoa"]"#).unwrap();

        let mock = MockUpstream::from_dir(dir.path()).unwrap();

        let trips = mock
            .fetch_routes("Ponta Delgada", "Lagoa", DayType::Weekday, StopTime::midnight())
            .await
            .unwrap();
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].id, 10);

        assert_eq!(mock.fetch_catalog().await.unwrap().len(), 1);
        assert_eq!(mock.fetch_stops().await.unwrap(), ["Ponta Delgada", "Lagoa"]);

        let calls = mock.calls();
        assert_eq!(calls.route_queries.len(), 1);
        assert_eq!(calls.catalog_fetches, 1);
        assert_eq!(calls.stop_fetches, 1);
    }

    #[tokio::test]
    async fn bundled_fixtures_load() {
        let mock = MockUpstream::from_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures")).unwrap();

        assert_eq!(mock.fetch_catalog().await.unwrap().len(), 5);
        assert!(mock.fetch_stops().await.unwrap().contains(&"Povoação".to_string()));
        let trips = mock
            .fetch_routes("Ponta Delgada", "Lagoa", DayType::Weekday, StopTime::midnight())
            .await
            .unwrap();
        assert_eq!(trips.len(), 2);
    }

    #[test]
    fn empty_dir_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            MockUpstream::from_dir(dir.path()),
            Err(UpstreamError::Fixture(_))
        ));
    }

    #[tokio::test]
    async fn unknown_pair_is_empty() {
        let mock = MockUpstream::new();
        let trips = mock
            .fetch_routes("A", "B", DayType::Sunday, StopTime::midnight())
            .await
            .unwrap();
        assert!(trips.is_empty());
    }

    #[tokio::test]
    async fn offline_fails_but_records() {
        let mock = MockUpstream::new().offline();
        let beacon = QueryBeacon {
            origin: "A".to_string(),
            destination: "B".to_string(),
            time: StopTime::midnight(),
            lang: Language::En,
            day: DayType::Saturday,
        };

        assert!(mock.record_query(&beacon).await.is_err());
        assert!(mock.fetch_catalog().await.is_err());
        assert_eq!(mock.calls().beacons, [beacon]);
    }
}
