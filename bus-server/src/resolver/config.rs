//! Resolver configuration.

use std::collections::HashSet;

use crate::domain::SearchQuery;
use crate::fallback::HubEnd;

/// Fallback plan for a query the upstream answered with nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackStrategy {
    /// Exact-pair lookup in the static table.
    Static,
    /// Scan of the full catalog around a hub stop.
    Hub(HubEnd),
}

/// Configuration for route resolution.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Stops whose trips come from the static fallback table.
    pub static_stops: HashSet<String>,

    /// Hub stops, resolved by scanning the catalog.
    pub hub_stops: HashSet<String>,

    /// Send an analytics beacon for every search.
    pub record_queries: bool,
}

impl ResolverConfig {
    /// Create a configuration with the given coverage sets.
    pub fn new<S: Into<String>>(
        static_stops: impl IntoIterator<Item = S>,
        hub_stops: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            static_stops: static_stops.into_iter().map(Into::into).collect(),
            hub_stops: hub_stops.into_iter().map(Into::into).collect(),
            record_queries: true,
        }
    }

    /// Enable or disable analytics beacons.
    pub fn with_record_queries(mut self, record: bool) -> Self {
        self.record_queries = record;
        self
    }

    /// Which fallback applies to a query, if any.
    ///
    /// The static table wins when either endpoint is covered by it. Otherwise
    /// a hub origin is checked before a hub destination.
    pub fn fallback_strategy(&self, query: &SearchQuery) -> Option<FallbackStrategy> {
        let origin = query.origin.as_str();
        let destination = query.destination.as_str();

        if self.static_stops.contains(origin) || self.static_stops.contains(destination) {
            Some(FallbackStrategy::Static)
        } else if self.hub_stops.contains(origin) {
            Some(FallbackStrategy::Hub(HubEnd::Origin))
        } else if self.hub_stops.contains(destination) {
            Some(FallbackStrategy::Hub(HubEnd::Destination))
        } else {
            None
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self::new(["Lomba do Loução", "Ponta Garça"], ["Povoação"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DayType, Language, StopTime};

    fn query(origin: &str, destination: &str) -> SearchQuery {
        SearchQuery::new(
            origin,
            destination,
            DayType::Weekday,
            StopTime::midnight(),
            Language::Pt,
        )
    }

    #[test]
    fn default_config() {
        let config = ResolverConfig::default();

        assert_eq!(config.static_stops.len(), 2);
        assert!(config.static_stops.contains("Ponta Garça"));
        assert!(config.hub_stops.contains("Povoação"));
        assert!(config.record_queries);
    }

    #[test]
    fn strategy_selection() {
        let config = ResolverConfig::default();

        assert_eq!(
            config.fallback_strategy(&query("ponta garça", "vila franca")),
            Some(FallbackStrategy::Static)
        );
        assert_eq!(
            config.fallback_strategy(&query("Furnas", "Povoação")),
            Some(FallbackStrategy::Hub(HubEnd::Destination))
        );
        assert_eq!(
            config.fallback_strategy(&query("Povoação", "Furnas")),
            Some(FallbackStrategy::Hub(HubEnd::Origin))
        );
        assert_eq!(
            config.fallback_strategy(&query("Ponta Delgada", "Lagoa")),
            None
        );
    }

    #[test]
    fn static_takes_precedence_over_hub() {
        let config = ResolverConfig::default();
        assert_eq!(
            config.fallback_strategy(&query("Povoação", "Lomba do Loução")),
            Some(FallbackStrategy::Static)
        );
    }

    #[test]
    fn custom_config() {
        let config = ResolverConfig::new(["Faial da Terra"], ["Furnas"]).with_record_queries(false);

        assert!(!config.record_queries);
        assert_eq!(
            config.fallback_strategy(&query("Furnas", "Povoação")),
            Some(FallbackStrategy::Hub(HubEnd::Origin))
        );
    }
}
