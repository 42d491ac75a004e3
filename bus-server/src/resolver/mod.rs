//! Route resolution.
//!
//! Answers "which buses run from here to there on this day?" as a single
//! stateless pipeline:
//!
//! 1. look the pair up upstream (under the upstream's stop spellings)
//! 2. if that comes back empty and a stop has limited coverage, fall back
//!    to the static table or a hub scan of the full catalog
//! 3. drop trips that do not run from the origin to the destination
//! 4. resolve notices in the caller's language
//! 5. order by boarding time at the origin
//!
//! Upstream failures never reach the caller; they degrade to an empty
//! result.

mod config;
mod filter;
mod localize;
mod remote;
mod sort;

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{SearchQuery, TripCandidate};
use crate::fallback::{FallbackTable, HubEnd, scan_catalog};
use crate::upstream::{RawTrip, RouteSource, StopAliases};

pub use config::{FallbackStrategy, ResolverConfig};
pub use filter::{FilteredTrip, filter_candidates};
pub use localize::localize_trips;
pub use sort::sort_by_boarding;

/// Where a resolution's trips came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    Upstream,
    StaticFallback,
    HubScan,
    /// Nothing found anywhere.
    NoResults,
}

impl ResultSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultSource::Upstream => "upstream",
            ResultSource::StaticFallback => "static_fallback",
            ResultSource::HubScan => "hub_scan",
            ResultSource::NoResults => "none",
        }
    }
}

/// Outcome of resolving one query.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Candidates ordered by boarding time.
    pub trips: Vec<TripCandidate>,
    pub source: ResultSource,
}

/// Resolves searches against an upstream source and the fallback data.
pub struct RouteResolver<S> {
    source: Arc<S>,
    aliases: Arc<StopAliases>,
    fallback: Arc<FallbackTable>,
    config: ResolverConfig,
}

impl<S> Clone for RouteResolver<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            aliases: Arc::clone(&self.aliases),
            fallback: Arc::clone(&self.fallback),
            config: self.config.clone(),
        }
    }
}

impl<S: RouteSource + 'static> RouteResolver<S> {
    pub fn new(
        source: Arc<S>,
        aliases: StopAliases,
        fallback: FallbackTable,
        config: ResolverConfig,
    ) -> Self {
        Self {
            source,
            aliases: Arc::new(aliases),
            fallback: Arc::new(fallback),
            config,
        }
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a query into ordered trip candidates.
    pub async fn resolve(&self, query: &SearchQuery) -> Resolution {
        if self.config.record_queries {
            remote::spawn_beacon(&self.source, query);
        }

        let mut raw = remote::fetch_routes(self.source.as_ref(), &self.aliases, query).await;
        let mut source = ResultSource::Upstream;

        if raw.is_empty() {
            match self.config.fallback_strategy(query) {
                Some(FallbackStrategy::Static) => {
                    raw = self.static_lookup(query);
                    source = ResultSource::StaticFallback;
                }
                Some(FallbackStrategy::Hub(end)) => {
                    raw = self.hub_scan(query, end).await;
                    source = ResultSource::HubScan;
                }
                None => {}
            }
        }

        let trips = sort_by_boarding(localize_trips(filter_candidates(raw, query), query));
        if trips.is_empty() {
            source = ResultSource::NoResults;
        }

        info!(
            origin = %query.origin,
            destination = %query.destination,
            day = %query.day,
            count = trips.len(),
            source = source.as_str(),
            "resolved search"
        );

        Resolution { trips, source }
    }

    fn static_lookup(&self, query: &SearchQuery) -> Vec<RawTrip> {
        match self.fallback.lookup(query) {
            Some(trips) => {
                info!(key = %query.fallback_key(), count = trips.len(), "using static fallback");
                trips.to_vec()
            }
            None => {
                info!(key = %query.fallback_key(), "no static fallback entry");
                Vec::new()
            }
        }
    }

    async fn hub_scan(&self, query: &SearchQuery, end: HubEnd) -> Vec<RawTrip> {
        info!(?end, "scanning catalog for hub stop");
        match self.source.fetch_catalog().await {
            Ok(catalog) => scan_catalog(&catalog, query, end),
            Err(e) => {
                warn!(error = %e, "catalog fetch failed");
                Vec::new()
            }
        }
    }
}
