//! Upstream route lookup.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::SearchQuery;
use crate::upstream::{QueryBeacon, RawTrip, RouteSource, StopAliases};

/// Look up trips for a query's stop pair upstream.
///
/// Stop names are sent in their upstream spelling. Any failure, including
/// a timeout, yields an empty list.
pub(super) async fn fetch_routes<S: RouteSource>(
    source: &S,
    aliases: &StopAliases,
    query: &SearchQuery,
) -> Vec<RawTrip> {
    let origin = aliases.upstream_name(query.origin.as_str());
    let destination = aliases.upstream_name(query.destination.as_str());

    match source
        .fetch_routes(origin, destination, query.day, query.time)
        .await
    {
        Ok(trips) => {
            debug!(origin, destination, count = trips.len(), "upstream route lookup");
            trips
        }
        Err(e) if e.is_timeout() => {
            warn!(origin, destination, "upstream route lookup timed out");
            Vec::new()
        }
        Err(e) => {
            warn!(origin, destination, error = %e, "upstream route lookup failed");
            Vec::new()
        }
    }
}

/// Report a search in the background. Failures are logged and dropped.
pub(super) fn spawn_beacon<S: RouteSource + 'static>(source: &Arc<S>, query: &SearchQuery) {
    let source = Arc::clone(source);
    let beacon = QueryBeacon {
        origin: query.origin.to_string(),
        destination: query.destination.to_string(),
        time: query.time,
        lang: query.lang,
        day: query.day,
    };

    tokio::spawn(async move {
        if let Err(e) = source.record_query(&beacon).await {
            debug!(error = %e, "failed to record query");
        }
    });
}
