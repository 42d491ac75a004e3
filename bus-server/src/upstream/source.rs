//! The seam between the resolver and wherever trips come from.

use std::future::Future;

use crate::domain::{DayType, Language, StopTime};

use super::error::UpstreamError;
use super::types::RawTrip;

/// Analytics record describing one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBeacon {
    /// Canonical origin name (not the upstream spelling).
    pub origin: String,
    pub destination: String,
    pub time: StopTime,
    pub lang: Language,
    pub day: DayType,
}

/// Provider of upstream trip data.
///
/// Implemented by the HTTP client and by the in-process mock. Stop names
/// passed in are already in the provider's own spelling.
pub trait RouteSource: Send + Sync {
    /// Trips serving a stop pair on a day, departing from `time`.
    fn fetch_routes(
        &self,
        origin: &str,
        destination: &str,
        day: DayType,
        time: StopTime,
    ) -> impl Future<Output = Result<Vec<RawTrip>, UpstreamError>> + Send;

    /// Every trip of every route.
    fn fetch_catalog(&self) -> impl Future<Output = Result<Vec<RawTrip>, UpstreamError>> + Send;

    /// All known stop names.
    fn fetch_stops(&self) -> impl Future<Output = Result<Vec<String>, UpstreamError>> + Send;

    /// Report a search for usage statistics.
    fn record_query(
        &self,
        beacon: &QueryBeacon,
    ) -> impl Future<Output = Result<(), UpstreamError>> + Send;
}
