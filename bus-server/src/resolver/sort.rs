//! Result ordering.

use crate::domain::TripCandidate;

/// Order candidates by when the bus leaves the requested origin.
///
/// The route's nominal start is not used: the same route boards at
/// different times from different stops. Ties keep their input order.
pub fn sort_by_boarding(mut trips: Vec<TripCandidate>) -> Vec<TripCandidate> {
    trips.sort_by_key(TripCandidate::boarding_time);
    trips
}
