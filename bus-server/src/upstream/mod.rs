//! Upstream transit-data API.
//!
//! The upstream service answers route lookups by stop pair, serves the
//! full trip catalog and the stop list, and accepts usage statistics.
//! Its coverage is incomplete and a few stop names are stored under
//! inconsistent spellings:
//! - route lookups for some stops always come back empty, which the
//!   resolver papers over with fallback data
//! - some stops must be queried under an alias ([`StopAliases`])
//! - nested payloads are Python literals inside JSON strings

mod aliases;
mod client;
mod convert;
mod error;
mod mock;
mod source;
mod types;

pub use aliases::{AliasError, StopAliases};
pub use client::{UpstreamClient, UpstreamConfig};
pub use convert::{
    PayloadError, decode_trips, literal_to_json, parse_header, parse_information, parse_timetable,
};
pub use error::UpstreamError;
pub use mock::{MockCalls, MockUpstream};
pub use source::{QueryBeacon, RouteSource};
pub use types::{Embedded, RawTrip, StopPairs};
