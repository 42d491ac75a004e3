//! Upstream API response DTOs.
//!
//! Trip objects come back from `/route` and `/routes` with two nested
//! payloads, `stops` and `information`, that are usually serialized
//! Python dict literals inside a JSON string, but may also be inline JSON
//! objects (the fallback dataset stores them that way). [`Embedded`]
//! accepts both.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};

/// A trip object as sent by the upstream API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTrip {
    pub id: i64,

    /// Route code, e.g. "316".
    pub route: String,

    pub origin: String,
    pub destination: String,

    /// "HHhMM"
    pub start: String,

    /// "HHhMM"
    pub end: String,

    /// Ordered stop → "HHhMM" map.
    pub stops: Embedded<StopPairs>,

    /// "WEEKDAY", "SATURDAY" or "SUNDAY".
    pub type_of_day: String,

    /// Language code → notice, or the literal "None".
    #[serde(default)]
    pub information: Option<Embedded<HashMap<String, String>>>,

    /// Only present on catalog entries.
    #[serde(default)]
    pub disabled: Option<bool>,

    /// Set on trips synthesized by the hub scan, whose start/end are
    /// placeholders. Never read from the wire.
    #[serde(skip)]
    pub placeholder_times: bool,
}

impl RawTrip {
    pub fn is_disabled(&self) -> bool {
        self.disabled.unwrap_or(false)
    }
}

/// A nested payload: serialized text or an inline JSON value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Embedded<T> {
    Text(String),
    Inline(T),
}

/// Stop → time pairs in the order they appear on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StopPairs(pub Vec<(String, String)>);

impl<'de> Deserialize<'de> for StopPairs {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PairsVisitor;

        impl<'de> Visitor<'de> for PairsVisitor {
            type Value = StopPairs;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of stop names to times")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((stop, time)) = map.next_entry::<String, String>()? {
                    pairs.push((stop, time));
                }
                Ok(StopPairs(pairs))
            }
        }

        deserializer.deserialize_map(PairsVisitor)
    }
}
