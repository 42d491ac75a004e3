//! Static fallback timetable.
//!
//! Trips for stop pairs the upstream route lookup never answers, keyed by
//! `"<origin>:<destination>:<DAYTYPE>"`. The dataset is a versioned JSON
//! asset, compiled in and optionally replaced from disk at startup. It is
//! validated once on load and read-only afterwards.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{DayType, SearchQuery, normalize_stop_name};
use crate::upstream::{RawTrip, parse_header, parse_information, parse_timetable};

/// The dataset shipped with the binary.
const EMBEDDED: &str = include_str!("../../data/fallback_timetable.json");

/// Dataset format version this build understands.
const SUPPORTED_VERSION: u32 = 1;

/// Error loading the fallback dataset.
#[derive(Debug, thiserror::Error)]
pub enum FallbackError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("fallback dataset is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported fallback dataset version {0}")]
    UnsupportedVersion(u32),

    #[error("entry {key}: unknown day {day:?}")]
    UnknownDay { key: String, day: String },

    #[error("entry {key}: stop name is not normalized")]
    NotCanonical { key: String },

    #[error("duplicate fallback entry {0}")]
    DuplicateKey(String),

    #[error("entry {key}: trip {id}: {reason}")]
    InvalidTrip { key: String, id: i64, reason: String },
}

#[derive(Debug, Deserialize)]
struct DatasetFile {
    version: u32,
    entries: Vec<DatasetEntry>,
}

#[derive(Debug, Deserialize)]
struct DatasetEntry {
    origin: String,
    destination: String,
    day: String,
    trips: Vec<RawTrip>,
}

/// Read-only fallback trips by stop pair and day.
#[derive(Debug, Clone, Default)]
pub struct FallbackTable {
    entries: HashMap<String, Vec<RawTrip>>,
}

impl FallbackTable {
    /// An empty table.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the dataset compiled into the binary.
    pub fn embedded() -> Result<Self, FallbackError> {
        Self::from_json(EMBEDDED)
    }

    /// Load a dataset from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FallbackError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| FallbackError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse and validate a dataset.
    pub fn from_json(json: &str) -> Result<Self, FallbackError> {
        let file: DatasetFile = serde_json::from_str(json)?;
        if file.version != SUPPORTED_VERSION {
            return Err(FallbackError::UnsupportedVersion(file.version));
        }

        let mut entries = HashMap::with_capacity(file.entries.len());
        for entry in file.entries {
            let key = format!("{}:{}:{}", entry.origin, entry.destination, entry.day);
            validate_entry(&key, &entry)?;

            if entries.insert(key.clone(), entry.trips).is_some() {
                return Err(FallbackError::DuplicateKey(key));
            }
        }

        Ok(Self { entries })
    }

    /// Trips for a query's exact stop pair and day.
    pub fn lookup(&self, query: &SearchQuery) -> Option<&[RawTrip]> {
        self.get(&query.fallback_key())
    }

    pub fn get(&self, key: &str) -> Option<&[RawTrip]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Number of (pair, day) entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Every trip must parse, run on the entry's day, and call at both stops.
fn validate_entry(key: &str, entry: &DatasetEntry) -> Result<(), FallbackError> {
    let day: DayType = entry.day.parse().map_err(|_| FallbackError::UnknownDay {
        key: key.to_string(),
        day: entry.day.clone(),
    })?;

    if normalize_stop_name(&entry.origin) != entry.origin
        || normalize_stop_name(&entry.destination) != entry.destination
    {
        return Err(FallbackError::NotCanonical {
            key: key.to_string(),
        });
    }

    for trip in &entry.trips {
        let invalid = |reason: String| FallbackError::InvalidTrip {
            key: key.to_string(),
            id: trip.id,
            reason,
        };

        let header = parse_header(trip).map_err(|e| invalid(e.to_string()))?;
        if header.day_type != day {
            return Err(invalid(format!("runs on {}", header.day_type)));
        }

        let timetable = parse_timetable(trip).map_err(|e| invalid(e.to_string()))?;
        for stop in [&entry.origin, &entry.destination] {
            if !timetable.contains(stop) {
                return Err(invalid(format!("does not call at {stop:?}")));
            }
        }

        parse_information(trip).map_err(|e| invalid(e.to_string()))?;
    }

    Ok(())
}
