//! Fallback data for stop pairs the upstream route lookup does not cover.
//!
//! Two sources: a static timetable keyed by exact pair and day, and a scan
//! of the full upstream catalog for hub stops.

mod hub;
mod table;

pub use hub::{HubEnd, scan_catalog};
pub use table::{FallbackError, FallbackTable};
