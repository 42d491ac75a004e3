//! Domain types for the bus route finder.
//!
//! Everything here is validated at construction: a [`TripCandidate`]
//! always calls at the stops it was built for, a [`StopTime`] is always a
//! real time of day, and a [`Stop`] is always in canonical form.

mod day_type;
mod language;
mod stop;
mod time;
mod timetable;
mod trip;

pub use day_type::{DayType, InvalidDayCode};
pub use language::{Language, LocalizedText, UnsupportedLanguage};
pub use stop::{Stop, fold_accents, normalize_stop_name};
pub use time::{StopTime, TimeError};
pub use timetable::{StopTimetable, TimetableError};
pub use trip::{MissingStop, SearchQuery, TripCandidate, TripHeader};
