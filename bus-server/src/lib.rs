//! Bus route finder server.
//!
//! Answers "which buses run from this stop to that one, on this day, from
//! this time?" on top of an upstream transit API whose coverage has gaps.

pub mod config;
pub mod domain;
pub mod fallback;
pub mod resolver;
pub mod stops;
pub mod upstream;
pub mod web;
