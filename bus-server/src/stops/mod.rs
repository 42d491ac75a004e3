//! Stop directory for autocomplete.
//!
//! The upstream stop list changes rarely, so it is fetched on first use
//! and cached in memory for an hour.

mod directory;

pub use directory::{StopDirectory, StopDirectoryConfig};
