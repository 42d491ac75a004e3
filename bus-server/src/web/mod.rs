//! Web layer for the bus route finder.
//!
//! A thin JSON API over the resolver and the stop directory.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
