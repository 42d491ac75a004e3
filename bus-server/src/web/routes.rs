//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::domain::{
    DayType, InvalidDayCode, Language, SearchQuery, StopTime, TimeError, UnsupportedLanguage,
};
use crate::upstream::RouteSource;

use super::dto::*;
use super::state::AppState;

/// Default and maximum number of stop suggestions.
const DEFAULT_STOP_LIMIT: usize = 10;
const MAX_STOP_LIMIT: usize = 50;

/// Create the application router.
pub fn create_router<S: RouteSource + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/search", get(search::<S>))
        .route("/api/stops", get(search_stops::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Find trips between two stops.
async fn search<S: RouteSource + 'static>(
    State(state): State<AppState<S>>,
    Query(req): Query<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = parse_search(&req)?;
    let resolution = state.resolver.resolve(&query).await;

    let trips: Vec<TripResult> = resolution.trips.iter().map(TripResult::from).collect();

    Ok(Json(SearchResponse {
        origin: query.origin.to_string(),
        destination: query.destination.to_string(),
        day: query.day.code(),
        time: query.time.to_colon_string(),
        count: trips.len(),
        source: resolution.source.as_str(),
        trips,
    }))
}

/// Validate a search request into a query.
///
/// Blank optional fields count as absent: the search form submits them
/// empty when left untouched.
fn parse_search(req: &SearchRequest) -> Result<SearchQuery, AppError> {
    let day = match non_blank(&req.day) {
        Some(code) => DayType::parse_code(code)?,
        None => DayType::Weekday,
    };
    let time = match non_blank(&req.time) {
        Some(time) => StopTime::parse(time)?,
        None => StopTime::midnight(),
    };
    let lang: Language = match non_blank(&req.lang) {
        Some(lang) => lang.parse()?,
        None => Language::default(),
    };

    Ok(SearchQuery::new(
        &req.origin,
        &req.destination,
        day,
        time,
        lang,
    ))
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Autocomplete stop names.
async fn search_stops<S: RouteSource + 'static>(
    State(state): State<AppState<S>>,
    Query(req): Query<StopSearchRequest>,
) -> Json<StopSearchResponse> {
    let limit = req.limit.unwrap_or(DEFAULT_STOP_LIMIT).min(MAX_STOP_LIMIT);
    let stops = state.stops.search(&req.q, limit).await;

    Json(StopSearchResponse { stops })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
}

impl From<InvalidDayCode> for AppError {
    fn from(e: InvalidDayCode) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<TimeError> for AppError {
    fn from(e: TimeError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<UnsupportedLanguage> for AppError {
    fn from(e: UnsupportedLanguage) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
        };

        warn!(%status, %message, "request rejected");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
