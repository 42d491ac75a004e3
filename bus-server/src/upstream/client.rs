//! Upstream HTTP client.
//!
//! Every request carries a timeout; the resolver turns any failure into an
//! empty result, so nothing here retries.

use std::time::Duration;

use tracing::debug;

use crate::domain::{DayType, StopTime};

use super::convert::decode_trips;
use super::error::UpstreamError;
use super::source::{QueryBeacon, RouteSource};
use super::types::RawTrip;

/// Default base URL for the upstream API.
const DEFAULT_BASE_URL: &str = "https://api.saomiguelbus.com/api/v1";

/// Platform tag sent with usage statistics.
const STAT_PLATFORM: &str = "web";

/// Configuration for the upstream client.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL, without a trailing slash
    pub base_url: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl UpstreamConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            connect_timeout_secs: 5,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Upstream transit-data API client.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a request and return the body of a successful response.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, UpstreamError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        Ok(response.text().await?)
    }

    /// `GET /route` for one stop pair.
    pub async fn get_route(
        &self,
        origin: &str,
        destination: &str,
        day: DayType,
        time: StopTime,
    ) -> Result<Vec<RawTrip>, UpstreamError> {
        let url = format!("{}/route", self.base_url);
        let start = time.to_string();
        let request = self.http.get(&url).query(&[
            ("origin", origin),
            ("destination", destination),
            ("day", day.as_str()),
            ("start", start.as_str()),
        ]);

        let body = self.send(request).await?;
        decode_trips(&body)
    }

    /// `GET /routes`: the whole catalog.
    pub async fn get_catalog(&self) -> Result<Vec<RawTrip>, UpstreamError> {
        let url = format!("{}/routes", self.base_url);
        let body = self.send(self.http.get(&url)).await?;
        decode_trips(&body)
    }

    /// `GET /stops`
    pub async fn get_stops(&self) -> Result<Vec<String>, UpstreamError> {
        let url = format!("{}/stops", self.base_url);
        let body = self.send(self.http.get(&url)).await?;

        serde_json::from_str(&body).map_err(|e| UpstreamError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }

    /// `POST /stat`. The response body is ignored.
    pub async fn post_stat(&self, beacon: &QueryBeacon) -> Result<(), UpstreamError> {
        let url = format!("{}/stat", self.base_url);
        let time = beacon.time.to_string();
        let request = self.http.post(&url).query(&[
            ("request", "get_route"),
            ("origin", beacon.origin.as_str()),
            ("destination", beacon.destination.as_str()),
            ("time", time.as_str()),
            ("language", beacon.lang.code()),
            ("platform", STAT_PLATFORM),
            ("day", beacon.day.as_str()),
        ]);

        self.send(request).await?;
        debug!(origin = %beacon.origin, destination = %beacon.destination, "recorded query");
        Ok(())
    }
}

impl RouteSource for UpstreamClient {
    async fn fetch_routes(
        &self,
        origin: &str,
        destination: &str,
        day: DayType,
        time: StopTime,
    ) -> Result<Vec<RawTrip>, UpstreamError> {
        self.get_route(origin, destination, day, time).await
    }

    async fn fetch_catalog(&self) -> Result<Vec<RawTrip>, UpstreamError> {
        self.get_catalog().await
    }

    async fn fetch_stops(&self) -> Result<Vec<String>, UpstreamError> {
        self.get_stops().await
    }

    async fn record_query(&self, beacon: &QueryBeacon) -> Result<(), UpstreamError> {
        self.post_stat(beacon).await
    }
}
