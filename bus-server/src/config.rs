//! Process configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::upstream::UpstreamConfig;

/// Default listen address.
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// A malformed configuration value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid {expected}: {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub upstream: UpstreamConfig,

    pub listen_addr: SocketAddr,

    /// Replacement for the compiled-in fallback dataset.
    pub fallback_path: Option<PathBuf>,

    /// Serve fixtures from this directory instead of the live API.
    pub mock_data: Option<PathBuf>,

    /// Send analytics beacons upstream.
    pub record_queries: bool,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// - `BUS_API_BASE_URL`: upstream base URL
    /// - `BUS_API_TIMEOUT_SECS`: upstream request timeout
    /// - `BUS_LISTEN_ADDR`: address to bind (default 127.0.0.1:3000)
    /// - `BUS_FALLBACK_PATH`: fallback dataset to load instead of the built-in one
    /// - `BUS_MOCK_DATA`: fixture directory for offline mode
    /// - `BUS_DISABLE_STATS`: set to `1` or `true` to stop sending beacons
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through a variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut upstream = UpstreamConfig::new();
        if let Some(url) = lookup("BUS_API_BASE_URL") {
            upstream = upstream.with_base_url(url);
        }
        if let Some(secs) = lookup("BUS_API_TIMEOUT_SECS") {
            let secs = secs
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&s| s > 0)
                .ok_or(ConfigError::Invalid {
                    var: "BUS_API_TIMEOUT_SECS",
                    expected: "positive number of seconds",
                    value: secs.clone(),
                })?;
            upstream = upstream.with_timeout(secs);
        }

        let addr = lookup("BUS_LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = addr.trim().parse().map_err(|_| ConfigError::Invalid {
            var: "BUS_LISTEN_ADDR",
            expected: "socket address",
            value: addr.clone(),
        })?;

        let record_queries = match lookup("BUS_DISABLE_STATS") {
            None => true,
            Some(flag) => match flag.trim().to_ascii_lowercase().as_str() {
                "" | "0" | "false" => true,
                "1" | "true" => false,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "BUS_DISABLE_STATS",
                        expected: "boolean",
                        value: flag,
                    });
                }
            },
        };

        Ok(Self {
            upstream,
            listen_addr,
            fallback_path: lookup("BUS_FALLBACK_PATH").map(PathBuf::from),
            mock_data: lookup("BUS_MOCK_DATA").map(PathBuf::from),
            record_queries,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();

        assert_eq!(config.listen_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.upstream.timeout_secs, 10);
        assert!(config.fallback_path.is_none());
        assert!(config.mock_data.is_none());
        assert!(config.record_queries);
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("BUS_API_BASE_URL", "http://localhost:9000/api/v1/"),
            ("BUS_API_TIMEOUT_SECS", "3"),
            ("BUS_LISTEN_ADDR", "0.0.0.0:8080"),
            ("BUS_FALLBACK_PATH", "/etc/bus/fallback.json"),
            ("BUS_MOCK_DATA", "fixtures"),
            ("BUS_DISABLE_STATS", "true"),
        ])
        .unwrap();

        assert_eq!(config.upstream.base_url, "http://localhost:9000/api/v1");
        assert_eq!(config.upstream.timeout_secs, 3);
        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.fallback_path, Some(PathBuf::from("/etc/bus/fallback.json")));
        assert_eq!(config.mock_data, Some(PathBuf::from("fixtures")));
        assert!(!config.record_queries);
    }

    #[test]
    fn malformed_values() {
        assert!(config(&[("BUS_API_TIMEOUT_SECS", "soon")]).is_err());
        assert!(config(&[("BUS_API_TIMEOUT_SECS", "0")]).is_err());
        assert!(config(&[("BUS_LISTEN_ADDR", "localhost")]).is_err());
        assert!(config(&[("BUS_DISABLE_STATS", "maybe")]).is_err());
    }
}
