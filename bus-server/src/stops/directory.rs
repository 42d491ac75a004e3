//! Cached stop list with accent-insensitive search.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::{debug, warn};

use crate::domain::fold_accents;
use crate::upstream::RouteSource;

/// Default cache TTL: 1 hour.
const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Configuration for the stop directory.
#[derive(Debug, Clone)]
pub struct StopDirectoryConfig {
    /// How long a fetched stop list stays valid.
    pub ttl: Duration,
}

impl StopDirectoryConfig {
    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for StopDirectoryConfig {
    fn default() -> Self {
        Self { ttl: DEFAULT_TTL }
    }
}

/// The upstream stop list, cached.
pub struct StopDirectory<S> {
    source: Arc<S>,
    /// Single entry: the whole list.
    cache: MokaCache<(), Arc<Vec<String>>>,
}

impl<S> Clone for StopDirectory<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            cache: self.cache.clone(),
        }
    }
}

impl<S: RouteSource> StopDirectory<S> {
    pub fn new(source: Arc<S>, config: &StopDirectoryConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(1)
            .build();

        Self { source, cache }
    }

    /// All stops, in upstream order.
    ///
    /// A failed fetch yields an empty list and is not cached.
    pub async fn all(&self) -> Arc<Vec<String>> {
        if let Some(stops) = self.cache.get(&()).await {
            return stops;
        }

        match self.source.fetch_stops().await {
            Ok(stops) => {
                debug!(count = stops.len(), "fetched stop list");
                let stops = Arc::new(stops);
                self.cache.insert((), Arc::clone(&stops)).await;
                stops
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch stop list");
                Arc::new(Vec::new())
            }
        }
    }

    /// Stops whose name contains every word of `query`, ignoring case and
    /// accents. An empty query matches nothing.
    pub async fn search(&self, query: &str, limit: usize) -> Vec<String> {
        let words: Vec<String> = fold_accents(query)
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if words.is_empty() {
            return Vec::new();
        }

        self.all()
            .await
            .iter()
            .filter(|stop| {
                let folded = fold_accents(stop);
                words.iter().all(|word| folded.contains(word.as_str()))
            })
            .take(limit)
            .cloned()
            .collect()
    }

    /// Drop the cached list so the next call refetches it.
    pub fn invalidate(&self) {
        self.cache.invalidate_all();
    }
}
