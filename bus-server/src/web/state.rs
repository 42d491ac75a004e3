//! Application state for the web layer.

use std::sync::Arc;

use crate::resolver::RouteResolver;
use crate::stops::{StopDirectory, StopDirectoryConfig};
use crate::upstream::RouteSource;

/// Shared application state.
///
/// Generic over the upstream source so the same router serves live and
/// mock data.
pub struct AppState<S> {
    /// Route resolver
    pub resolver: RouteResolver<S>,

    /// Cached stop list for autocomplete
    pub stops: StopDirectory<S>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            resolver: self.resolver.clone(),
            stops: self.stops.clone(),
        }
    }
}

impl<S: RouteSource + 'static> AppState<S> {
    /// Create a new app state sharing the resolver's source.
    pub fn new(resolver: RouteResolver<S>, stops_config: &StopDirectoryConfig) -> Self {
        let stops = StopDirectory::new(Arc::clone(resolver.source()), stops_config);
        Self { resolver, stops }
    }
}
