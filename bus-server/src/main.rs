use std::error::Error;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use bus_server::config::AppConfig;
use bus_server::fallback::FallbackTable;
use bus_server::resolver::{ResolverConfig, RouteResolver};
use bus_server::stops::StopDirectoryConfig;
use bus_server::upstream::{MockUpstream, RouteSource, StopAliases, UpstreamClient};
use bus_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bus_server=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let fallback = match &config.fallback_path {
        Some(path) => FallbackTable::load(path)?,
        None => FallbackTable::embedded()?,
    };
    info!(entries = fallback.len(), "loaded fallback timetable");

    let aliases = StopAliases::builtin()?;

    match &config.mock_data {
        Some(dir) => {
            info!(dir = %dir.display(), "serving mock upstream data");
            let mock = MockUpstream::from_dir(dir)?;
            serve(&config, mock, aliases, fallback).await
        }
        None => {
            info!(base_url = %config.upstream.base_url, "using upstream API");
            let client = UpstreamClient::new(config.upstream.clone())?;
            serve(&config, client, aliases, fallback).await
        }
    }
}

async fn serve<S: RouteSource + 'static>(
    config: &AppConfig,
    source: S,
    aliases: StopAliases,
    fallback: FallbackTable,
) -> Result<(), Box<dyn Error>> {
    let resolver_config = ResolverConfig::default().with_record_queries(config.record_queries);
    let resolver = RouteResolver::new(Arc::new(source), aliases, fallback, resolver_config);
    let state = AppState::new(resolver, &StopDirectoryConfig::default());

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!("bus route finder listening on http://{}", config.listen_addr);
    info!("  GET /health");
    info!("  GET /api/search?origin=&destination=&day=1|2|3&time=HH:MM&lang=pt");
    info!("  GET /api/stops?q=&limit=");

    axum::serve(listener, app).await?;
    Ok(())
}
