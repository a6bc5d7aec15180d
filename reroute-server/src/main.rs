use std::process;

use reroute_server::config::{AppConfig, BackendConfig};
use reroute_server::gateway::{CachedNetwork, FixtureStore, Neo4jClient, NetworkSource};
use reroute_server::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "reroute_server=info,tower_http=info";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        error!(error = %e, "invalid configuration");
        process::exit(1);
    });

    let source = match &config.backend {
        BackendConfig::Fixture(path) => {
            info!(path = %path.display(), "loading network fixture");
            FixtureStore::load(path).map(NetworkSource::Fixture)
        }
        BackendConfig::Neo4j(neo4j) => {
            info!(url = %neo4j.commit_url(), "using Neo4j network store");
            Neo4jClient::new(neo4j.clone()).map(NetworkSource::Neo4j)
        }
    }
    .unwrap_or_else(|e| {
        error!(error = %e, "failed to create network store");
        process::exit(1);
    });

    let network = CachedNetwork::new(source, &config.cache);

    // Fail fast if the network is unreachable
    match network.snapshot().await {
        Ok(snapshot) => info!(
            stations = snapshot.stations.len(),
            edges = snapshot.edges.len(),
            "loaded network"
        ),
        Err(e) => {
            error!(error = %e, "failed to load network");
            process::exit(1);
        }
    }

    let state = AppState::new(network, config.planner.clone());
    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .unwrap_or_else(|e| {
            error!(error = %e, addr = %config.bind_addr, "failed to bind");
            process::exit(1);
        });

    info!(addr = %config.bind_addr, "route planner listening");
    info!("  GET  /                     - Route planner page");
    info!("  GET  /health               - Health check");
    info!("  GET  /api/stations         - List stations");
    info!("  POST /api/network/refresh  - Refetch the network");
    info!("  POST /route/plan           - Plan a route with delays");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        process::exit(1);
    }
}
