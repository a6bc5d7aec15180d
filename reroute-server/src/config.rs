//! Process configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::gateway::{CacheConfig, Neo4jConfig};
use crate::planner::PlannerConfig;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Errors in the process configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set
    #[error("{0} is not set (set NETWORK_FIXTURE to run without a database)")]
    Missing(&'static str),

    /// A variable is set but unusable
    #[error("invalid {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Where the network comes from.
#[derive(Debug, Clone)]
pub enum BackendConfig {
    /// JSON network file.
    Fixture(PathBuf),
    /// Neo4j over HTTP.
    Neo4j(Neo4jConfig),
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
    pub cache: CacheConfig,
    pub planner: PlannerConfig,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which returns a variable's
    /// value or `None` when unset. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let backend = match var("NETWORK_FIXTURE") {
            Some(path) => BackendConfig::Fixture(PathBuf::from(path)),
            None => {
                let uri = var("NEO4J_URI").ok_or(ConfigError::Missing("NEO4J_URI"))?;
                check_http_url(&uri)?;
                let user = var("NEO4J_USER").ok_or(ConfigError::Missing("NEO4J_USER"))?;
                let password =
                    var("NEO4J_PASSWORD").ok_or(ConfigError::Missing("NEO4J_PASSWORD"))?;

                let mut neo4j = Neo4jConfig::new(uri, user, password);
                if let Some(database) = var("NEO4J_DATABASE") {
                    neo4j = neo4j.with_database(database);
                }
                BackendConfig::Neo4j(neo4j)
            }
        };

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name: "BIND_ADDR",
                message: e.to_string(),
            })?;

        let static_dir = PathBuf::from(
            var("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
        );

        let ttl_secs = match var("NETWORK_CACHE_TTL_SECS") {
            Some(v) => v.parse::<u64>().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                name: "NETWORK_CACHE_TTL_SECS",
                message: e.to_string(),
            })?,
            None => DEFAULT_CACHE_TTL_SECS,
        };

        Ok(Self {
            backend,
            bind_addr,
            static_dir,
            cache: CacheConfig::new(Duration::from_secs(ttl_secs)),
            planner: PlannerConfig::default(),
        })
    }
}

/// The HTTP API is the only Neo4j protocol spoken here; bolt URIs are
/// rejected up front rather than failing on the first request.
fn check_http_url(uri: &str) -> Result<(), ConfigError> {
    let url = reqwest::Url::parse(uri).map_err(|e| ConfigError::Invalid {
        name: "NEO4J_URI",
        message: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::Invalid {
            name: "NEO4J_URI",
            message: format!("expected an http(s) URL, got scheme {other}"),
        }),
    }
}
