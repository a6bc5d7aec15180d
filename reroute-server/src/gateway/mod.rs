//! Graph store gateway.
//!
//! Supplies the station list and the directed edge list the planner works
//! on. Two stores are provided: a Neo4j database queried over its HTTP
//! API, and a JSON network file for development and offline use. A
//! snapshot of either is cached for a short TTL.

mod cache;
mod error;
mod fixture;
mod neo4j;

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::domain::{Edge, Station};

pub use cache::{CacheConfig, CachedNetwork};
pub use error::GatewayError;
pub use fixture::FixtureStore;
pub use neo4j::{Neo4jClient, Neo4jConfig};

/// A source of station and edge data.
///
/// Stored names go through [`Station::parse`], which trims surrounding
/// whitespace. Names that differ only in padding (`"Vigo"`, `"Vigo "`) are
/// therefore the same station, both in the station list and as graph nodes.
pub trait NetworkStore: Send + Sync {
    /// All station names, sorted and without duplicates.
    fn all_stations(&self) -> impl Future<Output = Result<Vec<Station>, GatewayError>> + Send;

    /// All directed edges with their scheduled travel time.
    fn all_edges(&self) -> impl Future<Output = Result<Vec<Edge>, GatewayError>> + Send;
}

/// The configured backend, chosen at startup.
#[derive(Debug, Clone)]
pub enum NetworkSource {
    Neo4j(Neo4jClient),
    Fixture(FixtureStore),
}

impl NetworkStore for NetworkSource {
    async fn all_stations(&self) -> Result<Vec<Station>, GatewayError> {
        match self {
            NetworkSource::Neo4j(client) => client.all_stations().await,
            NetworkSource::Fixture(store) => store.all_stations().await,
        }
    }

    async fn all_edges(&self) -> Result<Vec<Edge>, GatewayError> {
        match self {
            NetworkSource::Neo4j(client) => client.all_edges().await,
            NetworkSource::Fixture(store) => store.all_edges().await,
        }
    }
}

/// Stations and edges fetched together from a store.
#[derive(Debug, Clone)]
pub struct NetworkSnapshot {
    /// Sorted, deduplicated.
    pub stations: Vec<Station>,
    pub edges: Vec<Edge>,
    pub fetched_at: DateTime<Utc>,
}

impl NetworkSnapshot {
    /// Create a snapshot, normalising the station list.
    pub fn new(mut stations: Vec<Station>, edges: Vec<Edge>) -> Self {
        stations.sort();
        stations.dedup();
        Self {
            stations,
            edges,
            fetched_at: Utc::now(),
        }
    }

    /// Fetch stations and edges concurrently.
    pub async fn fetch<S: NetworkStore>(store: &S) -> Result<Self, GatewayError> {
        let (stations, edges) = futures::try_join!(store.all_stations(), store.all_edges())?;
        Ok(Self::new(stations, edges))
    }

    pub fn has_station(&self, station: &Station) -> bool {
        self.stations.binary_search(station).is_ok()
    }
}
