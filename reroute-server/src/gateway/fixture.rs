//! Network loaded from a JSON file.
//!
//! Serves a fixed network without a database, for development and tests.
//! The file format is:
//!
//! ```json
//! {
//!   "stations": ["A Coruña", "Santiago de Compostela"],
//!   "edges": [{ "from": "A Coruña", "to": "Santiago de Compostela", "time": 28 }]
//! }
//! ```
//!
//! `stations` is optional and defaults to every station named by an edge.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::domain::{Edge, Station};

use super::NetworkStore;
use super::error::GatewayError;

#[derive(Debug, Deserialize)]
struct NetworkFile {
    #[serde(default)]
    stations: Option<Vec<String>>,
    edges: Vec<EdgeDto>,
}

#[derive(Debug, Deserialize)]
struct EdgeDto {
    from: String,
    to: String,
    time: f64,
}

#[derive(Debug)]
struct Network {
    stations: Vec<Station>,
    edges: Vec<Edge>,
}

/// A network store backed by an in-memory copy of a JSON file.
#[derive(Debug, Clone)]
pub struct FixtureStore {
    network: Arc<Network>,
}

impl FixtureStore {
    /// Load a network file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GatewayError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| GatewayError::Io {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;

        let store = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            stations = store.network.stations.len(),
            edges = store.network.edges.len(),
            "loaded network file"
        );
        Ok(store)
    }

    /// Parse a network from JSON text.
    pub fn from_json(json: &str) -> Result<Self, GatewayError> {
        let file: NetworkFile = serde_json::from_str(json).map_err(|e| GatewayError::Json {
            message: e.to_string(),
        })?;

        let edges = file
            .edges
            .iter()
            .map(|e| Edge::parse(&e.from, &e.to, e.time))
            .collect::<Result<Vec<_>, _>>()?;

        let mut stations = match file.stations {
            Some(names) => names
                .iter()
                .map(|n| Station::parse(n))
                .collect::<Result<Vec<_>, _>>()
                .map_err(crate::domain::DomainError::from)?,
            None => edges
                .iter()
                .flat_map(|e| [e.origin.clone(), e.destination.clone()])
                .collect(),
        };
        stations.sort();
        stations.dedup();

        Ok(Self {
            network: Arc::new(Network { stations, edges }),
        })
    }
}

impl NetworkStore for FixtureStore {
    async fn all_stations(&self) -> Result<Vec<Station>, GatewayError> {
        Ok(self.network.stations.clone())
    }

    async fn all_edges(&self) -> Result<Vec<Edge>, GatewayError> {
        Ok(self.network.edges.clone())
    }
}
