//! Caching layer for network snapshots.
//!
//! The station network changes rarely, but every planning request needs
//! the full edge list. We keep the latest snapshot for a short TTL so that
//! interactive use does not hit the store on every request. Graphs are
//! still rebuilt per request from the cached edge list.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::{debug, info};

use super::error::GatewayError;
use super::{NetworkSnapshot, NetworkStore};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for the cached snapshot.
    pub ttl: Duration,
}

impl CacheConfig {
    /// Create a config with the given TTL.
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300),
        }
    }
}

/// Network store with a cached snapshot.
///
/// Wraps a `NetworkStore` and caches the combined stations and edges.
pub struct CachedNetwork<S> {
    store: S,
    snapshots: MokaCache<(), Arc<NetworkSnapshot>>,
}

impl<S: NetworkStore> CachedNetwork<S> {
    /// Create a new cached store.
    pub fn new(store: S, config: &CacheConfig) -> Self {
        let snapshots = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(1)
            .build();

        Self { store, snapshots }
    }

    /// Get the current snapshot, fetching it if the cache is empty or stale.
    pub async fn snapshot(&self) -> Result<Arc<NetworkSnapshot>, GatewayError> {
        if let Some(cached) = self.snapshots.get(&()).await {
            return Ok(cached);
        }

        debug!("network snapshot cache miss");
        self.fetch().await
    }

    /// Fetch a fresh snapshot, replacing the cached one.
    ///
    /// On failure the previous snapshot is kept and the error is returned.
    pub async fn refresh(&self) -> Result<Arc<NetworkSnapshot>, GatewayError> {
        let snapshot = self.fetch().await?;
        info!(
            stations = snapshot.stations.len(),
            edges = snapshot.edges.len(),
            "refreshed network snapshot"
        );
        Ok(snapshot)
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    async fn fetch(&self) -> Result<Arc<NetworkSnapshot>, GatewayError> {
        let snapshot = Arc::new(NetworkSnapshot::fetch(&self.store).await?);
        self.snapshots.insert((), snapshot.clone()).await;
        Ok(snapshot)
    }
}
