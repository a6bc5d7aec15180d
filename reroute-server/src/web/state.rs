//! Application state for the web layer.

use std::sync::Arc;

use crate::gateway::{CachedNetwork, NetworkSource};
use crate::planner::PlannerConfig;

/// Shared application state.
///
/// Holds the network source and the delay input policy. Planning state is
/// never stored here: each request builds its own graphs.
#[derive(Clone)]
pub struct AppState {
    /// Cached network snapshot
    pub network: Arc<CachedNetwork<NetworkSource>>,

    /// Delay input policy
    pub config: Arc<PlannerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: CachedNetwork<NetworkSource>, config: PlannerConfig) -> Self {
        Self {
            network: Arc::new(network),
            config: Arc::new(config),
        }
    }
}
