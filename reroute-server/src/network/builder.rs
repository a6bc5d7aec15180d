//! Builds the baseline and delay-adjusted graphs from one edge list.

use tracing::debug;

use crate::domain::{DelayMap, Edge};

use super::graph::{Link, WeightedGraph};

/// The two graph variants for one planning request.
///
/// Both are built from the same edge list in the same order, so they share
/// node and edge indices and differ only in weights.
#[derive(Debug, Clone)]
pub struct GraphPair {
    /// Scheduled times only.
    pub baseline: WeightedGraph,
    /// Scheduled times plus the origin station's delay.
    pub adjusted: WeightedGraph,
}

/// Build both graph variants.
///
/// Each edge's delay comes from its *origin* station: a delay at a station
/// is paid when leaving it, on every outbound edge alike. Arriving at a
/// delayed station costs nothing extra, and delays do not carry over to
/// later edges.
///
/// Stations are the endpoints that appear in `edges`; delay entries for
/// other stations are ignored. Neither input is modified.
pub fn build(edges: &[Edge], delays: &DelayMap) -> GraphPair {
    let mut baseline = WeightedGraph::new();
    let mut adjusted = WeightedGraph::new();

    for edge in edges {
        let delay = delays.get(&edge.origin);

        let from = baseline.ensure_node(&edge.origin, 0);
        let to = baseline.ensure_node(&edge.destination, 0);
        baseline.add_link(from, to, Link::new(edge.minutes, 0));

        let from = adjusted.ensure_node(&edge.origin, delay);
        let to = adjusted.ensure_node(&edge.destination, delays.get(&edge.destination));
        adjusted.add_link(from, to, Link::new(edge.minutes, delay));
    }

    debug!(
        stations = baseline.node_count(),
        edges = baseline.edge_count(),
        delayed = delays.len(),
        "built baseline and adjusted graphs"
    );

    GraphPair { baseline, adjusted }
}
