//! One planning request, from edge list to comparison.

use tracing::debug;

use crate::domain::{DelayMap, Edge, Station};
use crate::network::{GraphPair, build};

use super::compare::{Comparison, compare_routes};
use super::route::PlanError;

/// A what-if question: how do these delays change the route?
///
/// Stations present in `delays` are the marked stations, including any
/// marked with zero minutes.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: Station,
    pub end: Station,
    pub delays: DelayMap,
}

/// Planning output, with the graphs it was computed on.
#[derive(Debug, Clone)]
pub struct Plan {
    pub graphs: GraphPair,
    pub comparison: Comparison,
}

impl RouteRequest {
    /// Create a new request.
    pub fn new(start: Station, end: Station, delays: DelayMap) -> Self {
        Self { start, end, delays }
    }

    /// Build fresh graphs from `edges` and compare routes on them.
    ///
    /// Nothing is kept between calls; each request prices its own delays
    /// into its own graphs.
    pub fn plan(&self, edges: &[Edge]) -> Result<Plan, PlanError> {
        let graphs = build(edges, &self.delays);
        let marked = self.delays.marked();

        let comparison = compare_routes(
            &graphs.baseline,
            &graphs.adjusted,
            &self.start,
            &self.end,
            &marked,
        )?;

        debug!(
            start = %self.start,
            end = %self.end,
            marked = marked.len(),
            found = comparison.route().is_some(),
            "planned route"
        );

        Ok(Plan { graphs, comparison })
    }
}
