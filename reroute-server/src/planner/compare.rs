//! Baseline vs. delay-adjusted route comparison.

use std::collections::BTreeSet;

use tracing::debug;

use crate::domain::{Minutes, Station};
use crate::network::WeightedGraph;

use super::route::{PlanError, Route, shortest_path};

/// A station on the chosen route and the delay charged there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopDelay {
    pub station: Station,
    pub delay_mins: u32,
}

/// How delays changed the route between two stations.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteComparison {
    /// Cheapest path once delays are priced in.
    pub route: Route,
    /// Cheapest path on the scheduled network, if one exists.
    pub baseline: Option<Route>,
    /// Marked stations on the baseline path that the adjusted path avoids.
    pub avoided_delays: BTreeSet<Station>,
    /// Every station of `route`, with its delay in the adjusted graph.
    pub stops: Vec<StopDelay>,
}

impl RouteComparison {
    /// Whether delays pushed the route away from at least one marked station.
    pub fn was_rerouted(&self) -> bool {
        !self.avoided_delays.is_empty()
    }

    /// Total of the adjusted route.
    pub fn total(&self) -> Minutes {
        self.route.total()
    }
}

/// Outcome of comparing the two graph variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    Route(RouteComparison),
    /// No directed path exists once delays are applied.
    NoRouteAvailable,
}

impl Comparison {
    pub fn route(&self) -> Option<&RouteComparison> {
        match self {
            Comparison::Route(r) => Some(r),
            Comparison::NoRouteAvailable => None,
        }
    }
}

/// Compare the cheapest routes on the baseline and adjusted graphs.
///
/// `delayed` is the set of stations the caller considers delayed. The
/// avoided set is purely set arithmetic over it: marked stations on the
/// baseline path minus marked stations on the adjusted path.
///
/// `UnknownStation` propagates as an error. A missing path on the adjusted
/// graph is the `NoRouteAvailable` outcome; a missing baseline path just
/// leaves nothing to have avoided.
pub fn compare_routes(
    baseline: &WeightedGraph,
    adjusted: &WeightedGraph,
    start: &Station,
    end: &Station,
    delayed: &BTreeSet<Station>,
) -> Result<Comparison, PlanError> {
    let baseline_route = match shortest_path(baseline, start, end) {
        Ok(route) => Some(route),
        Err(PlanError::NoPathFound { .. }) => None,
        Err(e) => return Err(e),
    };

    let route = match shortest_path(adjusted, start, end) {
        Ok(route) => route,
        Err(PlanError::NoPathFound { .. }) => {
            debug!(%start, %end, "no route available on adjusted graph");
            return Ok(Comparison::NoRouteAvailable);
        }
        Err(e) => return Err(e),
    };

    let delayed_in_baseline = baseline_route
        .as_ref()
        .map(|r| r.delayed_stations(delayed))
        .unwrap_or_default();
    let delayed_in_adjusted = route.delayed_stations(delayed);
    let avoided_delays: BTreeSet<Station> = delayed_in_baseline
        .difference(&delayed_in_adjusted)
        .cloned()
        .collect();

    let stops = route
        .stations()
        .iter()
        .map(|s| StopDelay {
            station: s.clone(),
            delay_mins: adjusted.station_delay(s),
        })
        .collect();

    debug!(
        %start,
        %end,
        total = %route.total(),
        baseline_total = ?baseline_route.as_ref().map(|r| r.total().get()),
        avoided = avoided_delays.len(),
        "compared routes"
    );

    Ok(Comparison::Route(RouteComparison {
        route,
        baseline: baseline_route,
        avoided_delays,
        stops,
    }))
}
