//! Data transfer objects for web requests and responses.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::Station;
use crate::gateway::NetworkSnapshot;
use crate::network::WeightedGraph;
use crate::planner::RouteComparison;

/// Request to plan a route.
#[derive(Debug, Deserialize)]
pub struct PlanRouteRequest {
    /// Start station name
    pub start: String,

    /// Destination station name
    pub end: String,

    /// Delay minutes per marked station
    #[serde(default)]
    pub delays: BTreeMap<String, u32>,
}

/// Response for route planning.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlanRouteResponse {
    /// A route was found
    Ok(RouteResult),

    /// No directed path once delays are applied
    NoRoute { message: String },
}

/// The chosen route and how delays affected it.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    /// Start station
    pub start: String,

    /// Destination station
    pub end: String,

    /// Stations in travel order
    pub stops: Vec<StopResult>,

    /// Total travel time including delays (minutes)
    pub total_minutes: f64,

    /// Total of the best route ignoring delays, if one exists (minutes)
    pub baseline_minutes: Option<f64>,

    /// Marked stations the route now avoids
    pub avoided_delays: Vec<String>,

    /// Human-readable note when the route was changed
    pub reroute_message: Option<String>,

    /// Stations and edges annotated for drawing
    pub network: NetworkView,
}

/// A station on the route.
#[derive(Debug, Serialize)]
pub struct StopResult {
    /// Station name
    pub station: String,

    /// Delay at this station (minutes)
    pub delay_mins: u32,
}

/// Network annotated with the route, for clients that draw it.
#[derive(Debug, Serialize)]
pub struct NetworkView {
    pub stations: Vec<StationView>,
    pub edges: Vec<EdgeView>,
}

/// How a station relates to the planned route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StationRole {
    Start,
    End,
    Delayed,
    OnRoute,
    Other,
}

/// A station in the network view.
#[derive(Debug, Serialize)]
pub struct StationView {
    pub station: String,
    pub role: StationRole,
    pub delay_mins: u32,
    pub on_route: bool,
}

/// An edge in the network view.
#[derive(Debug, Serialize)]
pub struct EdgeView {
    pub from: String,
    pub to: String,

    /// Scheduled travel time (minutes)
    pub original_minutes: f64,

    /// Delay charged on this edge (minutes)
    pub delay_mins: u32,

    /// Whether the route uses this edge
    pub on_route: bool,
}

/// Response listing all stations.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    /// Station names, sorted
    pub stations: Vec<String>,
}

/// Response after refreshing the network snapshot.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub stations: usize,
    pub edges: usize,

    /// RFC 3339 timestamp of the fetch
    pub fetched_at: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl RouteResult {
    /// Create from a comparison and the adjusted graph it was computed on.
    pub fn from_comparison(
        comparison: &RouteComparison,
        adjusted: &WeightedGraph,
        marked: &BTreeSet<Station>,
    ) -> Self {
        let route = &comparison.route;

        let stops = comparison
            .stops
            .iter()
            .map(|s| StopResult {
                station: s.station.to_string(),
                delay_mins: s.delay_mins,
            })
            .collect();

        let avoided_delays: Vec<String> = comparison
            .avoided_delays
            .iter()
            .map(Station::to_string)
            .collect();

        Self {
            start: route.start().to_string(),
            end: route.end().to_string(),
            stops,
            total_minutes: route.total().get(),
            baseline_minutes: comparison.baseline.as_ref().map(|b| b.total().get()),
            reroute_message: reroute_message(comparison),
            avoided_delays,
            network: NetworkView::from_route(comparison, adjusted, marked),
        }
    }
}

impl NetworkView {
    /// Annotate every station and edge of `adjusted` against the route.
    pub fn from_route(
        comparison: &RouteComparison,
        adjusted: &WeightedGraph,
        marked: &BTreeSet<Station>,
    ) -> Self {
        let route = &comparison.route;

        let stations = adjusted
            .stations()
            .map(|s| StationView {
                station: s.to_string(),
                role: station_role(s, route.start(), route.end(), marked, route.contains(s)),
                delay_mins: adjusted.station_delay(s),
                on_route: route.contains(s),
            })
            .collect();

        let edges = adjusted
            .links()
            .map(|(from, to, link)| EdgeView {
                from: from.to_string(),
                to: to.to_string(),
                original_minutes: link.original.get(),
                delay_mins: link.delay_mins,
                on_route: route.uses_hop(from, to),
            })
            .collect();

        Self { stations, edges }
    }
}

/// First matching role wins: endpoints, then marked, then on the route.
pub fn station_role(
    station: &Station,
    start: &Station,
    end: &Station,
    marked: &BTreeSet<Station>,
    on_route: bool,
) -> StationRole {
    if station == start {
        StationRole::Start
    } else if station == end {
        StationRole::End
    } else if marked.contains(station) {
        StationRole::Delayed
    } else if on_route {
        StationRole::OnRoute
    } else {
        StationRole::Other
    }
}

/// Explain a reroute, or `None` if no marked station was avoided.
pub fn reroute_message(comparison: &RouteComparison) -> Option<String> {
    if !comparison.was_rerouted() {
        return None;
    }

    let avoided: Vec<&str> = comparison
        .avoided_delays
        .iter()
        .map(Station::as_str)
        .collect();

    Some(format!(
        "Your shortest route from {} to {} was affected by delays at {}. \
         The route has been changed to avoid them.",
        comparison.route.start(),
        comparison.route.end(),
        avoided.join(", ")
    ))
}

impl StationsResponse {
    /// Create from a network snapshot.
    pub fn from_snapshot(snapshot: &NetworkSnapshot) -> Self {
        Self {
            stations: snapshot.stations.iter().map(Station::to_string).collect(),
        }
    }
}

impl RefreshResponse {
    /// Create from a network snapshot.
    pub fn from_snapshot(snapshot: &NetworkSnapshot) -> Self {
        Self {
            stations: snapshot.stations.len(),
            edges: snapshot.edges.len(),
            fetched_at: snapshot.fetched_at.to_rfc3339(),
        }
    }
}
