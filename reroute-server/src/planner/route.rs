//! Single-source shortest path over a weighted station graph.
//!
//! Plain Dijkstra with a binary heap. Weights are non-negative by
//! construction (`Minutes` rejects negatives and delays are unsigned), so
//! the first time the target is popped its cost is final. Every weight is
//! bounded by twice `Minutes::MAX`, so path costs are carried as `Minutes`
//! and stay finite.
//!
//! Ties are broken deterministically: among frontier entries of equal
//! cost the lower node index pops first, and node indices follow the order
//! in which stations first appear in the edge list. A predecessor is only
//! replaced by a strictly cheaper one. The same edge list therefore always
//! yields the same path.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, BinaryHeap, HashMap};

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use tracing::trace;

use crate::domain::{Minutes, Station};
use crate::network::WeightedGraph;

/// Error from shortest-path search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// The station is not a node of the graph
    #[error("unknown station: {0}")]
    UnknownStation(Station),

    /// No directed walk leads from start to end
    #[error("no path from {start} to {end}")]
    NoPathFound { start: Station, end: Station },
}

/// A path through the network.
///
/// Only the planner builds routes, so a route always holds at least one
/// station.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    stations: Vec<Station>,
    total: Minutes,
}

impl Route {
    /// Stations in travel order, start and end included.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Sum of the effective weights along the path.
    pub fn total(&self) -> Minutes {
        self.total
    }

    pub fn start(&self) -> &Station {
        &self.stations[0]
    }

    pub fn end(&self) -> &Station {
        &self.stations[self.stations.len() - 1]
    }

    pub fn contains(&self, station: &Station) -> bool {
        self.stations.contains(station)
    }

    /// Consecutive (from, to) pairs along the path.
    pub fn hops(&self) -> impl Iterator<Item = (&Station, &Station)> {
        self.stations.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// Whether the path traverses the edge `from -> to`.
    pub fn uses_hop(&self, from: &Station, to: &Station) -> bool {
        self.hops().any(|(a, b)| a == from && b == to)
    }

    /// The marked stations this path passes through.
    pub fn delayed_stations(&self, marked: &BTreeSet<Station>) -> BTreeSet<Station> {
        self.stations
            .iter()
            .filter(|s| marked.contains(*s))
            .cloned()
            .collect()
    }
}

/// Heap entry: a node and the cost of the best known path to it.
#[derive(Copy, Clone, Debug)]
struct Frontier {
    cost: Minutes,
    node: NodeIndex,
}

// Min-heap on cost, then on node index.
impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .get()
            .total_cmp(&self.cost.get())
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

/// Find the cheapest path from `start` to `end`.
///
/// `start == end` yields a one-station route of cost zero.
pub fn shortest_path(
    graph: &WeightedGraph,
    start: &Station,
    end: &Station,
) -> Result<Route, PlanError> {
    let source = graph
        .node_index(start)
        .ok_or_else(|| PlanError::UnknownStation(start.clone()))?;
    let target = graph
        .node_index(end)
        .ok_or_else(|| PlanError::UnknownStation(end.clone()))?;

    let inner = graph.inner();
    let mut best: HashMap<NodeIndex, Minutes> = HashMap::new();
    let mut previous: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut heap = BinaryHeap::new();

    best.insert(source, Minutes::ZERO);
    heap.push(Frontier {
        cost: Minutes::ZERO,
        node: source,
    });

    while let Some(Frontier { cost, node }) = heap.pop() {
        if node == target {
            break;
        }

        // Stale entry: a cheaper path to this node was already settled.
        if cost > best[&node] {
            continue;
        }

        trace!(station = %graph.station_at(node), cost = %cost, "settled");

        for edge in inner.edges(node) {
            let next = edge.target();
            let next_cost = cost + edge.weight().weight;

            match best.entry(next) {
                Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                }
                Entry::Occupied(mut entry) => {
                    if next_cost >= *entry.get() {
                        continue;
                    }
                    entry.insert(next_cost);
                }
            }
            previous.insert(next, node);
            heap.push(Frontier {
                cost: next_cost,
                node: next,
            });
        }
    }

    let Some(&total) = best.get(&target) else {
        return Err(PlanError::NoPathFound {
            start: start.clone(),
            end: end.clone(),
        });
    };

    let mut path = vec![target];
    let mut current = target;
    while current != source {
        current = previous[&current];
        path.push(current);
    }
    path.reverse();

    let stations = path
        .into_iter()
        .map(|idx| graph.station_at(idx).clone())
        .collect();

    Ok(Route { stations, total })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(s: &str) -> Station {
        Station::parse(s).unwrap()
    }

    fn route(names: &[&str], total: f64) -> Route {
        Route {
            stations: names.iter().map(|n| station(n)).collect(),
            total: Minutes::new(total).unwrap(),
        }
    }

    #[test]
    fn route_endpoints() {
        let r = route(&["A", "B", "C"], 12.0);
        assert_eq!(r.start(), &station("A"));
        assert_eq!(r.end(), &station("C"));
    }

    #[test]
    fn route_hops() {
        let r = route(&["A", "B", "C"], 12.0);
        let hops: Vec<(&str, &str)> = r.hops().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        assert_eq!(hops, [("A", "B"), ("B", "C")]);
        assert!(r.uses_hop(&station("B"), &station("C")));
        assert!(!r.uses_hop(&station("C"), &station("B")));
        assert!(!r.uses_hop(&station("A"), &station("C")));
    }

    #[test]
    fn single_station_route_has_no_hops() {
        let r = route(&["A"], 0.0);
        assert_eq!(r.hops().count(), 0);
        assert_eq!(r.start(), r.end());
    }

    #[test]
    fn delayed_stations_on_route() {
        let r = route(&["A", "B", "C"], 12.0);
        let marked: BTreeSet<Station> = [station("B"), station("Z")].into_iter().collect();
        let on_route = r.delayed_stations(&marked);
        assert_eq!(on_route, [station("B")].into_iter().collect());
    }

    #[test]
    fn frontier_orders_by_cost_then_index() {
        let mut heap = BinaryHeap::new();
        heap.push(Frontier {
            cost: Minutes::whole(5),
            node: NodeIndex::new(1),
        });
        heap.push(Frontier {
            cost: Minutes::whole(2),
            node: NodeIndex::new(3),
        });
        heap.push(Frontier {
            cost: Minutes::whole(2),
            node: NodeIndex::new(0),
        });

        let order: Vec<(f64, usize)> = std::iter::from_fn(|| heap.pop())
            .map(|f| (f.cost.get(), f.node.index()))
            .collect();
        assert_eq!(order, [(2.0, 0), (2.0, 3), (5.0, 1)]);
    }

    #[test]
    fn error_display() {
        let err = PlanError::UnknownStation(station("C"));
        assert_eq!(err.to_string(), "unknown station: C");

        let err = PlanError::NoPathFound {
            start: station("A"),
            end: station("D"),
        };
        assert_eq!(err.to_string(), "no path from A to D");
    }
}
