//! Directed, weighted station graph.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::domain::{Minutes, Station};

/// A station node, together with the delay applied at it in this graph.
#[derive(Debug, Clone, PartialEq)]
pub struct StationNode {
    pub station: Station,
    /// Delay minutes charged on every edge leaving this station.
    pub delay_mins: u32,
}

/// Per-edge data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// Weight used for path comparison: `original + delay_mins`.
    pub weight: Minutes,
    /// Scheduled travel time, kept for display.
    pub original: Minutes,
    /// Delay taken from the origin station.
    pub delay_mins: u32,
}

impl Link {
    pub fn new(original: Minutes, delay_mins: u32) -> Self {
        Self {
            weight: original + Minutes::whole(delay_mins),
            original,
            delay_mins,
        }
    }
}

/// A directed graph keyed by station name.
///
/// Node and edge indices follow insertion order, so iterating stations or
/// links yields them in the order they first appeared in the edge list.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    graph: DiGraph<StationNode, Link>,
    index: HashMap<Station, NodeIndex>,
}

impl WeightedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the node for `station`, adding it if absent.
    pub(super) fn ensure_node(&mut self, station: &Station, delay_mins: u32) -> NodeIndex {
        if let Some(&idx) = self.index.get(station) {
            return idx;
        }
        let idx = self.graph.add_node(StationNode {
            station: station.clone(),
            delay_mins,
        });
        self.index.insert(station.clone(), idx);
        idx
    }

    pub(super) fn add_link(&mut self, from: NodeIndex, to: NodeIndex, link: Link) -> EdgeIndex {
        self.graph.add_edge(from, to, link)
    }

    /// Whether the station is a node of this graph.
    pub fn contains(&self, station: &Station) -> bool {
        self.index.contains_key(station)
    }

    pub(crate) fn node_index(&self, station: &Station) -> Option<NodeIndex> {
        self.index.get(station).copied()
    }

    pub(crate) fn station_at(&self, idx: NodeIndex) -> &Station {
        &self.graph[idx].station
    }

    pub(crate) fn inner(&self) -> &DiGraph<StationNode, Link> {
        &self.graph
    }

    /// Delay charged at a station in this graph; zero for unknown stations.
    pub fn station_delay(&self, station: &Station) -> u32 {
        self.node_index(station)
            .map(|idx| self.graph[idx].delay_mins)
            .unwrap_or(0)
    }

    /// Stations in order of first appearance.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.graph.node_weights().map(|n| &n.station)
    }

    /// All edges as (origin, destination, link), in insertion order.
    pub fn links(&self) -> impl Iterator<Item = (&Station, &Station, &Link)> {
        self.graph.edge_references().map(|e| {
            (
                &self.graph[e.source()].station,
                &self.graph[e.target()].station,
                e.weight(),
            )
        })
    }

    /// Edges from `origin` to `destination`; more than one if parallel.
    pub fn links_between(&self, origin: &Station, destination: &Station) -> Vec<Link> {
        let (Some(from), Some(to)) = (self.node_index(origin), self.node_index(destination))
        else {
            return Vec::new();
        };
        self.graph
            .edges_connecting(from, to)
            .map(|e| *e.weight())
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(s: &str) -> Station {
        Station::parse(s).unwrap()
    }

    fn mins(m: f64) -> Minutes {
        Minutes::new(m).unwrap()
    }

    #[test]
    fn link_weight_includes_delay() {
        let link = Link::new(mins(10.0), 15);
        assert_eq!(link.weight.get(), 25.0);
        assert_eq!(link.original.get(), 10.0);
        assert_eq!(link.delay_mins, 15);
    }

    #[test]
    fn ensure_node_is_idempotent() {
        let mut graph = WeightedGraph::new();
        let a = graph.ensure_node(&station("A"), 0);
        let again = graph.ensure_node(&station("A"), 7);
        assert_eq!(a, again);
        assert_eq!(graph.node_count(), 1);
        // The first insertion wins.
        assert_eq!(graph.station_delay(&station("A")), 0);
    }

    #[test]
    fn parallel_links_are_kept() {
        let mut graph = WeightedGraph::new();
        let a = graph.ensure_node(&station("A"), 0);
        let b = graph.ensure_node(&station("B"), 0);
        graph.add_link(a, b, Link::new(mins(10.0), 0));
        graph.add_link(a, b, Link::new(mins(4.0), 0));

        assert_eq!(graph.edge_count(), 2);
        let between = graph.links_between(&station("A"), &station("B"));
        assert_eq!(between.len(), 2);
        assert!(graph.links_between(&station("B"), &station("A")).is_empty());
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut graph = WeightedGraph::new();
        let z = graph.ensure_node(&station("Z"), 0);
        let a = graph.ensure_node(&station("A"), 0);
        graph.add_link(z, a, Link::new(mins(1.0), 0));

        let names: Vec<&str> = graph.stations().map(Station::as_str).collect();
        assert_eq!(names, ["Z", "A"]);

        let links: Vec<(&str, &str)> = graph
            .links()
            .map(|(o, d, _)| (o.as_str(), d.as_str()))
            .collect();
        assert_eq!(links, [("Z", "A")]);
    }

    #[test]
    fn unknown_station_queries() {
        let graph = WeightedGraph::new();
        assert!(!graph.contains(&station("A")));
        assert_eq!(graph.station_delay(&station("A")), 0);
        assert!(graph.links_between(&station("A"), &station("B")).is_empty());
    }
}
