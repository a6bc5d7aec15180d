//! Graph construction.
//!
//! Turns the gateway's edge list and a delay map into the two weighted
//! graphs the planner compares: the scheduled network and the same network
//! with delays priced in.

mod builder;
mod graph;

pub use builder::{GraphPair, build};
pub use graph::{Link, StationNode, WeightedGraph};
