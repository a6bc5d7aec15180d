//! Route planner.
//!
//! Runs Dijkstra on each graph variant and explains how pricing delays in
//! changed the chosen route: which marked stations the new route avoids.

mod compare;
mod config;
mod request;
mod route;


pub use compare::{Comparison, RouteComparison, StopDelay, compare_routes};
pub use config::PlannerConfig;
pub use request::{Plan, RouteRequest};
pub use route::{PlanError, Route, shortest_path};
