//! Domain types for the delay-aware route planner.
//!
//! This module contains the validated value types shared by the gateway,
//! the graph builder and the planner. All types enforce their invariants
//! at construction time, so code that receives them can trust their
//! validity.

mod delay;
mod edge;
mod error;
mod station;

pub use delay::DelayMap;
pub use edge::{Edge, Minutes};
pub use error::DomainError;
pub use station::{InvalidStation, Station};
