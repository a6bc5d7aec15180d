//! Domain error types.
//!
//! These errors represent validation failures in the network data.
//! They are distinct from gateway and planning errors.

use super::station::InvalidStation;

/// Domain-level errors for validation of stations and edges.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A station name failed validation
    #[error(transparent)]
    InvalidStation(#[from] InvalidStation),

    /// Travel time is negative or not a finite number
    #[error("invalid travel time: {0} (must be between 0 and 4294967295 minutes)")]
    InvalidTime(f64),
}
