//! Web layer for the route planner.
//!
//! Provides HTTP endpoints for listing stations and planning routes with
//! simulated delays, as JSON or as HTML fragments.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router, parse_request};
pub use state::AppState;
pub use templates::*;
