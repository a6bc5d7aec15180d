//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::Minutes;
use crate::planner::{PlannerConfig, RouteComparison};

use super::dto::reroute_message;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the route form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub stations: Vec<String>,
    pub max_delay_mins: u32,
    pub default_delay_mins: u32,
    pub delay_step_mins: u32,
}

impl IndexTemplate {
    pub fn new(stations: Vec<String>, config: &PlannerConfig) -> Self {
        Self {
            stations,
            max_delay_mins: config.max_delay_mins,
            default_delay_mins: config.default_delay_mins,
            delay_step_mins: config.delay_step_mins,
        }
    }
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Planned route fragment.
#[derive(Template)]
#[template(path = "route_result.html")]
pub struct RouteResultTemplate {
    pub route: RouteView,
}

/// Fragment shown when no route exists.
#[derive(Template)]
#[template(path = "no_route.html")]
pub struct NoRouteTemplate {
    pub message: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Route view model for templates.
#[derive(Debug, Clone)]
pub struct RouteView {
    pub start: String,
    pub end: String,
    pub total: String,
    pub baseline_total: Option<String>,
    pub reroute_message: Option<String>,
    pub stops: Vec<StopView>,
}

/// A stop on the route.
#[derive(Debug, Clone)]
pub struct StopView {
    pub name: String,
    pub delay_mins: u32,
}

impl StopView {
    pub fn is_delayed(&self) -> bool {
        self.delay_mins > 0
    }
}

impl RouteView {
    /// Create from a route comparison.
    pub fn from_comparison(comparison: &RouteComparison) -> Self {
        let route = &comparison.route;

        // Only worth showing when delays changed the total.
        let baseline_total = comparison
            .baseline
            .as_ref()
            .filter(|b| b.total() != route.total())
            .map(|b| format_minutes(b.total()));

        Self {
            start: route.start().to_string(),
            end: route.end().to_string(),
            total: format_minutes(route.total()),
            baseline_total,
            reroute_message: reroute_message(comparison),
            stops: comparison
                .stops
                .iter()
                .map(|s| StopView {
                    name: s.station.to_string(),
                    delay_mins: s.delay_mins,
                })
                .collect(),
        }
    }
}

fn format_minutes(m: Minutes) -> String {
    format!("{m} min")
}
