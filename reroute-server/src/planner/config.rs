//! Delay input policy.

/// Limits on the delays a caller may submit.
///
/// The planner itself accepts any non-negative delay; these bounds are
/// applied where requests enter the system and shape the input form.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Largest delay accepted for a single station (minutes).
    pub max_delay_mins: u32,

    /// Delay pre-filled when a station is first marked (minutes).
    pub default_delay_mins: u32,

    /// Granularity of the delay input (minutes).
    pub delay_step_mins: u32,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_delay_mins: u32, default_delay_mins: u32, delay_step_mins: u32) -> Self {
        Self {
            max_delay_mins,
            default_delay_mins,
            delay_step_mins,
        }
    }

    /// Whether a submitted delay is within bounds.
    pub fn accepts(&self, delay_mins: u32) -> bool {
        delay_mins <= self.max_delay_mins
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_delay_mins: 60,
            default_delay_mins: 5,
            delay_step_mins: 5,
        }
    }
}
