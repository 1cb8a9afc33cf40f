//! Planned-schedule collaborator interface
//!
//! Encounter modules own their state machine and expose the cooldown plan
//! for its current state through [`PlanExecution`].

pub mod schedule;

pub use schedule::{ScheduledEntry, ScheduledPlan};

use crate::actions::ActionDefinition;
use crate::core::types::{ActionId, NOT_APPLICABLE};

/// A planned action whose window is open right now
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedAction {
    pub action: ActionId,
    pub definition: ActionDefinition,
    /// Time until the planned window closes
    pub time_left: f32,
}

pub trait PlanExecution {
    fn active_actions(&self) -> Vec<PlannedAction>;

    /// Seconds until the next downtime, or [`NOT_APPLICABLE`]
    fn estimate_time_to_next_downtime(&self) -> f32 {
        NOT_APPLICABLE
    }

    /// Seconds until the boss next becomes vulnerable, or [`NOT_APPLICABLE`]
    fn estimate_time_to_next_vulnerable(&self) -> f32 {
        NOT_APPLICABLE
    }

    /// Seconds until the next forced positioning, or [`NOT_APPLICABLE`]
    fn estimate_time_to_next_positioning(&self) -> f32 {
        NOT_APPLICABLE
    }
}

/// The active encounter, as seen by one tick
#[derive(Clone, Copy, Default)]
pub struct EncounterContext<'a> {
    pub plan: Option<&'a dyn PlanExecution>,
    /// Encounter has cooldown planning support configured
    pub has_plan_config: bool,
    /// Seconds until the next raid damage buff from party members
    pub next_damage_buff_in: f32,
}
