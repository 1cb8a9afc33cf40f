//! Time-based cooldown plan

use serde::{Deserialize, Serialize};

use crate::actions::ActionDefinition;
use crate::core::types::{ActionId, Timestamp, NOT_APPLICABLE};
use crate::planning::{PlanExecution, PlannedAction};

/// Use `action` at any point inside `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEntry {
    pub action: ActionId,
    pub definition: ActionDefinition,
    pub start: Timestamp,
    pub end: Timestamp,
}

/// A flat timeline of planned windows and phase markers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduledPlan {
    pub entries: Vec<ScheduledEntry>,
    pub downtimes: Vec<Timestamp>,
    pub vulnerable: Vec<Timestamp>,
    pub positioning: Vec<Timestamp>,
    #[serde(skip)]
    now: Timestamp,
}

impl ScheduledPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, action: ActionId, definition: ActionDefinition, start: Timestamp, end: Timestamp) -> Self {
        self.entries.push(ScheduledEntry {
            action,
            definition,
            start,
            end,
        });
        self
    }

    /// Advance the plan's notion of encounter time
    pub fn set_time(&mut self, now: Timestamp) {
        self.now = now;
    }

    fn time_to_next(&self, markers: &[Timestamp]) -> f32 {
        markers
            .iter()
            .filter(|&&t| t >= self.now)
            .map(|&t| (t - self.now) as f32)
            .fold(NOT_APPLICABLE, f32::min)
    }
}

impl PlanExecution for ScheduledPlan {
    fn active_actions(&self) -> Vec<PlannedAction> {
        self.entries
            .iter()
            .filter(|e| e.start <= self.now && self.now < e.end)
            .map(|e| PlannedAction {
                action: e.action,
                definition: e.definition,
                time_left: (e.end - self.now) as f32,
            })
            .collect()
    }

    fn estimate_time_to_next_downtime(&self) -> f32 {
        self.time_to_next(&self.downtimes)
    }

    fn estimate_time_to_next_vulnerable(&self) -> f32 {
        self.time_to_next(&self.vulnerable)
    }

    fn estimate_time_to_next_positioning(&self) -> f32 {
        self.time_to_next(&self.positioning)
    }
}
