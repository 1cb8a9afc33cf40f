//! Timing oracle: current time, animation lock and cooldown groups
//!
//! The engine only reads timing; the host (or [`CooldownTracker`] in
//! headless runs) owns it.

pub mod cooldowns;

pub use cooldowns::CooldownTracker;

use ahash::AHashMap;

use crate::actions::ActionDefinition;
use crate::core::types::{ActionId, CooldownGroup, Timestamp};

/// Read-only timing view supplied by the environment
pub trait TimingOracle {
    fn current_time(&self) -> Timestamp;

    /// Remaining execution lock; 0 when an action could be dispatched now
    fn effective_animation_lock(&self) -> f32;

    /// Extra lock added between dispatch and the lock becoming visible
    fn animation_lock_delay(&self) -> f32;

    /// Remaining time until the group is fully recharged
    fn cooldown_remaining(&self, group: CooldownGroup) -> f32;

    fn combo_time_left(&self) -> f32 {
        0.0
    }

    fn combo_last_action(&self) -> Option<ActionId> {
        None
    }
}

/// Whether `definition` has a charge available once the current lock ends
pub fn ready_after_lock(timing: &dyn TimingOracle, definition: &ActionDefinition) -> bool {
    timing.cooldown_remaining(definition.cooldown_group) - timing.effective_animation_lock()
        <= definition.cooldown_at_first_charge
}

/// Whether `definition` can be dispatched and release its lock by `deadline`
///
/// The boundary counts as fitting.
pub fn fits_before(
    effective_lock: f32,
    lock_delay: f32,
    definition: &ActionDefinition,
    deadline: f32,
) -> bool {
    effective_lock + definition.animation_lock + lock_delay <= deadline
}

/// Plain timing values captured for one tick
#[derive(Debug, Clone, Default)]
pub struct TimingSnapshot {
    pub current_time: Timestamp,
    pub animation_lock: f32,
    pub animation_lock_delay: f32,
    pub combo_time_left: f32,
    pub combo_last_action: Option<ActionId>,
    cooldowns: AHashMap<CooldownGroup, f32>,
}

impl TimingSnapshot {
    pub fn at(current_time: Timestamp) -> Self {
        Self {
            current_time,
            ..Default::default()
        }
    }

    pub fn with_lock(mut self, animation_lock: f32, animation_lock_delay: f32) -> Self {
        self.animation_lock = animation_lock;
        self.animation_lock_delay = animation_lock_delay;
        self
    }

    pub fn with_cooldown(mut self, group: CooldownGroup, remaining: f32) -> Self {
        self.cooldowns.insert(group, remaining);
        self
    }

    pub fn set_cooldown(&mut self, group: CooldownGroup, remaining: f32) {
        self.cooldowns.insert(group, remaining);
    }
}

impl TimingOracle for TimingSnapshot {
    fn current_time(&self) -> Timestamp {
        self.current_time
    }

    fn effective_animation_lock(&self) -> f32 {
        self.animation_lock
    }

    fn animation_lock_delay(&self) -> f32 {
        self.animation_lock_delay
    }

    fn cooldown_remaining(&self, group: CooldownGroup) -> f32 {
        self.cooldowns.get(&group).copied().unwrap_or(0.0)
    }

    fn combo_time_left(&self) -> f32 {
        self.combo_time_left
    }

    fn combo_last_action(&self) -> Option<ActionId> {
        self.combo_last_action
    }
}
