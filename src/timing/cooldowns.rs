//! Simulated timing environment for headless runs

use ahash::AHashMap;

use crate::actions::ActionDefinition;
use crate::core::types::{ActionId, CooldownGroup, Timestamp};
use crate::timing::TimingOracle;

/// How long a combo stays alive after a combo action
pub const COMBO_WINDOW: f32 = 30.0;

/// Tracks time, animation lock and per-group cooldowns with charge stacking
#[derive(Debug, Clone)]
pub struct CooldownTracker {
    now: Timestamp,
    animation_lock: f32,
    animation_lock_delay: f32,
    remaining: AHashMap<CooldownGroup, f32>,
    combo_time_left: f32,
    combo_last_action: Option<ActionId>,
}

impl CooldownTracker {
    pub fn new(animation_lock_delay: f32) -> Self {
        Self {
            now: 0.0,
            animation_lock: 0.0,
            animation_lock_delay,
            remaining: AHashMap::new(),
            combo_time_left: 0.0,
            combo_last_action: None,
        }
    }

    /// Advance the clock, draining locks and cooldowns
    pub fn advance(&mut self, dt: f32) {
        self.now += dt as f64;
        self.animation_lock = (self.animation_lock - dt).max(0.0);
        for remaining in self.remaining.values_mut() {
            *remaining = (*remaining - dt).max(0.0);
        }
        self.remaining.retain(|_, remaining| *remaining > 0.0);

        self.combo_time_left = (self.combo_time_left - dt).max(0.0);
        if self.combo_time_left == 0.0 {
            self.combo_last_action = None;
        }
    }

    /// Whether a charge is available right now
    pub fn can_start(&self, definition: &ActionDefinition) -> bool {
        self.animation_lock == 0.0
            && self.cooldown_remaining(definition.cooldown_group) <= definition.cooldown_at_first_charge
    }

    /// Consume a charge and apply the execution lock
    ///
    /// Returns false (and changes nothing) if no charge is available.
    pub fn start(&mut self, action: ActionId, definition: &ActionDefinition) -> bool {
        if !self.can_start(definition) {
            return false;
        }
        let remaining = self.remaining.entry(definition.cooldown_group).or_insert(0.0);
        *remaining = (*remaining + definition.cooldown).min(definition.cooldown_cap());
        self.animation_lock = definition.animation_lock.max(definition.cast_time) + self.animation_lock_delay;

        if definition.is_gcd() {
            self.combo_last_action = Some(action);
            self.combo_time_left = COMBO_WINDOW;
        }
        true
    }

    pub fn reset_cooldown(&mut self, group: CooldownGroup) {
        self.remaining.remove(&group);
    }
}

impl TimingOracle for CooldownTracker {
    fn current_time(&self) -> Timestamp {
        self.now
    }

    fn effective_animation_lock(&self) -> f32 {
        self.animation_lock
    }

    fn animation_lock_delay(&self) -> f32 {
        self.animation_lock_delay
    }

    fn cooldown_remaining(&self, group: CooldownGroup) -> f32 {
        self.remaining.get(&group).copied().unwrap_or(0.0)
    }

    fn combo_time_left(&self) -> f32 {
        self.combo_time_left
    }

    fn combo_last_action(&self) -> Option<ActionId> {
        self.combo_last_action
    }
}
