//! Immutable timing and range data for one action

use serde::{Deserialize, Serialize};

use crate::core::types::{CooldownGroup, GCD_GROUP};

/// Animation lock applied when the host does not report a better value
pub const DEFAULT_ANIMATION_LOCK: f32 = 0.6;

/// Recast of a standard GCD-class action
pub const DEFAULT_GCD_RECAST: f32 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionDefinition {
    /// Maximum distance to target, not counting hitboxes (0 = self or any)
    pub range: f32,
    pub cast_time: f32,
    pub cooldown_group: CooldownGroup,
    /// Recast time of a single charge
    pub cooldown: f32,
    pub max_charges: u32,
    /// Cooldown group remaining time at which at least one charge is available
    pub cooldown_at_first_charge: f32,
    /// Execution lock after dispatch
    pub animation_lock: f32,
    pub ground_targeted: bool,
}

impl ActionDefinition {
    pub fn new(
        range: f32,
        cooldown_group: CooldownGroup,
        cooldown: f32,
        max_charges: u32,
        animation_lock: f32,
    ) -> Self {
        let max_charges = max_charges.max(1);
        Self {
            range,
            cast_time: 0.0,
            cooldown_group,
            cooldown,
            max_charges,
            cooldown_at_first_charge: cooldown * (max_charges - 1) as f32,
            animation_lock,
            ground_targeted: false,
        }
    }

    /// GCD-class action on the shared global cooldown
    pub fn gcd(range: f32) -> Self {
        Self::new(range, GCD_GROUP, DEFAULT_GCD_RECAST, 1, DEFAULT_ANIMATION_LOCK)
    }

    /// oGCD-class action with its own cooldown group and a single charge
    pub fn ogcd(range: f32, cooldown_group: CooldownGroup, cooldown: f32) -> Self {
        Self::new(range, cooldown_group, cooldown, 1, DEFAULT_ANIMATION_LOCK)
    }

    pub fn with_charges(mut self, max_charges: u32) -> Self {
        self.max_charges = max_charges.max(1);
        self.cooldown_at_first_charge = self.cooldown * (self.max_charges - 1) as f32;
        self
    }

    pub fn with_cast_time(mut self, cast_time: f32) -> Self {
        self.cast_time = cast_time;
        self
    }

    pub fn with_animation_lock(mut self, animation_lock: f32) -> Self {
        self.animation_lock = animation_lock;
        self
    }

    pub fn ground_targeted(mut self) -> Self {
        self.ground_targeted = true;
        self
    }

    pub fn is_gcd(&self) -> bool {
        self.cooldown_group == GCD_GROUP
    }

    /// Total time the group can accumulate before charges cap out
    pub fn cooldown_cap(&self) -> f32 {
        self.cooldown * self.max_charges as f32
    }

    /// Ranged, non-ground actions need an explicit target
    pub fn requires_target(&self) -> bool {
        self.range > 0.0 && !self.ground_targeted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_charge_threshold() {
        let single = ActionDefinition::ogcd(3.0, 10, 60.0);
        assert_eq!(single.cooldown_at_first_charge, 0.0);

        let double = single.with_charges(2);
        assert_eq!(double.cooldown_at_first_charge, 60.0);
        assert_eq!(double.cooldown_cap(), 120.0);
    }

    #[test]
    fn test_zero_charges_clamped() {
        let def = ActionDefinition::new(0.0, 3, 30.0, 0, 0.6);
        assert_eq!(def.max_charges, 1);
        assert_eq!(def.cooldown_at_first_charge, 0.0);
    }

    #[test]
    fn test_requires_target() {
        assert!(ActionDefinition::gcd(3.0).requires_target());
        assert!(!ActionDefinition::gcd(0.0).requires_target());
        assert!(!ActionDefinition::ogcd(25.0, 4, 90.0).ground_targeted().requires_target());
    }
}
