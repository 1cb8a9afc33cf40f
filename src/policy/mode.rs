//! Automatic mode tag with a dead-man's-switch expiry

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::Timestamp;

/// Automatic mode; zero always means "none"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AutoAction(pub u32);

impl AutoAction {
    pub const NONE: AutoAction = AutoAction(0);
    pub const AI_IDLE: AutoAction = AutoAction(1);
    pub const AI_IDLE_MOVE: AutoAction = AutoAction(2);
    pub const FIRST_FIGHT: AutoAction = AutoAction(3);
    pub const AI_FIGHT: AutoAction = AutoAction(3);
    pub const AI_FIGHT_MOVE: AutoAction = AutoAction(4);
    /// Archetype-specific modes start here
    pub const FIRST_CUSTOM: AutoAction = AutoAction(5);

    pub fn is_active(self) -> bool {
        self != AutoAction::NONE
    }

    pub fn is_fight(self) -> bool {
        self >= AutoAction::FIRST_FIGHT
    }

    pub fn is_custom(self) -> bool {
        self >= AutoAction::FIRST_CUSTOM
    }

    /// Modes in which the agent is expected to be moving
    pub fn is_moving(self) -> bool {
        self == AutoAction::AI_IDLE_MOVE || self == AutoAction::AI_FIGHT_MOVE
    }
}

impl fmt::Display for AutoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            AutoAction::NONE => write!(f, "none"),
            AutoAction::AI_IDLE => write!(f, "idle"),
            AutoAction::AI_IDLE_MOVE => write!(f, "idle-move"),
            AutoAction::AI_FIGHT => write!(f, "fight"),
            AutoAction::AI_FIGHT_MOVE => write!(f, "fight-move"),
            AutoAction(custom) => write!(f, "custom#{}", custom),
        }
    }
}

/// Current automatic mode and when it lapses without renewal
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoActionState {
    mode: AutoAction,
    expire_at: Timestamp,
}

impl AutoActionState {
    pub fn mode(&self) -> AutoAction {
        self.mode
    }

    pub fn expire_at(&self) -> Timestamp {
        self.expire_at
    }

    pub fn is_active(&self) -> bool {
        self.mode.is_active()
    }

    /// Set (or renew) the mode; returns true if the mode changed
    pub fn set(&mut self, mode: AutoAction, now: Timestamp, timeout: f32) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        self.expire_at = now + timeout as f64;
        changed
    }

    /// Reset to none once the expiry is reached; returns the lapsed mode
    pub fn expire(&mut self, now: Timestamp) -> Option<AutoAction> {
        if self.mode.is_active() && now >= self.expire_at {
            let lapsed = self.mode;
            self.mode = AutoAction::NONE;
            Some(lapsed)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_classes() {
        assert!(!AutoAction::NONE.is_active());
        assert!(!AutoAction::AI_IDLE.is_fight());
        assert!(AutoAction::AI_FIGHT.is_fight());
        assert!(AutoAction::AI_FIGHT_MOVE.is_moving());
        assert!(AutoAction(7).is_custom());
        assert!(AutoAction(7).is_fight());
        assert_eq!(AutoAction(7).to_string(), "custom#7");
    }

    #[test]
    fn test_expires_at_timeout() {
        let mut state = AutoActionState::default();
        assert!(state.set(AutoAction::AI_FIGHT, 5.0, 1.0));
        assert_eq!(state.expire(5.5), None);
        assert_eq!(state.expire(6.0), Some(AutoAction::AI_FIGHT));
        assert_eq!(state.mode(), AutoAction::NONE);
        assert_eq!(state.expire(7.0), None);
    }

    #[test]
    fn test_renewal_extends_without_change() {
        let mut state = AutoActionState::default();
        state.set(AutoAction::AI_IDLE, 0.0, 1.0);
        assert!(!state.set(AutoAction::AI_IDLE, 0.8, 1.0));
        assert_eq!(state.expire(1.5), None);
        assert!(state.is_active());
    }
}
