//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for actors in the world (host-assigned instance id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

/// Absolute world time in seconds
pub type Timestamp = f64;

/// Cooldown group identifier
pub type CooldownGroup = u32;

/// The cooldown group shared by all GCD-class actions
pub const GCD_GROUP: CooldownGroup = 57;

/// Sentinel returned by estimators when an event is not expected
pub const NOT_APPLICABLE: f32 = 10000.0;

/// Kind of executable action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionKind {
    Spell,
    Item,
    General,
}

/// Unique action identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionId {
    pub kind: ActionKind,
    pub id: u32,
}

impl ActionId {
    pub const fn spell(id: u32) -> Self {
        Self { kind: ActionKind::Spell, id }
    }

    pub const fn item(id: u32) -> Self {
        Self { kind: ActionKind::Item, id }
    }

    pub const fn general(id: u32) -> Self {
        Self { kind: ActionKind::General, id }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.kind, self.id)
    }
}

/// Preferred melee positional relative to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Positional {
    #[default]
    Any,
    Flank,
    Rear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_id_equality() {
        assert_eq!(ActionId::spell(7), ActionId::spell(7));
        assert_ne!(ActionId::spell(7), ActionId::item(7));
    }

    #[test]
    fn test_action_id_hash() {
        use std::collections::HashMap;
        let mut map: HashMap<ActionId, &str> = HashMap::new();
        map.insert(ActionId::spell(1), "fast blade");
        assert_eq!(map.get(&ActionId::spell(1)), Some(&"fast blade"));
        assert_eq!(map.get(&ActionId::general(1)), None);
    }

    #[test]
    fn test_actor_id_display_is_hex() {
        assert_eq!(ActorId(0x1F).to_string(), "0000001F");
    }
}
