//! Eligibility predicates evaluated against a freshly resolved target

use crate::world::Actor;

/// A predicate over the (optional) target of an action
///
/// Holds only the data needed to evaluate it; no references to live world
/// objects are captured.
#[derive(Debug, Clone)]
pub enum Condition {
    /// Target exists and is hostile
    Hostile,
    /// Target exists and is a player or companion
    Friendly,
    /// Target exists and its hp ratio is strictly below the threshold
    HpBelow(f32),
    HasStatus(u32),
    LacksStatus(u32),
    InCombat,
    All(Vec<Condition>),
    Any(Vec<Condition>),
    Not(Box<Condition>),
    Custom(fn(Option<&Actor>) -> bool),
}

impl Condition {
    pub fn holds(&self, target: Option<&Actor>) -> bool {
        match self {
            Condition::Hostile => target.is_some_and(|t| t.is_hostile()),
            Condition::Friendly => target.is_some_and(|t| t.is_friendly_target()),
            Condition::HpBelow(threshold) => target.is_some_and(|t| t.hp_ratio() < *threshold),
            Condition::HasStatus(id) => target.is_some_and(|t| t.find_status(*id).is_some()),
            // Missing target has no statuses
            Condition::LacksStatus(id) => target.map_or(true, |t| t.find_status(*id).is_none()),
            Condition::InCombat => target.is_some_and(|t| t.in_combat),
            Condition::All(conditions) => conditions.iter().all(|c| c.holds(target)),
            Condition::Any(conditions) => conditions.iter().any(|c| c.holds(target)),
            Condition::Not(inner) => !inner.holds(target),
            Condition::Custom(predicate) => predicate(target),
        }
    }

    pub fn and(self, other: Condition) -> Condition {
        match self {
            Condition::All(mut conditions) => {
                conditions.push(other);
                Condition::All(conditions)
            }
            first => Condition::All(vec![first, other]),
        }
    }

    pub fn negate(self) -> Condition {
        Condition::Not(Box::new(self))
    }
}
