//! Automatic policy hook
//!
//! Architecture: Trait + Data hybrid
//! - RotationPolicy trait is the swappable per-archetype strategy object
//! - AutoActionState is the engine-owned mode with a dead-man's-switch expiry
//! - PolicyContext provides the freshly refreshed state for one decision

pub mod context;
pub mod mode;
pub mod priority_list;
pub mod state;

pub use context::{smart_target_co_tank, smart_target_friendly, smart_target_hostile, PolicyContext};
pub use mode::{AutoAction, AutoActionState};
pub use priority_list::{PriorityEntry, PriorityListPolicy, TargetRule};
pub use state::{is_damage_buff, CommonPlayerState, CommonStrategy};

use crate::core::types::{ActionId, ActorId, Positional};
use crate::engine::{ActionEffect, NextAction};

/// Archetype-specific decision logic plugged into the engine
///
/// "No action" (`None`) is a normal answer for both decision functions.
pub trait RotationPolicy {
    /// Bookkeeping run once per action-manager tick while a mode is active
    fn update_internal_state(&mut self, ctx: &PolicyContext<'_>);

    /// Best GCD-class action for the current mode
    fn calculate_automatic_gcd(&mut self, ctx: &PolicyContext<'_>) -> Option<NextAction>;

    /// Best oGCD-class action that should finish before `deadline`
    ///
    /// The engine does not re-check the deadline; use
    /// [`crate::timing::fits_before`] to stay inside it.
    fn calculate_automatic_ogcd(&mut self, ctx: &PolicyContext<'_>, deadline: f32) -> Option<NextAction>;

    fn on_action_executed(&mut self, _action: ActionId, _target: Option<ActorId>) {}

    fn on_action_succeeded(&mut self, _effect: &ActionEffect) {}

    fn preferred_position(&self) -> Positional {
        Positional::Any
    }

    fn preferred_range(&self) -> f32 {
        3.0
    }
}

/// Policy that never acts; for agents driven purely by manual and planned requests
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPolicy;

impl RotationPolicy for NoPolicy {
    fn update_internal_state(&mut self, _ctx: &PolicyContext<'_>) {}

    fn calculate_automatic_gcd(&mut self, _ctx: &PolicyContext<'_>) -> Option<NextAction> {
        None
    }

    fn calculate_automatic_ogcd(&mut self, _ctx: &PolicyContext<'_>, _deadline: f32) -> Option<NextAction> {
        None
    }
}
