//! What an automatic policy sees when it is asked for a decision

use glam::Vec3;

use crate::actions::ActionCatalog;
use crate::core::config::EngineConfig;
use crate::core::types::{ActionId, ActorId, Timestamp};
use crate::engine::{ActionSource, NextAction};
use crate::planning::EncounterContext;
use crate::policy::AutoAction;
use crate::timing::TimingOracle;
use crate::world::{Actor, Role, WorldState};

pub struct PolicyContext<'a> {
    pub catalog: &'a ActionCatalog,
    pub config: &'a EngineConfig,
    pub player: &'a Actor,
    pub world: &'a WorldState,
    pub timing: &'a dyn TimingOracle,
    pub encounter: Option<EncounterContext<'a>>,
    pub mode: AutoAction,
    /// Player level after unlock adjustments
    pub level: u8,
}

impl<'a> PolicyContext<'a> {
    /// Automatic decision for `action` on `target`, if the catalog allows it
    pub fn make_result(&self, action: ActionId, target: &Actor) -> Option<NextAction> {
        let supported = self.catalog.lookup(action)?;
        if !supported.allowed(self.player, target) {
            return None;
        }
        Some(NextAction::new(
            action,
            Some(target.id),
            Vec3::ZERO,
            supported.definition,
            ActionSource::Automatic,
        ))
    }

    /// Seconds until `expire_at`, clamped at zero
    pub fn status_duration(&self, expire_at: Timestamp) -> f32 {
        ((expire_at - self.timing.current_time()) as f32).max(0.0)
    }

    pub fn primary_target(&self) -> Option<&'a Actor> {
        self.world.resolve(self.world.primary_target)
    }

    pub fn smart_target_friendly(&self, primary: Option<ActorId>) -> Option<ActorId> {
        smart_target_friendly(self.world, primary)
    }

    pub fn smart_target_hostile(&self, primary: Option<ActorId>) -> Option<ActorId> {
        smart_target_hostile(self.world, primary)
    }

    pub fn smart_target_co_tank(&self, primary: Option<ActorId>) -> Option<ActorId> {
        smart_target_co_tank(self.world, self.player.id, primary)
    }
}

fn is_friendly(world: &WorldState, id: Option<ActorId>) -> Option<ActorId> {
    world
        .resolve(id)
        .filter(|a| a.is_friendly_target())
        .map(|a| a.id)
}

/// Target if friendly, else mouseover if friendly
pub fn smart_target_friendly(world: &WorldState, primary: Option<ActorId>) -> Option<ActorId> {
    is_friendly(world, primary).or_else(|| is_friendly(world, world.secondary_target))
}

/// Mouseover if hostile, else the primary target unchanged
pub fn smart_target_hostile(world: &WorldState, primary: Option<ActorId>) -> Option<ActorId> {
    world
        .resolve(world.secondary_target)
        .filter(|a| a.is_hostile())
        .map(|a| a.id)
        .or(primary)
}

/// Friendly target, else the first other tank in the party
pub fn smart_target_co_tank(world: &WorldState, player: ActorId, primary: Option<ActorId>) -> Option<ActorId> {
    smart_target_friendly(world, primary).or_else(|| {
        world
            .party_members()
            .find(|a| a.id != player && a.role == Role::Tank)
            .map(|a| a.id)
    })
}
