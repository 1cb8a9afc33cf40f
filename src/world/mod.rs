//! World state snapshot consumed by the engine each tick

pub mod actor;

pub use actor::{Actor, ActorKind, Role, Status};

use ahash::AHashMap;
use glam::Vec3;

use crate::core::types::ActorId;

/// Everything the host refreshes before a main tick
///
/// Requests only hold actor ids; they are resolved against this snapshot
/// each time they are evaluated.
#[derive(Debug, Clone, Default)]
pub struct WorldState {
    actors: AHashMap<ActorId, Actor>,
    /// Party members in slot order, including the player
    pub party: Vec<ActorId>,
    /// The player's current target, if any
    pub primary_target: Option<ActorId>,
    /// Mouseover target, if any
    pub secondary_target: Option<ActorId>,
    /// World position under the cursor, if it hits the ground
    pub cursor_position: Option<Vec3>,
    inventory: AHashMap<u32, u32>,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an actor
    pub fn upsert_actor(&mut self, actor: Actor) {
        self.actors.insert(actor.id, actor);
    }

    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        self.actors.remove(&id)
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    /// Resolve an optional id; unknown ids resolve to `None`
    pub fn resolve(&self, id: Option<ActorId>) -> Option<&Actor> {
        id.and_then(|id| self.actors.get(&id))
    }

    pub fn party_members(&self) -> impl Iterator<Item = &Actor> {
        self.party.iter().filter_map(|id| self.actors.get(id))
    }

    pub fn set_item_count(&mut self, item_id: u32, count: u32) {
        self.inventory.insert(item_id, count);
    }

    pub fn have_item(&self, item_id: u32) -> bool {
        self.inventory.get(&item_id).copied().unwrap_or(0) > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_unknown_id() {
        let mut world = WorldState::new();
        world.upsert_actor(Actor::new(ActorId(1), ActorKind::Player, Vec3::ZERO));
        assert!(world.resolve(Some(ActorId(1))).is_some());
        assert!(world.resolve(Some(ActorId(2))).is_none());
        assert!(world.resolve(None).is_none());
    }

    #[test]
    fn test_party_skips_missing_actors() {
        let mut world = WorldState::new();
        world.upsert_actor(Actor::new(ActorId(1), ActorKind::Player, Vec3::ZERO));
        world.party = vec![ActorId(1), ActorId(9)];
        assert_eq!(world.party_members().count(), 1);
    }

    #[test]
    fn test_inventory() {
        let mut world = WorldState::new();
        assert!(!world.have_item(27960));
        world.set_item_count(27960, 3);
        assert!(world.have_item(27960));
        world.set_item_count(27960, 0);
        assert!(!world.have_item(27960));
    }
}
