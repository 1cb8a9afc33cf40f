//! Actors as seen by the rotation engine

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::types::{ActorId, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorKind {
    Player,
    Companion,
    Enemy,
    Npc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    None,
    Tank,
    Healer,
    Melee,
    Ranged,
}

/// A status effect with an absolute expiry time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub id: u32,
    pub expire_at: Timestamp,
}

/// Snapshot of one actor, refreshed by the host every world tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub kind: ActorKind,
    pub position: Vec3,
    pub hitbox_radius: f32,
    pub is_ally: bool,
    pub role: Role,
    pub in_combat: bool,
    pub level: u8,
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub statuses: Vec<Status>,
}

impl Actor {
    pub fn new(id: ActorId, kind: ActorKind, position: Vec3) -> Self {
        Self {
            id,
            kind,
            position,
            hitbox_radius: 0.5,
            is_ally: matches!(kind, ActorKind::Player | ActorKind::Companion),
            role: Role::None,
            in_combat: false,
            level: 1,
            hp: 1,
            max_hp: 1,
            mp: 0,
            statuses: Vec::new(),
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.hitbox_radius = radius;
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_hp(mut self, hp: u32, max_hp: u32) -> Self {
        self.hp = hp;
        self.max_hp = max_hp;
        self
    }

    pub fn with_status(mut self, id: u32, expire_at: Timestamp) -> Self {
        self.statuses.push(Status { id, expire_at });
        self
    }

    pub fn hp_ratio(&self) -> f32 {
        if self.max_hp == 0 {
            0.0
        } else {
            self.hp as f32 / self.max_hp as f32
        }
    }

    pub fn find_status(&self, id: u32) -> Option<&Status> {
        self.statuses.iter().find(|s| s.id == id)
    }

    pub fn is_hostile(&self) -> bool {
        self.kind == ActorKind::Enemy && !self.is_ally
    }

    /// Player characters and their companions accept friendly actions
    pub fn is_friendly_target(&self) -> bool {
        matches!(self.kind, ActorKind::Player | ActorKind::Companion)
    }
}
