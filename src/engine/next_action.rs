//! Per-tick decision values

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::actions::ActionDefinition;
use crate::core::types::{ActionId, ActorId};
use crate::queue::QueuedRequest;

/// Where a decision came from, in ascending precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionSource {
    Automatic,
    Planned,
    Manual,
    Emergency,
}

/// The action to dispatch this tick; produced fresh every tick, never stored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NextAction {
    pub action: ActionId,
    pub target: Option<ActorId>,
    pub target_pos: Vec3,
    pub definition: ActionDefinition,
    pub source: ActionSource,
}

impl NextAction {
    pub fn new(
        action: ActionId,
        target: Option<ActorId>,
        target_pos: Vec3,
        definition: ActionDefinition,
        source: ActionSource,
    ) -> Self {
        Self {
            action,
            target,
            target_pos,
            definition,
            source,
        }
    }

    pub fn from_request(request: &QueuedRequest, source: ActionSource) -> Self {
        Self::new(
            request.action,
            request.target,
            request.target_pos,
            request.definition,
            source,
        )
    }
}

/// Effect record reported by the host once an action lands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEffect {
    pub action: ActionId,
    pub caster: ActorId,
    pub main_target: Option<ActorId>,
    pub targets: Vec<ActorId>,
    pub global_sequence: u32,
}
