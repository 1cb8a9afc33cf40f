//! Manual request queue with deadline-based admission

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::actions::{ActionDefinition, Condition};
use crate::core::types::{ActionId, ActorId, Timestamp};
use crate::timing::{fits_before, ready_after_lock, TimingOracle};
use crate::world::WorldState;

/// Urgency bucket of a queued request
///
/// Higher numeric value = higher priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum RequestTier {
    Ogcd = 0,
    Gcd = 1,
    Emergency = 2,
}

impl RequestTier {
    pub fn for_definition(definition: &ActionDefinition) -> Self {
        if definition.is_gcd() {
            RequestTier::Gcd
        } else {
            RequestTier::Ogcd
        }
    }
}

/// A request waiting for admission
///
/// Carries its own copy of the definition so later catalog changes do not
/// affect an already accepted request.
#[derive(Debug, Clone)]
pub struct QueuedRequest {
    pub action: ActionId,
    pub target: Option<ActorId>,
    pub target_pos: Vec3,
    pub definition: ActionDefinition,
    pub condition: Option<Condition>,
    pub tier: RequestTier,
    pub expire_at: Timestamp,
}

impl QueuedRequest {
    fn condition_holds(&self, world: &WorldState) -> bool {
        self.condition
            .as_ref()
            .map_or(true, |c| c.holds(world.resolve(self.target)))
    }
}

/// Pending manual requests in insertion order
#[derive(Debug, Clone)]
pub struct ManualQueue {
    expiry: f32,
    queue: VecDeque<QueuedRequest>,
}

impl ManualQueue {
    pub fn new(expiry: f32) -> Self {
        Self {
            expiry,
            queue: VecDeque::new(),
        }
    }

    pub fn expiry(&self) -> f32 {
        self.expiry
    }

    /// Queue a user request; the tier follows the definition's cooldown group
    ///
    /// A GCD-class push supersedes any pending GCD-class request. Pushing an
    /// oGCD-class action that is already pending refreshes it in place.
    pub fn push(
        &mut self,
        now: Timestamp,
        action: ActionId,
        target: Option<ActorId>,
        target_pos: Vec3,
        definition: ActionDefinition,
        condition: Option<Condition>,
    ) -> RequestTier {
        let tier = RequestTier::for_definition(&definition);
        let request = QueuedRequest {
            action,
            target,
            target_pos,
            definition,
            condition,
            tier,
            expire_at: now + self.expiry as f64,
        };

        match tier {
            RequestTier::Gcd => {
                self.queue.retain(|r| r.tier != RequestTier::Gcd);
                self.queue.push_back(request);
            }
            _ => {
                if let Some(existing) = self
                    .queue
                    .iter_mut()
                    .find(|r| r.tier == tier && r.action == action)
                {
                    *existing = request;
                } else {
                    self.queue.push_back(request);
                }
            }
        }
        tier
    }

    /// System-level override; supersedes any pending emergency request
    pub fn push_emergency(
        &mut self,
        now: Timestamp,
        action: ActionId,
        target: Option<ActorId>,
        target_pos: Vec3,
        definition: ActionDefinition,
    ) {
        self.queue.retain(|r| r.tier != RequestTier::Emergency);
        self.queue.push_back(QueuedRequest {
            action,
            target,
            target_pos,
            definition,
            condition: None,
            tier: RequestTier::Emergency,
            expire_at: now + self.expiry as f64,
        });
    }

    /// Drop every request whose expiry has been reached
    pub fn remove_expired(&mut self, now: Timestamp) -> usize {
        let before = self.queue.len();
        self.queue.retain(|r| r.expire_at > now);
        before - self.queue.len()
    }

    pub fn peek_emergency(&self) -> Option<&QueuedRequest> {
        self.queue.iter().find(|r| r.tier == RequestTier::Emergency)
    }

    /// Pending GCD-class request, regardless of cooldown state
    pub fn peek_gcd(&self, world: &WorldState) -> Option<&QueuedRequest> {
        self.queue
            .iter()
            .find(|r| r.tier == RequestTier::Gcd && r.condition_holds(world))
    }

    /// First pending oGCD-class request that can run and release its lock by `deadline`
    ///
    /// Requires `lock + animation_lock + lock_delay <= deadline` (inclusive), a
    /// charge available once the current lock ends, and the request's
    /// condition to hold for its target as it is now.
    pub fn peek_ogcd(
        &self,
        timing: &dyn TimingOracle,
        world: &WorldState,
        deadline: f32,
    ) -> Option<&QueuedRequest> {
        let lock = timing.effective_animation_lock();
        let delay = timing.animation_lock_delay();
        self.queue.iter().find(|r| {
            r.tier == RequestTier::Ogcd
                && fits_before(lock, delay, &r.definition, deadline)
                && ready_after_lock(timing, &r.definition)
                && r.condition_holds(world)
        })
    }

    /// Remove every request for an action that was just dispatched
    ///
    /// Covers the same action pending in several tiers. No-op if nothing matches.
    pub fn pop(&mut self, action: ActionId) -> usize {
        let before = self.queue.len();
        self.queue.retain(|r| r.action != action);
        before - self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueuedRequest> {
        self.queue.iter()
    }
}
