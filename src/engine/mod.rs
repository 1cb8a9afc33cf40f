//! Per-agent rotation engine
//!
//! One engine per agent, driven from a single tick loop:
//! 1. Host refreshes the world, then calls [`RotationEngine::update_main_tick`]
//! 2. [`RotationEngine::calculate_next_action`] is queried once
//! 3. Host dispatches the decision and reports back through the notify calls
//! 4. After its own update the action manager calls [`RotationEngine::update_am_tick`]

pub mod next_action;
pub mod resolver;

pub use next_action::{ActionEffect, ActionSource, NextAction};

use glam::Vec3;

use crate::actions::{ActionCatalog, TransformContext};
use crate::core::config::{EngineConfig, GroundTargetingMode};
use crate::core::error::{Result, RotationError};
use crate::core::types::{ActionId, ActorId, Positional, Timestamp};
use crate::planning::EncounterContext;
use crate::policy::{AutoAction, AutoActionState, PolicyContext, RotationPolicy};
use crate::queue::{ManualQueue, RequestTier};
use crate::rules::UnlockGate;
use crate::timing::TimingOracle;
use crate::world::{Actor, WorldState};

/// Inputs refreshed by the host for one tick
#[derive(Clone, Copy)]
pub struct TickContext<'a> {
    pub world: &'a WorldState,
    pub timing: &'a dyn TimingOracle,
    pub encounter: Option<EncounterContext<'a>>,
}

impl<'a> TickContext<'a> {
    pub fn new(world: &'a WorldState, timing: &'a dyn TimingOracle) -> Self {
        Self {
            world,
            timing,
            encounter: None,
        }
    }

    pub fn with_encounter(mut self, encounter: EncounterContext<'a>) -> Self {
        self.encounter = Some(encounter);
        self
    }
}

/// Result of an accepted user request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Queued as a manual request in the given tier
    Queued(ActionId, RequestTier),
    /// Placeholder action; the automatic mode was (re)armed instead
    AutoActivated(AutoAction),
}

/// Mutable state owned by the tick loop
#[derive(Debug, Clone)]
pub struct EngineState {
    pub queue: ManualQueue,
    pub auto: AutoActionState,
}

pub struct RotationEngine<P: RotationPolicy> {
    player: ActorId,
    catalog: ActionCatalog,
    unlock: UnlockGate,
    config: EngineConfig,
    policy: P,
    state: EngineState,
}

impl<P: RotationPolicy> RotationEngine<P> {
    pub fn new(player: ActorId, catalog: ActionCatalog, unlock: UnlockGate, config: EngineConfig, policy: P) -> Self {
        let state = EngineState {
            queue: ManualQueue::new(config.manual_queue_expiry),
            auto: AutoActionState::default(),
        };
        Self {
            player,
            catalog,
            unlock,
            config,
            policy,
            state,
        }
    }

    pub fn player(&self) -> ActorId {
        self.player
    }

    pub fn catalog(&self) -> &ActionCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut P {
        &mut self.policy
    }

    pub fn unlock_gate_mut(&mut self) -> &mut UnlockGate {
        &mut self.unlock
    }

    pub fn auto_action(&self) -> AutoAction {
        self.state.auto.mode()
    }

    pub fn preferred_position(&self) -> Positional {
        self.policy.preferred_position()
    }

    pub fn preferred_range(&self) -> f32 {
        self.policy.preferred_range()
    }

    pub fn effective_level(&self, raw_level: u8) -> u8 {
        self.unlock.adjust_level(raw_level)
    }

    /// Run after every world refresh, before the resolver
    pub fn update_main_tick(&mut self, now: Timestamp) {
        let expired = self.state.queue.remove_expired(now);
        if expired > 0 && self.config.logging {
            tracing::debug!(expired, "Manual requests expired");
        }
        if let Some(lapsed) = self.state.auto.expire(now) {
            if self.config.logging {
                tracing::debug!(mode = %lapsed, "Auto action expired");
            }
        }
    }

    /// Run after every action-manager update
    pub fn update_am_tick(&mut self, ctx: &TickContext<'_>) {
        let mode = self.state.auto.mode();
        if !mode.is_active() {
            return;
        }
        let Some(player) = ctx.world.actor(self.player) else {
            return;
        };
        let pctx = policy_context(&self.catalog, &self.unlock, &self.config, ctx, player, mode);
        self.policy.update_internal_state(&pctx);
    }

    /// Arm or renew an automatic mode
    pub fn update_auto_action(&mut self, mode: AutoAction, now: Timestamp) {
        let changed = self.state.auto.set(mode, now, self.config.auto_action_timeout);
        if changed && self.config.logging {
            tracing::debug!(mode = %mode, "Auto action set");
        }
    }

    /// User request surface
    ///
    /// Rejects unknown actions, ground-targeted actions the config leaves to
    /// the host, and targeted actions without a target. In at-target
    /// ground-targeting mode every ground-targeted action needs a target. Placeholder actions
    /// arm their automatic mode instead of queueing.
    pub fn handle_user_action_request(
        &mut self,
        action: ActionId,
        target: Option<ActorId>,
        ctx: &TickContext<'_>,
    ) -> Result<RequestOutcome> {
        let now = ctx.timing.current_time();
        let player = ctx.world.actor(self.player);

        let mut action = action;
        let mut supported = self
            .catalog
            .lookup(action)
            .ok_or(RotationError::UnknownAction(action))?;

        let has_transforms = supported.transform_action.is_some() || supported.transform_target.is_some();
        if player.is_none() && has_transforms && self.config.logging {
            tracing::debug!(%action, player = %self.player, "Player not in world; request transforms skipped");
        }

        if let (Some(transform), Some(player)) = (supported.transform_action, player) {
            let adjusted = transform(&transform_context(ctx, player));
            if adjusted != action {
                supported = self
                    .catalog
                    .lookup(adjusted)
                    .ok_or(RotationError::UnknownAction(adjusted))?;
                action = adjusted;
            }
        }

        let placeholder = supported.placeholder_for_auto;
        if placeholder.is_active() {
            self.update_auto_action(placeholder, now);
            return Ok(RequestOutcome::AutoActivated(placeholder));
        }

        let definition = supported.definition;
        let condition = supported.condition.clone();
        let transform_target = supported.transform_target;
        let is_gt = supported.is_gt;

        if is_gt {
            match self.config.ground_targeting {
                GroundTargetingMode::Manual => {
                    return Err(RotationError::GroundTargetingManual(action));
                }
                GroundTargetingMode::AtCursor => {
                    let pos = ctx
                        .world
                        .cursor_position
                        .ok_or(RotationError::NoCursorPosition(action))?;
                    let tier = self.state.queue.push(now, action, None, pos, definition, condition);
                    self.log_queued(action, None, tier);
                    return Ok(RequestOutcome::Queued(action, tier));
                }
                GroundTargetingMode::AtTarget => {}
            }
        }

        let mut target = target;
        if let (Some(transform), Some(player)) = (transform_target, player) {
            target = transform(&transform_context(ctx, player), target);
        }
        // Ground-targeted actions reaching here are placed at the target
        let needs_target = definition.requires_target() || is_gt;
        if needs_target && target.is_none() {
            if self.config.logging {
                tracing::warn!(%action, "Rejected request without target");
            }
            return Err(RotationError::MissingTarget(action));
        }

        let tier = self.state.queue.push(now, action, target, Vec3::ZERO, definition, condition);
        self.log_queued(action, target, tier);
        Ok(RequestOutcome::Queued(action, tier))
    }

    /// System-level override that wins over everything for its lifetime
    pub fn request_emergency(
        &mut self,
        action: ActionId,
        target: Option<ActorId>,
        target_pos: Vec3,
        now: Timestamp,
    ) -> Result<()> {
        let definition = self
            .catalog
            .lookup(action)
            .ok_or(RotationError::UnknownAction(action))?
            .definition;
        self.state.queue.push_emergency(now, action, target, target_pos, definition);
        if self.config.logging {
            tracing::info!(%action, "Emergency action queued");
        }
        Ok(())
    }

    /// Host dispatched `action`
    pub fn notify_action_executed(&mut self, action: ActionId, target: Option<ActorId>) {
        self.state.queue.pop(action);
        self.policy.on_action_executed(action, target);
    }

    /// Host saw `effect` land
    pub fn notify_action_succeeded(&mut self, effect: &ActionEffect) {
        self.policy.on_action_succeeded(effect);
    }

    fn log_queued(&self, action: ActionId, target: Option<ActorId>, tier: RequestTier) {
        if self.config.logging {
            tracing::debug!(%action, ?target, ?tier, "Manual request queued");
        }
    }
}

fn transform_context<'a>(ctx: &TickContext<'a>, player: &'a Actor) -> TransformContext<'a> {
    TransformContext {
        world: ctx.world,
        player,
        timing: ctx.timing,
    }
}

fn policy_context<'a>(
    catalog: &'a ActionCatalog,
    unlock: &UnlockGate,
    config: &'a EngineConfig,
    ctx: &TickContext<'a>,
    player: &'a Actor,
    mode: AutoAction,
) -> PolicyContext<'a> {
    PolicyContext {
        catalog,
        config,
        player,
        world: ctx.world,
        timing: ctx.timing,
        encounter: ctx.encounter,
        mode,
        level: unlock.adjust_level(player.level),
    }
}
