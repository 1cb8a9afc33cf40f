//! Priority resolution - one decision per tick
//!
//! Sources in strict precedence order:
//! 1. Emergency request: returned as-is, no timing or range checks
//! 2. GCD candidate: queued GCD request, else automatic GCD
//! 3. oGCD deadline: GCD group remaining if there is a GCD candidate, else unbounded
//! 4. Queued oGCD that fits the deadline
//! 5. Planned oGCD with the least time left (self-targeted only)
//! 6. Automatic oGCD, trusted to respect the deadline
//! 7. oGCD from 6 if any, else the GCD candidate

use glam::Vec3;
use ordered_float::OrderedFloat;

use crate::actions::{ActionCatalog, ActionDefinition};
use crate::core::types::{ActionId, GCD_GROUP};
use crate::engine::{policy_context, ActionSource, NextAction, RotationEngine, TickContext};
use crate::planning::PlannedAction;
use crate::policy::RotationPolicy;
use crate::timing::{fits_before, TimingOracle};
use crate::world::Actor;

impl<P: RotationPolicy> RotationEngine<P> {
    /// Decide what to do this tick
    ///
    /// The effective animation lock is 0 when the result is about to be
    /// executed; it can be larger when showing a hint during a lock.
    pub fn calculate_next_action(&mut self, ctx: &TickContext<'_>) -> Option<NextAction> {
        if let Some(emergency) = self.state.queue.peek_emergency() {
            return Some(NextAction::from_request(emergency, ActionSource::Emergency));
        }

        let timing = ctx.timing;
        let mode = self.state.auto.mode();
        let player = ctx.world.actor(self.player);
        let pctx = player.map(|p| policy_context(&self.catalog, &self.unlock, &self.config, ctx, p, mode));

        let next_gcd = match self.state.queue.peek_gcd(ctx.world) {
            Some(request) => Some(NextAction::from_request(request, ActionSource::Manual)),
            None => match &pctx {
                Some(pctx) if mode.is_active() => self.policy.calculate_automatic_gcd(pctx),
                _ => None,
            },
        };

        let ogcd_deadline = if next_gcd.is_some() {
            timing.cooldown_remaining(GCD_GROUP)
        } else {
            f32::MAX
        };

        // Explicit queued intent outranks planned and automatic oGCDs
        if let Some(request) = self.state.queue.peek_ogcd(timing, ctx.world, ogcd_deadline) {
            return Some(NextAction::from_request(request, ActionSource::Manual));
        }

        if let (Some(plan), Some(player)) = (ctx.encounter.and_then(|e| e.plan), player) {
            let planned = plan
                .active_actions()
                .into_iter()
                .filter(|p| can_execute_planned_action(&self.catalog, timing, player, p, ogcd_deadline))
                .min_by_key(|p| OrderedFloat(p.time_left));
            if let Some(planned) = planned {
                return Some(NextAction::new(
                    planned.action,
                    Some(player.id),
                    Vec3::ZERO,
                    planned.definition,
                    ActionSource::Planned,
                ));
            }
        }

        let next_ogcd = match &pctx {
            Some(pctx) if mode.is_active() => self.policy.calculate_automatic_ogcd(pctx, ogcd_deadline),
            _ => None,
        };
        if let Some(ogcd) = &next_ogcd {
            let lock = timing.effective_animation_lock();
            let delay = timing.animation_lock_delay();
            if self.config.logging && !fits_before(lock, delay, &ogcd.definition, ogcd_deadline) {
                tracing::debug!(
                    action = %ogcd.action,
                    deadline = ogcd_deadline,
                    "Automatic oGCD delays the next GCD"
                );
            }
        }

        let decision = next_ogcd.or(next_gcd);
        if let Some(decision) = &decision {
            if self.config.logging {
                tracing::trace!(action = %decision.action, source = ?decision.source, "Next action");
            }
        }
        decision
    }

    /// Whether an action would be eligible as a planned use right now
    pub fn can_execute_planned(&self, ctx: &TickContext<'_>, action: ActionId, definition: &ActionDefinition, deadline: f32) -> bool {
        let Some(player) = ctx.world.actor(self.player) else {
            return false;
        };
        let planned = PlannedAction {
            action,
            definition: *definition,
            time_left: 0.0,
        };
        can_execute_planned_action(&self.catalog, ctx.timing, player, &planned, deadline)
    }
}

// Planned GCDs and non-self targets are not supported
fn can_execute_planned_action(
    catalog: &ActionCatalog,
    timing: &dyn TimingOracle,
    player: &Actor,
    planned: &PlannedAction,
    deadline: f32,
) -> bool {
    let definition = &planned.definition;
    let lock = timing.effective_animation_lock();
    definition.cooldown_group != GCD_GROUP
        && timing.cooldown_remaining(definition.cooldown_group) - lock <= definition.cooldown_at_first_charge
        && fits_before(lock, timing.animation_lock_delay(), definition, deadline)
        && catalog.allowed(planned.action, player, player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EngineConfig;
    use crate::core::types::ActorId;
    use crate::planning::{EncounterContext, ScheduledPlan};
    use crate::policy::{AutoAction, NoPolicy};
    use crate::rules::UnlockGate;
    use crate::timing::TimingSnapshot;
    use crate::world::{ActorKind, WorldState};

    const PLAYER: ActorId = ActorId(1);
    const RAMPART: ActionId = ActionId::spell(7531);
    const SENTINEL: ActionId = ActionId::spell(17);
    const SLASH: ActionId = ActionId::spell(9);

    fn engine() -> RotationEngine<NoPolicy> {
        let catalog = ActionCatalog::from_definitions([
            (RAMPART, ActionDefinition::ogcd(0.0, 46, 90.0)),
            (SENTINEL, ActionDefinition::ogcd(0.0, 19, 120.0)),
            (SLASH, ActionDefinition::gcd(3.0)),
        ]);
        RotationEngine::new(PLAYER, catalog, UnlockGate::default(), EngineConfig::default(), NoPolicy)
    }

    fn world() -> WorldState {
        let mut world = WorldState::new();
        world.upsert_actor(Actor::new(PLAYER, ActorKind::Player, Vec3::ZERO));
        world
    }

    #[test]
    fn test_planned_picks_least_time_left() {
        let mut engine = engine();
        let world = world();
        let timing = TimingSnapshot::at(10.0);
        let mut plan = ScheduledPlan::new()
            .with_entry(RAMPART, ActionDefinition::ogcd(0.0, 46, 90.0), 5.0, 20.0)
            .with_entry(SENTINEL, ActionDefinition::ogcd(0.0, 19, 120.0), 8.0, 12.0);
        plan.set_time(10.0);
        let ctx = TickContext::new(&world, &timing).with_encounter(EncounterContext {
            plan: Some(&plan),
            ..Default::default()
        });

        let next = engine.calculate_next_action(&ctx).unwrap();
        assert_eq!(next.action, SENTINEL);
        assert_eq!(next.source, ActionSource::Planned);
        assert_eq!(next.target, Some(PLAYER));
    }

    #[test]
    fn test_planned_skips_cooldown_and_gcd_group() {
        let mut engine = engine();
        let world = world();
        let timing = TimingSnapshot::at(10.0).with_cooldown(19, 60.0);
        let mut plan = ScheduledPlan::new()
            .with_entry(SLASH, ActionDefinition::gcd(3.0), 0.0, 20.0)
            .with_entry(SENTINEL, ActionDefinition::ogcd(0.0, 19, 120.0), 0.0, 20.0);
        plan.set_time(10.0);
        let ctx = TickContext::new(&world, &timing).with_encounter(EncounterContext {
            plan: Some(&plan),
            ..Default::default()
        });
        assert!(engine.calculate_next_action(&ctx).is_none());
    }

    #[test]
    fn test_planned_requires_catalog_entry() {
        let engine = engine();
        let world = world();
        let timing = TimingSnapshot::at(0.0);
        let ctx = TickContext::new(&world, &timing);
        let unknown = ActionDefinition::ogcd(0.0, 80, 60.0);
        assert!(!engine.can_execute_planned(&ctx, ActionId::spell(999), &unknown, f32::MAX));
        assert!(engine.can_execute_planned(&ctx, RAMPART, &ActionDefinition::ogcd(0.0, 46, 90.0), f32::MAX));
    }

    #[test]
    fn test_planned_respects_gcd_deadline() {
        let mut engine = engine();
        let world = world();
        // GCD comes up in 0.5s, rampart needs 0.6s
        let timing = TimingSnapshot::at(10.0).with_cooldown(GCD_GROUP, 0.5);
        let mut plan = ScheduledPlan::new().with_entry(RAMPART, ActionDefinition::ogcd(0.0, 46, 90.0), 0.0, 20.0);
        plan.set_time(10.0);
        let ctx = TickContext::new(&world, &timing).with_encounter(EncounterContext {
            plan: Some(&plan),
            ..Default::default()
        });

        engine
            .handle_user_action_request(SLASH, Some(PLAYER), &ctx)
            .expect("slash is in the catalog");
        let next = engine.calculate_next_action(&ctx).unwrap();
        assert_eq!(next.action, SLASH);
        assert_eq!(next.source, ActionSource::Manual);
        assert_eq!(engine.auto_action(), AutoAction::NONE);
    }
}
