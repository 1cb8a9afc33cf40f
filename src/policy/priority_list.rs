//! Data-driven priority-list policy
//!
//! Picks the first usable entry from an ordered list per mode class. Real
//! archetype rotations plug in their own [`RotationPolicy`]; this one covers
//! simple agents and headless runs.

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{ActionId, ActorId, Positional};
use crate::engine::NextAction;
use crate::policy::{AutoAction, PolicyContext, RotationPolicy};
use crate::timing::{fits_before, ready_after_lock};
use crate::world::Actor;

/// Who an entry is used on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetRule {
    /// The player's current target
    #[default]
    Primary,
    /// The player itself
    Player,
    /// Smart friendly target (target or mouseover)
    Friendly,
    /// Smart hostile target (mouseover or target)
    Hostile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityEntry {
    pub action: ActionId,
    #[serde(default)]
    pub target: TargetRule,
    /// Minimum effective level
    #[serde(default)]
    pub min_level: u8,
}

impl PriorityEntry {
    pub fn new(action: ActionId, target: TargetRule) -> Self {
        Self {
            action,
            target,
            min_level: 0,
        }
    }

    pub fn at_level(mut self, min_level: u8) -> Self {
        self.min_level = min_level;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityListPolicy {
    pub idle_gcd: Vec<PriorityEntry>,
    pub idle_ogcd: Vec<PriorityEntry>,
    pub fight_gcd: Vec<PriorityEntry>,
    pub fight_ogcd: Vec<PriorityEntry>,
    pub positional: Positional,
    pub range: f32,
    #[serde(skip)]
    last_mode: AutoAction,
    #[serde(skip)]
    ticks_in_mode: u64,
    #[serde(skip)]
    executed: u64,
    #[serde(skip)]
    last_executed: Option<ActionId>,
}

impl Default for PriorityListPolicy {
    fn default() -> Self {
        Self {
            idle_gcd: Vec::new(),
            idle_ogcd: Vec::new(),
            fight_gcd: Vec::new(),
            fight_ogcd: Vec::new(),
            positional: Positional::Any,
            range: 3.0,
            last_mode: AutoAction::NONE,
            ticks_in_mode: 0,
            executed: 0,
            last_executed: None,
        }
    }
}

impl PriorityListPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_gcd(mut self, entries: Vec<PriorityEntry>) -> Self {
        self.idle_gcd = entries;
        self
    }

    pub fn with_idle_ogcd(mut self, entries: Vec<PriorityEntry>) -> Self {
        self.idle_ogcd = entries;
        self
    }

    pub fn with_fight_gcd(mut self, entries: Vec<PriorityEntry>) -> Self {
        self.fight_gcd = entries;
        self
    }

    pub fn with_fight_ogcd(mut self, entries: Vec<PriorityEntry>) -> Self {
        self.fight_ogcd = entries;
        self
    }

    pub fn with_positional(mut self, positional: Positional) -> Self {
        self.positional = positional;
        self
    }

    pub fn with_range(mut self, range: f32) -> Self {
        self.range = range;
        self
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Action-manager ticks spent in the current mode
    pub fn ticks_in_mode(&self) -> u64 {
        self.ticks_in_mode
    }

    pub fn executed_count(&self) -> u64 {
        self.executed
    }

    pub fn last_executed(&self) -> Option<ActionId> {
        self.last_executed
    }

    fn lists(&self, mode: AutoAction) -> (&[PriorityEntry], &[PriorityEntry]) {
        if mode.is_fight() {
            (&self.fight_gcd, &self.fight_ogcd)
        } else {
            (&self.idle_gcd, &self.idle_ogcd)
        }
    }

    fn resolve_target<'a>(ctx: &PolicyContext<'a>, rule: TargetRule) -> Option<&'a Actor> {
        let primary: Option<ActorId> = ctx.world.primary_target;
        match rule {
            TargetRule::Primary => ctx.primary_target(),
            TargetRule::Player => Some(ctx.player),
            TargetRule::Friendly => ctx.world.resolve(ctx.smart_target_friendly(primary)),
            TargetRule::Hostile => ctx.world.resolve(ctx.smart_target_hostile(primary)),
        }
    }

    fn candidate(ctx: &PolicyContext<'_>, entry: &PriorityEntry) -> Option<NextAction> {
        if entry.min_level > ctx.level {
            return None;
        }
        let supported = ctx.catalog.lookup(entry.action)?;
        // Casts are interrupted by movement
        if ctx.mode.is_moving() && supported.definition.cast_time > 0.0 {
            return None;
        }
        let target = Self::resolve_target(ctx, entry.target)?;
        ctx.make_result(entry.action, target)
    }
}

impl RotationPolicy for PriorityListPolicy {
    fn update_internal_state(&mut self, ctx: &PolicyContext<'_>) {
        if ctx.mode != self.last_mode {
            self.last_mode = ctx.mode;
            self.ticks_in_mode = 0;
        }
        self.ticks_in_mode += 1;
    }

    /// GCD readiness is not checked; the engine derives the oGCD deadline from it
    fn calculate_automatic_gcd(&mut self, ctx: &PolicyContext<'_>) -> Option<NextAction> {
        let (gcds, _) = self.lists(ctx.mode);
        gcds.iter().find_map(|entry| Self::candidate(ctx, entry))
    }

    fn calculate_automatic_ogcd(&mut self, ctx: &PolicyContext<'_>, deadline: f32) -> Option<NextAction> {
        let lock = ctx.timing.effective_animation_lock();
        let delay = ctx.timing.animation_lock_delay();
        let (_, ogcds) = self.lists(ctx.mode);
        ogcds.iter().find_map(|entry| {
            let definition = ctx.catalog.lookup(entry.action)?.definition;
            if !fits_before(lock, delay, &definition, deadline) || !ready_after_lock(ctx.timing, &definition) {
                return None;
            }
            Self::candidate(ctx, entry)
        })
    }

    fn on_action_executed(&mut self, action: ActionId, _target: Option<ActorId>) {
        self.executed += 1;
        self.last_executed = Some(action);
    }

    fn preferred_position(&self) -> Positional {
        self.positional
    }

    fn preferred_range(&self) -> f32 {
        self.range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{ActionCatalog, ActionDefinition};
    use crate::core::config::EngineConfig;
    use crate::core::types::GCD_GROUP;
    use crate::engine::ActionSource;
    use crate::timing::TimingSnapshot;
    use crate::world::{ActorKind, WorldState};
    use glam::Vec3;

    const SLASH: ActionId = ActionId::spell(1);
    const FIRE: ActionId = ActionId::spell(2);
    const BUFF: ActionId = ActionId::spell(10);
    const BURST: ActionId = ActionId::spell(11);

    fn catalog() -> ActionCatalog {
        ActionCatalog::from_definitions([
            (SLASH, ActionDefinition::gcd(3.0)),
            (FIRE, ActionDefinition::gcd(25.0).with_cast_time(1.5)),
            (BUFF, ActionDefinition::ogcd(0.0, 20, 60.0)),
            (BURST, ActionDefinition::ogcd(3.0, 21, 30.0)),
        ])
    }

    fn world() -> WorldState {
        let mut world = WorldState::new();
        world.upsert_actor(Actor::new(ActorId(1), ActorKind::Player, Vec3::ZERO));
        world.upsert_actor(Actor::new(ActorId(2), ActorKind::Enemy, Vec3::new(10.0, 0.0, 0.0)));
        world.primary_target = Some(ActorId(2));
        world
    }

    fn policy() -> PriorityListPolicy {
        PriorityListPolicy::new()
            .with_fight_gcd(vec![
                PriorityEntry::new(SLASH, TargetRule::Primary),
                PriorityEntry::new(FIRE, TargetRule::Primary),
            ])
            .with_fight_ogcd(vec![
                PriorityEntry::new(BUFF, TargetRule::Player).at_level(30),
                PriorityEntry::new(BURST, TargetRule::Primary),
            ])
    }

    #[test]
    fn test_gcd_skips_out_of_range_entries() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let world = world();
        let timing = TimingSnapshot::at(0.0).with_cooldown(GCD_GROUP, 1.0);
        let player = world.actor(ActorId(1)).unwrap();
        let ctx = PolicyContext {
            catalog: &catalog,
            config: &config,
            player,
            world: &world,
            timing: &timing,
            encounter: None,
            mode: AutoAction::AI_FIGHT,
            level: 90,
        };
        let mut policy = policy();
        let gcd = policy.calculate_automatic_gcd(&ctx).unwrap();
        // Slash is melee, target is 10 units away
        assert_eq!(gcd.action, FIRE);
        assert_eq!(gcd.source, ActionSource::Automatic);
        assert_eq!(gcd.target, Some(ActorId(2)));

        let moving = PolicyContext {
            mode: AutoAction::AI_FIGHT_MOVE,
            ..ctx
        };
        assert!(policy.calculate_automatic_gcd(&moving).is_none());
    }

    #[test]
    fn test_ogcd_respects_level_cooldown_and_deadline() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let world = world();
        let player = world.actor(ActorId(1)).unwrap();
        let mut policy = policy();

        let timing = TimingSnapshot::at(0.0).with_lock(0.0, 0.1);
        let ctx = PolicyContext {
            catalog: &catalog,
            config: &config,
            player,
            world: &world,
            timing: &timing,
            encounter: None,
            mode: AutoAction::AI_FIGHT,
            level: 90,
        };
        assert_eq!(policy.calculate_automatic_ogcd(&ctx, 2.0).map(|a| a.action), Some(BUFF));
        // 0.6 lock + 0.1 delay does not fit
        assert!(policy.calculate_automatic_ogcd(&ctx, 0.5).is_none());

        let low_level = PolicyContext { level: 20, ..ctx };
        // Buff is locked, burst is out of range
        assert!(policy.calculate_automatic_ogcd(&low_level, 2.0).is_none());

        // Unlocked again, but buff has no charge
        let on_cooldown = TimingSnapshot::at(0.0).with_cooldown(20, 40.0);
        let ctx = PolicyContext {
            timing: &on_cooldown,
            ..ctx
        };
        assert_eq!(ctx.level, 90);
        assert!(policy.calculate_automatic_ogcd(&ctx, 2.0).is_none());
    }

    #[test]
    fn test_idle_mode_uses_idle_lists() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let world = world();
        let timing = TimingSnapshot::at(0.0);
        let player = world.actor(ActorId(1)).unwrap();
        let ctx = PolicyContext {
            catalog: &catalog,
            config: &config,
            player,
            world: &world,
            timing: &timing,
            encounter: None,
            mode: AutoAction::AI_IDLE,
            level: 90,
        };
        let mut policy = policy();
        assert!(policy.calculate_automatic_gcd(&ctx).is_none());
    }

    #[test]
    fn test_internal_state_tracks_mode() {
        let catalog = catalog();
        let config = EngineConfig::default();
        let world = world();
        let timing = TimingSnapshot::at(0.0);
        let player = world.actor(ActorId(1)).unwrap();
        let ctx = PolicyContext {
            catalog: &catalog,
            config: &config,
            player,
            world: &world,
            timing: &timing,
            encounter: None,
            mode: AutoAction::AI_FIGHT,
            level: 90,
        };
        let mut policy = policy();
        policy.update_internal_state(&ctx);
        policy.update_internal_state(&ctx);
        assert_eq!(policy.ticks_in_mode(), 2);
        let idle = PolicyContext {
            mode: AutoAction::AI_IDLE,
            ..ctx
        };
        policy.update_internal_state(&idle);
        assert_eq!(policy.ticks_in_mode(), 1);

        policy.on_action_executed(SLASH, None);
        assert_eq!(policy.executed_count(), 1);
        assert_eq!(policy.last_executed(), Some(SLASH));
    }

    #[test]
    fn test_builder_sets_lists() {
        let policy = PriorityListPolicy::new()
            .with_idle_gcd(vec![PriorityEntry::new(SLASH, TargetRule::Primary)])
            .with_idle_ogcd(vec![PriorityEntry::new(BUFF, TargetRule::Player)])
            .with_fight_gcd(vec![PriorityEntry::new(FIRE, TargetRule::Hostile)])
            .with_fight_ogcd(vec![PriorityEntry::new(BURST, TargetRule::Primary)])
            .with_positional(Positional::Flank)
            .with_range(15.0);
        assert_eq!(policy.idle_gcd[0].action, SLASH);
        assert_eq!(policy.idle_ogcd[0].action, BUFF);
        assert_eq!(policy.fight_gcd[0].target, TargetRule::Hostile);
        assert_eq!(policy.fight_ogcd[0].action, BURST);
        assert_eq!(policy.preferred_position(), Positional::Flank);
        assert_eq!(policy.preferred_range(), 15.0);
        assert_eq!(policy.ticks_in_mode(), 0);
        assert_eq!(policy.last_executed(), None);
    }

    #[test]
    fn test_from_toml() {
        let policy = PriorityListPolicy::from_toml(
            r#"
            range = 25.0
            positional = "Rear"

            [[fight_gcd]]
            action = { kind = "Spell", id = 1 }

            [[fight_ogcd]]
            action = { kind = "Spell", id = 10 }
            target = "player"
            min_level = 30
            "#,
        )
        .expect("policy should parse");
        assert_eq!(policy.fight_gcd.len(), 1);
        assert_eq!(policy.fight_gcd[0].target, TargetRule::Primary);
        assert_eq!(policy.fight_ogcd[0].min_level, 30);
        assert_eq!(policy.preferred_range(), 25.0);
        assert_eq!(policy.preferred_position(), Positional::Rear);
    }
}
