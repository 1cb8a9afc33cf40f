//! Supported actions and the per-agent catalog

use ahash::AHashMap;

use crate::actions::condition::Condition;
use crate::actions::definition::ActionDefinition;
use crate::core::types::{ActionId, ActorId};
use crate::policy::AutoAction;
use crate::timing::TimingOracle;
use crate::world::{Actor, WorldState};

/// Fresh state handed to request-time transforms
pub struct TransformContext<'a> {
    pub world: &'a WorldState,
    pub player: &'a Actor,
    pub timing: &'a dyn TimingOracle,
}

/// Rewrites a requested action id (e.g. context-sensitive combo buttons)
pub type ActionTransform = fn(&TransformContext<'_>) -> ActionId;

/// Rewrites a requested target (e.g. smart targeting)
pub type TargetTransform = fn(&TransformContext<'_>, Option<ActorId>) -> Option<ActorId>;

/// One catalog entry
#[derive(Debug, Clone)]
pub struct SupportedAction {
    pub definition: ActionDefinition,
    pub is_gt: bool,
    pub condition: Option<Condition>,
    /// If set, requesting this action activates the automatic mode instead
    pub placeholder_for_auto: AutoAction,
    pub transform_action: Option<ActionTransform>,
    pub transform_target: Option<TargetTransform>,
}

impl SupportedAction {
    pub fn new(definition: ActionDefinition, is_gt: bool) -> Self {
        Self {
            definition,
            is_gt,
            condition: None,
            placeholder_for_auto: AutoAction::NONE,
            transform_action: None,
            transform_target: None,
        }
    }

    pub fn with_condition(&mut self, condition: Condition) -> &mut Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_placeholder(&mut self, mode: AutoAction) -> &mut Self {
        self.placeholder_for_auto = mode;
        self
    }

    pub fn with_transform_action(&mut self, transform: ActionTransform) -> &mut Self {
        self.transform_action = Some(transform);
        self
    }

    pub fn with_transform_target(&mut self, transform: TargetTransform) -> &mut Self {
        self.transform_target = Some(transform);
        self
    }

    /// Range and condition check of `player` using this action on `target`
    ///
    /// Range is measured between hitbox edges and the boundary counts as in
    /// range. Self-targeting skips the range check.
    pub fn allowed(&self, player: &Actor, target: &Actor) -> bool {
        if self.definition.range > 0.0 && player.id != target.id {
            let dist_sq = target.position.distance_squared(player.position);
            let eff_range = self.definition.range + player.hitbox_radius + target.hitbox_radius;
            if dist_sq > eff_range * eff_range {
                return false;
            }
        }
        self.condition.as_ref().map_or(true, |c| c.holds(Some(target)))
    }

    /// Condition check only, for requests whose target may be absent
    pub fn condition_holds(&self, target: Option<&Actor>) -> bool {
        self.condition.as_ref().map_or(true, |c| c.holds(target))
    }
}

/// Registry of everything an agent can do
///
/// Built once through [`CatalogBuilder`]; read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ActionCatalog {
    actions: AHashMap<ActionId, SupportedAction>,
}

impl ActionCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Plain catalog from definitions, ground-targeting taken from each definition
    pub fn from_definitions(definitions: impl IntoIterator<Item = (ActionId, ActionDefinition)>) -> Self {
        let mut builder = Self::builder();
        for (id, definition) in definitions {
            builder.register(id, definition);
        }
        builder.build()
    }

    pub fn lookup(&self, id: ActionId) -> Option<&SupportedAction> {
        self.actions.get(&id)
    }

    pub fn contains(&self, id: ActionId) -> bool {
        self.actions.contains_key(&id)
    }

    /// `false` for actions outside the catalog
    pub fn allowed(&self, id: ActionId, player: &Actor, target: &Actor) -> bool {
        self.lookup(id).is_some_and(|a| a.allowed(player, target))
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ActionId, &SupportedAction)> {
        self.actions.iter()
    }
}

#[derive(Debug, Default)]
pub struct CatalogBuilder {
    actions: AHashMap<ActionId, SupportedAction>,
}

impl CatalogBuilder {
    /// Register an action; re-registering replaces the previous entry
    pub fn register(&mut self, id: ActionId, definition: ActionDefinition) -> &mut SupportedAction {
        self.actions.remove(&id);
        self.actions
            .entry(id)
            .or_insert_with(|| SupportedAction::new(definition, definition.ground_targeted))
    }

    pub fn build(self) -> ActionCatalog {
        ActionCatalog { actions: self.actions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::ActorKind;
    use glam::Vec3;

    fn player_at(x: f32) -> Actor {
        Actor::new(ActorId(1), ActorKind::Player, Vec3::new(x, 0.0, 0.0)).with_radius(0.5)
    }

    fn enemy_at(x: f32) -> Actor {
        Actor::new(ActorId(2), ActorKind::Enemy, Vec3::new(x, 0.0, 0.0)).with_radius(0.5)
    }

    #[test]
    fn test_range_boundary_inclusive() {
        let action = SupportedAction::new(ActionDefinition::gcd(3.0), false);
        // 3 + 0.5 + 0.5
        assert!(action.allowed(&player_at(0.0), &enemy_at(4.0)));
        assert!(!action.allowed(&player_at(0.0), &enemy_at(4.01)));
    }

    #[test]
    fn test_zero_range_ignores_distance() {
        let action = SupportedAction::new(ActionDefinition::gcd(0.0), false);
        assert!(action.allowed(&player_at(0.0), &enemy_at(500.0)));
    }

    #[test]
    fn test_self_target_ignores_range() {
        let action = SupportedAction::new(ActionDefinition::gcd(1.0), false);
        assert!(action.allowed(&player_at(0.0), &player_at(100.0)));
    }

    #[test]
    fn test_condition_applies_after_range() {
        let mut builder = ActionCatalog::builder();
        builder
            .register(ActionId::spell(1), ActionDefinition::gcd(25.0))
            .with_condition(Condition::HpBelow(0.5));
        let catalog = builder.build();

        let healthy = enemy_at(5.0).with_hp(100, 100);
        let wounded = enemy_at(5.0).with_hp(10, 100);
        assert!(!catalog.allowed(ActionId::spell(1), &player_at(0.0), &healthy));
        assert!(catalog.allowed(ActionId::spell(1), &player_at(0.0), &wounded));
    }

    #[test]
    fn test_unknown_action_not_allowed() {
        let catalog = ActionCatalog::default();
        assert!(!catalog.allowed(ActionId::spell(1), &player_at(0.0), &enemy_at(0.0)));
        assert!(catalog.lookup(ActionId::spell(1)).is_none());
    }

    #[test]
    fn test_ground_targeting_follows_definition() {
        let catalog = ActionCatalog::from_definitions([
            (ActionId::spell(1), ActionDefinition::gcd(3.0)),
            (ActionId::spell(2), ActionDefinition::ogcd(30.0, 20, 90.0).ground_targeted()),
        ]);
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.lookup(ActionId::spell(1)).unwrap().is_gt);
        assert!(catalog.lookup(ActionId::spell(2)).unwrap().is_gt);
    }
}
