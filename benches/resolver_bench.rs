//! Resolver throughput with a busy queue and an active automatic policy

use autorotation::actions::{ActionCatalog, ActionDefinition};
use autorotation::core::config::EngineConfig;
use autorotation::core::types::{ActionId, ActorId, GCD_GROUP};
use autorotation::engine::{RotationEngine, TickContext};
use autorotation::policy::{AutoAction, PriorityEntry, PriorityListPolicy, TargetRule};
use autorotation::rules::UnlockGate;
use autorotation::timing::TimingSnapshot;
use autorotation::world::{Actor, ActorKind, WorldState};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;

const PLAYER: ActorId = ActorId(1);
const BOSS: ActorId = ActorId(2);

fn setup() -> (RotationEngine<PriorityListPolicy>, WorldState) {
    let mut builder = ActionCatalog::builder();
    for i in 0..16 {
        builder.register(ActionId::spell(100 + i), ActionDefinition::ogcd(0.0, 100 + i, 60.0));
    }
    builder.register(ActionId::spell(1), ActionDefinition::gcd(3.0));
    let catalog = builder.build();

    let policy = PriorityListPolicy::new()
        .with_fight_gcd(vec![PriorityEntry::new(ActionId::spell(1), TargetRule::Primary)])
        .with_fight_ogcd(
            (0..16)
                .map(|i| PriorityEntry::new(ActionId::spell(100 + i), TargetRule::Player))
                .collect(),
        );

    let mut world = WorldState::new();
    world.upsert_actor(Actor::new(PLAYER, ActorKind::Player, Vec3::ZERO));
    world.upsert_actor(Actor::new(BOSS, ActorKind::Enemy, Vec3::new(2.0, 0.0, 0.0)));
    world.primary_target = Some(BOSS);

    let mut engine = RotationEngine::new(PLAYER, catalog, UnlockGate::default(), EngineConfig::default(), policy);
    engine.update_auto_action(AutoAction::AI_FIGHT, 0.0);
    (engine, world)
}

fn bench_calculate_next_action(c: &mut Criterion) {
    let (mut engine, world) = setup();

    // Every oGCD but the last is on cooldown, so the scan walks the whole list
    let mut timing = TimingSnapshot::at(0.5).with_cooldown(GCD_GROUP, 1.2);
    for i in 0..15 {
        timing.set_cooldown(100 + i, 30.0);
    }
    let ctx = TickContext::new(&world, &timing);
    for i in 0..8 {
        let _ = engine.handle_user_action_request(ActionId::spell(100 + i), None, &ctx);
    }

    c.bench_function("calculate_next_action", |b| {
        b.iter(|| black_box(engine.calculate_next_action(black_box(&ctx))))
    });
}

criterion_group!(benches, bench_calculate_next_action);
criterion_main!(benches);
