//! Headless Rotation Runner
//!
//! Drives one engine against a simulated cooldown clock and prints every
//! dispatched decision. Useful for checking a config or a priority list
//! without a host.

use std::path::PathBuf;

use autorotation::actions::{ActionCatalog, ActionDefinition};
use autorotation::core::config::{load_config, EngineConfig};
use autorotation::core::error::Result;
use autorotation::core::types::{ActionId, ActorId};
use autorotation::engine::{ActionEffect, ActionSource, RequestOutcome, RotationEngine, TickContext};
use autorotation::policy::{AutoAction, PriorityEntry, PriorityListPolicy, TargetRule};
use autorotation::rules::{load_unlock_table, UnlockGate};
use autorotation::timing::{CooldownTracker, TimingOracle};
use autorotation::world::{Actor, ActorKind, Role, WorldState};
use clap::Parser;
use glam::Vec3;
use serde::Serialize;

const PLAYER: ActorId = ActorId(0x1000_0001);
const COMPANION: ActorId = ActorId(0x1000_0002);
const BOSS: ActorId = ActorId(0x4000_0001);

const AUTO_FIGHT: ActionId = ActionId::general(1);
const SPRINT: ActionId = ActionId::general(4);
const HEAVY_SWING: ActionId = ActionId::spell(31);
const TOMAHAWK: ActionId = ActionId::spell(46);
const RAMPART: ActionId = ActionId::spell(7531);
const INFURIATE: ActionId = ActionId::spell(52);

/// Headless Rotation Runner - scripted engine run for inspection
#[derive(Parser, Debug)]
#[command(name = "autorotation")]
#[command(about = "Run a scripted rotation against a simulated cooldown clock")]
struct Args {
    /// Engine config (TOML); defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Priority list policy (TOML); a built-in melee list is used when omitted
    #[arg(long)]
    policy: Option<PathBuf>,

    /// Unlock table (TOML `[[unlock]]` entries)
    #[arg(long)]
    unlock: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 300)]
    ticks: u64,

    /// Seconds per tick
    #[arg(long, default_value_t = 0.1)]
    tick_rate: f32,

    /// Keep the automatic mode armed for this many ticks, then let it lapse
    #[arg(long, default_value_t = 200)]
    auto_ticks: u64,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Enable per-decision debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// One dispatched decision
#[derive(Serialize)]
struct Decision {
    tick: u64,
    time: f64,
    action: String,
    source: ActionSource,
    target: Option<String>,
}

/// JSON output structure
#[derive(Serialize)]
struct RunReport {
    ticks: u64,
    decisions: Vec<Decision>,
    manual: usize,
    emergency: usize,
    automatic: usize,
    final_mode: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        "autorotation=debug"
    } else {
        "autorotation=info"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    config.logging |= args.verbose;

    let policy = match &args.policy {
        Some(path) => PriorityListPolicy::from_toml(&std::fs::read_to_string(path)?)?,
        None => default_policy(),
    };

    let unlock = match &args.unlock {
        Some(path) => UnlockGate::new(load_unlock_table(path)?),
        None => UnlockGate::default(),
    };

    tracing::info!(ticks = args.ticks, tick_rate = args.tick_rate, "Starting headless run");

    let world = build_world();
    let mut engine = RotationEngine::new(PLAYER, build_catalog(), unlock, config, policy);
    let mut tracker = CooldownTracker::new(0.1);
    let mut decisions = Vec::new();
    let mut sequence = 0u32;

    for tick in 0..args.ticks {
        tracker.advance(args.tick_rate);
        let now = tracker.current_time();
        engine.update_main_tick(now);

        let ctx = TickContext::new(&world, &tracker);
        script_requests(&mut engine, &ctx, tick, args.auto_ticks)?;

        if let Some(next) = engine.calculate_next_action(&ctx) {
            if tracker.start(next.action, &next.definition) {
                engine.notify_action_executed(next.action, next.target);
                sequence += 1;
                engine.notify_action_succeeded(&ActionEffect {
                    action: next.action,
                    caster: PLAYER,
                    main_target: next.target,
                    targets: next.target.into_iter().collect(),
                    global_sequence: sequence,
                });
                decisions.push(Decision {
                    tick,
                    time: now,
                    action: next.action.to_string(),
                    source: next.source,
                    target: next.target.map(|t| t.to_string()),
                });
            }
        }

        let ctx = TickContext::new(&world, &tracker);
        engine.update_am_tick(&ctx);
    }

    let count = |source: ActionSource| decisions.iter().filter(|d| d.source == source).count();
    let report = RunReport {
        ticks: args.ticks,
        manual: count(ActionSource::Manual),
        emergency: count(ActionSource::Emergency),
        automatic: count(ActionSource::Automatic),
        final_mode: engine.auto_action().to_string(),
        decisions,
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }
    Ok(())
}

/// Scripted host input: a renewed fight mode, one defensive and one sprint
fn script_requests(
    engine: &mut RotationEngine<PriorityListPolicy>,
    ctx: &TickContext<'_>,
    tick: u64,
    auto_ticks: u64,
) -> Result<()> {
    if tick < auto_ticks {
        engine.handle_user_action_request(AUTO_FIGHT, Some(BOSS), ctx)?;
    }
    if tick == 40 {
        match engine.handle_user_action_request(RAMPART, None, ctx)? {
            RequestOutcome::Queued(action, tier) => tracing::info!(%action, ?tier, "Queued defensive"),
            RequestOutcome::AutoActivated(mode) => tracing::info!(%mode, "Unexpected mode change"),
        }
    }
    if tick == 120 {
        engine.request_emergency(SPRINT, Some(PLAYER), Vec3::ZERO, ctx.timing.current_time())?;
    }
    Ok(())
}

fn build_catalog() -> ActionCatalog {
    let mut builder = ActionCatalog::builder();
    builder
        .register(AUTO_FIGHT, ActionDefinition::ogcd(0.0, 0, 0.0))
        .with_placeholder(AutoAction::AI_FIGHT);
    builder.register(SPRINT, ActionDefinition::ogcd(0.0, 55, 60.0));
    builder.register(HEAVY_SWING, ActionDefinition::gcd(3.0));
    builder.register(TOMAHAWK, ActionDefinition::gcd(20.0));
    builder.register(RAMPART, ActionDefinition::ogcd(0.0, 14, 90.0));
    builder.register(INFURIATE, ActionDefinition::ogcd(0.0, 19, 60.0).with_charges(2));
    builder.build()
}

fn default_policy() -> PriorityListPolicy {
    PriorityListPolicy::new()
        .with_fight_gcd(vec![
            PriorityEntry::new(HEAVY_SWING, TargetRule::Primary),
            PriorityEntry::new(TOMAHAWK, TargetRule::Primary),
        ])
        .with_fight_ogcd(vec![PriorityEntry::new(INFURIATE, TargetRule::Player).at_level(50)])
}

fn build_world() -> WorldState {
    let mut world = WorldState::new();
    let mut player = Actor::new(PLAYER, ActorKind::Player, Vec3::ZERO).with_role(Role::Tank);
    player.level = 90;
    player.in_combat = true;
    world.upsert_actor(player);
    world.upsert_actor(Actor::new(COMPANION, ActorKind::Companion, Vec3::new(-2.0, 0.0, 0.0)).with_role(Role::Tank));
    world.upsert_actor(Actor::new(BOSS, ActorKind::Enemy, Vec3::new(3.0, 0.0, 0.0)).with_radius(2.0));
    world.party = vec![PLAYER, COMPANION];
    world.primary_target = Some(BOSS);
    world
}

fn print_text(report: &RunReport) {
    println!("\n=== ROTATION RUN ===");
    for d in &report.decisions {
        println!(
            "[{:>5.1}s] {:<12} {:<10} -> {}",
            d.time,
            d.action,
            format!("{:?}", d.source),
            d.target.as_deref().unwrap_or("-")
        );
    }
    println!();
    println!("Ticks:      {}", report.ticks);
    println!("Automatic:  {}", report.automatic);
    println!("Manual:     {}", report.manual);
    println!("Emergency:  {}", report.emergency);
    println!("Final mode: {}", report.final_mode);
}
