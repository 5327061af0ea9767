// tps_arena_core/arena/tests/integration/lifecycle.rs

use glam::Vec3;
use tps_arena_core::core::config::SimConfig;
use tps_arena_core::core::error::SimError;
use tps_arena_core::core::types::{GameEvent, PlayerInput, SimPhase};
use tps_arena_core::sim::input::{InputSource, ReplayInput, ScriptedPilot};
use tps_arena_core::sim::{CombatSimulation, SimSnapshot};

const DT: f32 = 1.0 / 60.0;

fn drive(sim: &mut CombatSimulation, pilot: &mut impl InputSource, ticks: usize) -> Vec<Vec<GameEvent>> {
    let mut snapshot = sim.snapshot();
    let mut history = Vec::with_capacity(ticks);
    for _ in 0..ticks {
        let input = pilot.next_input(&snapshot);
        let result = sim.tick(DT, &input);
        snapshot = result.snapshot;
        history.push(result.events);
    }
    history
}

fn assert_timers_idle(sim: &CombatSimulation) {
    let player = sim.player();
    assert_eq!(player.fire_cooldown, 0.0);
    assert_eq!(player.reload_timer, 0.0);
    for bot in sim.bots() {
        assert_eq!(bot.fire_cooldown, 0.0);
        assert_eq!(bot.think_timer, 0.0);
        assert_eq!(bot.alert_timer, 0.0);
        assert_eq!(bot.respawn_timer, 0.0);
    }
}

#[test]
fn test_restart_is_idempotent_and_matches_fresh_start() {
    let config = SimConfig::default();
    let fresh = CombatSimulation::new(config.clone()).unwrap().snapshot();

    let mut sim = CombatSimulation::new(config).unwrap();
    drive(&mut sim, &mut ScriptedPilot::new(), 300);
    assert_ne!(sim.snapshot(), fresh);

    sim.restart();
    let once = sim.snapshot();
    assert_timers_idle(&sim);
    sim.restart();
    let twice = sim.snapshot();

    assert_eq!(once, twice);
    assert_eq!(once, fresh);
    assert_eq!(once.tick, 0);
    assert_eq!(once.phase, SimPhase::Running);
    assert_eq!(once.player.ammo, sim.config().weapon.magazine_size);
    assert_eq!(once.player.reserve, sim.config().weapon.initial_reserve);
    assert_eq!(once.player.kills, 0);
    assert!(once.bots.iter().all(|b| b.alive && b.health == sim.config().bot.max_health));
}

#[test]
fn test_restart_after_death_resumes_play() {
    let mut sim = CombatSimulation::builder(SimConfig::default())
        .obstacles(Vec::new())
        .bot_positions(vec![Vec3::new(0.0, 0.0, 10.0)])
        .build()
        .unwrap();
    sim.player_mut().health = 1;

    // Default spawn is z = 16, six units from the bot.
    let result = sim.tick(DT, &PlayerInput::idle());
    assert_eq!(result.snapshot.phase, SimPhase::PlayerDead);
    assert_eq!(sim.tick(DT, &PlayerInput::idle()).snapshot.tick, result.snapshot.tick);

    sim.restart();
    assert_eq!(sim.tick_count(), 0);
    assert_eq!(sim.phase(), SimPhase::Running);
    assert!(sim.player().alive);
    assert_eq!(sim.player().health, sim.config().player.max_health);
    assert_eq!(sim.bot(1).unwrap().position.z, 10.0);

    let next = sim.tick(DT, &PlayerInput::idle());
    assert_eq!(next.snapshot.tick, 1);
}

#[test]
fn test_same_seed_same_run() {
    let mut config = SimConfig::default();
    config.seed = 0xdead_beef;
    let mut a = CombatSimulation::new(config.clone()).unwrap();
    let mut b = CombatSimulation::new(config).unwrap();

    let events_a = drive(&mut a, &mut ScriptedPilot::new(), 600);
    let events_b = drive(&mut b, &mut ScriptedPilot::new(), 600);

    assert_eq!(events_a, events_b);
    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.world().obstacles(), b.world().obstacles());
}

#[test]
fn test_different_seeds_change_the_arena() {
    let a = CombatSimulation::builder(SimConfig::default()).seed(1).build().unwrap();
    let b = CombatSimulation::builder(SimConfig::default()).seed(2).build().unwrap();
    assert_eq!(a.config().seed, 1);
    assert_ne!(a.world().obstacles(), b.world().obstacles());
}

#[test]
fn test_replayed_frames_drive_the_player() {
    let mut sim = CombatSimulation::builder(SimConfig::default())
        .obstacles(Vec::new())
        .bot_positions(Vec::new())
        .build()
        .unwrap();
    let start = sim.player().position;
    let walk = PlayerInput { move_intent: glam::Vec2::Y, ..PlayerInput::idle() };
    let mut replay = ReplayInput::new(vec![walk; 30]);

    drive(&mut sim, &mut replay, 45);
    assert_eq!(replay.remaining(), 0);
    let travelled = start.z - sim.player().position.z;
    assert!((travelled - sim.config().player.walk_speed * 30.0 * DT).abs() < 1e-3);
}

#[test]
fn test_bundled_config_file_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/arena.yaml");
    let config = SimConfig::load_from_file(path).expect("bundled config should load");
    assert_eq!(config.seed, 24601);

    let sim = CombatSimulation::new(config).unwrap();
    assert_eq!(sim.bots().len(), sim.config().bot_count);
}

#[test]
fn test_missing_config_file_is_io_error() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/does_not_exist.yaml");
    assert!(matches!(SimConfig::load_from_file(path), Err(SimError::IoError(_))));
}

#[test]
fn test_snapshot_serializes_to_json() {
    let mut sim = CombatSimulation::new(SimConfig::default()).unwrap();
    let result = sim.tick(DT, &PlayerInput { fire: true, ..PlayerInput::idle() });

    let json = serde_json::to_value(&result).expect("tick result should serialize");
    assert_eq!(json["snapshot"]["tick"], 1);
    assert_eq!(json["snapshot"]["phase"], "Running");
    assert_eq!(json["snapshot"]["bots"].as_array().map(|b| b.len()), Some(sim.config().bot_count));
    assert!(json["events"].is_array());

    let snapshot: &SimSnapshot = &result.snapshot;
    let text = serde_json::to_string(snapshot).unwrap();
    assert!(text.contains("\"ammo\""));
}
