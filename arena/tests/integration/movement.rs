// tps_arena_core/arena/tests/integration/movement.rs

use glam::{Vec2, Vec3};
use tps_arena_core::core::config::SimConfig;
use tps_arena_core::core::types::{Obstacle, PlayerInput};
use tps_arena_core::entities::PlayerState;
use tps_arena_core::sim::CombatSimulation;
use tps_arena_core::systems::physics::movement::{integrate, MovementIntent};
use tps_arena_core::world::ArenaWorld;

// Empty arena, no bots, player standing at the origin facing -Z.
fn setup_open_arena(obstacles: Vec<Obstacle>) -> CombatSimulation {
    let mut sim = CombatSimulation::builder(SimConfig::default())
        .obstacles(obstacles)
        .bot_positions(Vec::new())
        .build()
        .expect("open arena should build");
    let stand = sim.config().player.stand_height;
    let player = sim.player_mut();
    player.position = Vec3::new(0.0, stand, 0.0);
    player.yaw = 0.0;
    sim
}

fn forward() -> PlayerInput {
    PlayerInput { move_intent: Vec2::Y, ..PlayerInput::idle() }
}

fn run(sim: &mut CombatSimulation, input: &PlayerInput, dt: f32, ticks: usize) {
    for _ in 0..ticks {
        sim.tick(dt, input);
    }
}

#[test]
fn test_displacement_independent_of_frame_rate() {
    let mut fine = setup_open_arena(Vec::new());
    let mut coarse = setup_open_arena(Vec::new());

    run(&mut fine, &forward(), 1.0 / 60.0, 60);
    run(&mut coarse, &forward(), 1.0 / 30.0, 30);

    let walk = fine.config().player.walk_speed;
    let a = fine.player().position;
    let b = coarse.player().position;
    assert!((a.z + walk).abs() < 1e-3, "fine run ended at {:?}", a);
    assert!((a - b).length() < 1e-3, "fine {:?} vs coarse {:?}", a, b);
}

#[test]
fn test_one_coarse_step_matches_ten_fine_steps() {
    let config = SimConfig::default();
    let world = ArenaWorld::new(&config.arena, Vec::new()).unwrap();
    let mut coarse = PlayerState::new(&config.player, &config.weapon);
    let mut fine = coarse.clone();
    let intent = MovementIntent { direction: Vec2::new(0.6, 0.8), ..Default::default() };

    integrate(&mut coarse, &intent, 0.1, &config.player, &world);
    for _ in 0..10 {
        integrate(&mut fine, &intent, 0.01, &config.player, &world);
    }

    assert!((coarse.position - fine.position).length() < 1e-4, "{:?} vs {:?}", coarse.position, fine.position);
    assert_eq!(coarse.grounded, fine.grounded);
}

#[test]
fn test_sprint_and_crouch_speeds() {
    let mut sim = setup_open_arena(Vec::new());
    let params = sim.config().player.clone();

    let sprint = PlayerInput { sprint: true, ..forward() };
    let snap = sim.tick(1.0 / 60.0, &sprint).snapshot;
    assert!(snap.player.sprinting);
    assert!((snap.player.velocity.z + params.sprint_speed).abs() < 1e-4);

    let both = PlayerInput { sprint: true, crouch: true, ..forward() };
    let snap = sim.tick(1.0 / 60.0, &both).snapshot;
    assert!(snap.player.crouching && !snap.player.sprinting);
    assert!((snap.player.velocity.z + params.crouch_speed).abs() < 1e-4);
}

#[test]
fn test_diagonal_intent_is_not_faster() {
    let mut sim = setup_open_arena(Vec::new());
    let diagonal = PlayerInput { move_intent: Vec2::new(1.0, 1.0), ..PlayerInput::idle() };
    let snap = sim.tick(1.0 / 60.0, &diagonal).snapshot;
    let horizontal = Vec2::new(snap.player.velocity.x, snap.player.velocity.z).length();
    assert!((horizontal - sim.config().player.walk_speed).abs() < 1e-4);
}

#[test]
fn test_player_clamped_to_arena_edge() {
    let mut sim = setup_open_arena(Vec::new());
    let half_extent = sim.config().arena.half_extent;
    sim.player_mut().position.x = half_extent - 1.0;

    // yaw 0: strafing right moves along +X.
    let strafe = PlayerInput { move_intent: Vec2::X, sprint: true, ..PlayerInput::idle() };
    run(&mut sim, &strafe, 1.0 / 60.0, 120);
    assert!((sim.player().position.x - half_extent).abs() < 1e-4);

    sim.player_mut().position = Vec3::new(0.0, sim.config().player.stand_height, -half_extent + 0.5);
    run(&mut sim, &forward(), 1.0 / 60.0, 60);
    assert!(sim.player().position.z >= -half_extent);
}

#[test]
fn test_walking_into_crate_stops_at_face() {
    let crate_box = Obstacle::grounded(1, Vec2::new(0.0, -3.0), Vec3::new(4.0, 2.0, 2.0), 0.0, false);
    let mut sim = setup_open_arena(vec![crate_box]);
    let radius = sim.config().player.radius;

    run(&mut sim, &forward(), 1.0 / 60.0, 90);

    let face = -2.0 + radius;
    let z = sim.player().position.z;
    assert!(z >= face - 1e-3, "player sank into crate at z {}", z);
    assert!(z <= face + 0.2, "player stopped short at z {}", z);
    assert!(sim.player().position.x.abs() < 1e-3);
}

#[test]
fn test_jump_rises_and_lands() {
    let mut sim = setup_open_arena(Vec::new());
    let stand = sim.config().player.stand_height;

    let jump = PlayerInput { jump: true, ..PlayerInput::idle() };
    let snap = sim.tick(1.0 / 60.0, &jump).snapshot;
    assert!(!snap.player.grounded);

    let mut apex = snap.player.position.y;
    for _ in 0..120 {
        // Holding jump mid-air must not add a second impulse.
        let snap = sim.tick(1.0 / 60.0, &jump).snapshot;
        apex = apex.max(snap.player.position.y);
        if snap.player.grounded {
            break;
        }
    }
    let params = &sim.config().player;
    let ideal_rise = params.jump_impulse * params.jump_impulse / (2.0 * params.gravity);
    assert!(apex > stand + 0.8 * ideal_rise, "apex {}", apex);
    assert!(apex < stand + 1.1 * ideal_rise, "apex {}", apex);
    assert!(sim.player().grounded);
    assert!((sim.player().position.y - stand).abs() < 1e-5);
}

#[test]
fn test_crouch_lowers_then_stand_restores_height() {
    let mut sim = setup_open_arena(Vec::new());
    let params = sim.config().player.clone();

    let crouch = PlayerInput { crouch: true, ..PlayerInput::idle() };
    run(&mut sim, &crouch, 1.0 / 60.0, 45);
    assert!(sim.player().crouching);
    assert!(sim.player().grounded);
    assert!((sim.player().position.y - params.crouch_height).abs() < 1e-5);

    // Jump is refused while crouched.
    let crouch_jump = PlayerInput { crouch: true, jump: true, ..PlayerInput::idle() };
    let snap = sim.tick(1.0 / 60.0, &crouch_jump).snapshot;
    assert!(snap.player.grounded);

    let snap = sim.tick(1.0 / 60.0, &PlayerInput::idle()).snapshot;
    assert!(!snap.player.crouching);
    assert!((snap.player.position.y - params.stand_height).abs() < 1e-5);
}

#[test]
fn test_look_clamps_pitch() {
    let mut sim = setup_open_arena(Vec::new());
    let max_pitch = sim.config().player.max_pitch;

    let look_up = PlayerInput { look_delta: Vec2::new(0.0, 0.5), ..PlayerInput::idle() };
    run(&mut sim, &look_up, 1.0 / 60.0, 10);
    assert!((sim.player().pitch - max_pitch).abs() < 1e-6);

    let look_down = PlayerInput { look_delta: Vec2::new(0.0, -0.5), ..PlayerInput::idle() };
    run(&mut sim, &look_down, 1.0 / 60.0, 10);
    assert!((sim.player().pitch + max_pitch).abs() < 1e-6);
}
