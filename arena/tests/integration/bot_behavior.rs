// tps_arena_core/arena/tests/integration/bot_behavior.rs

use glam::{Vec2, Vec3};
use tps_arena_core::core::config::SimConfig;
use tps_arena_core::core::types::{BehaviorState, GameEvent, Obstacle, PlayerInput, SimPhase, PLAYER_ENTITY_ID};
use tps_arena_core::sim::CombatSimulation;

const DT: f32 = 1.0 / 60.0;

fn setup_arena(bots: Vec<Vec3>, obstacles: Vec<Obstacle>) -> CombatSimulation {
    let mut sim = CombatSimulation::builder(SimConfig::default())
        .obstacles(obstacles)
        .bot_positions(bots)
        .build()
        .expect("test arena should build");
    let stand = sim.config().player.stand_height;
    let player = sim.player_mut();
    player.position = Vec3::new(0.0, stand, 0.0);
    player.yaw = 0.0;
    sim
}

const WALL_HALF_WIDTH: f32 = 10.0;

// A wall tall and wide enough to block eye-level sight, centred between the player and z = -10.
fn blocking_wall(cover_anchor: bool) -> Obstacle {
    let size = Vec3::new(2.0 * WALL_HALF_WIDTH, 3.0, 0.4);
    Obstacle::grounded(1, Vec2::new(0.0, -5.0), size, 0.0, cover_anchor)
}

fn behavior_of(sim: &CombatSimulation, id: u64) -> BehaviorState {
    sim.bot(id).expect("bot exists").behavior
}

#[test]
fn test_far_unseen_bot_patrols_despite_alert() {
    let mut sim = setup_arena(vec![Vec3::new(0.0, 0.0, -60.0)], Vec::new());
    {
        let bot = sim.bot_mut(1).unwrap();
        bot.behavior = BehaviorState::Attack;
        bot.alert_timer = 10.0;
    }

    let result = sim.tick(DT, &PlayerInput::idle());
    assert_eq!(behavior_of(&sim, 1), BehaviorState::Patrol);
    assert!(result.events.contains(&GameEvent::BehaviorChanged {
        bot: 1,
        from: BehaviorState::Attack,
        to: BehaviorState::Patrol,
    }));
    assert_eq!(result.count(|e| matches!(e, GameEvent::ShotFired { source: 1, .. })), 0);
}

#[test]
fn test_visible_bot_in_range_attacks_and_holds_ground() {
    let mut sim = setup_arena(vec![Vec3::new(0.0, 0.0, -10.0)], Vec::new());
    let start = sim.bot(1).unwrap().position;

    sim.tick(DT, &PlayerInput::idle());
    assert_eq!(behavior_of(&sim, 1), BehaviorState::Attack);

    for _ in 0..30 {
        sim.tick(DT, &PlayerInput::idle());
    }
    let bot = sim.bot(1).unwrap();
    assert_eq!(bot.behavior, BehaviorState::Attack);
    assert!((bot.position - start).length() < 1e-4);
    // Facing +Z, toward the player.
    assert!(bot.yaw.cos() < -0.99, "yaw {}", bot.yaw);
}

#[test]
fn test_visible_bot_beyond_attack_range_chases() {
    let mut sim = setup_arena(vec![Vec3::new(0.0, 0.0, -40.0)], Vec::new());
    let result = sim.tick(DT, &PlayerInput::idle());
    assert_eq!(behavior_of(&sim, 1), BehaviorState::Chase);
    assert_eq!(result.count(|e| matches!(e, GameEvent::ShotFired { source: 1, .. })), 0);

    for _ in 0..60 {
        sim.tick(DT, &PlayerInput::idle());
    }
    let bot = sim.bot(1).unwrap();
    let closed = 40.0 + bot.position.z;
    let chase_speed = sim.config().bot.chase_speed;
    assert!((closed - chase_speed * 61.0 * DT).abs() < 0.05, "closed {}", closed);
    assert!((bot.position.y - sim.config().bot.center_height).abs() < 1e-5);
}

#[test]
fn test_alerted_bot_without_sight_takes_cover() {
    let mut sim = setup_arena(vec![Vec3::new(0.0, 0.0, -10.0)], vec![blocking_wall(true)]);
    sim.bot_mut(1).unwrap().alert_timer = 3.0;

    sim.tick(DT, &PlayerInput::idle());
    let bot = sim.bot(1).unwrap();
    assert_eq!(bot.behavior, BehaviorState::Cover);
    let offset = sim.config().arena.cover_point_offset;
    assert!((bot.target.x.abs() - (WALL_HALF_WIDTH + offset)).abs() < 1e-4, "target {:?}", bot.target);
    assert!((bot.target.z + 5.0).abs() < 1e-4);
}

#[test]
fn test_alerted_bot_without_sight_or_cover_chases() {
    let mut sim = setup_arena(vec![Vec3::new(0.0, 0.0, -10.0)], vec![blocking_wall(false)]);
    sim.bot_mut(1).unwrap().alert_timer = 3.0;

    sim.tick(DT, &PlayerInput::idle());
    assert_eq!(behavior_of(&sim, 1), BehaviorState::Chase);
}

#[test]
fn test_cover_lapses_to_patrol_when_alert_expires() {
    // Cover points sit well behind the wall, so the bot never regains sight on its way there.
    let shelter = Obstacle::grounded(2, Vec2::new(0.0, -30.0), Vec3::new(2.0, 2.0, 2.0), 0.0, true);
    let mut sim = setup_arena(vec![Vec3::new(0.0, 0.0, -10.0)], vec![blocking_wall(false), shelter]);
    let alert = sim.config().bot.alert_duration;
    let think_max = sim.config().bot.think_max;
    sim.bot_mut(1).unwrap().alert_timer = alert;

    let mut elapsed = 0.0;
    let mut ticks = 0;
    while sim.bot(1).unwrap().alert_timer > 0.0 {
        let result = sim.tick(DT, &PlayerInput::idle());
        ticks += 1;
        elapsed += DT;
        let bot = sim.bot(1).unwrap();
        assert!(bot.alive);
        assert_eq!(bot.behavior, BehaviorState::Cover, "left cover after {}s", elapsed);
        assert!(bot.alert_timer <= alert - ticks as f32 * DT + 1e-3, "alert {} at tick {}", bot.alert_timer, ticks);
        assert_eq!(result.count(|e| matches!(e, GameEvent::ShotFired { source: 1, .. })), 0);
        assert!(elapsed < alert + 1.0, "alert never lapsed");
    }
    assert!((elapsed - alert).abs() <= 2.0 * DT, "alert lasted {}s", elapsed);

    let mut lapsed = false;
    while elapsed <= alert + think_max + 2.0 * DT {
        let result = sim.tick(DT, &PlayerInput::idle());
        elapsed += DT;
        if behavior_of(&sim, 1) == BehaviorState::Patrol {
            assert!(result.events.contains(&GameEvent::BehaviorChanged {
                bot: 1,
                from: BehaviorState::Cover,
                to: BehaviorState::Patrol,
            }));
            lapsed = true;
            break;
        }
        assert_eq!(behavior_of(&sim, 1), BehaviorState::Cover);
    }
    assert!(lapsed, "bot still in cover {}s after alert expired", elapsed - alert);
}

#[test]
fn test_non_lethal_hit_refreshes_alert() {
    // Beyond vision range, so only the hit itself can raise the alert.
    let mut sim = setup_arena(vec![Vec3::new(0.0, 0.0, -60.0)], Vec::new());
    let alert = sim.config().bot.alert_duration;
    let damage = sim.config().weapon.damage;
    let max_health = sim.config().bot.max_health;
    sim.bot_mut(1).unwrap().alert_timer = 0.5;

    let aimed = PlayerInput { fire: true, crouch: true, ..PlayerInput::idle() };
    let result = sim.tick(DT, &aimed);
    assert!(result.events.contains(&GameEvent::DamageTaken { target: 1, source: PLAYER_ENTITY_ID, amount: damage }));

    let bot = sim.bot(1).unwrap();
    assert!(bot.alive);
    assert_eq!(bot.health, max_health - damage);
    assert!((bot.alert_timer - (alert - DT)).abs() < 1e-4, "alert {}", bot.alert_timer);
    let seen = bot.last_seen_player.expect("hit should record the shooter");
    assert!((seen - sim.player().position).length() < 1e-4);
    assert_eq!(bot.behavior, BehaviorState::Patrol);
}

#[test]
fn test_unalerted_bot_behind_wall_keeps_patrolling() {
    let mut sim = setup_arena(vec![Vec3::new(0.0, 0.0, -10.0)], vec![blocking_wall(true)]);
    for _ in 0..60 {
        sim.tick(DT, &PlayerInput::idle());
        assert_eq!(behavior_of(&sim, 1), BehaviorState::Patrol);
    }
}

#[test]
fn test_dead_bot_respawns_after_delay() {
    let mut sim = setup_arena(vec![Vec3::new(0.0, 0.0, -5.0)], Vec::new());
    let damage = sim.config().weapon.damage;
    let delay = sim.config().bot.respawn_delay;
    sim.bot_mut(1).unwrap().health = damage;

    let first = sim.tick(DT, &PlayerInput { fire: true, ..PlayerInput::idle() });
    assert!(first.events.contains(&GameEvent::Kill { source: PLAYER_ENTITY_ID, target: 1 }));

    let mut elapsed = DT;
    let mut respawned_at = None;
    while elapsed < delay + 1.0 {
        let result = sim.tick(DT, &PlayerInput::idle());
        elapsed += DT;
        if let Some(GameEvent::BotRespawned { bot, position }) =
            result.events.iter().find(|e| matches!(e, GameEvent::BotRespawned { .. }))
        {
            assert_eq!(*bot, 1);
            respawned_at = Some(*position);
            break;
        }
        assert!(!sim.bot(1).unwrap().alive);
    }

    let position = respawned_at.expect("bot never respawned");
    assert!((elapsed - delay).abs() <= 2.0 * DT, "respawned after {}s", elapsed);

    let bot = sim.bot(1).unwrap();
    assert!(bot.alive);
    assert_eq!(bot.health, sim.config().bot.max_health);
    assert_eq!(bot.position, position);
    assert!((position.y - sim.config().bot.center_height).abs() < 1e-5);
    let separation = Vec2::new(position.x, position.z).length();
    assert!(separation >= sim.config().bot.min_spawn_separation, "spawned {} from player", separation);
}

#[test]
fn test_player_death_freezes_simulation() {
    let mut sim = setup_arena(vec![Vec3::new(0.0, 0.0, -6.0)], Vec::new());
    sim.player_mut().health = 1;

    let result = sim.tick(DT, &PlayerInput::idle());
    assert!(result.events.contains(&GameEvent::PlayerDied { killer: 1 }));
    assert!(result.events.contains(&GameEvent::Kill { source: 1, target: PLAYER_ENTITY_ID }));
    assert_eq!(sim.phase(), SimPhase::PlayerDead);
    assert!(!sim.player().alive);
    assert_eq!(sim.player().health, 0);

    let frozen = sim.snapshot();
    let busy = PlayerInput { move_intent: Vec2::Y, fire: true, reload: true, jump: true, ..PlayerInput::idle() };
    for _ in 0..30 {
        let result = sim.tick(DT, &busy);
        assert!(result.events.is_empty());
        assert_eq!(result.snapshot, frozen);
    }
}
