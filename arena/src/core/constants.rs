// tps_arena_core/arena/src/core/constants.rs
// Default tuning values. `SimConfig::default()` is built from these; a YAML
// config can override any of them.

// Simulation step
pub const SIM_TICK_RATE: u64 = 60;
pub const MAX_STEP_SECONDS: f32 = 1.0 / 30.0; // dt is clamped to this before integration

// Arena
pub const ARENA_HALF_EXTENT: f32 = 95.0;
pub const GROUND_HEIGHT: f32 = 0.0;
pub const EYE_HEIGHT: f32 = 1.6; // head-height used for line-of-sight rays
pub const OBSTACLE_COUNT: usize = 24;
pub const OBSTACLE_SCATTER_HALF_EXTENT: f32 = 80.0;
pub const COVER_POINT_OFFSET: f32 = 1.2;

// Player movement
pub const PLAYER_RADIUS: f32 = 0.7;
pub const PLAYER_WALK_SPEED: f32 = 6.8;
pub const PLAYER_SPRINT_SPEED: f32 = 10.0;
pub const PLAYER_CROUCH_SPEED: f32 = 4.4;
pub const PLAYER_STAND_HEIGHT: f32 = 1.4;
pub const PLAYER_CROUCH_HEIGHT: f32 = 1.0;
pub const PLAYER_JUMP_IMPULSE: f32 = 8.2;
pub const GRAVITY: f32 = 20.0;
pub const PLAYER_MAX_HEALTH: i32 = 100;
pub const PLAYER_SPAWN: [f32; 3] = [0.0, PLAYER_STAND_HEIGHT, 16.0];
pub const PLAYER_HIT_HALF_EXTENTS: [f32; 3] = [0.45, 0.9, 0.45];
pub const MAX_PITCH_RAD: f32 = 1.2;

// Weapon
pub const MAGAZINE_SIZE: u32 = 30;
pub const RESERVE_MAX: u32 = 120;
pub const FIRE_INTERVAL_SECONDS: f32 = 0.11;
pub const RELOAD_DURATION_SECONDS: f32 = 1.2;
pub const PLAYER_SHOT_DAMAGE: i32 = 34;
pub const PLAYER_SHOT_RANGE: f32 = 120.0;
pub const MUZZLE_DROP: f32 = 0.1; // muzzle sits this far below the eye
pub const SPREAD_STANDING_RAD: f32 = 0.012;
pub const SPREAD_CROUCHING_RAD: f32 = 0.005;

// Bots
pub const BOT_COUNT: usize = 6;
pub const BOT_MAX_HEALTH: i32 = 100;
pub const BOT_RADIUS: f32 = 0.5;
pub const BOT_CENTER_HEIGHT: f32 = 0.9;
pub const BOT_HIT_HALF_EXTENTS: [f32; 3] = [0.45, 0.9, 0.45];
pub const BOT_PATROL_SPEED: f32 = 3.1;
pub const BOT_COVER_SPEED: f32 = 4.2;
pub const BOT_CHASE_SPEED: f32 = 5.3;
pub const BOT_VISION_RANGE: f32 = 45.0;
pub const BOT_ATTACK_RANGE: f32 = 28.0;
pub const BOT_FIRE_RANGE: f32 = 35.0;
pub const BOT_ALERT_DURATION_SECONDS: f32 = 4.0;
pub const BOT_THINK_MIN_SECONDS: f32 = 0.25;
pub const BOT_THINK_MAX_SECONDS: f32 = 0.55;
pub const BOT_FIRE_COOLDOWN_MIN_SECONDS: f32 = 0.45;
pub const BOT_FIRE_COOLDOWN_MAX_SECONDS: f32 = 0.95;
pub const BOT_AIM_ERROR_RAD: f32 = 0.05;
pub const BOT_DAMAGE_MIN: i32 = 8;
pub const BOT_DAMAGE_MAX: i32 = 16;
pub const BOT_RESPAWN_SECONDS: f32 = 4.0;
pub const BOT_ARRIVE_RADIUS: f32 = 1.4;
pub const BOT_PATROL_HALF_EXTENT: f32 = 35.0;
pub const BOT_COVER_COST_WEIGHT: f32 = 0.6;
pub const LOS_TOLERANCE: f32 = 0.6;

// Spawning
pub const BOT_SPAWN_HALF_EXTENT: f32 = 45.0;
pub const MIN_SPAWN_SEPARATION: f32 = 12.0;
pub const SPAWN_ATTEMPTS: usize = 24;

// Performance
pub const SLOW_TICK_LOG_MS: u64 = 4; // warn if a single tick exceeds this
