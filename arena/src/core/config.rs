// tps_arena_core/arena/src/core/config.rs
use super::constants::*;
use super::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Arena is the square [-half_extent, half_extent] on X and Z.
    pub half_extent: f32,
    pub ground_height: f32,
    pub eye_height: f32,
    pub obstacle_count: usize,
    pub obstacle_scatter_half_extent: f32,
    pub cover_point_offset: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            half_extent: ARENA_HALF_EXTENT,
            ground_height: GROUND_HEIGHT,
            eye_height: EYE_HEIGHT,
            obstacle_count: OBSTACLE_COUNT,
            obstacle_scatter_half_extent: OBSTACLE_SCATTER_HALF_EXTENT,
            cover_point_offset: COVER_POINT_OFFSET,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub radius: f32,
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub crouch_speed: f32,
    pub stand_height: f32,
    pub crouch_height: f32,
    pub jump_impulse: f32,
    pub gravity: f32,
    pub max_health: i32,
    pub spawn: [f32; 3],
    pub hit_half_extents: [f32; 3],
    pub max_pitch: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            radius: PLAYER_RADIUS,
            walk_speed: PLAYER_WALK_SPEED,
            sprint_speed: PLAYER_SPRINT_SPEED,
            crouch_speed: PLAYER_CROUCH_SPEED,
            stand_height: PLAYER_STAND_HEIGHT,
            crouch_height: PLAYER_CROUCH_HEIGHT,
            jump_impulse: PLAYER_JUMP_IMPULSE,
            gravity: GRAVITY,
            max_health: PLAYER_MAX_HEALTH,
            spawn: PLAYER_SPAWN,
            hit_half_extents: PLAYER_HIT_HALF_EXTENTS,
            max_pitch: MAX_PITCH_RAD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub magazine_size: u32,
    pub reserve_max: u32,
    pub initial_reserve: u32,
    pub fire_interval: f32,
    pub reload_duration: f32,
    pub damage: i32,
    pub range: f32,
    pub muzzle_drop: f32,
    pub spread_standing: f32,
    pub spread_crouching: f32,
    pub auto_reload_on_empty: bool,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        WeaponConfig {
            magazine_size: MAGAZINE_SIZE,
            reserve_max: RESERVE_MAX,
            initial_reserve: RESERVE_MAX,
            fire_interval: FIRE_INTERVAL_SECONDS,
            reload_duration: RELOAD_DURATION_SECONDS,
            damage: PLAYER_SHOT_DAMAGE,
            range: PLAYER_SHOT_RANGE,
            muzzle_drop: MUZZLE_DROP,
            spread_standing: SPREAD_STANDING_RAD,
            spread_crouching: SPREAD_CROUCHING_RAD,
            auto_reload_on_empty: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub max_health: i32,
    pub radius: f32,
    pub center_height: f32,
    pub hit_half_extents: [f32; 3],
    pub patrol_speed: f32,
    pub cover_speed: f32,
    pub chase_speed: f32,
    pub vision_range: f32,
    pub attack_range: f32,
    pub fire_range: f32,
    pub alert_duration: f32,
    pub think_min: f32,
    pub think_max: f32,
    pub fire_cooldown_min: f32,
    pub fire_cooldown_max: f32,
    pub aim_error: f32,
    pub damage_min: i32,
    pub damage_max: i32,
    pub respawn_delay: f32,
    pub arrive_radius: f32,
    pub patrol_half_extent: f32,
    pub cover_cost_weight: f32,
    pub los_tolerance: f32,
    pub spawn_half_extent: f32,
    pub min_spawn_separation: f32,
    pub spawn_attempts: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        BotConfig {
            max_health: BOT_MAX_HEALTH,
            radius: BOT_RADIUS,
            center_height: BOT_CENTER_HEIGHT,
            hit_half_extents: BOT_HIT_HALF_EXTENTS,
            patrol_speed: BOT_PATROL_SPEED,
            cover_speed: BOT_COVER_SPEED,
            chase_speed: BOT_CHASE_SPEED,
            vision_range: BOT_VISION_RANGE,
            attack_range: BOT_ATTACK_RANGE,
            fire_range: BOT_FIRE_RANGE,
            alert_duration: BOT_ALERT_DURATION_SECONDS,
            think_min: BOT_THINK_MIN_SECONDS,
            think_max: BOT_THINK_MAX_SECONDS,
            fire_cooldown_min: BOT_FIRE_COOLDOWN_MIN_SECONDS,
            fire_cooldown_max: BOT_FIRE_COOLDOWN_MAX_SECONDS,
            aim_error: BOT_AIM_ERROR_RAD,
            damage_min: BOT_DAMAGE_MIN,
            damage_max: BOT_DAMAGE_MAX,
            respawn_delay: BOT_RESPAWN_SECONDS,
            arrive_radius: BOT_ARRIVE_RADIUS,
            patrol_half_extent: BOT_PATROL_HALF_EXTENT,
            cover_cost_weight: BOT_COVER_COST_WEIGHT,
            los_tolerance: LOS_TOLERANCE,
            spawn_half_extent: BOT_SPAWN_HALF_EXTENT,
            min_spawn_separation: MIN_SPAWN_SEPARATION,
            spawn_attempts: SPAWN_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub tick_rate: u64,
    pub max_step: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            tick_rate: SIM_TICK_RATE,
            max_step: MAX_STEP_SECONDS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub seed: u64,
    pub bot_count: usize,
    pub arena: ArenaConfig,
    pub player: PlayerConfig,
    pub weapon: WeaponConfig,
    pub bot: BotConfig,
    pub timing: TimingConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            seed: 0x5eed,
            bot_count: BOT_COUNT,
            arena: ArenaConfig::default(),
            player: PlayerConfig::default(),
            weapon: WeaponConfig::default(),
            bot: BotConfig::default(),
            timing: TimingConfig::default(),
        }
    }
}

fn require(condition: bool, message: &str) -> SimResult<()> {
    if condition {
        Ok(())
    } else {
        Err(SimError::ConfigError(message.to_string()))
    }
}

fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl SimConfig {
    pub fn from_yaml_str(yaml: &str) -> SimResult<Self> {
        let config: SimConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    /// Rejects configurations that would break the simulation's invariants.
    /// Runs once at construction; nothing is re-checked per tick.
    pub fn validate(&self) -> SimResult<()> {
        let a = &self.arena;
        require(positive(a.half_extent), "arena.half_extent must be > 0")?;
        require(positive(a.eye_height), "arena.eye_height must be > 0")?;
        require(a.ground_height.is_finite(), "arena.ground_height must be finite")?;
        require(
            a.obstacle_scatter_half_extent.is_finite() && a.obstacle_scatter_half_extent >= 0.0,
            "arena.obstacle_scatter_half_extent must be >= 0",
        )?;

        let p = &self.player;
        require(positive(p.radius), "player.radius must be > 0")?;
        require(
            positive(p.walk_speed) && positive(p.sprint_speed) && positive(p.crouch_speed),
            "player speeds must be > 0",
        )?;
        require(positive(p.crouch_height), "player.crouch_height must be > 0")?;
        require(p.crouch_height < p.stand_height, "player.crouch_height must be below stand_height")?;
        require(positive(p.gravity), "player.gravity must be > 0")?;
        require(positive(p.jump_impulse), "player.jump_impulse must be > 0")?;
        require(p.max_health > 0, "player.max_health must be > 0")?;
        require(p.hit_half_extents.iter().all(|e| positive(*e)), "player.hit_half_extents must be > 0")?;
        require(positive(p.max_pitch), "player.max_pitch must be > 0")?;

        let w = &self.weapon;
        require(w.magazine_size > 0, "weapon.magazine_size must be > 0")?;
        require(w.initial_reserve <= w.reserve_max, "weapon.initial_reserve exceeds reserve_max")?;
        require(positive(w.fire_interval), "weapon.fire_interval must be > 0")?;
        require(positive(w.reload_duration), "weapon.reload_duration must be > 0")?;
        require(w.damage > 0, "weapon.damage must be > 0")?;
        require(positive(w.range), "weapon.range must be > 0")?;
        require(w.muzzle_drop.is_finite() && w.muzzle_drop >= 0.0, "weapon.muzzle_drop must be >= 0")?;
        require(
            w.spread_standing >= 0.0 && w.spread_crouching >= 0.0,
            "weapon spread must be >= 0",
        )?;

        let b = &self.bot;
        require(b.max_health > 0, "bot.max_health must be > 0")?;
        require(positive(b.radius), "bot.radius must be > 0")?;
        require(b.hit_half_extents.iter().all(|e| positive(*e)), "bot.hit_half_extents must be > 0")?;
        require(
            positive(b.patrol_speed) && b.patrol_speed <= b.cover_speed && b.cover_speed <= b.chase_speed,
            "bot speeds must satisfy 0 < patrol <= cover <= chase",
        )?;
        require(positive(b.vision_range), "bot.vision_range must be > 0")?;
        require(
            positive(b.attack_range) && b.attack_range <= b.vision_range,
            "bot.attack_range must be in (0, vision_range]",
        )?;
        require(positive(b.fire_range), "bot.fire_range must be > 0")?;
        require(b.alert_duration >= 0.0, "bot.alert_duration must be >= 0")?;
        require(positive(b.think_min) && b.think_min <= b.think_max, "bot think interval must satisfy 0 < min <= max")?;
        require(
            positive(b.fire_cooldown_min) && b.fire_cooldown_min <= b.fire_cooldown_max,
            "bot fire cooldown must satisfy 0 < min <= max",
        )?;
        require(b.aim_error >= 0.0, "bot.aim_error must be >= 0")?;
        require(b.damage_min > 0 && b.damage_min <= b.damage_max, "bot damage must satisfy 0 < min <= max")?;
        require(positive(b.respawn_delay), "bot.respawn_delay must be > 0")?;
        require(positive(b.arrive_radius), "bot.arrive_radius must be > 0")?;
        require(
            positive(b.patrol_half_extent) && b.patrol_half_extent <= a.half_extent,
            "bot.patrol_half_extent must be in (0, arena.half_extent]",
        )?;
        require(
            positive(b.spawn_half_extent) && b.spawn_half_extent <= a.half_extent,
            "bot.spawn_half_extent must be in (0, arena.half_extent]",
        )?;
        require(b.min_spawn_separation >= 0.0, "bot.min_spawn_separation must be >= 0")?;
        require(b.spawn_attempts > 0, "bot.spawn_attempts must be > 0")?;

        let t = &self.timing;
        require(t.tick_rate > 0, "timing.tick_rate must be > 0")?;
        require(positive(t.max_step), "timing.max_step must be > 0")?;

        Ok(())
    }
}
