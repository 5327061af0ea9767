// tps_arena_core/arena/src/systems/perception.rs
use crate::core::config::BotConfig;
use crate::entities::{BotState, PlayerState};
use crate::world::ArenaWorld;
use glam::Vec3;
use tracing::trace;

/// What a bot knows about the player this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perception {
    /// Ground-plane distance bot to player.
    pub distance: f32,
    pub has_line_of_sight: bool,
    pub can_engage: bool,
}

impl Perception {
    pub fn unaware() -> Self {
        Perception { distance: f32::INFINITY, has_line_of_sight: false, can_engage: false }
    }
}

pub fn eye_point(position: Vec3, world: &ArenaWorld) -> Vec3 {
    Vec3::new(position.x, world.ground_height + world.eye_height, position.z)
}

pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// Blocked only if an obstacle is hit strictly nearer than `to`, less `tolerance`.
pub fn has_line_of_sight(from: Vec3, to: Vec3, world: &ArenaWorld, tolerance: f32) -> bool {
    let delta = to - from;
    let distance = delta.length();
    if distance <= f32::EPSILON {
        return true;
    }
    let direction = delta / distance;
    match world.raycast_obstacles(from, direction, distance) {
        Some(hit) => hit.distance >= distance - tolerance,
        None => true,
    }
}

/// Awareness gate: the player must be within vision range and either visible
/// or still remembered through the alert timer.
pub fn can_engage(bot: &BotState, player: &PlayerState, world: &ArenaWorld, config: &BotConfig) -> bool {
    perceive(bot, player, world, config).can_engage
}

pub fn perceive(bot: &BotState, player: &PlayerState, world: &ArenaWorld, config: &BotConfig) -> Perception {
    if !bot.alive || !player.alive {
        return Perception::unaware();
    }

    let distance = horizontal_distance(bot.position, player.position);
    let in_range = distance <= config.vision_range;
    let has_line_of_sight = in_range
        && has_line_of_sight(
            eye_point(bot.position, world),
            eye_point(player.position, world),
            world,
            config.los_tolerance,
        );

    Perception {
        distance,
        has_line_of_sight,
        // Alert memory does not reach past vision range: a bot hit from
        // beyond it stays on patrol until the player comes closer.
        can_engage: in_range && (has_line_of_sight || bot.is_aware()),
    }
}

/// Refreshes alert and last-seen position when the player is in plain sight.
pub fn update_awareness(bot: &mut BotState, player: &PlayerState, perception: &Perception, config: &BotConfig) {
    if perception.has_line_of_sight {
        if !bot.is_aware() {
            trace!("[Bot {}]: Spotted player at distance {:.1}", bot.id, perception.distance);
        }
        bot.alert_timer = config.alert_duration;
        bot.last_seen_player = Some(player.position);
    }
}

/// Being shot at, or landing a hit, keeps a bot alert.
pub fn raise_alert(bot: &mut BotState, player_position: Vec3, config: &BotConfig) {
    bot.alert_timer = config.alert_duration;
    bot.last_seen_player = Some(player_position);
}
