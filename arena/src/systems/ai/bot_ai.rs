// tps_arena_core/arena/src/systems/ai/bot_ai.rs
use crate::core::config::BotConfig;
use crate::core::types::{BehaviorState, GameEvent};
use crate::entities::{BotState, PlayerState};
use crate::systems::perception::Perception;
use crate::systems::physics::movement::steer_towards;
use crate::world::ArenaWorld;
use glam::Vec3;
use rand::Rng;
use tracing::{debug, trace};

const TARGET_RESAMPLE_ATTEMPTS: usize = 8;

pub struct BotAISystem;

impl BotAISystem {
    /// Pure transition function, re-derived from scratch every think cycle.
    pub fn decide_behavior(perception: &Perception, config: &BotConfig, cover_available: bool) -> BehaviorState {
        if !perception.can_engage {
            return BehaviorState::Patrol;
        }
        if perception.has_line_of_sight {
            if perception.distance <= config.attack_range {
                BehaviorState::Attack
            } else {
                BehaviorState::Chase
            }
        } else if cover_available {
            // Aware through the alert timer but sight is blocked.
            BehaviorState::Cover
        } else {
            BehaviorState::Chase
        }
    }

    /// Runs one think cycle if the bot's think timer has expired.
    pub fn think(
        bot: &mut BotState,
        player: &PlayerState,
        perception: &Perception,
        world: &ArenaWorld,
        config: &BotConfig,
        rng: &mut impl Rng,
    ) -> Option<GameEvent> {
        if !bot.alive || bot.think_timer > 0.0 {
            return None;
        }
        bot.think_timer = rng.gen_range(config.think_min..=config.think_max);

        let previous = bot.behavior;
        let next = Self::decide_behavior(perception, config, !world.cover_points().is_empty());
        bot.behavior = next;

        match next {
            BehaviorState::Patrol => {
                if previous != BehaviorState::Patrol {
                    bot.target = Self::pick_patrol_target(world, config, rng);
                }
            }
            BehaviorState::Cover => {
                if let Some(point) = Self::pick_cover_point(bot.position, player.position, world, config) {
                    bot.target = point;
                }
            }
            BehaviorState::Chase => {
                bot.target = bot.last_seen_player.unwrap_or(player.position);
            }
            BehaviorState::Attack => {
                bot.target = bot.position;
            }
        }

        if previous == next {
            return None;
        }
        debug!(
            "[Bot {}]: {} -> {} (distance {:.1}, los {})",
            bot.id,
            previous.as_str(),
            next.as_str(),
            perception.distance,
            perception.has_line_of_sight
        );
        Some(GameEvent::BehaviorChanged { bot: bot.id, from: previous, to: next })
    }

    /// Per-tick movement toward the current target. Attackers hold ground and turn to face the player.
    pub fn update_movement(
        bot: &mut BotState,
        player: &PlayerState,
        perception: &Perception,
        world: &ArenaWorld,
        config: &BotConfig,
        dt: f32,
        rng: &mut impl Rng,
    ) {
        if !bot.alive {
            return;
        }
        let pinned_height = world.ground_height + config.center_height;

        let speed = match bot.behavior {
            BehaviorState::Attack => {
                bot.velocity = Vec3::ZERO;
                bot.face_towards(player.position);
                return;
            }
            BehaviorState::Patrol => {
                if Self::arrived(bot.position, bot.target, config.arrive_radius) {
                    bot.target = Self::pick_patrol_target(world, config, rng);
                    trace!("[Bot {}]: Patrolling to ({:.1}, {:.1})", bot.id, bot.target.x, bot.target.z);
                }
                config.patrol_speed
            }
            BehaviorState::Cover => {
                if Self::arrived(bot.position, bot.target, config.arrive_radius) {
                    bot.velocity = Vec3::ZERO;
                    bot.face_towards(player.position);
                    return;
                }
                config.cover_speed
            }
            BehaviorState::Chase => {
                if perception.has_line_of_sight {
                    bot.target = player.position;
                }
                config.chase_speed
            }
        };

        let target = bot.target;
        bot.velocity = steer_towards(&mut bot.position, target, speed, dt, pinned_height);
        world.resolve_overlap(&mut bot.position, config.radius);
        bot.face_towards(target);
    }

    pub fn pick_patrol_target(world: &ArenaWorld, config: &BotConfig, rng: &mut impl Rng) -> Vec3 {
        let extent = config.patrol_half_extent.min(world.half_extent);
        let height = world.ground_height + config.center_height;
        let mut candidate = Vec3::new(0.0, height, 0.0);
        for _ in 0..TARGET_RESAMPLE_ATTEMPTS {
            candidate = Vec3::new(rng.gen_range(-extent..=extent), height, rng.gen_range(-extent..=extent));
            if !world.is_obstructed(candidate, config.radius) {
                break;
            }
        }
        candidate
    }

    /// Cover point maximizing distance from the player minus weighted travel cost.
    pub fn pick_cover_point(bot_position: Vec3, player_position: Vec3, world: &ArenaWorld, config: &BotConfig) -> Option<Vec3> {
        let height = world.ground_height + config.center_height;
        world
            .cover_points()
            .iter()
            .map(|p| {
                let score = Self::flat_distance(*p, player_position)
                    - config.cover_cost_weight * Self::flat_distance(*p, bot_position);
                (score, *p)
            })
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, p)| Vec3::new(p.x, height, p.z))
    }

    fn arrived(position: Vec3, target: Vec3, radius: f32) -> bool {
        Self::flat_distance(position, target) <= radius
    }

    fn flat_distance(a: Vec3, b: Vec3) -> f32 {
        let dx = a.x - b.x;
        let dz = a.z - b.z;
        (dx * dx + dz * dz).sqrt()
    }
}
