// tps_arena_core/arena/src/systems/respawn.rs
use crate::core::config::BotConfig;
use crate::world::ArenaWorld;
use glam::Vec3;
use rand::Rng;
use tracing::{trace, warn};

/// Chooses bot spawn positions: random, unobstructed, and away from the player
/// and other living bots.
pub struct RespawnManager {
    half_extent: f32,
    min_separation: f32,
    attempts: usize,
    clearance: f32,
    height: f32,
}

impl RespawnManager {
    pub fn new(config: &BotConfig, world: &ArenaWorld) -> Self {
        RespawnManager {
            half_extent: config.spawn_half_extent.min(world.half_extent),
            min_separation: config.min_spawn_separation,
            attempts: config.spawn_attempts,
            clearance: config.radius,
            height: world.ground_height + config.center_height,
        }
    }

    fn is_spawn_point_obstructed(&self, candidate: Vec3, world: &ArenaWorld) -> bool {
        world.is_obstructed(candidate, self.clearance)
    }

    fn separation_score(candidate: Vec3, avoid: &[Vec3]) -> f32 {
        avoid
            .iter()
            .map(|p| {
                let dx = candidate.x - p.x;
                let dz = candidate.z - p.z;
                (dx * dx + dz * dz).sqrt()
            })
            .fold(f32::INFINITY, f32::min)
    }

    /// First sampled candidate that is clear and at least `min_separation` from
    /// every point in `avoid`; otherwise the best-separated clear candidate seen.
    pub fn pick_spawn_position(&self, world: &ArenaWorld, avoid: &[Vec3], rng: &mut impl Rng) -> Vec3 {
        let mut best: Option<(f32, Vec3)> = None;

        for attempt in 0..self.attempts {
            let candidate = Vec3::new(
                rng.gen_range(-self.half_extent..=self.half_extent),
                self.height,
                rng.gen_range(-self.half_extent..=self.half_extent),
            );
            if self.is_spawn_point_obstructed(candidate, world) {
                continue;
            }
            let score = Self::separation_score(candidate, avoid);
            if score >= self.min_separation {
                trace!("Spawn accepted on attempt {} at ({:.1}, {:.1})", attempt, candidate.x, candidate.z);
                return candidate;
            }
            if best.map_or(true, |(s, _)| score > s) {
                best = Some((score, candidate));
            }
        }

        match best {
            Some((score, position)) => {
                warn!(
                    "[RESPAWN_WARN] No spawn met separation {:.1}; using best at {:.1}",
                    self.min_separation, score
                );
                position
            }
            None => {
                warn!("[RESPAWN_WARN] All sampled spawn points obstructed; using arena origin");
                let mut fallback = Vec3::new(0.0, self.height, 0.0);
                world.resolve_overlap(&mut fallback, self.clearance);
                fallback
            }
        }
    }
}
