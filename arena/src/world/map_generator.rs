// tps_arena_core/arena/src/world/map_generator.rs
use crate::core::config::{ArenaConfig, PlayerConfig};
use crate::core::error::{SimError, SimResult};
use crate::core::types::{Obstacle, ObstacleId};
use glam::{Vec2, Vec3};
use rand::Rng;

/// Hand-placed landmark boxes: (x, z, width, height, depth, cover anchor).
const LANDMARKS: [(f32, f32, f32, f32, f32, bool); 6] = [
    (8.0, -8.0, 8.0, 6.0, 10.0, false),
    (-20.0, -12.0, 16.0, 12.0, 12.0, false),
    (-2.0, -26.0, 6.0, 4.0, 14.0, true),
    (18.0, 8.0, 7.0, 4.0, 8.0, true),
    (-24.0, 14.0, 8.0, 4.0, 8.0, true),
    (0.0, 6.0, 5.0, 3.0, 5.0, true),
];

// Scattered crates keep clear of the player spawn.
const SPAWN_CLEARANCE: f32 = 6.0;
// Minimum footprint gap between crates and any other box; wide enough for the player to pass.
const CRATE_GAP: f32 = 1.5;

pub struct MapGenerator;

impl MapGenerator {
    pub fn generate_arena(arena: &ArenaConfig, player: &PlayerConfig, rng: &mut impl Rng) -> Vec<Obstacle> {
        let landmarks = Self::create_landmarks(arena);
        let crates = Self::create_scattered_crates(arena, player, &landmarks, rng);
        let mut obstacles = landmarks;
        obstacles.extend(crates);
        obstacles
    }

    fn create_landmarks(arena: &ArenaConfig) -> Vec<Obstacle> {
        LANDMARKS
            .iter()
            .enumerate()
            .map(|(i, &(x, z, w, h, d, cover))| {
                Obstacle::grounded(i as ObstacleId + 1, Vec2::new(x, z), Vec3::new(w, h, d), arena.ground_height, cover)
            })
            .collect()
    }

    fn create_scattered_crates(
        arena: &ArenaConfig,
        player: &PlayerConfig,
        placed: &[Obstacle],
        rng: &mut impl Rng,
    ) -> Vec<Obstacle> {
        let first_id = placed.len() as ObstacleId + 1;
        let mut crates: Vec<Obstacle> = Vec::with_capacity(arena.obstacle_count);
        let spawn = Vec2::new(player.spawn[0], player.spawn[2]);
        let extent = arena.obstacle_scatter_half_extent.min(arena.half_extent);
        if extent <= 0.0 {
            return crates;
        }

        let mut attempts = 0;
        while crates.len() < arena.obstacle_count && attempts < arena.obstacle_count * 8 {
            attempts += 1;
            let footprint = Vec2::new(rng.gen_range(-extent..=extent), rng.gen_range(-extent..=extent));
            let size = Vec3::new(rng.gen_range(2.0..6.0), rng.gen_range(1.5..4.0), rng.gen_range(2.0..6.0));

            let reach = size.x.max(size.z) * 0.5 + SPAWN_CLEARANCE;
            if footprint.distance(spawn) < reach {
                continue;
            }

            let cover = rng.gen_bool(1.0 / 3.0);
            let id = first_id + crates.len() as ObstacleId;
            let candidate = Obstacle::grounded(id, footprint, size, arena.ground_height, cover);
            if placed.iter().chain(crates.iter()).any(|o| Self::footprints_near(o, &candidate, CRATE_GAP)) {
                continue;
            }
            crates.push(candidate);
        }
        crates
    }

    /// True if the XZ footprints of `a` and `b` are closer than `gap` on both axes.
    pub fn footprints_near(a: &Obstacle, b: &Obstacle, gap: f32) -> bool {
        let (a_min, a_max) = (a.min(), a.max());
        let (b_min, b_max) = (b.min(), b.max());
        a_min.x - gap < b_max.x && b_min.x - gap < a_max.x && a_min.z - gap < b_max.z && b_min.z - gap < a_max.z
    }

    /// Cover points sit just outside both X faces of every cover-anchor box, at ground level.
    pub fn derive_cover_points(obstacles: &[Obstacle], arena: &ArenaConfig) -> Vec<Vec3> {
        obstacles
            .iter()
            .filter(|o| o.cover_anchor)
            .flat_map(|o| {
                let offset = o.half_extents.x + arena.cover_point_offset;
                [
                    Vec3::new(o.center.x + offset, arena.ground_height, o.center.z),
                    Vec3::new(o.center.x - offset, arena.ground_height, o.center.z),
                ]
            })
            .filter(|p| p.x.abs() <= arena.half_extent && p.z.abs() <= arena.half_extent)
            .collect()
    }

    pub fn validate_obstacles(obstacles: &[Obstacle]) -> SimResult<()> {
        for o in obstacles {
            if !o.center.is_finite() || !o.half_extents.is_finite() {
                return Err(SimError::InvalidGeometry(format!("obstacle {} has non-finite bounds", o.id)));
            }
            if o.half_extents.min_element() <= 0.0 {
                return Err(SimError::InvalidGeometry(format!(
                    "obstacle {} has non-positive half extents {:?}",
                    o.id, o.half_extents
                )));
            }
        }
        let mut ids: Vec<ObstacleId> = obstacles.iter().map(|o| o.id).collect();
        ids.sort_unstable();
        if ids.windows(2).any(|w| w[0] == w[1]) {
            return Err(SimError::InvalidGeometry("duplicate obstacle id".to_string()));
        }
        Ok(())
    }
}
