// tps_arena_core/arena/src/world/mod.rs
pub mod map_generator;
pub mod spatial_index;

use crate::core::config::ArenaConfig;
use crate::core::error::SimResult;
use crate::core::types::{Obstacle, ObstacleId};
use crate::systems::physics::collision::{clamp_to_arena, push_out_of_box, ray_aabb};
use glam::Vec3;
use map_generator::MapGenerator;
use spatial_index::ObstacleIndex;
use tracing::trace;

const MAX_PUSH_PASSES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleHit {
    pub obstacle: ObstacleId,
    pub distance: f32,
    pub point: Vec3,
}

/// Static arena: immutable obstacle set, derived cover points and a broad-phase index.
pub struct ArenaWorld {
    pub half_extent: f32,
    pub ground_height: f32,
    pub eye_height: f32,
    obstacles: Vec<Obstacle>,
    cover_points: Vec<Vec3>,
    index: ObstacleIndex,
}

impl ArenaWorld {
    pub fn new(arena: &ArenaConfig, obstacles: Vec<Obstacle>) -> SimResult<Self> {
        MapGenerator::validate_obstacles(&obstacles)?;
        let cover_points = MapGenerator::derive_cover_points(&obstacles, arena);
        let index = ObstacleIndex::build(&obstacles);
        Ok(ArenaWorld {
            half_extent: arena.half_extent,
            ground_height: arena.ground_height,
            eye_height: arena.eye_height,
            obstacles,
            cover_points,
            index,
        })
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn cover_points(&self) -> &[Vec3] {
        &self.cover_points
    }

    /// Nearest obstacle hit along a normalized ray within `max_distance`.
    pub fn raycast_obstacles(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<ObstacleHit> {
        let end = origin + direction * max_distance;
        self.index
            .query_segment(origin, end)
            .into_iter()
            .filter_map(|slot| {
                let o = &self.obstacles[slot];
                ray_aabb(origin, direction, o.min(), o.max(), max_distance).map(|distance| ObstacleHit {
                    obstacle: o.id,
                    distance,
                    point: origin + direction * distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    /// Pushes a ground-plane circle out of every overlapping obstacle, then clamps to the arena.
    /// Boxes that overlap each other can bounce the circle between them; if it
    /// is still embedded after a few passes it is ejected from their combined bounds.
    pub fn resolve_overlap(&self, position: &mut Vec3, radius: f32) {
        for _ in 0..MAX_PUSH_PASSES {
            let mut pushed = false;
            for slot in self.index.query_radius(*position, radius) {
                let o = &self.obstacles[slot];
                pushed |= push_out_of_box(position, radius, o.min(), o.max());
            }
            clamp_to_arena(position, self.half_extent);
            if !pushed {
                return;
            }
        }
        if self.is_obstructed(*position, radius) {
            self.eject_from_cluster(position, radius);
        }
    }

    fn eject_from_cluster(&self, position: &mut Vec3, radius: f32) {
        let Some((mut min, mut max)) = self.footprint_union(&self.index.query_radius(*position, radius)) else {
            return;
        };
        // Grow the cluster until no outside box lies within reach of its edge.
        let reach = 2.0 * radius;
        for _ in 0..self.obstacles.len() {
            let slots = self.index.query_rect(min.x - reach, min.z - reach, max.x + reach, max.z + reach);
            let Some((grown_min, grown_max)) = self.footprint_union(&slots) else {
                break;
            };
            if grown_min == min && grown_max == max {
                break;
            }
            min = grown_min;
            max = grown_max;
        }
        push_out_of_box(position, radius, min, max);
        clamp_to_arena(position, self.half_extent);
        trace!("Ejected from overlapping obstacles to ({:.2}, {:.2})", position.x, position.z);
    }

    fn footprint_union(&self, slots: &[usize]) -> Option<(Vec3, Vec3)> {
        slots
            .iter()
            .map(|&slot| (self.obstacles[slot].min(), self.obstacles[slot].max()))
            .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1)))
    }

    /// True if a circle at `position` overlaps any obstacle footprint.
    pub fn is_obstructed(&self, position: Vec3, radius: f32) -> bool {
        self.index.query_radius(position, radius).into_iter().any(|slot| {
            let o = &self.obstacles[slot];
            let (min, max) = (o.min(), o.max());
            let closest_x = position.x.clamp(min.x, max.x);
            let closest_z = position.z.clamp(min.z, max.z);
            let dx = position.x - closest_x;
            let dz = position.z - closest_z;
            dx * dx + dz * dz < radius * radius
        })
    }
}
