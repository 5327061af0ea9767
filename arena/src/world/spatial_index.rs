// tps_arena_core/arena/src/world/spatial_index.rs
use crate::core::types::Obstacle;
use glam::Vec3;
use rstar::{RTree, RTreeObject, AABB};
use tracing::debug;

#[derive(Clone, Debug)]
struct IndexedObstacle {
    slot: usize,
    min: [f32; 2],
    max: [f32; 2],
}

impl RTreeObject for IndexedObstacle {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.min, self.max)
    }
}

/// Ground-plane (XZ) R-tree over static obstacles. Queries return slots into
/// the obstacle list the index was built from.
pub struct ObstacleIndex {
    rtree: RTree<IndexedObstacle>,
}

impl ObstacleIndex {
    pub fn build(obstacles: &[Obstacle]) -> Self {
        let entries: Vec<IndexedObstacle> = obstacles
            .iter()
            .enumerate()
            .map(|(slot, o)| {
                let (min, max) = (o.min(), o.max());
                IndexedObstacle { slot, min: [min.x, min.z], max: [max.x, max.z] }
            })
            .collect();

        let rtree = RTree::bulk_load(entries);
        debug!("Obstacle index built with {} obstacles", rtree.size());
        ObstacleIndex { rtree }
    }

    /// Slots of obstacles whose footprint intersects the given rectangle.
    pub fn query_rect(&self, min_x: f32, min_z: f32, max_x: f32, max_z: f32) -> Vec<usize> {
        let query = AABB::from_corners([min_x, min_z], [max_x, max_z]);
        self.rtree
            .locate_in_envelope_intersecting(&query)
            .map(|entry| entry.slot)
            .collect()
    }

    pub fn query_radius(&self, center: Vec3, radius: f32) -> Vec<usize> {
        self.query_rect(center.x - radius, center.z - radius, center.x + radius, center.z + radius)
    }

    /// Candidates for a ray segment from `from` to `to`; narrow-phase is the caller's job.
    pub fn query_segment(&self, from: Vec3, to: Vec3) -> Vec<usize> {
        let buffer = 0.1;
        self.query_rect(
            from.x.min(to.x) - buffer,
            from.z.min(to.z) - buffer,
            from.x.max(to.x) + buffer,
            from.z.max(to.z) + buffer,
        )
    }
}
