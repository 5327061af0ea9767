// tps_arena_core/arena/src/systems/physics/collision.rs
// Geometric primitives shared by movement, perception and hit resolution.
use glam::Vec3;
use std::f32::consts::TAU;

/// Slab test of a ray against an axis-aligned box.
///
/// Returns the distance along `direction` (which must be normalized) to the
/// first contact, or `None` if the ray misses or the contact lies beyond
/// `max_distance`. A ray starting inside the box hits at distance 0.
pub fn ray_aabb(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3, max_distance: f32) -> Option<f32> {
    let mut t_near = 0.0_f32;
    let mut t_far = max_distance;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        let (lo, hi) = (min[axis], max[axis]);

        if d.abs() < 1e-8 {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t0 = (lo - o) * inv;
        let mut t1 = (hi - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_near = t_near.max(t0);
        t_far = t_far.min(t1);
        if t_near > t_far {
            return None;
        }
    }

    Some(t_near)
}

/// Pushes a circle of `radius` on the XZ plane out of the box footprint along
/// the axis of least penetration. Height is ignored. Returns true if moved.
pub fn push_out_of_box(position: &mut Vec3, radius: f32, min: Vec3, max: Vec3) -> bool {
    let lo_x = min.x - radius;
    let hi_x = max.x + radius;
    let lo_z = min.z - radius;
    let hi_z = max.z + radius;

    if position.x <= lo_x || position.x >= hi_x || position.z <= lo_z || position.z >= hi_z {
        return false;
    }

    let push_neg_x = position.x - lo_x;
    let push_pos_x = hi_x - position.x;
    let push_neg_z = position.z - lo_z;
    let push_pos_z = hi_z - position.z;

    let smallest = push_neg_x.min(push_pos_x).min(push_neg_z).min(push_pos_z);
    if smallest == push_neg_x {
        position.x = lo_x;
    } else if smallest == push_pos_x {
        position.x = hi_x;
    } else if smallest == push_neg_z {
        position.z = lo_z;
    } else {
        position.z = hi_z;
    }
    true
}

/// Clamps the horizontal position into the square arena. Height is untouched.
pub fn clamp_to_arena(position: &mut Vec3, half_extent: f32) {
    position.x = position.x.clamp(-half_extent, half_extent);
    position.z = position.z.clamp(-half_extent, half_extent);
}

/// Rotates `direction` by a random angle of at most `spread` radians.
/// `u` and `v` are uniform samples in [0, 1]; the offset is uniform over the
/// cone's disc.
pub fn apply_spread(direction: Vec3, spread: f32, u: f32, v: f32) -> Vec3 {
    let dir = direction.normalize_or_zero();
    if spread <= 0.0 || dir == Vec3::ZERO {
        return dir;
    }
    let helper = if dir.y.abs() > 0.99 { Vec3::X } else { Vec3::Y };
    let side = dir.cross(helper).normalize_or_zero();
    let up = side.cross(dir).normalize_or_zero();

    let angle = spread * u.clamp(0.0, 1.0).sqrt();
    let (sin_t, cos_t) = (TAU * v.clamp(0.0, 1.0)).sin_cos();
    let axis = side * cos_t + up * sin_t;
    (dir * angle.cos() + axis * angle.sin()).normalize_or_zero()
}
