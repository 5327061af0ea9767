// tps_arena_core/arena/src/systems/physics/movement.rs
use crate::core::config::PlayerConfig;
use crate::core::types::PlayerInput;
use crate::entities::PlayerState;
use crate::world::ArenaWorld;
use glam::{Vec2, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementIntent {
    /// Local frame: x = strafe, y = forward. Magnitude <= 1.
    pub direction: Vec2,
    pub jump: bool,
    pub crouch: bool,
    pub sprint: bool,
}

impl From<&PlayerInput> for MovementIntent {
    fn from(input: &PlayerInput) -> Self {
        MovementIntent {
            direction: input.clamped_intent(),
            jump: input.jump,
            crouch: input.crouch,
            sprint: input.sprint,
        }
    }
}

/// Advances the player's kinematics by `dt`. The caller clamps `dt`.
/// Dead players and non-positive steps are left untouched.
pub fn integrate(player: &mut PlayerState, intent: &MovementIntent, dt: f32, params: &PlayerConfig, world: &ArenaWorld) {
    if !player.alive || !(dt > 0.0) {
        return;
    }

    // Crouch wins over sprint.
    player.crouching = intent.crouch;
    player.sprinting = intent.sprint && !intent.crouch;

    let speed = if player.crouching {
        params.crouch_speed
    } else if player.sprinting {
        params.sprint_speed
    } else {
        params.walk_speed
    };

    let direction = intent.direction.clamp_length_max(1.0);
    let horizontal = player.right() * direction.x + player.forward() * direction.y;
    player.velocity.x = horizontal.x * speed;
    player.velocity.z = horizontal.z * speed;

    if intent.jump && player.grounded && !player.crouching {
        player.velocity.y = params.jump_impulse;
        player.grounded = false;
    }

    player.velocity.y -= params.gravity * dt;
    player.position += player.velocity * dt;

    let stance_height = world.ground_height + if player.crouching { params.crouch_height } else { params.stand_height };
    if player.position.y <= stance_height {
        player.position.y = stance_height;
        player.velocity.y = 0.0;
        player.grounded = true;
    } else {
        player.grounded = false;
    }

    world.resolve_overlap(&mut player.position, params.radius);
}

/// Moves a ground-pinned body toward `target` at `speed`, never overshooting.
/// Returns the horizontal velocity applied.
pub fn steer_towards(position: &mut Vec3, target: Vec3, speed: f32, dt: f32, pinned_height: f32) -> Vec3 {
    let mut to_target = target - *position;
    to_target.y = 0.0;
    let distance = to_target.length();
    let step = speed * dt;

    let velocity = if distance <= f32::EPSILON || dt <= 0.0 {
        Vec3::ZERO
    } else if step >= distance {
        to_target / dt
    } else {
        to_target / distance * speed
    };

    *position += velocity * dt;
    position.y = pinned_height;
    velocity
}
