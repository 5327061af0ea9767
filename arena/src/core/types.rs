// tps_arena_core/arena/src/core/types.rs
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

pub type EntityId = u64;
pub type ObstacleId = u32;

/// The player always occupies id 0; bots are numbered from 1.
pub const PLAYER_ENTITY_ID: EntityId = 0;

// --- Player Input ---
/// One frame of player intent. Booleans are already edge-triggered by the
/// input provider; `fire` and `reload` mean "pressed this frame".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerInput {
    /// x = strafe (right positive), y = forward (forward positive).
    pub move_intent: Vec2,
    /// x = yaw delta, y = pitch delta, radians.
    pub look_delta: Vec2,
    pub jump: bool,
    pub crouch: bool,
    pub sprint: bool,
    pub fire: bool,
    pub reload: bool,
}

impl PlayerInput {
    pub fn idle() -> Self {
        PlayerInput::default()
    }

    /// Movement intent with magnitude capped at 1. Non-finite input is treated as no movement.
    pub fn clamped_intent(&self) -> Vec2 {
        if !self.move_intent.is_finite() {
            return Vec2::ZERO;
        }
        self.move_intent.clamp_length_max(1.0)
    }
}

// --- Bot behavior ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BehaviorState {
    #[default]
    Patrol,
    Cover,
    Chase,
    Attack,
}

impl BehaviorState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BehaviorState::Patrol => "patrol",
            BehaviorState::Cover => "cover",
            BehaviorState::Chase => "chase",
            BehaviorState::Attack => "attack",
        }
    }
}

// --- Static geometry ---
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub center: Vec3,
    pub half_extents: Vec3,
    /// Cover anchors contribute derived cover points for bots.
    pub cover_anchor: bool,
}

impl Obstacle {
    pub fn new(id: ObstacleId, center: Vec3, half_extents: Vec3, cover_anchor: bool) -> Self {
        Obstacle { id, center, half_extents, cover_anchor }
    }

    /// Box resting on the ground: `footprint` is the (x, z) centre, `size` the full width/height/depth.
    pub fn grounded(id: ObstacleId, footprint: Vec2, size: Vec3, ground: f32, cover_anchor: bool) -> Self {
        let half = size * 0.5;
        Obstacle::new(id, Vec3::new(footprint.x, ground + half.y, footprint.y), half, cover_anchor)
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }
}

// --- Simulation phase ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SimPhase {
    #[default]
    Running,
    /// Terminal until `restart()`; ticks do not mutate entities.
    PlayerDead,
}

// --- Events ---
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired { source: EntityId, origin: Vec3, direction: Vec3 },
    HitLanded { source: EntityId, target: EntityId, point: Vec3 },
    Impact { source: EntityId, obstacle: ObstacleId, point: Vec3 },
    DamageTaken { target: EntityId, source: EntityId, amount: i32 },
    Kill { source: EntityId, target: EntityId },
    ReloadStarted,
    ReloadCompleted { loaded: u32 },
    BehaviorChanged { bot: EntityId, from: BehaviorState, to: BehaviorState },
    BotRespawned { bot: EntityId, position: Vec3 },
    PlayerDied { killer: EntityId },
}

impl GameEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::ShotFired { .. } => "shot_fired",
            GameEvent::HitLanded { .. } => "hit_landed",
            GameEvent::Impact { .. } => "impact",
            GameEvent::DamageTaken { .. } => "damage_taken",
            GameEvent::Kill { .. } => "kill",
            GameEvent::ReloadStarted => "reload_started",
            GameEvent::ReloadCompleted { .. } => "reload_completed",
            GameEvent::BehaviorChanged { .. } => "behavior_changed",
            GameEvent::BotRespawned { .. } => "bot_respawned",
            GameEvent::PlayerDied { .. } => "player_died",
        }
    }
}
