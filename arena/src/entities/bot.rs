// tps_arena_core/arena/src/entities/bot.rs
use crate::core::config::BotConfig;
use crate::core::types::{BehaviorState, EntityId};
use glam::Vec3;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BotState {
    pub id: EntityId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub yaw: f32,
    pub health: i32,
    pub max_health: i32,
    pub alive: bool,

    pub behavior: BehaviorState,
    pub target: Vec3,
    pub last_seen_player: Option<Vec3>,

    pub fire_cooldown: f32,
    pub think_timer: f32,
    /// > 0 keeps the bot aware of the player without direct sight.
    pub alert_timer: f32,
    /// > 0 while dead.
    pub respawn_timer: f32,
}

impl BotState {
    pub fn new(id: EntityId, position: Vec3, config: &BotConfig) -> Self {
        BotState {
            id,
            position,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            health: config.max_health,
            max_health: config.max_health,
            alive: true,
            behavior: BehaviorState::Patrol,
            target: position,
            last_seen_player: None,
            fire_cooldown: 0.0,
            think_timer: 0.0,
            alert_timer: 0.0,
            respawn_timer: 0.0,
        }
    }

    /// Returns true only on the hit that takes health to zero.
    pub fn apply_damage(&mut self, damage: i32, respawn_delay: f32) -> bool {
        if !self.alive || damage <= 0 {
            return false;
        }
        self.health = (self.health - damage).clamp(0, self.max_health);
        if self.health == 0 {
            self.die(respawn_delay);
            return true;
        }
        false
    }

    fn die(&mut self, respawn_delay: f32) {
        self.alive = false;
        self.velocity = Vec3::ZERO;
        self.respawn_timer = respawn_delay;
        self.fire_cooldown = 0.0;
        self.think_timer = 0.0;
        self.alert_timer = 0.0;
        self.last_seen_player = None;
    }

    pub fn respawn(&mut self, position: Vec3) {
        self.alive = true;
        self.health = self.max_health;
        self.position = position;
        self.target = position;
        self.velocity = Vec3::ZERO;
        self.behavior = BehaviorState::Patrol;
        self.respawn_timer = 0.0;
        self.last_seen_player = None;
    }

    pub fn face_towards(&mut self, point: Vec3) {
        let d = point - self.position;
        if d.x.abs() > f32::EPSILON || d.z.abs() > f32::EPSILON {
            self.yaw = (-d.x).atan2(-d.z);
        }
    }

    pub fn is_aware(&self) -> bool {
        self.alert_timer > 0.0
    }
}
