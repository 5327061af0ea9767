// tps_arena_core/arena/src/sim/snapshot.rs
use crate::core::types::{BehaviorState, EntityId, GameEvent, SimPhase};
use crate::entities::{BotState, PlayerState};
use glam::Vec3;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub position: Vec3,
    pub velocity: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub health: i32,
    pub max_health: i32,
    pub alive: bool,
    pub ammo: u32,
    pub reserve: u32,
    pub reloading: bool,
    pub reload_remaining: f32,
    pub fire_cooldown: f32,
    pub grounded: bool,
    pub crouching: bool,
    pub sprinting: bool,
    pub kills: u32,
}

impl From<&PlayerState> for PlayerSnapshot {
    fn from(p: &PlayerState) -> Self {
        PlayerSnapshot {
            position: p.position,
            velocity: p.velocity,
            yaw: p.yaw,
            pitch: p.pitch,
            health: p.health,
            max_health: p.max_health,
            alive: p.alive,
            ammo: p.ammo,
            reserve: p.reserve,
            reloading: p.is_reloading(),
            reload_remaining: p.reload_timer,
            fire_cooldown: p.fire_cooldown,
            grounded: p.grounded,
            crouching: p.crouching,
            sprinting: p.sprinting,
            kills: p.kills,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BotSnapshot {
    pub id: EntityId,
    pub position: Vec3,
    pub yaw: f32,
    pub health: i32,
    pub alive: bool,
    pub behavior: BehaviorState,
    pub respawn_in: f32,
}

impl From<&BotState> for BotSnapshot {
    fn from(b: &BotState) -> Self {
        BotSnapshot {
            id: b.id,
            position: b.position,
            yaw: b.yaw,
            health: b.health,
            alive: b.alive,
            behavior: b.behavior,
            respawn_in: b.respawn_timer,
        }
    }
}

/// Read-only view handed to rendering/HUD/audio after each tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimSnapshot {
    pub tick: u64,
    pub phase: SimPhase,
    pub player: PlayerSnapshot,
    pub bots: Vec<BotSnapshot>,
}

impl SimSnapshot {
    pub fn bot(&self, id: EntityId) -> Option<&BotSnapshot> {
        self.bots.iter().find(|b| b.id == id)
    }

    pub fn bots_alive(&self) -> usize {
        self.bots.iter().filter(|b| b.alive).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickResult {
    pub events: Vec<GameEvent>,
    pub snapshot: SimSnapshot,
}

impl TickResult {
    pub fn count<F: Fn(&GameEvent) -> bool>(&self, predicate: F) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }
}
