// tps_arena_core/arena/src/lib.rs
pub mod core;
pub mod entities;
pub mod operational;
pub mod sim;
pub mod systems;
pub mod world;

pub use crate::core::config::SimConfig;
pub use crate::core::error::{SimError, SimResult};
pub use crate::core::types::{BehaviorState, EntityId, GameEvent, PlayerInput, SimPhase, PLAYER_ENTITY_ID};
pub use crate::sim::{CombatSimulation, SimSnapshot, TickResult};
