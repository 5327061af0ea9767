// tps_arena_core/arena/src/systems/mod.rs
pub mod ai;
pub mod combat;
pub mod perception;
pub mod physics;
pub mod respawn;
pub mod timers;
