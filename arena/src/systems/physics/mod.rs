// tps_arena_core/arena/src/systems/physics/mod.rs
pub mod collision;
pub mod movement;
