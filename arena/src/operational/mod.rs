// tps_arena_core/arena/src/operational/mod.rs
pub mod monitoring;
