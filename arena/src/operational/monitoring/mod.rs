// tps_arena_core/arena/src/operational/monitoring/mod.rs
pub mod metrics;
