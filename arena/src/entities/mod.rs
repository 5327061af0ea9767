// tps_arena_core/arena/src/entities/mod.rs
pub mod bot;
pub mod player;

pub use bot::BotState;
pub use player::PlayerState;
