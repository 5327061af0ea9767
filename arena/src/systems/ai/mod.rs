// tps_arena_core/arena/src/systems/ai/mod.rs
pub mod bot_ai;

pub use bot_ai::BotAISystem;
