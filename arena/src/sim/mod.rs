// tps_arena_core/arena/src/sim/mod.rs
pub mod game_loop;
pub mod input;
pub mod instance;
pub mod snapshot;

pub use instance::{CombatSimulation, SimulationBuilder};
pub use snapshot::{SimSnapshot, TickResult};
