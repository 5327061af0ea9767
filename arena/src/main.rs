// tps_arena_core/arena/src/main.rs
use anyhow::Context;
use std::time::Duration;
use tps_arena_core::core::config::SimConfig;
use tps_arena_core::operational::monitoring::metrics::init_logging;
use tps_arena_core::sim::game_loop::{run_game_loop, LoopOptions};
use tps_arena_core::sim::input::ScriptedPilot;
use tps_arena_core::CombatSimulation;
use tracing::info;

const DEFAULT_RUN_SECONDS: u64 = 10;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {:?}", e);
        return Err(e);
    }

    // Usage: tps_arena [config.yaml] [seconds]
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SimConfig::load_from_file(&path).with_context(|| format!("Failed to load config from {}", path))?,
        None => SimConfig::default(),
    };
    let seconds = match args.next() {
        Some(raw) => raw.parse::<u64>().with_context(|| format!("Invalid run duration '{}'", raw))?,
        None => DEFAULT_RUN_SECONDS,
    };

    info!("Arena harness starting: seed {}, {} bots, {}s", config.seed, config.bot_count, seconds);

    let mut sim = CombatSimulation::new(config).context("Failed to build combat simulation")?;
    let mut pilot = ScriptedPilot::new();
    let options = LoopOptions { run_for: Duration::from_secs(seconds), restart_on_death: true };

    let summary = run_game_loop(&mut sim, &mut pilot, &options).await;
    let json = serde_json::to_string_pretty(&summary).context("Failed to serialize run summary")?;
    info!("Run summary:\n{}", json);

    Ok(())
}
