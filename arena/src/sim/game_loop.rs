// tps_arena_core/arena/src/sim/game_loop.rs
use crate::core::types::{GameEvent, SimPhase, PLAYER_ENTITY_ID};
use crate::sim::input::InputSource;
use crate::sim::instance::CombatSimulation;
use crate::sim::snapshot::SimSnapshot;
use serde::Serialize;
use std::time::Duration;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct LoopOptions {
    pub run_for: Duration,
    /// Restart immediately when the player dies instead of stopping.
    pub restart_on_death: bool,
}

impl Default for LoopOptions {
    fn default() -> Self {
        LoopOptions { run_for: Duration::from_secs(10), restart_on_death: true }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LoopSummary {
    pub ticks: u64,
    pub wall_seconds: f64,
    pub player_shots: u64,
    pub player_hits: u64,
    pub bot_shots: u64,
    pub bot_hits: u64,
    pub kills: u64,
    pub player_deaths: u64,
    pub bot_respawns: u64,
    pub restarts: u64,
    pub final_snapshot: Option<SimSnapshot>,
}

impl LoopSummary {
    fn absorb(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::ShotFired { source, .. } if *source == PLAYER_ENTITY_ID => self.player_shots += 1,
                GameEvent::ShotFired { .. } => self.bot_shots += 1,
                GameEvent::HitLanded { source, .. } if *source == PLAYER_ENTITY_ID => self.player_hits += 1,
                GameEvent::DamageTaken { target, .. } if *target == PLAYER_ENTITY_ID => self.bot_hits += 1,
                GameEvent::Kill { .. } => self.kills += 1,
                GameEvent::PlayerDied { .. } => self.player_deaths += 1,
                GameEvent::BotRespawned { .. } => self.bot_respawns += 1,
                _ => {}
            }
        }
    }
}

/// Fixed-rate driver: ticks at the configured rate with wall-clock dt
/// (clamped inside `tick`) until `run_for` elapses.
pub async fn run_game_loop(
    sim: &mut CombatSimulation,
    input: &mut impl InputSource,
    options: &LoopOptions,
) -> LoopSummary {
    let tick_rate = sim.config().timing.tick_rate.max(1);
    let period = Duration::from_secs_f64(1.0 / tick_rate as f64);
    let mut tick_timer = interval(period);
    tick_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let started = Instant::now();
    let mut last_tick = started;
    let mut summary = LoopSummary::default();
    let mut snapshot = sim.snapshot();

    info!("Game loop started. Tick rate: {}Hz, running for {:?}", tick_rate, options.run_for);

    while started.elapsed() < options.run_for {
        tick_timer.tick().await;
        let now = Instant::now();
        let dt = now.duration_since(last_tick).as_secs_f32();
        last_tick = now;

        let frame = input.next_input(&snapshot);
        let result = sim.tick(dt, &frame);
        summary.absorb(&result.events);
        summary.ticks += 1;
        snapshot = result.snapshot;

        if summary.ticks % (tick_rate * 5) == 0 {
            debug!(
                "Tick {}: health {}, ammo {}/{}, kills {}, bots alive {}",
                snapshot.tick,
                snapshot.player.health,
                snapshot.player.ammo,
                snapshot.player.reserve,
                snapshot.player.kills,
                snapshot.bots_alive()
            );
        }

        if snapshot.phase == SimPhase::PlayerDead {
            if !options.restart_on_death {
                info!("Player died at tick {}; stopping", snapshot.tick);
                break;
            }
            sim.restart();
            summary.restarts += 1;
            snapshot = sim.snapshot();
        }
    }

    summary.wall_seconds = started.elapsed().as_secs_f64();
    summary.final_snapshot = Some(snapshot);
    info!(
        "Game loop stopped after {} ticks ({:.2}s): {} kills, {} player deaths",
        summary.ticks, summary.wall_seconds, summary.kills, summary.player_deaths
    );
    summary
}
