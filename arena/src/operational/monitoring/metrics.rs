// tps_arena_core/arena/src/operational/monitoring/metrics.rs
use crate::core::types::{GameEvent, PLAYER_ENTITY_ID};
use anyhow::{Context, Result};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use std::time::Duration;

/// Records simulation metrics through the `metrics` facade. Without an
/// installed recorder every call is a no-op.
pub struct SimMetrics;

impl SimMetrics {
    pub fn new() -> Self {
        describe_histogram!("sim_tick_seconds", "Wall time spent inside one simulation tick");
        describe_counter!("sim_shots_fired_total", "Shots fired, labelled by source (player|bot)");
        describe_counter!("sim_hits_total", "Damaging hits, labelled by source (player|bot)");
        describe_counter!("sim_kills_total", "Entities killed");
        describe_counter!("sim_bot_respawns_total", "Bots revived after their respawn delay");
        describe_counter!("sim_restarts_total", "Full simulation restarts");
        describe_counter!("sim_events_total", "Events emitted, labelled by kind");
        describe_gauge!("sim_bots_alive", "Bots alive at the end of the last tick");
        SimMetrics
    }

    pub fn record_tick(&self, duration: Duration, events: &[GameEvent], bots_alive: usize) {
        histogram!("sim_tick_seconds").record(duration.as_secs_f64());
        gauge!("sim_bots_alive").set(bots_alive as f64);

        for event in events {
            counter!("sim_events_total", "kind" => event.kind()).increment(1);
            match event {
                GameEvent::ShotFired { source, .. } => {
                    counter!("sim_shots_fired_total", "source" => Self::source_label(*source)).increment(1);
                }
                GameEvent::DamageTaken { source, .. } => {
                    counter!("sim_hits_total", "source" => Self::source_label(*source)).increment(1);
                }
                GameEvent::Kill { .. } => counter!("sim_kills_total").increment(1),
                GameEvent::BotRespawned { .. } => counter!("sim_bot_respawns_total").increment(1),
                _ => {}
            }
        }
    }

    pub fn record_restart(&self) {
        counter!("sim_restarts_total").increment(1);
    }

    fn source_label(source: u64) -> &'static str {
        if source == PLAYER_ENTITY_ID {
            "player"
        } else {
            "bot"
        }
    }
}

impl Default for SimMetrics {
    fn default() -> Self {
        Self::new()
    }
}

// Logging setup
/// Set to `1` or `true` to emit logs as JSON lines instead of plain text.
pub const LOG_JSON_ENV: &str = "SIM_LOG_JSON";

fn json_logs_requested(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some(v) if v == "1" || v.eq_ignore_ascii_case("true"))
}

pub fn init_logging() -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let json = json_logs_requested(std::env::var(LOG_JSON_ENV).ok().as_deref());
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "tps_arena_core=info,tps_arena=info".into()))
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    Ok(())
}
