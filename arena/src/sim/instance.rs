// tps_arena_core/arena/src/sim/instance.rs
use crate::core::config::SimConfig;
use crate::core::constants::SLOW_TICK_LOG_MS;
use crate::core::error::{SimError, SimResult};
use crate::core::types::{EntityId, GameEvent, Obstacle, PlayerInput, SimPhase};
use crate::entities::{BotState, PlayerState};
use crate::operational::monitoring::metrics::SimMetrics;
use crate::sim::snapshot::{BotSnapshot, PlayerSnapshot, SimSnapshot, TickResult};
use crate::systems::ai::BotAISystem;
use crate::systems::combat::CombatResolver;
use crate::systems::perception::{perceive, update_awareness};
use crate::systems::physics::movement::{integrate, MovementIntent};
use crate::systems::respawn::RespawnManager;
use crate::systems::timers::TimerSystem;
use crate::world::map_generator::MapGenerator;
use crate::world::ArenaWorld;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

/// The world/context object: owns every entity, the static arena and the RNG.
/// Independent instances never share state.
pub struct CombatSimulation {
    config: SimConfig,
    world: ArenaWorld,
    respawn: RespawnManager,
    player: PlayerState,
    bots: Vec<BotState>,
    /// Fixed bot placement used instead of random spawns on every restart.
    bot_layout: Option<Vec<Vec3>>,
    rng: StdRng,
    phase: SimPhase,
    tick_count: u64,
    metrics: SimMetrics,
}

/// Builds a simulation with an explicit arena and/or bot layout.
pub struct SimulationBuilder {
    config: SimConfig,
    obstacles: Option<Vec<Obstacle>>,
    bot_layout: Option<Vec<Vec3>>,
}

impl SimulationBuilder {
    pub fn obstacles(mut self, obstacles: Vec<Obstacle>) -> Self {
        self.obstacles = Some(obstacles);
        self
    }

    /// Places one bot per position (x and z are used; height is pinned to the ground).
    pub fn bot_positions(mut self, positions: Vec<Vec3>) -> Self {
        self.bot_layout = Some(positions);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn build(self) -> SimResult<CombatSimulation> {
        CombatSimulation::assemble(self.config, self.obstacles, self.bot_layout)
    }
}

impl CombatSimulation {
    pub fn new(config: SimConfig) -> SimResult<Self> {
        Self::assemble(config, None, None)
    }

    pub fn builder(config: SimConfig) -> SimulationBuilder {
        SimulationBuilder { config, obstacles: None, bot_layout: None }
    }

    fn assemble(config: SimConfig, obstacles: Option<Vec<Obstacle>>, bot_layout: Option<Vec<Vec3>>) -> SimResult<Self> {
        config.validate()?;

        let obstacles = match obstacles {
            Some(o) => o,
            None => {
                let mut map_rng = StdRng::seed_from_u64(config.seed);
                MapGenerator::generate_arena(&config.arena, &config.player, &mut map_rng)
            }
        };
        let world = ArenaWorld::new(&config.arena, obstacles)?;

        if let Some(layout) = &bot_layout {
            if let Some(p) = layout.iter().find(|p| !p.is_finite()) {
                return Err(SimError::InvalidGeometry(format!("bot position {:?} is not finite", p)));
            }
        }

        let respawn = RespawnManager::new(&config.bot, &world);
        let player = PlayerState::new(&config.player, &config.weapon);
        let rng = StdRng::seed_from_u64(config.seed);

        let mut sim = CombatSimulation {
            config,
            world,
            respawn,
            player,
            bots: Vec::new(),
            bot_layout,
            rng,
            phase: SimPhase::Running,
            tick_count: 0,
            metrics: SimMetrics::new(),
        };
        sim.reset_state();

        info!(
            "Combat simulation ready: {} obstacles, {} cover points, {} bots, seed {}",
            sim.world.obstacles().len(),
            sim.world.cover_points().len(),
            sim.bots.len(),
            sim.config.seed
        );
        Ok(sim)
    }

    /// Full reset to initial conditions. Re-seeds the RNG so repeated restarts agree.
    pub fn restart(&mut self) {
        self.reset_state();
        self.metrics.record_restart();
        info!("Simulation restarted (seed {})", self.config.seed);
    }

    fn reset_state(&mut self) {
        self.rng = StdRng::seed_from_u64(self.config.seed);
        self.phase = SimPhase::Running;
        self.tick_count = 0;
        self.player = PlayerState::new(&self.config.player, &self.config.weapon);

        let bot_height = self.world.ground_height + self.config.bot.center_height;
        let positions: Vec<Vec3> = match &self.bot_layout {
            Some(layout) => layout.iter().map(|p| Vec3::new(p.x, bot_height, p.z)).collect(),
            None => {
                let mut avoid = vec![self.player.position];
                let mut placed = Vec::with_capacity(self.config.bot_count);
                for _ in 0..self.config.bot_count {
                    let p = self.respawn.pick_spawn_position(&self.world, &avoid, &mut self.rng);
                    avoid.push(p);
                    placed.push(p);
                }
                placed
            }
        };

        self.bots = positions
            .into_iter()
            .enumerate()
            .map(|(i, p)| BotState::new(i as EntityId + 1, p, &self.config.bot))
            .collect();
    }

    /// Advances the simulation by one step. `dt` is clamped to the configured
    /// maximum; non-positive or non-finite steps change nothing.
    pub fn tick(&mut self, dt: f32, input: &PlayerInput) -> TickResult {
        if self.phase == SimPhase::PlayerDead {
            return self.result(Vec::new());
        }
        if !dt.is_finite() || dt <= 0.0 {
            trace!("Ignoring tick with dt {}", dt);
            return self.result(Vec::new());
        }

        let started = Instant::now();
        let dt = dt.min(self.config.timing.max_step);
        self.tick_count += 1;
        let mut events = Vec::new();

        // Player: look, move, shoot, reload.
        self.player.apply_look(input.look_delta, self.config.player.max_pitch);
        integrate(&mut self.player, &MovementIntent::from(input), dt, &self.config.player, &self.world);

        if input.fire {
            let aim = self.player.aim_direction();
            events.extend(CombatResolver::fire(
                &mut self.player,
                aim,
                &mut self.bots,
                &self.world,
                &self.config,
                &mut self.rng,
            ));
        }
        if input.reload {
            events.extend(CombatResolver::request_reload(&mut self.player, &self.config.weapon));
        }

        // Bots see the player where they moved to this tick.
        for bot in self.bots.iter_mut().filter(|b| b.alive) {
            let perception = perceive(bot, &self.player, &self.world, &self.config.bot);
            update_awareness(bot, &self.player, &perception, &self.config.bot);
            events.extend(BotAISystem::think(bot, &self.player, &perception, &self.world, &self.config.bot, &mut self.rng));
            BotAISystem::update_movement(bot, &self.player, &perception, &self.world, &self.config.bot, dt, &mut self.rng);
            events.extend(CombatResolver::bot_fire(bot, &mut self.player, &self.world, &self.config, &mut self.rng));

            if !self.player.alive {
                self.phase = SimPhase::PlayerDead;
                info!("Player killed by bot {} at tick {}", bot.id, self.tick_count);
                break;
            }
        }

        if self.phase == SimPhase::Running {
            self.advance_timers(dt, &mut events);
        }

        let elapsed = started.elapsed();
        if elapsed > Duration::from_millis(SLOW_TICK_LOG_MS) {
            warn!("Tick {} took {:?}", self.tick_count, elapsed);
        }
        let bots_alive = self.bots.iter().filter(|b| b.alive).count();
        self.metrics.record_tick(elapsed, &events, bots_alive);

        self.result(events)
    }

    fn advance_timers(&mut self, dt: f32, events: &mut Vec<GameEvent>) {
        events.extend(TimerSystem::tick_player(&mut self.player, dt, &self.config.weapon));

        for i in 0..self.bots.len() {
            if !TimerSystem::tick_bot(&mut self.bots[i], dt) {
                continue;
            }
            let mut avoid: Vec<Vec3> = self
                .bots
                .iter()
                .enumerate()
                .filter(|(j, b)| *j != i && b.alive)
                .map(|(_, b)| b.position)
                .collect();
            avoid.push(self.player.position);

            let position = self.respawn.pick_spawn_position(&self.world, &avoid, &mut self.rng);
            let bot = &mut self.bots[i];
            bot.respawn(position);
            debug!("[Bot {}]: Respawned at ({:.1}, {:.1})", bot.id, position.x, position.z);
            events.push(GameEvent::BotRespawned { bot: bot.id, position });
        }
    }

    fn result(&self, events: Vec<GameEvent>) -> TickResult {
        TickResult { events, snapshot: self.snapshot() }
    }

    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            tick: self.tick_count,
            phase: self.phase,
            player: PlayerSnapshot::from(&self.player),
            bots: self.bots.iter().map(BotSnapshot::from).collect(),
        }
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> &ArenaWorld {
        &self.world
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn bots(&self) -> &[BotState] {
        &self.bots
    }

    pub fn bot(&self, id: EntityId) -> Option<&BotState> {
        self.bots.iter().find(|b| b.id == id)
    }

    /// Direct state access for scripted scenarios and tests.
    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    pub fn bot_mut(&mut self, id: EntityId) -> Option<&mut BotState> {
        self.bots.iter_mut().find(|b| b.id == id)
    }
}
