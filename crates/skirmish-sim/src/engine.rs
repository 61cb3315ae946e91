//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world and the rosters, processes
//! session commands, runs all systems in phase order, and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish_ai::profiles::HostileKind;
use skirmish_core::animation::{AnyFrame, SpriteCatalog};
use skirmish_core::commands::SessionCommand;
use skirmish_core::components::{Actor, Behavior};
use skirmish_core::config::GameConfig;
use skirmish_core::enums::{Archetype, GamePhase};
use skirmish_core::events::GameEvent;
use skirmish_core::input::InputSnapshot;
use skirmish_core::state::{GameStateSnapshot, WorldView};
use skirmish_core::types::{Position, SimTime};

use crate::roster::Rosters;
use crate::systems;
use crate::systems::wave_spawner::WaveState;
use crate::world_setup;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// World size, pacing and tuning.
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::from_game(GameConfig::default())
    }
}

impl SimConfig {
    /// Engine config seeded from a loaded game config.
    pub fn from_game(game: GameConfig) -> Self {
        Self {
            seed: game.seed,
            game,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    rosters: Rosters,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    config: GameConfig,
    catalog: Box<dyn SpriteCatalog + Send>,
    command_queue: VecDeque<SessionCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
    waves: WaveState,
}

impl SimulationEngine {
    /// Create an engine that treats every sprite key as available.
    pub fn new(config: SimConfig) -> Self {
        Self::with_catalog(config, Box::new(AnyFrame))
    }

    /// Create an engine whose clips keep only the frames `catalog` holds.
    pub fn with_catalog(config: SimConfig, catalog: Box<dyn SpriteCatalog + Send>) -> Self {
        Self {
            world: World::new(),
            rosters: Rosters::default(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config: config.game,
            catalog,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            waves: WaveState::default(),
        }
    }

    /// Queue a session command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SessionCommand) {
        self.command_queue.push_back(command);
    }

    /// Advance the simulation by `elapsed_secs` of wall time and return the resulting snapshot.
    ///
    /// Elapsed time is clamped to `[0, max_frame_dt]`; no tick ever steps further.
    pub fn tick(&mut self, elapsed_secs: f64, input: &InputSnapshot) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Playing {
            let dt = elapsed_secs.min(self.config.max_frame_dt).max(0.0);
            self.run_systems(dt, input);
            self.time.advance(dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.rosters,
            &self.time,
            self.phase,
            &self.waves,
            &self.config,
            events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Current wave number (0 before the game starts).
    pub fn wave(&self) -> u32 {
        self.waves.wave
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a read-only reference to the rosters.
    pub fn rosters(&self) -> &Rosters {
        &self.rosters
    }

    /// Player score so far (0 without a player).
    pub fn score(&self) -> u64 {
        self.rosters
            .player
            .and_then(|p| {
                let behavior = self.world.get::<&Behavior>(p).ok()?;
                match &*behavior {
                    Behavior::PlayerControlled(pilot) => Some(pilot.score),
                    _ => None,
                }
            })
            .unwrap_or(0)
    }

    /// Get a mutable reference to the ECS world (for test setups).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Get mutable access to the rosters (for test setups).
    #[cfg(test)]
    pub fn rosters_mut(&mut self) -> &mut Rosters {
        &mut self.rosters
    }

    /// Get mutable access to the wave state (for test setups).
    #[cfg(test)]
    pub fn waves_mut(&mut self) -> &mut WaveState {
        &mut self.waves
    }

    /// Despawn every soldier and zombie plus all bullets and particles in
    /// flight (for tests that need an empty field around the player).
    #[cfg(test)]
    pub fn clear_hostiles(&mut self) {
        let rosters = &mut self.rosters;
        let field = rosters
            .enemies
            .drain(..)
            .chain(rosters.zombies.drain(..))
            .chain(rosters.bullets.drain(..))
            .chain(rosters.particles.drain(..));
        for entity in field {
            let _ = self.world.despawn(entity);
        }
    }

    /// Spawn one hostile at `at` outside any wave (for tests).
    #[cfg(test)]
    pub fn spawn_test_hostile(&mut self, kind: HostileKind, at: Position) -> hecs::Entity {
        let archetype = match kind {
            HostileKind::Soldier => Archetype::Soldier(1),
            HostileKind::Zombie => Archetype::Zombie(skirmish_core::enums::ZombieKind::Zombie01),
        };
        let wave = self.waves.wave.max(1);
        let entity = world_setup::spawn_hostile(
            &mut self.world,
            &mut self.rng,
            kind,
            archetype,
            at,
            wave,
            self.catalog.as_ref(),
        );
        match kind {
            HostileKind::Soldier => self.rosters.enemies.push(entity),
            HostileKind::Zombie => self.rosters.zombies.push(entity),
        }
        entity
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single session command.
    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::StartGame { hero } => {
                if matches!(self.phase, GamePhase::Menu | GamePhase::GameOver) {
                    self.start_game(hero);
                }
            }
            SessionCommand::ResetGame => {
                self.rosters.clear(&mut self.world);
                self.waves = WaveState::default();
                self.time = SimTime::default();
                self.phase = GamePhase::Menu;
                log::info!("session reset");
            }
            SessionCommand::Pause => {
                if self.phase == GamePhase::Playing {
                    self.phase = GamePhase::Paused;
                }
            }
            SessionCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Playing;
                }
            }
        }
    }

    fn start_game(&mut self, hero: Archetype) {
        self.rosters.clear(&mut self.world);
        self.time = SimTime::default();
        self.waves = WaveState {
            wave: 1,
            ..Default::default()
        };

        let center = Position::new(self.config.world_width / 2.0, self.config.world_height / 2.0);
        let player = world_setup::spawn_player(&mut self.world, hero, center, self.catalog.as_ref());
        self.rosters.player = Some(player);

        systems::wave_spawner::spawn_wave(
            &mut self.world,
            &mut self.rosters,
            &mut self.rng,
            1,
            0,
            &self.config,
            self.catalog.as_ref(),
            &mut self.events,
        );

        self.phase = GamePhase::Playing;
        log::info!("game started as {}", hero.sheet());
    }

    /// Run all systems in phase order.
    fn run_systems(&mut self, dt: f64, input: &InputSnapshot) {
        let bounds = WorldView {
            width: self.config.world_width,
            height: self.config.world_height,
        };
        let catalog = self.catalog.as_ref();

        // Anything spawned from here on first updates next tick.
        let bullet_count = self.rosters.bullets.len();
        let particle_count = self.rosters.particles.len();

        // 1. Player
        let player_alive = systems::player::run(
            &mut self.world,
            &mut self.rosters,
            input,
            dt,
            &self.config,
            &bounds,
            catalog,
            &mut self.events,
        );
        if !player_alive {
            self.game_over();
            return;
        }
        // 2. Soldiers
        systems::hostile_ai::run(
            &mut self.world,
            &mut self.rosters,
            HostileKind::Soldier,
            dt,
            &mut self.rng,
            &bounds,
            catalog,
            &mut self.events,
        );
        // 3. Zombies
        systems::hostile_ai::run(
            &mut self.world,
            &mut self.rosters,
            HostileKind::Zombie,
            dt,
            &mut self.rng,
            &bounds,
            catalog,
            &mut self.events,
        );
        // 4. Bullets
        systems::projectile::run(
            &mut self.world,
            &mut self.rosters,
            bullet_count,
            dt,
            &bounds,
            &mut self.rng,
            &mut self.events,
        );
        // 5. Particles
        systems::particles::run(&mut self.world, &self.rosters, particle_count, dt, &self.config);
        // 6. Roster pruning
        systems::cleanup::run(
            &mut self.world,
            &mut self.rosters,
            &mut self.rng,
            catalog,
            &mut self.despawn_buffer,
        );
        // 7. Wave check
        systems::wave_spawner::run(
            &mut self.world,
            &mut self.rosters,
            &mut self.rng,
            &mut self.waves,
            &self.config,
            dt,
            catalog,
            &mut self.events,
        );
    }

    fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        let score = self.score();
        self.events.push(GameEvent::PlayerDied {
            score,
            wave: self.waves.wave,
        });
        log::info!("game over: score {score}, wave {}", self.waves.wave);
    }

    /// Whether the player entity exists and is alive.
    pub fn player_alive(&self) -> bool {
        self.rosters
            .player
            .is_some_and(|p| self.world.get::<&Actor>(p).is_ok_and(|a| a.alive))
    }
}
