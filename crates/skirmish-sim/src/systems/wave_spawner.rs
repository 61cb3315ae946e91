//! Wave director: paces hostile waves on full clearance plus a delay.

use std::f64::consts::TAU;

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_ai::profiles::HostileKind;
use skirmish_core::animation::SpriteCatalog;
use skirmish_core::config::GameConfig;
use skirmish_core::constants::*;
use skirmish_core::enums::{Archetype, ZombieKind};
use skirmish_core::events::GameEvent;
use skirmish_core::types::{Health, Position};

use crate::roster::Rosters;
use crate::systems::combat;
use crate::world_setup;

/// Wave progress owned by the engine.
#[derive(Debug, Clone, Default)]
pub struct WaveState {
    /// Current wave number (0 before the first spawn).
    pub wave: u32,
    /// Seconds every hostile has been down without interruption.
    pub timer: f64,
    /// Whether `WaveCleared` was already emitted for the current lull.
    pub announced_clear: bool,
}

/// Check clearance and spawn the next wave when the delay elapsed.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rosters: &mut Rosters,
    rng: &mut ChaCha8Rng,
    state: &mut WaveState,
    config: &GameConfig,
    dt: f64,
    catalog: &dyn SpriteCatalog,
    events: &mut Vec<GameEvent>,
) {
    let alive = rosters.alive_enemies(world) + rosters.alive_zombies(world);
    if alive > 0 {
        state.timer = 0.0;
        state.announced_clear = false;
        return;
    }

    if !state.announced_clear {
        state.announced_clear = true;
        events.push(GameEvent::WaveCleared { wave: state.wave });
        log::info!("wave {} cleared", state.wave);
    }

    state.timer += dt;
    if state.timer < config.waves.delay_secs {
        return;
    }

    state.timer = 0.0;
    state.announced_clear = false;
    state.wave += 1;

    let bonus = config.waves.bonus(state.wave);
    combat::award_score(world, rosters.player, bonus);
    if let Some(player) = rosters.player {
        if let Ok(mut health) = world.get::<&mut Health>(player) {
            health.heal(config.waves.heal);
        }
    }

    spawn_wave(world, rosters, rng, state.wave, bonus, config, catalog, events);
}

/// Spawn the soldiers and zombies of `wave` on rings around the player.
#[allow(clippy::too_many_arguments)]
pub fn spawn_wave(
    world: &mut World,
    rosters: &mut Rosters,
    rng: &mut ChaCha8Rng,
    wave: u32,
    bonus: u64,
    config: &GameConfig,
    catalog: &dyn SpriteCatalog,
    events: &mut Vec<GameEvent>,
) {
    let center = rosters
        .player
        .and_then(|p| world.get::<&Position>(p).ok().map(|pos| *pos))
        .unwrap_or_else(|| Position::new(config.world_width / 2.0, config.world_height / 2.0));

    let soldiers = config.waves.soldier_count(wave);
    let zombies = config.waves.zombie_count(wave);

    for i in 0..soldiers {
        let angle = TAU / soldiers as f64 * i as f64 + rng.gen_range(0.0..SOLDIER_SPAWN_JITTER);
        let distance = rng.gen_range(SOLDIER_SPAWN_MIN_RADIUS..SOLDIER_SPAWN_MAX_RADIUS);
        let at = clamp_to_field(center.offset(angle, distance), config);
        let archetype = Archetype::Soldier(rng.gen_range(1..=4));
        let entity =
            world_setup::spawn_hostile(world, rng, HostileKind::Soldier, archetype, at, wave, catalog);
        rosters.enemies.push(entity);
    }

    for _ in 0..zombies {
        let angle = rng.gen_range(0.0..TAU);
        let distance = rng.gen_range(ZOMBIE_SPAWN_MIN_RADIUS..ZOMBIE_SPAWN_MAX_RADIUS);
        let at = clamp_to_field(center.offset(angle, distance), config);
        let kind = ZombieKind::ALL[rng.gen_range(0..ZombieKind::ALL.len())];
        let entity = world_setup::spawn_hostile(
            world,
            rng,
            HostileKind::Zombie,
            Archetype::Zombie(kind),
            at,
            wave,
            catalog,
        );
        rosters.zombies.push(entity);
    }

    events.push(GameEvent::WaveStarted {
        wave,
        soldiers,
        zombies,
        bonus,
    });
    log::info!("wave {wave}: spawning {soldiers} soldiers and {zombies} zombies");
}

/// Keep spawns a margin away from the world edge.
fn clamp_to_field(at: Position, config: &GameConfig) -> Position {
    Position::new(
        at.x.min(config.world_width - SPAWN_EDGE_MARGIN).max(SPAWN_EDGE_MARGIN),
        at.y.min(config.world_height - SPAWN_EDGE_MARGIN).max(SPAWN_EDGE_MARGIN),
    )
}
