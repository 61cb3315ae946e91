//! Tests for the simulation engine, combat, wave pacing and session flow.

use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish_ai::profiles::HostileKind;
use skirmish_core::animation::Animator;
use skirmish_core::commands::SessionCommand;
use skirmish_core::components::{Actor, Behavior, Brain, Bullet, Pilot};
use skirmish_core::config::GameConfig;
use skirmish_core::constants::*;
use skirmish_core::enums::*;
use skirmish_core::events::GameEvent;
use skirmish_core::input::InputSnapshot;
use skirmish_core::types::{Health, Position, Velocity};

use crate::engine::{SimConfig, SimulationEngine};
use crate::systems::combat;
use crate::world_setup;

const DT: f64 = 1.0 / 60.0;

fn start(engine: &mut SimulationEngine) {
    engine.queue_command(SessionCommand::StartGame {
        hero: Archetype::Hero(1),
    });
    engine.tick(0.0, &InputSnapshot::default());
}

/// A started game with no hostiles and a wave delay long enough to never fire.
fn quiet_engine() -> SimulationEngine {
    let mut game = GameConfig::default();
    game.waves.delay_secs = 1000.0;
    let mut engine = SimulationEngine::new(SimConfig::from_game(game));
    start(&mut engine);
    engine.clear_hostiles();
    engine
}

fn player(engine: &SimulationEngine) -> hecs::Entity {
    engine.rosters().player.expect("player spawned")
}

fn place(engine: &mut SimulationEngine, entity: hecs::Entity, at: Position) {
    *engine.world_mut().get::<&mut Position>(entity).unwrap() = at;
}

fn health(engine: &SimulationEngine, entity: hecs::Entity) -> Health {
    *engine.world().get::<&Health>(entity).unwrap()
}

fn pilot(engine: &SimulationEngine) -> Pilot {
    match &*engine.world().get::<&Behavior>(player(engine)).unwrap() {
        Behavior::PlayerControlled(pilot) => pilot.clone(),
        _ => panic!("player without pilot"),
    }
}

fn brain(engine: &SimulationEngine, entity: hecs::Entity) -> Brain {
    match &*engine.world().get::<&Behavior>(entity).unwrap() {
        Behavior::RangedAi(brain) | Behavior::MeleeAi(brain) => brain.clone(),
        _ => panic!("hostile without brain"),
    }
}

fn fire_cooldown(engine: &SimulationEngine) -> f64 {
    pilot(engine).fire_cooldown
}

fn velocity(engine: &SimulationEngine, entity: hecs::Entity) -> Velocity {
    *engine.world().get::<&Velocity>(entity).unwrap()
}

fn clip(engine: &SimulationEngine) -> Option<AnimState> {
    engine
        .world()
        .get::<&Animator>(player(engine))
        .unwrap()
        .current_state()
}

fn held(keys: impl FnOnce(&mut InputSnapshot)) -> InputSnapshot {
    let mut input = InputSnapshot::default();
    keys(&mut input);
    input
}

fn add_bullet(engine: &mut SimulationEngine, at: Position, angle: f64, team: Team) -> hecs::Entity {
    let bullet = world_setup::spawn_bullet(engine.world_mut(), at, angle, team, BULLET_DAMAGE);
    engine.rosters_mut().bullets.push(bullet);
    bullet
}

// ---- Session flow ----

#[test]
fn test_start_game_spawns_player_and_first_wave() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    assert_eq!(engine.phase(), GamePhase::Menu);

    engine.queue_command(SessionCommand::StartGame {
        hero: Archetype::Hero(3),
    });
    let snap = engine.tick(DT, &InputSnapshot::default());

    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(engine.wave(), 1);
    let waves = &engine.config().waves;
    assert_eq!(engine.rosters().enemies.len() as u32, waves.soldier_count(1));
    assert_eq!(engine.rosters().zombies.len() as u32, waves.zombie_count(1));
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::WaveStarted { wave: 1, bonus: 0, .. })));

    let player = snap.player.expect("player view");
    assert_eq!(player.health, PLAYER_MAX_HEALTH);
    assert_eq!(player.score, 0);
}

#[test]
fn test_player_starts_at_world_center() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    start(&mut engine);

    let pos = *engine.world().get::<&Position>(player(&engine)).unwrap();
    assert_eq!(pos, Position::new(WORLD_WIDTH / 2.0, WORLD_HEIGHT / 2.0));
}

#[test]
fn test_start_ignored_while_playing() {
    let mut engine = quiet_engine();
    let before = player(&engine);

    engine.queue_command(SessionCommand::StartGame {
        hero: Archetype::Hero(2),
    });
    engine.tick(DT, &InputSnapshot::default());

    assert_eq!(player(&engine), before);
    assert!(engine.rosters().enemies.is_empty());
}

#[test]
fn test_reset_returns_to_menu() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    start(&mut engine);
    for _ in 0..10 {
        engine.tick(DT, &InputSnapshot::default());
    }

    engine.queue_command(SessionCommand::ResetGame);
    let snap = engine.tick(DT, &InputSnapshot::default());

    assert_eq!(snap.phase, GamePhase::Menu);
    assert_eq!(engine.wave(), 0);
    assert!(engine.world().is_empty());
    assert!(snap.actors.is_empty());
    assert!(snap.player.is_none());
    assert!(!snap.wave.cleared);
}

#[test]
fn test_pause_freezes_world() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    start(&mut engine);
    engine.tick(DT, &InputSnapshot::default());

    engine.queue_command(SessionCommand::Pause);
    let paused = engine.tick(DT, &InputSnapshot::default());
    let frozen = serde_json::to_string(&paused.actors).unwrap();
    for _ in 0..30 {
        let snap = engine.tick(DT, &InputSnapshot::default());
        assert_eq!(snap.phase, GamePhase::Paused);
        assert_eq!(snap.time.tick, paused.time.tick);
        assert_eq!(serde_json::to_string(&snap.actors).unwrap(), frozen);
    }

    engine.queue_command(SessionCommand::Resume);
    let resumed = engine.tick(DT, &InputSnapshot::default());
    assert_eq!(resumed.phase, GamePhase::Playing);
    assert_eq!(resumed.time.tick, paused.time.tick + 1);
}

#[test]
fn test_long_frame_is_clamped() {
    let mut engine = quiet_engine();
    let before = engine.time().elapsed_secs;

    engine.tick(5.0, &InputSnapshot::default());

    let stepped = engine.time().elapsed_secs - before;
    assert!((stepped - MAX_FRAME_DT).abs() < 1e-9, "stepped {stepped}");
}

#[test]
fn test_long_frame_cannot_tunnel_bullets() {
    let mut engine = quiet_engine();
    let bullet = add_bullet(&mut engine, Position::new(100.0, 100.0), 0.0, Team::Enemy);

    engine.tick(5.0, &InputSnapshot::default());

    let pos = *engine.world().get::<&Position>(bullet).unwrap();
    assert!((pos.x - (100.0 + BULLET_SPEED * MAX_FRAME_DT)).abs() < 1e-9);
}

#[test]
fn test_negative_elapsed_or_frame_cap_steps_nothing() {
    let mut game = GameConfig::default();
    game.waves.delay_secs = 1000.0;
    game.max_frame_dt = -1.0;
    let mut engine = SimulationEngine::new(SimConfig::from_game(game));
    start(&mut engine);

    engine.tick(DT, &InputSnapshot::default());
    assert_eq!(engine.time().elapsed_secs, 0.0);

    let mut engine = quiet_engine();
    engine.tick(-1.0, &InputSnapshot::default());
    assert_eq!(engine.time().elapsed_secs, 0.0);
    assert_eq!(engine.phase(), GamePhase::Playing);
}

#[test]
fn test_cleared_field_has_nothing_in_flight() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    start(&mut engine);
    engine.tick(DT, &InputSnapshot::default().with_fire(true));

    engine.clear_hostiles();

    assert!(engine.rosters().bullets.is_empty());
    assert!(engine.rosters().particles.is_empty());
    assert_eq!(engine.world().len(), 1);
}

// ---- Player ----

#[test]
fn test_fire_spawns_one_bullet_and_starts_cooldown() {
    let mut engine = quiet_engine();
    let p = player(&engine);
    place(&mut engine, p, Position::new(100.0, 100.0));

    let input = InputSnapshot::aiming_at(200.0, 100.0).with_fire(true);
    let snap = engine.tick(DT, &input);

    assert_eq!(engine.rosters().bullets.len(), 1);
    let bullet_entity = engine.rosters().bullets[0];
    let bullet = engine.world().get::<&Bullet>(bullet_entity).unwrap();
    assert_eq!(bullet.team, Team::Player);
    assert!(bullet.angle.abs() < 1e-12);
    drop(bullet);
    assert!((fire_cooldown(&engine) - PLAYER_FIRE_INTERVAL).abs() < 1e-12);

    // Fired this tick, so it has not moved off the muzzle yet.
    let origin = Position::new(132.0 + PLAYER_MUZZLE_OFFSET, 132.0);
    assert_eq!(snap.bullets.len(), 1);
    assert!(snap.bullets[0].position.distance_to(&origin) < 1e-9);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::ShotFired { team: Team::Player, .. })));
    assert!(snap.particles.iter().any(|p| p.kind == ParticleKind::Muzzle));

    // Holding the trigger does not fire again inside the interval.
    engine.tick(DT, &input);
    assert_eq!(engine.rosters().bullets.len(), 1);
}

#[test]
fn test_fire_repeats_after_interval() {
    let mut engine = quiet_engine();
    let p = player(&engine);
    place(&mut engine, p, Position::new(100.0, 100.0));
    let input = InputSnapshot::aiming_at(900.0, 100.0).with_fire(true);

    // 0.25s interval at 0.05s ticks: the second shot lands on tick 6 or 7.
    for _ in 0..7 {
        engine.tick(0.05, &input);
    }
    assert_eq!(engine.rosters().bullets.len(), 2);
}

#[test]
fn test_pointer_sets_facing() {
    let mut engine = quiet_engine();
    let p = player(&engine);
    place(&mut engine, p, Position::new(500.0, 500.0));

    engine.tick(DT, &InputSnapshot::aiming_at(100.0, 500.0));
    assert!(!engine.world().get::<&Actor>(p).unwrap().facing_right);

    engine.tick(DT, &InputSnapshot::aiming_at(900.0, 500.0));
    assert!(engine.world().get::<&Actor>(p).unwrap().facing_right);
}

#[test]
fn test_player_clamped_to_world() {
    let mut engine = quiet_engine();
    let p = player(&engine);
    place(&mut engine, p, Position::new(1.0, 1.0));

    let input = InputSnapshot {
        left: true,
        up: true,
        ..Default::default()
    };
    for _ in 0..10 {
        engine.tick(DT, &input);
    }

    let pos = *engine.world().get::<&Position>(p).unwrap();
    assert_eq!(pos, Position::new(0.0, 0.0));
}

#[test]
fn test_steering_speed_and_release_damping() {
    let mut engine = quiet_engine();
    let p = player(&engine);
    place(&mut engine, p, Position::new(500.0, 500.0));

    engine.tick(DT, &held(|i| i.right = true));
    assert_eq!(velocity(&engine, p).x, PLAYER_SPEED);

    engine.tick(DT, &held(|i| i.left = true));
    assert_eq!(velocity(&engine, p).x, -PLAYER_SPEED);
    assert!(!engine.world().get::<&Actor>(p).unwrap().facing_right);

    engine.tick(DT, &held(|i| i.down = true));
    let vel = velocity(&engine, p);
    assert_eq!(vel.y, PLAYER_SPEED);
    assert!((vel.x + PLAYER_SPEED * PLAYER_DAMPING).abs() < 1e-9);

    engine.tick(DT, &InputSnapshot::default());
    let vel = velocity(&engine, p);
    assert!((vel.x + PLAYER_SPEED * PLAYER_DAMPING * PLAYER_DAMPING).abs() < 1e-9);
    assert!((vel.y - PLAYER_SPEED * PLAYER_DAMPING).abs() < 1e-9);
}

#[test]
fn test_crouch_pins_horizontal_motion() {
    let mut engine = quiet_engine();
    let p = player(&engine);
    place(&mut engine, p, Position::new(500.0, 500.0));
    engine.tick(DT, &held(|i| i.right = true));
    let x = engine.world().get::<&Position>(p).unwrap().x;

    engine.tick(
        DT,
        &held(|i| {
            i.right = true;
            i.crouch = true;
        }),
    );

    assert_eq!(velocity(&engine, p).x, 0.0);
    assert_eq!(engine.world().get::<&Position>(p).unwrap().x, x);
    assert!(pilot(&engine).crouching);
}

#[test]
fn test_jump_only_from_ground_and_lands_after_airtime() {
    let mut engine = quiet_engine();
    let p = player(&engine);
    place(&mut engine, p, Position::new(500.0, 500.0));
    let jump = held(|i| i.jump = true);

    engine.tick(DT, &jump);
    assert_eq!(velocity(&engine, p).y, -PLAYER_JUMP_FORCE);
    assert!(pilot(&engine).jumping);
    assert!(!pilot(&engine).grounded);

    // Holding jump in the air does not launch again.
    engine.tick(DT, &jump);
    assert!((velocity(&engine, p).y + PLAYER_JUMP_FORCE * PLAYER_DAMPING).abs() < 1e-9);

    for _ in 0..20 {
        engine.tick(DT, &InputSnapshot::default());
    }
    assert!(pilot(&engine).jumping);

    for _ in 0..12 {
        engine.tick(DT, &InputSnapshot::default());
    }
    let landed = pilot(&engine);
    assert!(!landed.jumping);
    assert!(landed.grounded);

    engine.tick(DT, &jump);
    assert_eq!(velocity(&engine, p).y, -PLAYER_JUMP_FORCE);
}

#[test]
fn test_clip_priority() {
    let mut engine = quiet_engine();
    let p = player(&engine);
    place(&mut engine, p, Position::new(500.0, 500.0));
    let aim = Some(Position::new(900.0, 532.0));

    engine.tick(
        DT,
        &held(|i| {
            i.crouch = true;
            i.fire = true;
            i.jump = true;
            i.right = true;
            i.pointer = aim;
        }),
    );
    assert_eq!(clip(&engine), Some(AnimState::Crouch));

    engine.tick(
        DT,
        &held(|i| {
            i.fire = true;
            i.jump = true;
            i.pointer = aim;
        }),
    );
    assert_eq!(clip(&engine), Some(AnimState::Shoot));

    engine.tick(DT, &held(|i| i.pointer = aim));
    assert_eq!(clip(&engine), Some(AnimState::Jump));

    for _ in 0..40 {
        engine.tick(DT, &InputSnapshot::default());
    }
    assert_eq!(clip(&engine), Some(AnimState::Idle));

    engine.tick(DT, &held(|i| i.right = true));
    assert_eq!(clip(&engine), Some(AnimState::Run));

    // 200 -> 170 -> 144.5: back under the run threshold on the second release tick.
    engine.tick(DT, &InputSnapshot::default());
    assert_eq!(clip(&engine), Some(AnimState::Run));
    engine.tick(DT, &InputSnapshot::default());
    assert_eq!(clip(&engine), Some(AnimState::Walk));
}

// ---- Bullets ----

#[test]
fn test_bullet_ignores_own_team() {
    let mut engine = quiet_engine();
    let p = player(&engine);
    place(&mut engine, p, Position::new(500.0, 500.0));
    let bullet = add_bullet(&mut engine, Position::new(520.0, 530.0), 0.0, Team::Player);

    engine.tick(DT, &InputSnapshot::default());

    assert_eq!(health(&engine, p).current, PLAYER_MAX_HEALTH);
    assert!(engine.rosters().bullets.contains(&bullet));
}

#[test]
fn test_bullet_hits_only_first_overlapping_target() {
    let mut engine = quiet_engine();
    let p = player(&engine);
    place(&mut engine, p, Position::new(100.0, 100.0));

    let first = engine.spawn_test_hostile(HostileKind::Soldier, Position::new(1500.0, 1000.0));
    let second = engine.spawn_test_hostile(HostileKind::Soldier, Position::new(1500.0, 1000.0));
    let bullet = add_bullet(&mut engine, Position::new(1510.0, 1032.0), 0.0, Team::Player);

    let snap = engine.tick(DT, &InputSnapshot::default());

    let hit = health(&engine, first);
    let spared = health(&engine, second);
    assert_eq!(hit.current, hit.max - BULLET_DAMAGE);
    assert_eq!(spared.current, spared.max);
    assert!(!engine.rosters().bullets.contains(&bullet));
    let hits = snap
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::Hit { .. }))
        .count();
    assert_eq!(hits, 1);
}

#[test]
fn test_enemy_bullet_hurts_player() {
    let mut engine = quiet_engine();
    let p = player(&engine);
    place(&mut engine, p, Position::new(500.0, 500.0));
    add_bullet(&mut engine, Position::new(490.0, 530.0), 0.0, Team::Enemy);

    engine.tick(DT, &InputSnapshot::default());

    assert_eq!(health(&engine, p).current, PLAYER_MAX_HEALTH - BULLET_DAMAGE);
}

#[test]
fn test_bullet_leaving_world_is_pruned() {
    let mut engine = quiet_engine();
    let bullet = add_bullet(&mut engine, Position::new(5.0, 100.0), std::f64::consts::PI, Team::Enemy);

    engine.tick(DT, &InputSnapshot::default());

    assert!(!engine.rosters().bullets.contains(&bullet));
    assert!(!engine.world().contains(bullet));
}

#[test]
fn test_bullet_expires_after_lifetime() {
    let mut engine = quiet_engine();
    let bullet = add_bullet(&mut engine, Position::new(100.0, 100.0), 0.0, Team::Enemy);
    engine.world_mut().get::<&mut Bullet>(bullet).unwrap().lifetime = 0.05;

    engine.tick(DT, &InputSnapshot::default());
    engine.tick(DT, &InputSnapshot::default());
    assert!(engine.rosters().bullets.contains(&bullet));

    engine.tick(DT, &InputSnapshot::default());
    engine.tick(DT, &InputSnapshot::default());
    assert!(!engine.rosters().bullets.contains(&bullet));
    assert!(!engine.world().contains(bullet));
}

// ---- Particles ----

#[test]
fn test_ballistic_particle_falls_drags_and_expires() {
    let mut engine = quiet_engine();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let drop = world_setup::spawn_blood(engine.world_mut(), &mut rng, Position::new(300.0, 300.0));
    *engine.world_mut().get::<&mut Velocity>(drop).unwrap() = Velocity::new(100.0, -100.0);
    engine.rosters_mut().particles.push(drop);

    engine.tick(DT, &InputSnapshot::default());

    let pos = *engine.world().get::<&Position>(drop).unwrap();
    assert!((pos.x - (300.0 + 100.0 * DT)).abs() < 1e-9);
    assert!((pos.y - (300.0 - 100.0 * DT)).abs() < 1e-9);
    let vel = velocity(&engine, drop);
    assert!((vel.x - 100.0 * PARTICLE_DRAG).abs() < 1e-9);
    assert!((vel.y - (-100.0 + BLOOD_GRAVITY * DT)).abs() < 1e-9);

    for _ in 0..25 {
        engine.tick(DT, &InputSnapshot::default());
    }
    assert!(engine.rosters().particles.contains(&drop));

    for _ in 0..6 {
        engine.tick(DT, &InputSnapshot::default());
    }
    assert!(!engine.rosters().particles.contains(&drop));
    assert!(!engine.world().contains(drop));
}

#[test]
fn test_kill_awards_score() {
    let mut engine = quiet_engine();
    let p = player(&engine);
    place(&mut engine, p, Position::new(100.0, 100.0));

    let zombie = engine.spawn_test_hostile(HostileKind::Zombie, Position::new(1500.0, 1000.0));
    engine.world_mut().get::<&mut Health>(zombie).unwrap().current = 10;
    add_bullet(&mut engine, Position::new(1510.0, 1028.0), 0.0, Team::Player);

    let snap = engine.tick(DT, &InputSnapshot::default());

    assert_eq!(engine.score(), KILL_SCORE);
    assert_eq!(snap.player.as_ref().map(|p| p.kills), Some(1));
    assert!(!engine.world().get::<&Actor>(zombie).unwrap().alive);
    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::Killed {
            victim: Team::Zombie,
            by: Team::Player
        }
    )));
}

#[test]
fn test_damage_to_the_dead_is_ignored() {
    let mut engine = quiet_engine();
    let zombie = engine.spawn_test_hostile(HostileKind::Zombie, Position::new(1500.0, 1000.0));
    combat::die(engine.world_mut(), zombie);

    let mut events = Vec::new();
    let outcome = combat::apply_damage(engine.world_mut(), zombie, 50, Team::Player, &mut events);

    assert_eq!(outcome, combat::HitOutcome::Ignored);
    assert!(events.is_empty());
}

// ---- Hostiles ----

#[test]
fn test_zombie_strikes_adjacent_player() {
    let mut engine = quiet_engine();
    let p = player(&engine);
    place(&mut engine, p, Position::new(500.0, 500.0));
    engine.spawn_test_hostile(HostileKind::Zombie, Position::new(520.0, 500.0));

    engine.tick(DT, &InputSnapshot::default());

    assert_eq!(health(&engine, p).current, PLAYER_MAX_HEALTH - ZOMBIE_MELEE_DAMAGE);
}

#[test]
fn test_wounded_zombie_staggers_away_then_resumes_chase() {
    let mut engine = quiet_engine();
    let p = player(&engine);
    place(&mut engine, p, Position::new(500.0, 500.0));
    let zombie = engine.spawn_test_hostile(HostileKind::Zombie, Position::new(700.0, 500.0));

    engine.tick(DT, &InputSnapshot::default());
    assert!(velocity(&engine, zombie).x < 0.0, "chasing toward the player");

    let mut events = Vec::new();
    let outcome = combat::apply_damage(engine.world_mut(), zombie, 10, Team::Player, &mut events);
    assert_eq!(outcome, combat::HitOutcome::Wounded);
    assert!((velocity(&engine, zombie).x - ZOMBIE_KNOCKBACK_SPEED).abs() < 1e-9);
    assert_eq!(brain(&engine, zombie).stagger, ZOMBIE_STAGGER_SECS);

    let x = engine.world().get::<&Position>(zombie).unwrap().x;
    engine.tick(DT, &InputSnapshot::default());
    assert!(engine.world().get::<&Position>(zombie).unwrap().x > x);
    assert!((velocity(&engine, zombie).x - ZOMBIE_KNOCKBACK_SPEED).abs() < 1e-9);

    for _ in 0..15 {
        engine.tick(DT, &InputSnapshot::default());
    }
    assert!(velocity(&engine, zombie).x < 0.0, "stagger over, chasing again");
}

#[test]
fn test_soldier_in_range_fires_at_player() {
    let mut engine = quiet_engine();
    let p = player(&engine);
    place(&mut engine, p, Position::new(500.0, 500.0));
    engine.spawn_test_hostile(HostileKind::Soldier, Position::new(700.0, 500.0));

    let snap = engine.tick(DT, &InputSnapshot::default());

    assert_eq!(engine.rosters().bullets.len(), 1);
    let bullet = engine.world().get::<&Bullet>(engine.rosters().bullets[0]).unwrap();
    assert_eq!(bullet.team, Team::Enemy);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::ShotFired { team: Team::Enemy, .. })));
}

#[test]
fn test_dead_hostile_pruned_after_linger() {
    // No sprites at all: the death clip never plays, so only the linger timer prunes.
    let mut game = GameConfig::default();
    game.waves.delay_secs = 1000.0;
    let catalog = Box::new(HashSet::<String>::new());
    let mut engine = SimulationEngine::with_catalog(SimConfig::from_game(game), catalog);
    start(&mut engine);
    engine.clear_hostiles();

    let zombie = engine.spawn_test_hostile(HostileKind::Zombie, Position::new(1500.0, 1000.0));
    combat::die(engine.world_mut(), zombie);

    for _ in 0..5 {
        engine.tick(0.1, &InputSnapshot::default());
    }
    assert!(engine.rosters().zombies.contains(&zombie));
    let before = engine.rosters().particles.len();

    for _ in 0..7 {
        engine.tick(0.1, &InputSnapshot::default());
    }
    assert!(!engine.rosters().zombies.contains(&zombie));
    assert!(!engine.world().contains(zombie));
    assert!(engine.rosters().particles.len() > before);
}

#[test]
fn test_dead_hostile_pruned_when_death_clip_ends() {
    let mut engine = quiet_engine();
    let soldier = engine.spawn_test_hostile(HostileKind::Soldier, Position::new(1500.0, 1000.0));
    combat::die(engine.world_mut(), soldier);

    // One-frame death clip at 8 fps finishes on the second 0.1s tick.
    engine.tick(0.1, &InputSnapshot::default());
    assert!(engine.rosters().enemies.contains(&soldier));
    let snap = engine.tick(0.1, &InputSnapshot::default());
    assert!(!engine.rosters().enemies.contains(&soldier));
    assert!(snap.particles.iter().any(|p| p.kind == ParticleKind::Explosion));
}

// ---- Waves ----

#[test]
fn test_wave_timer_restarts_when_hostile_appears() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    start(&mut engine);
    engine.clear_hostiles();

    for _ in 0..20 {
        engine.tick(0.1, &InputSnapshot::default());
    }
    assert_eq!(engine.wave(), 1);

    // A live hostile interrupts the lull and resets the countdown.
    let zombie = engine.spawn_test_hostile(HostileKind::Zombie, Position::new(100.0, 100.0));
    engine.tick(0.1, &InputSnapshot::default());
    combat::die(engine.world_mut(), zombie);

    for _ in 0..25 {
        engine.tick(0.1, &InputSnapshot::default());
    }
    assert_eq!(engine.wave(), 1);

    let mut started = false;
    for _ in 0..10 {
        let snap = engine.tick(0.1, &InputSnapshot::default());
        started |= snap
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::WaveStarted { wave: 2, .. }));
    }
    assert!(started);
    assert_eq!(engine.wave(), 2);
    assert_eq!(engine.score(), engine.config().waves.bonus(2));
}

#[test]
fn test_wave_clear_heals_player() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    start(&mut engine);
    engine.clear_hostiles();
    let p = player(&engine);
    engine.world_mut().get::<&mut Health>(p).unwrap().current = 50;

    for _ in 0..40 {
        engine.tick(0.1, &InputSnapshot::default());
    }

    assert_eq!(engine.wave(), 2);
    assert_eq!(health(&engine, p).current, 50 + WAVE_HEAL);
}

#[test]
fn test_cleared_snapshot_reports_countdown() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    start(&mut engine);
    engine.clear_hostiles();

    let snap = engine.tick(0.1, &InputSnapshot::default());

    assert!(snap.wave.cleared);
    assert_eq!(snap.wave.alive_soldiers, 0);
    assert!((snap.wave.next_wave_in_secs - (WAVE_DELAY - 0.1)).abs() < 1e-9);
    assert_eq!(snap.wave.next_wave_bonus, engine.config().waves.bonus(2));
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::WaveCleared { wave: 1 })));
}

// ---- Game over ----

#[test]
fn test_player_death_ends_game() {
    let mut engine = quiet_engine();
    let p = player(&engine);
    let mut events = Vec::new();
    combat::apply_damage(engine.world_mut(), p, 1000, Team::Zombie, &mut events);

    let snap = engine.tick(DT, &InputSnapshot::default());

    assert_eq!(snap.phase, GamePhase::GameOver);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::PlayerDied { score: 0, wave: 1 })));

    let frozen = engine.time().tick;
    engine.tick(DT, &InputSnapshot::default());
    assert_eq!(engine.time().tick, frozen);

    // A new game may start from the game-over screen.
    engine.queue_command(SessionCommand::StartGame {
        hero: Archetype::Hero(1),
    });
    engine.tick(DT, &InputSnapshot::default());
    assert_eq!(engine.phase(), GamePhase::Playing);
    assert!(engine.player_alive());
    assert_eq!(engine.score(), 0);
}

// ---- Snapshot ----

#[test]
fn test_actors_sorted_by_depth() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    start(&mut engine);
    let snap = engine.tick(DT, &InputSnapshot::default());

    assert!(!snap.actors.is_empty());
    for pair in snap.actors.windows(2) {
        assert!(pair[0].position.y <= pair[1].position.y);
    }
    assert_eq!(snap.actors.iter().filter(|a| a.team == Team::Player).count(), 1);
}

#[test]
fn test_camera_follows_player() {
    let mut engine = quiet_engine();
    let p = player(&engine);
    place(&mut engine, p, Position::new(1000.0, 750.0));

    let snap = engine.tick(DT, &InputSnapshot::default());

    assert_eq!(snap.camera.x, 1000.0 - VIEWPORT_WIDTH / 2.0);
    assert_eq!(snap.camera.y, 750.0 - VIEWPORT_HEIGHT / 2.0);
}

// ---- Determinism ----

fn scripted_input(tick: usize) -> InputSnapshot {
    InputSnapshot {
        left: tick % 120 < 60,
        right: tick % 120 >= 60,
        fire: tick % 3 == 0,
        pointer: Some(Position::new(200.0 + tick as f64, 300.0)),
        ..Default::default()
    }
}

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    start(&mut engine_a);
    start(&mut engine_b);

    for i in 0..300 {
        let input = scripted_input(i);
        let snap_a = engine_a.tick(DT, &input);
        let snap_b = engine_b.tick(DT, &input);

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed at tick {i}");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });
    start(&mut engine_a);
    start(&mut engine_b);

    let snap_a = engine_a.tick(DT, &InputSnapshot::default());
    let snap_b = engine_b.tick(DT, &InputSnapshot::default());
    assert_ne!(
        serde_json::to_string(&snap_a.actors).unwrap(),
        serde_json::to_string(&snap_b.actors).unwrap(),
        "Different seeds should place the first wave differently"
    );
}
