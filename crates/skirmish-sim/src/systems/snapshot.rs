//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only and never modifies the world.

use hecs::{Entity, World};

use skirmish_core::animation::Animator;
use skirmish_core::components::*;
use skirmish_core::config::GameConfig;
use skirmish_core::constants::{BULLET_SPRITE, PARTICLE_FADE_SPAN};
use skirmish_core::enums::GamePhase;
use skirmish_core::events::GameEvent;
use skirmish_core::state::*;
use skirmish_core::types::{Health, Position, SimTime};

use crate::roster::{handle_of, Rosters};
use crate::systems::wave_spawner::WaveState;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    rosters: &Rosters,
    time: &SimTime,
    phase: GamePhase,
    waves: &WaveState,
    config: &GameConfig,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    let world_view = WorldView {
        width: config.world_width,
        height: config.world_height,
    };
    let focus = rosters
        .player
        .and_then(|p| world.get::<&Position>(p).ok().map(|pos| *pos))
        .unwrap_or_default();

    GameStateSnapshot {
        time: *time,
        phase,
        world: world_view,
        camera: CameraView::follow(&focus, config.viewport_width, config.viewport_height, &world_view),
        actors: build_actors(world, rosters),
        bullets: build_bullets(world, rosters),
        particles: build_particles(world, rosters),
        player: rosters.player.and_then(|p| build_player(world, p)),
        wave: build_wave(world, rosters, phase, waves, config),
        events,
    }
}

/// Actor views in depth order (smaller y first).
fn build_actors(world: &World, rosters: &Rosters) -> Vec<ActorView> {
    let mut actors: Vec<ActorView> = rosters
        .actors()
        .filter_map(|entity| build_actor(world, entity))
        .collect();

    actors.sort_by(|a, b| a.position.y.total_cmp(&b.position.y));
    actors
}

fn build_actor(world: &World, entity: Entity) -> Option<ActorView> {
    let mut query = world
        .query_one::<(&Actor, &Position, &Body, &Health, &Animator, &Behavior)>(entity)
        .ok()?;
    let (actor, pos, body, health, animator, behavior) = query.get()?;

    let ai_state = match behavior {
        Behavior::RangedAi(brain) | Behavior::MeleeAi(brain) => Some(brain.state),
        Behavior::PlayerControlled(_) => None,
    };

    Some(ActorView {
        id: handle_of(entity).to_bits(),
        archetype: actor.archetype,
        team: actor.team,
        position: *pos,
        width: body.width,
        height: body.height,
        facing_right: actor.facing_right,
        alive: actor.alive,
        frame: animator.current_frame().map(String::from),
        anim: animator.current_state(),
        fallback_color: team_color(actor.team).to_string(),
        health: health.current,
        max_health: health.max,
        health_bar: HealthBar::for_health(health, actor.alive),
        ai_state,
    })
}

fn build_bullets(world: &World, rosters: &Rosters) -> Vec<BulletView> {
    rosters
        .bullets
        .iter()
        .filter_map(|&entity| {
            let mut query = world.query_one::<(&Bullet, &Position, &Body)>(entity).ok()?;
            let (bullet, pos, body) = query.get()?;
            if bullet.spent {
                return None;
            }
            Some(BulletView {
                position: *pos,
                angle: bullet.angle,
                width: body.width,
                height: body.height,
                team: bullet.team,
                sprite: BULLET_SPRITE.to_string(),
                fallback_color: "#ffcc00".to_string(),
                trail: bullet
                    .trail
                    .faded()
                    .map(|(position, alpha)| TrailPoint { position, alpha })
                    .collect(),
            })
        })
        .collect()
}

fn build_particles(world: &World, rosters: &Rosters) -> Vec<ParticleView> {
    rosters
        .particles
        .iter()
        .filter_map(|&entity| {
            let mut query = world.query_one::<(&Particle, &Position)>(entity).ok()?;
            let (particle, pos) = query.get()?;
            if particle.expired {
                return None;
            }
            let (frame, alpha) = match &particle.motion {
                ParticleMotion::Animated(animation) => (animation.current_frame().map(String::from), 1.0),
                ParticleMotion::Ballistic { remaining, .. } => {
                    (None, (remaining / PARTICLE_FADE_SPAN).clamp(0.0, 1.0))
                }
            };
            Some(ParticleView {
                kind: particle.kind,
                position: *pos,
                width: particle.width,
                height: particle.height,
                frame,
                color: particle.color.clone(),
                alpha,
            })
        })
        .collect()
}

fn build_player(world: &World, player: Entity) -> Option<PlayerView> {
    let mut query = world.query_one::<(&Actor, &Health, &Behavior)>(player).ok()?;
    let (actor, health, behavior) = query.get()?;
    let Behavior::PlayerControlled(pilot) = behavior else {
        return None;
    };

    Some(PlayerView {
        health: health.current,
        max_health: health.max,
        score: pilot.score,
        kills: pilot.kills,
        aim_angle: pilot.aim_angle,
        alive: actor.alive,
    })
}

fn build_wave(
    world: &World,
    rosters: &Rosters,
    phase: GamePhase,
    waves: &WaveState,
    config: &GameConfig,
) -> WaveView {
    let alive_soldiers = rosters.alive_enemies(world);
    let alive_zombies = rosters.alive_zombies(world);
    let cleared = phase != GamePhase::Menu && alive_soldiers == 0 && alive_zombies == 0;

    WaveView {
        wave: waves.wave,
        alive_soldiers,
        alive_zombies,
        cleared,
        next_wave_in_secs: if cleared {
            (config.waves.delay_secs - waves.timer).max(0.0)
        } else {
            0.0
        },
        next_wave_bonus: config.waves.bonus(waves.wave + 1),
    }
}
