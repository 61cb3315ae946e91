//! Entity spawn factories for the simulation world.
//!
//! Creates the player, hostiles, bullets and particles with the
//! appropriate component bundles. Callers add the returned entity to the
//! matching roster.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_ai::profiles::{get_profile, AttackStyle, HostileKind};
use skirmish_core::animation::{Animation, Animator, SpriteCatalog};
use skirmish_core::components::*;
use skirmish_core::constants::*;
use skirmish_core::enums::*;
use skirmish_core::types::{Health, Position, Velocity};

/// Spawn the player with full health, grounded, ready to fire.
pub fn spawn_player(
    world: &mut World,
    hero: Archetype,
    position: Position,
    catalog: &dyn SpriteCatalog,
) -> Entity {
    let pilot = Pilot {
        speed: PLAYER_SPEED,
        jump_force: PLAYER_JUMP_FORCE,
        grounded: true,
        fire_interval: PLAYER_FIRE_INTERVAL,
        ..Default::default()
    };

    world.spawn((
        fresh_actor(hero, Team::Player),
        position,
        Velocity::zero(),
        Body {
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
        },
        Health::full(PLAYER_MAX_HEALTH),
        Animator::for_archetype(hero, catalog),
        Behavior::PlayerControlled(pilot),
    ))
}

/// Spawn a soldier or zombie with stats stamped for `wave`.
pub fn spawn_hostile(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    kind: HostileKind,
    archetype: Archetype,
    position: Position,
    wave: u32,
    catalog: &dyn SpriteCatalog,
) -> Entity {
    let profile = get_profile(kind);
    let brain = profile.stamp_brain(wave, rng);
    let behavior = match profile.attack_style {
        AttackStyle::Ranged => Behavior::RangedAi(brain),
        AttackStyle::Melee => Behavior::MeleeAi(brain),
    };

    world.spawn((
        fresh_actor(archetype, profile.team),
        position,
        Velocity::zero(),
        Body {
            width: profile.size,
            height: profile.size,
        },
        Health::full(profile.health_for_wave(wave)),
        Animator::for_archetype(archetype, catalog),
        behavior,
    ))
}

fn fresh_actor(archetype: Archetype, team: Team) -> Actor {
    Actor {
        archetype,
        team,
        facing_right: true,
        alive: true,
        dead_for: 0.0,
    }
}

/// Spawn a bullet at `origin` travelling along `angle`.
pub fn spawn_bullet(world: &mut World, origin: Position, angle: f64, team: Team, damage: i32) -> Entity {
    world.spawn((
        Bullet {
            team,
            angle,
            damage,
            lifetime: BULLET_LIFETIME,
            spent: false,
            trail: Trail::with_capacity(BULLET_TRAIL_LENGTH),
        },
        origin,
        Velocity::from_angle(angle, BULLET_SPEED),
        Body {
            width: BULLET_WIDTH,
            height: BULLET_HEIGHT,
        },
    ))
}

/// Spawn a frame-sequence effect (explosion or muzzle flash) centred on `center`.
pub fn spawn_effect(
    world: &mut World,
    kind: ParticleKind,
    center: Position,
    catalog: &dyn SpriteCatalog,
) -> Entity {
    let size = match kind {
        ParticleKind::Explosion => EXPLOSION_SIZE,
        _ => MUZZLE_SIZE,
    };

    world.spawn((
        Particle {
            kind,
            width: size,
            height: size,
            motion: ParticleMotion::Animated(Animation::effect(kind, catalog)),
            color: None,
            expired: false,
        },
        center,
        Velocity::zero(),
    ))
}

/// Spawn a warm-coloured spark flying in a random direction.
pub fn spawn_spark(world: &mut World, rng: &mut ChaCha8Rng, center: Position) -> Entity {
    let velocity = Velocity::new(
        rng.gen_range(-0.5..0.5) * SPARK_SPEED,
        rng.gen_range(-0.5..0.5) * SPARK_SPEED,
    );
    let color = format!(
        "hsl({:.0}, 100%, {:.0}%)",
        rng.gen_range(30.0..60.0),
        rng.gen_range(50.0..100.0)
    );

    world.spawn((
        Particle {
            kind: ParticleKind::Spark,
            width: SPARK_SIZE,
            height: SPARK_SIZE,
            motion: ParticleMotion::Ballistic {
                gravity: 0.0,
                remaining: SPARK_LIFETIME,
            },
            color: Some(color),
            expired: false,
        },
        center,
        velocity,
    ))
}

/// Spawn a blood droplet thrown upward and pulled down by gravity.
pub fn spawn_blood(world: &mut World, rng: &mut ChaCha8Rng, center: Position) -> Entity {
    let velocity = Velocity::new(
        rng.gen_range(-0.5..0.5) * BLOOD_SPREAD,
        -rng.gen_range(BLOOD_LIFT_MIN..BLOOD_LIFT_MAX),
    );
    let color = format!(
        "hsla(0, 70%, {:.0}%, {:.2})",
        rng.gen_range(30.0..50.0),
        rng.gen_range(0.8..1.0)
    );

    world.spawn((
        Particle {
            kind: ParticleKind::Blood,
            width: BLOOD_SIZE,
            height: BLOOD_SIZE,
            motion: ParticleMotion::Ballistic {
                gravity: BLOOD_GRAVITY,
                remaining: BLOOD_LIFETIME,
            },
            color: Some(color),
            expired: false,
        },
        center,
        velocity,
    ))
}

/// Sparks where a bullet struck.
pub fn spawn_impact(world: &mut World, rng: &mut ChaCha8Rng, at: Position) -> Vec<Entity> {
    (0..IMPACT_SPARKS)
        .map(|_| {
            let jittered = jitter(rng, at, 10.0);
            spawn_spark(world, rng, jittered)
        })
        .collect()
}

/// Burst left behind when a dead hostile leaves its roster.
pub fn spawn_death_burst(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    center: Position,
    team: Team,
    catalog: &dyn SpriteCatalog,
) -> Vec<Entity> {
    let mut spawned = Vec::with_capacity(DEATH_SPARKS + DEATH_BLOOD + 1);

    for _ in 0..DEATH_SPARKS {
        let at = jitter(rng, center, 30.0);
        spawned.push(spawn_spark(world, rng, at));
    }

    match team {
        Team::Zombie => {
            for _ in 0..DEATH_BLOOD {
                let at = jitter(rng, center, 20.0);
                spawned.push(spawn_blood(world, rng, at));
            }
        }
        Team::Enemy => spawned.push(spawn_effect(world, ParticleKind::Explosion, center, catalog)),
        Team::Player | Team::Neutral => {}
    }

    spawned
}

/// `at` moved by up to half of `spread` on each axis.
fn jitter(rng: &mut ChaCha8Rng, at: Position, spread: f64) -> Position {
    Position::new(
        at.x + rng.gen_range(-0.5..0.5) * spread,
        at.y + rng.gen_range(-0.5..0.5) * spread,
    )
}
