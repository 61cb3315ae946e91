//! Cleanup system: prunes dead hostiles, spent bullets and expired particles.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use skirmish_core::animation::{Animator, SpriteCatalog};
use skirmish_core::components::{Actor, Body, Bullet, Particle};
use skirmish_core::constants::DEATH_LINGER;
use skirmish_core::enums::{AnimState, Team};
use skirmish_core::types::{bounds_at, Position};

use crate::roster::Rosters;
use crate::world_setup;

/// Remove finished entities from their rosters and the world.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    rosters: &mut Rosters,
    rng: &mut ChaCha8Rng,
    catalog: &dyn SpriteCatalog,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    // Dead hostiles leave once the death clip played out or the linger ran out.
    let mut bursts: Vec<(Position, Team)> = Vec::new();
    for roster in [&mut rosters.enemies, &mut rosters.zombies] {
        roster.retain(|&entity| {
            let Some(burst) = finished_corpse(world, entity) else {
                return true;
            };
            bursts.push(burst);
            despawn_buffer.push(entity);
            false
        });
    }
    for (center, team) in bursts {
        let particles = world_setup::spawn_death_burst(world, rng, center, team, catalog);
        rosters.particles.extend(particles);
    }

    rosters.bullets.retain(|&entity| {
        let spent = world.get::<&Bullet>(entity).map_or(true, |b| b.spent);
        if spent {
            despawn_buffer.push(entity);
        }
        !spent
    });

    rosters.particles.retain(|&entity| {
        let expired = world.get::<&Particle>(entity).map_or(true, |p| p.expired);
        if expired {
            despawn_buffer.push(entity);
        }
        !expired
    });

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Body centre and team of a corpse ready to be removed.
fn finished_corpse(world: &World, entity: Entity) -> Option<(Position, Team)> {
    let mut query = world
        .query_one::<(&Actor, &Position, &Body, &Animator)>(entity)
        .ok()?;
    let (actor, pos, body, animator) = query.get()?;
    if actor.alive {
        return None;
    }

    let clip_done = animator.current_state() == Some(AnimState::Death) && animator.is_finished();
    if !clip_done && actor.dead_for < DEATH_LINGER {
        return None;
    }

    Some((bounds_at(pos, body.width, body.height).center(), actor.team))
}
