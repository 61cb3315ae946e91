//! Projectile system: bullet flight, expiry and first-hit collision.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::{Actor, Body, Bullet};
use skirmish_core::enums::Team;
use skirmish_core::events::GameEvent;
use skirmish_core::state::WorldView;
use skirmish_core::types::{bounds_at, Position, Velocity};

use crate::roster::Rosters;
use crate::systems::combat::{self, HitOutcome};
use crate::world_setup;

/// Update the first `count` bullets. Later entries were fired this tick and wait.
pub fn run(
    world: &mut World,
    rosters: &mut Rosters,
    count: usize,
    dt: f64,
    bounds: &WorldView,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) {
    for i in 0..count.min(rosters.bullets.len()) {
        let entity = rosters.bullets[i];
        let Some((point, team, damage)) = fly(world, entity, dt, bounds) else {
            continue;
        };

        // Player, then soldiers, then zombies; the first box containing the point takes the hit.
        let struck = {
            let world: &World = world;
            rosters.actors().find(|&e| is_hit(world, e, team, &point))
        };
        let Some(victim) = struck else {
            continue;
        };

        let outcome = combat::apply_damage(world, victim, damage, team, events);
        if outcome == HitOutcome::Killed && team == Team::Player {
            combat::award_kill(world, rosters.player);
        }

        rosters
            .particles
            .extend(world_setup::spawn_impact(world, rng, point));
        if let Ok(mut bullet) = world.get::<&mut Bullet>(entity) {
            bullet.spent = true;
        }
    }
}

/// Trail, move, age, bounds. Returns the bullet's point if it is still live.
fn fly(world: &mut World, entity: Entity, dt: f64, bounds: &WorldView) -> Option<(Position, Team, i32)> {
    let (bullet, pos, vel) = world
        .query_one_mut::<(&mut Bullet, &mut Position, &Velocity)>(entity)
        .ok()?;
    if bullet.spent {
        return None;
    }

    bullet.trail.push(*pos);
    pos.x += vel.x * dt;
    pos.y += vel.y * dt;

    bullet.lifetime -= dt;
    if bullet.lifetime <= 0.0 {
        bullet.spent = true;
        return None;
    }

    if pos.x < 0.0 || pos.x > bounds.width || pos.y < 0.0 || pos.y > bounds.height {
        bullet.spent = true;
        return None;
    }

    Some((*pos, bullet.team, bullet.damage))
}

/// Live actor of another team whose box contains `point` (edges included).
fn is_hit(world: &World, entity: Entity, team: Team, point: &Position) -> bool {
    let Ok(mut query) = world.query_one::<(&Actor, &Position, &Body)>(entity) else {
        return false;
    };
    query.get().is_some_and(|(actor, pos, body)| {
        actor.alive && actor.team != team && bounds_at(pos, body.width, body.height).contains(point)
    })
}
