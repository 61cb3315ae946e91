//! Per-actor integration step.
//!
//! position += velocity * dt, animation advance, the death check, and the
//! clamp to the world rectangle.

use hecs::{Entity, World};

use skirmish_core::animation::Animator;
use skirmish_core::components::{Actor, Body};
use skirmish_core::state::WorldView;
use skirmish_core::types::{Health, Position, Velocity};

use crate::systems::combat;

/// Step one actor after its controller chose a velocity.
pub fn step_actor(world: &mut World, entity: Entity, dt: f64, bounds: &WorldView) {
    let needs_death = {
        let Ok((actor, pos, vel, body, health, animator)) = world.query_one_mut::<(
            &mut Actor,
            &mut Position,
            &Velocity,
            &Body,
            &Health,
            &mut Animator,
        )>(entity) else {
            return;
        };

        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
        animator.advance(dt);

        if !actor.alive {
            actor.dead_for += dt;
        }

        pos.x = pos.x.min(bounds.width - body.width).max(0.0);
        pos.y = pos.y.min(bounds.height - body.height).max(0.0);

        actor.alive && health.is_depleted()
    };

    if needs_death {
        combat::die(world, entity);
    }
}
