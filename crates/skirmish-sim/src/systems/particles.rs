//! Particle decay system. Particles never collide.

use hecs::World;

use skirmish_core::components::{Particle, ParticleMotion};
use skirmish_core::config::GameConfig;
use skirmish_core::constants::PARTICLE_DRAG;
use skirmish_core::types::{Position, Velocity};

use crate::roster::Rosters;

/// Update the first `count` particles. Later entries were spawned this tick and wait.
pub fn run(world: &mut World, rosters: &Rosters, count: usize, dt: f64, config: &GameConfig) {
    let drag = config.damping(PARTICLE_DRAG, dt);

    for &entity in rosters.particles.iter().take(count) {
        let Ok((particle, pos, vel)) =
            world.query_one_mut::<(&mut Particle, &mut Position, &mut Velocity)>(entity)
        else {
            continue;
        };
        if particle.expired {
            continue;
        }

        match &mut particle.motion {
            ParticleMotion::Animated(animation) => {
                animation.advance(dt);
                if animation.is_finished() {
                    particle.expired = true;
                }
            }
            ParticleMotion::Ballistic { gravity, remaining } => {
                pos.x += vel.x * dt;
                pos.y += vel.y * dt;
                if *gravity != 0.0 {
                    vel.y += *gravity * dt;
                }
                vel.x *= drag;

                *remaining -= dt;
                if *remaining <= 0.0 {
                    particle.expired = true;
                }
            }
        }
    }
}
