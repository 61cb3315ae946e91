//! Player controller system.
//!
//! Turns the tick's input snapshot into velocity, aim, fire and clip
//! selection for the player entity.

use std::f64::consts::PI;

use hecs::World;

use skirmish_core::animation::{Animator, SpriteCatalog};
use skirmish_core::components::{Actor, Behavior, Body, Pilot};
use skirmish_core::config::GameConfig;
use skirmish_core::constants::*;
use skirmish_core::enums::{AnimState, Team};
use skirmish_core::events::GameEvent;
use skirmish_core::input::InputSnapshot;
use skirmish_core::state::WorldView;
use skirmish_core::types::{bounds_at, Position, Velocity};

use crate::roster::Rosters;
use crate::systems::{combat, movement};

/// Run the player phase. Returns false when there is no living player.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rosters: &mut Rosters,
    input: &InputSnapshot,
    dt: f64,
    config: &GameConfig,
    bounds: &WorldView,
    catalog: &dyn SpriteCatalog,
    events: &mut Vec<GameEvent>,
) -> bool {
    let Some(player) = rosters.player else {
        return false;
    };

    let alive = world.get::<&Actor>(player).is_ok_and(|a| a.alive);
    if !alive {
        movement::step_actor(world, player, dt, bounds);
        return false;
    }

    let shot = {
        let Ok((actor, pos, vel, body, animator, behavior)) = world.query_one_mut::<(
            &mut Actor,
            &Position,
            &mut Velocity,
            &Body,
            &mut Animator,
            &mut Behavior,
        )>(player) else {
            return false;
        };
        let Behavior::PlayerControlled(pilot) = behavior else {
            return false;
        };

        pilot.intent = *input;
        steer(pilot, actor, vel, dt, config);

        if let Some(pointer) = input.pointer {
            actor.facing_right = pointer.x >= pos.x + body.width / 2.0;
            pilot.aim_angle = pos.angle_to(&pointer);
        } else {
            pilot.aim_angle = if actor.facing_right { 0.0 } else { PI };
        }

        let shot = trigger(pilot, pos, body, dt);
        if !animator.is_held() {
            animator.play(select_clip(pilot, vel));
        }
        shot
    };

    if let Some((origin, angle)) = shot {
        combat::fire(world, rosters, origin, angle, Team::Player, BULLET_DAMAGE, catalog, events);
    }

    movement::step_actor(world, player, dt, bounds);
    true
}

/// Movement intents to velocity. Crouch pins horizontal motion and skips the rest.
fn steer(pilot: &mut Pilot, actor: &mut Actor, vel: &mut Velocity, dt: f64, config: &GameConfig) {
    let intent = pilot.intent;
    pilot.crouching = intent.crouch;

    if pilot.jumping {
        pilot.airtime -= dt;
        if pilot.airtime <= 0.0 {
            pilot.jumping = false;
            pilot.grounded = true;
        }
    }

    if intent.crouch {
        vel.x = 0.0;
        return;
    }

    let damping = config.damping(PLAYER_DAMPING, dt);

    if intent.left {
        vel.x = -pilot.speed;
        actor.facing_right = false;
    } else if intent.right {
        vel.x = pilot.speed;
        actor.facing_right = true;
    } else {
        vel.x *= damping;
    }

    if intent.up {
        vel.y = -pilot.speed;
    } else if intent.down {
        vel.y = pilot.speed;
    } else {
        vel.y *= damping;
    }

    if intent.jump && pilot.grounded {
        vel.y = -pilot.jump_force;
        pilot.jumping = true;
        pilot.grounded = false;
        pilot.airtime = PLAYER_JUMP_AIRTIME;
    }
}

/// Cooldown countdown and fire decision. Returns the muzzle point and angle of a shot.
fn trigger(pilot: &mut Pilot, pos: &Position, body: &Body, dt: f64) -> Option<(Position, f64)> {
    if pilot.fire_cooldown > 0.0 {
        pilot.fire_cooldown -= dt;
    }

    if pilot.intent.fire && pilot.fire_cooldown <= 0.0 {
        pilot.fire_cooldown = pilot.fire_interval;
        pilot.shooting = true;
        let muzzle = bounds_at(pos, body.width, body.height)
            .center()
            .offset(pilot.aim_angle, PLAYER_MUZZLE_OFFSET);
        Some((muzzle, pilot.aim_angle))
    } else {
        if !pilot.intent.fire {
            pilot.shooting = false;
        }
        None
    }
}

/// Highest-priority clip for the current controller state.
fn select_clip(pilot: &Pilot, vel: &Velocity) -> AnimState {
    let fastest = vel.x.abs().max(vel.y.abs());
    if pilot.crouching {
        AnimState::Crouch
    } else if pilot.shooting {
        AnimState::Shoot
    } else if pilot.jumping {
        AnimState::Jump
    } else if fastest > PLAYER_RUN_THRESHOLD {
        AnimState::Run
    } else if fastest > PLAYER_WALK_THRESHOLD {
        AnimState::Walk
    } else {
        AnimState::Idle
    }
}
