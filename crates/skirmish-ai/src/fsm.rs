//! Hostile behavior finite state machine.
//!
//! Pure functions that pick the behavior state, velocity and attack action
//! for one hostile from its brain and the target chosen this tick.
//! No ECS dependency; operates on plain data.

use std::f64::consts::TAU;

use rand::Rng;

use skirmish_core::components::Brain;
use skirmish_core::enums::{AiState, AnimState};
use skirmish_core::types::{Handle, Position, Velocity};

use crate::profiles::{get_profile, roll, AttackStyle, HostileKind};
use crate::targeting::Acquired;

/// Input to the hostile FSM for a single entity.
pub struct HostileContext {
    pub kind: HostileKind,
    /// Anchor position (top-left of the body).
    pub position: Position,
    /// Target acquired this tick, if any.
    pub target: Option<Acquired>,
    pub dt: f64,
}

/// Attack produced on cooldown expiry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackAction {
    /// Fire a bullet from the body centre along `angle`.
    Fire { angle: f64, damage: i32 },
    /// Hit the target directly.
    Strike { target: Handle, damage: i32 },
}

/// Output from the hostile FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostileUpdate {
    pub state: AiState,
    pub velocity: Velocity,
    /// `None` keeps the current facing.
    pub facing_right: Option<bool>,
    pub action: Option<AttackAction>,
    pub anim: AnimState,
    pub state_changed: bool,
}

/// Evaluate the FSM for one hostile, updating timers on `brain`.
pub fn evaluate<R: Rng + ?Sized>(brain: &mut Brain, ctx: &HostileContext, rng: &mut R) -> HostileUpdate {
    let profile = get_profile(ctx.kind);
    let previous = brain.state;
    brain.target = ctx.target.map(|t| t.handle);

    let (state, velocity, facing_right, action) = match ctx.target {
        Some(target) if target.distance < brain.attack_range => {
            let facing = match profile.attack_style {
                AttackStyle::Ranged => Some(target.position.x > ctx.position.x),
                AttackStyle::Melee => None,
            };
            let action = if brain.cooldown <= 0.0 {
                brain.cooldown = brain.attack_interval;
                Some(attack_action(profile.attack_style, brain, ctx, &target))
            } else {
                None
            };
            (AiState::Attack, Velocity::zero(), facing, action)
        }
        Some(target) => {
            let toward = (target.position.to_vec2() - ctx.position.to_vec2()).normalize_or_zero();
            let velocity = Velocity::from(toward * brain.speed);
            (AiState::Chase, velocity, Some(velocity.x > 0.0), None)
        }
        None => {
            let velocity = roam(brain, ctx.kind, ctx.dt, rng);
            (AiState::Patrol, velocity, Some(velocity.x > 0.0), None)
        }
    };

    if brain.cooldown > 0.0 {
        brain.cooldown -= ctx.dt;
    }
    brain.state = state;

    HostileUpdate {
        state,
        velocity,
        facing_right,
        action,
        anim: profile.anim_for(state, velocity.x, velocity.y),
        state_changed: state != previous,
    }
}

fn attack_action(style: AttackStyle, brain: &Brain, ctx: &HostileContext, target: &Acquired) -> AttackAction {
    match style {
        AttackStyle::Ranged => AttackAction::Fire {
            angle: ctx.position.angle_to(&target.position),
            damage: brain.attack_damage,
        },
        AttackStyle::Melee => AttackAction::Strike {
            target: target.handle,
            damage: brain.attack_damage,
        },
    }
}

/// Advance the roam timer, re-rolling heading and duration when it runs out.
fn roam<R: Rng + ?Sized>(brain: &mut Brain, kind: HostileKind, dt: f64, rng: &mut R) -> Velocity {
    brain.roam_timer += dt;
    if brain.roam_timer >= brain.roam_duration {
        brain.roam_timer = 0.0;
        brain.roam_duration = roll(rng, get_profile(kind).roam_secs);
        brain.heading = rng.gen_range(0.0..TAU);
    }
    Velocity::from_angle(brain.heading, brain.speed * brain.roam_speed_factor)
}
