//! ECS components for hecs entities.
//!
//! Components are plain data. Game logic lives in the sim systems and the
//! AI crate; the few methods here only keep a component's own invariants.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::animation::Animation;
use crate::enums::*;
use crate::input::InputSnapshot;
use crate::types::{Handle, Position};

/// The shared record every combatant carries (player, soldier, zombie).
/// Position, Velocity, Health and Animator sit beside it as their own components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub archetype: Archetype,
    pub team: Team,
    pub facing_right: bool,
    /// Monotonic: true until death, never true again.
    pub alive: bool,
    /// Seconds since death (drives roster pruning if the death clip stalls).
    pub dead_for: f64,
}

/// Collision box size. The entity's Position is the box's top-left corner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    pub width: f64,
    pub height: f64,
}

/// Which controller drives an actor each tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Behavior {
    PlayerControlled(Pilot),
    RangedAi(Brain),
    MeleeAi(Brain),
}

/// Player controller state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pilot {
    /// Intents polled this tick.
    pub intent: InputSnapshot,
    pub speed: f64,
    pub jump_force: f64,
    pub grounded: bool,
    pub jumping: bool,
    /// Seconds left before a jump lands.
    pub airtime: f64,
    pub shooting: bool,
    pub crouching: bool,
    /// Seconds until the next shot is allowed (may go negative).
    pub fire_cooldown: f64,
    pub fire_interval: f64,
    /// Radians, 0 = +x.
    pub aim_angle: f64,
    pub score: u64,
    pub kills: u32,
}

/// Hostile AI state (soldiers and zombies share the shape).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brain {
    pub state: AiState,
    /// Target chosen this tick. Re-resolved every tick, never owned.
    pub target: Option<Handle>,
    pub detection_range: f64,
    pub attack_range: f64,
    /// Full chase speed, stamped at spawn from the wave number.
    pub speed: f64,
    /// Fraction of `speed` used while roaming.
    pub roam_speed_factor: f64,
    /// Seconds until the next shot / strike (may go negative).
    pub cooldown: f64,
    pub attack_interval: f64,
    /// Damage per bullet (ranged) or per strike (melee).
    pub attack_damage: i32,
    /// Roaming heading in radians.
    pub heading: f64,
    pub roam_timer: f64,
    pub roam_duration: f64,
    /// Seconds left in which knockback overrides steering.
    pub stagger: f64,
}

/// Projectile state. Position and Velocity are separate components.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub team: Team,
    /// Travel angle in radians.
    pub angle: f64,
    pub damage: i32,
    /// Seconds left before the bullet expires.
    pub lifetime: f64,
    /// Set once the bullet hit, expired or left the world.
    pub spent: bool,
    pub trail: Trail,
}

/// Bounded ring of recent positions, oldest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trail {
    points: VecDeque<Position>,
    capacity: usize,
}

impl Trail {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, point: Position) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points paired with their fade alpha, oldest (faintest) first.
    pub fn faded(&self) -> impl Iterator<Item = (Position, f64)> + '_ {
        let len = self.points.len() as f64;
        self.points
            .iter()
            .enumerate()
            .map(move |(i, p)| (*p, (i as f64 + 1.0) / len * 0.5))
    }
}

/// Cosmetic particle. Never collides. Position is the particle centre.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub width: f64,
    pub height: f64,
    pub motion: ParticleMotion,
    /// CSS colour for frame-less particles.
    pub color: Option<String>,
    pub expired: bool,
}

/// How a particle decays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ParticleMotion {
    /// Plays a non-looping clip, expires when it finishes.
    Animated(Animation),
    /// Flies on its Velocity with optional gravity, expires after `remaining` seconds.
    Ballistic { gravity: f64, remaining: f64 },
}
