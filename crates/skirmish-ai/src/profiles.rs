//! Kind-specific behavioral profiles.
//!
//! Consolidates per-kind parameters for the hostile FSM and the one-time
//! wave stamp applied at spawn.

use std::f64::consts::TAU;

use rand::Rng;

use skirmish_core::components::Brain;
use skirmish_core::constants::*;
use skirmish_core::enums::{AiState, AnimState, Team};

/// Hostile family. Soldiers shoot, zombies bite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostileKind {
    Soldier,
    Zombie,
}

/// How a hostile delivers damage once in attack range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackStyle {
    /// Spawns a bullet aimed at the target.
    Ranged,
    /// Applies damage to the target directly.
    Melee,
}

/// Behavioral profile for a hostile kind.
pub struct HostileProfile {
    pub team: Team,
    pub attack_style: AttackStyle,
    /// Collision box edge (square).
    pub size: f64,
    pub detection_range: f64,
    pub attack_range: f64,
    pub base_health: i32,
    pub health_per_wave: i32,
    pub base_speed: f64,
    pub speed_per_wave: f64,
    pub base_damage: i32,
    /// Extra damage per wave after the first.
    pub damage_per_wave: i32,
    /// Seconds between attacks, rolled once at spawn from this range.
    pub attack_interval: (f64, f64),
    pub roam_speed_factor: f64,
    /// Seconds between roam heading re-rolls.
    pub roam_secs: (f64, f64),
    /// How long a hit keeps the hurt clip up.
    pub hurt_hold: f64,
    /// Speed a melee hostile is shoved back with when hit (0 = none).
    pub knockback_speed: f64,
    /// Seconds the knockback drift lasts before steering resumes.
    pub stagger_secs: f64,
    /// Clips per state.
    pub attack_anim: AnimState,
    pub chase_anim: AnimState,
    pub roam_moving_anim: AnimState,
}

/// Get the behavioral profile for a given kind.
pub fn get_profile(kind: HostileKind) -> HostileProfile {
    match kind {
        HostileKind::Soldier => HostileProfile {
            team: Team::Enemy,
            attack_style: AttackStyle::Ranged,
            size: SOLDIER_SIZE,
            detection_range: SOLDIER_DETECTION_RANGE,
            attack_range: SOLDIER_ATTACK_RANGE,
            base_health: SOLDIER_BASE_HEALTH,
            health_per_wave: SOLDIER_HEALTH_PER_WAVE,
            base_speed: SOLDIER_BASE_SPEED,
            speed_per_wave: SOLDIER_SPEED_PER_WAVE,
            base_damage: BULLET_DAMAGE,
            damage_per_wave: SOLDIER_DAMAGE_PER_WAVE,
            attack_interval: (SOLDIER_FIRE_INTERVAL_MIN, SOLDIER_FIRE_INTERVAL_MAX),
            roam_speed_factor: SOLDIER_PATROL_SPEED_FACTOR,
            roam_secs: (SOLDIER_PATROL_MIN, SOLDIER_PATROL_MAX),
            hurt_hold: SOLDIER_HURT_HOLD,
            knockback_speed: 0.0,
            stagger_secs: 0.0,
            attack_anim: AnimState::Shoot,
            chase_anim: AnimState::Run,
            roam_moving_anim: AnimState::Run,
        },
        HostileKind::Zombie => HostileProfile {
            team: Team::Zombie,
            attack_style: AttackStyle::Melee,
            size: ZOMBIE_SIZE,
            detection_range: ZOMBIE_DETECTION_RANGE,
            attack_range: ZOMBIE_ATTACK_RANGE,
            base_health: ZOMBIE_BASE_HEALTH,
            health_per_wave: ZOMBIE_HEALTH_PER_WAVE,
            base_speed: ZOMBIE_BASE_SPEED,
            speed_per_wave: ZOMBIE_SPEED_PER_WAVE,
            base_damage: ZOMBIE_MELEE_DAMAGE,
            damage_per_wave: 0,
            attack_interval: (ZOMBIE_MELEE_INTERVAL, ZOMBIE_MELEE_INTERVAL),
            roam_speed_factor: ZOMBIE_WANDER_SPEED_FACTOR,
            roam_secs: (ZOMBIE_WANDER_MIN, ZOMBIE_WANDER_MAX),
            hurt_hold: 0.0,
            knockback_speed: ZOMBIE_KNOCKBACK_SPEED,
            stagger_secs: ZOMBIE_STAGGER_SECS,
            attack_anim: AnimState::Attack,
            chase_anim: AnimState::Walk,
            roam_moving_anim: AnimState::Walk,
        },
    }
}

impl HostileKind {
    pub fn team(self) -> Team {
        get_profile(self).team
    }

    /// Kind driving an actor of `team`, if that team is hostile.
    pub fn for_team(team: Team) -> Option<Self> {
        match team {
            Team::Enemy => Some(HostileKind::Soldier),
            Team::Zombie => Some(HostileKind::Zombie),
            Team::Player | Team::Neutral => None,
        }
    }
}

impl HostileProfile {
    pub fn health_for_wave(&self, wave: u32) -> i32 {
        self.base_health + self.health_per_wave * wave as i32
    }

    pub fn speed_for_wave(&self, wave: u32) -> f64 {
        self.base_speed + self.speed_per_wave * wave as f64
    }

    pub fn damage_for_wave(&self, wave: u32) -> i32 {
        self.base_damage + self.damage_per_wave * wave.saturating_sub(1) as i32
    }

    /// Clip for a behavior state given the velocity just chosen.
    pub fn anim_for(&self, state: AiState, speed_x: f64, speed_y: f64) -> AnimState {
        match state {
            AiState::Attack => self.attack_anim,
            AiState::Chase => self.chase_anim,
            AiState::Patrol => {
                if speed_x.abs() > HOSTILE_MOVING_THRESHOLD || speed_y.abs() > HOSTILE_MOVING_THRESHOLD {
                    self.roam_moving_anim
                } else {
                    AnimState::Idle
                }
            }
        }
    }

    /// Build the spawn-time brain for `wave`. Stats are stamped once and never re-scaled.
    pub fn stamp_brain<R: Rng + ?Sized>(&self, wave: u32, rng: &mut R) -> Brain {
        Brain {
            state: AiState::Patrol,
            target: None,
            detection_range: self.detection_range,
            attack_range: self.attack_range,
            speed: self.speed_for_wave(wave),
            roam_speed_factor: self.roam_speed_factor,
            cooldown: 0.0,
            attack_interval: roll(rng, self.attack_interval),
            attack_damage: self.damage_for_wave(wave),
            heading: rng.gen_range(0.0..TAU),
            roam_timer: 0.0,
            roam_duration: roll(rng, self.roam_secs),
            stagger: 0.0,
        }
    }
}

/// Uniform sample from `[lo, hi)`, or `lo` for a degenerate range.
pub(crate) fn roll<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f64, f64)) -> f64 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}
