//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Faction an entity fights for. Bullets never hit their own team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Player,
    Enemy,
    Zombie,
    #[default]
    Neutral,
}

/// Hostile behavior state. Death is an animation, not a behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    /// Roaming on a random heading (soldiers call it patrol, zombies wander).
    #[default]
    Patrol,
    /// Closing on a target inside detection range.
    Chase,
    /// Holding position and firing / striking.
    Attack,
}

/// Symbolic animation clip name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnimState {
    #[default]
    Idle,
    Walk,
    Run,
    Jump,
    Crouch,
    Shoot,
    Attack,
    Hurt,
    Death,
}

impl AnimState {
    pub const ALL: [AnimState; 9] = [
        AnimState::Idle,
        AnimState::Walk,
        AnimState::Run,
        AnimState::Jump,
        AnimState::Crouch,
        AnimState::Shoot,
        AnimState::Attack,
        AnimState::Hurt,
        AnimState::Death,
    ];
}

/// Zombie sprite family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZombieKind {
    Zombie01,
    Zombie02,
    Zombie3,
}

impl ZombieKind {
    pub const ALL: [ZombieKind; 3] = [ZombieKind::Zombie01, ZombieKind::Zombie02, ZombieKind::Zombie3];

    pub fn sheet(self) -> &'static str {
        match self {
            ZombieKind::Zombie01 => "Zombie01",
            ZombieKind::Zombie02 => "Zombie02",
            ZombieKind::Zombie3 => "Zombie3",
        }
    }
}

/// Actor archetype. Selects sprite sheet, body size and animation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// Hero sheets `hero1`..`hero5` (player only).
    Hero(u8),
    /// Soldier sheets `Soldier1`..`Soldier4` (player or enemy).
    Soldier(u8),
    Zombie(ZombieKind),
}

impl Default for Archetype {
    fn default() -> Self {
        Archetype::Hero(1)
    }
}

impl Archetype {
    /// Sprite sheet prefix used to build frame keys.
    pub fn sheet(&self) -> String {
        match self {
            Archetype::Hero(n) => format!("hero{n}"),
            Archetype::Soldier(n) => format!("Soldier{n}"),
            Archetype::Zombie(kind) => kind.sheet().to_string(),
        }
    }
}

/// Cosmetic particle family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    Explosion,
    Muzzle,
    Spark,
    Blood,
}

/// Session phase (top-level state). Only `Playing` advances the world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}
