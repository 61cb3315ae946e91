//! Game state snapshot: everything a renderer or HUD needs after a tick.
//!
//! The core draws nothing. A render sink walks these views in order, blits
//! `frame` (or fills `fallback_color` when the key is missing), flips when
//! `facing_right` is false, and overlays the health bar when one is present.

use serde::{Deserialize, Serialize};

use crate::constants::{HEALTH_BAR_HIGH, HEALTH_BAR_LOW};
use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Health, Position, SimTime};

/// Complete visible state after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub world: WorldView,
    pub camera: CameraView,
    /// Player, soldiers and zombies, sorted by `y` for depth.
    pub actors: Vec<ActorView>,
    pub bullets: Vec<BulletView>,
    pub particles: Vec<ParticleView>,
    pub player: Option<PlayerView>,
    pub wave: WaveView,
    pub events: Vec<GameEvent>,
}

/// World rectangle.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WorldView {
    pub width: f64,
    pub height: f64,
}

/// Camera offset (top-left of the viewport in world space).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraView {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CameraView {
    /// Centre the viewport on `focus`, clamped to the world rectangle.
    pub fn follow(focus: &Position, width: f64, height: f64, world: &WorldView) -> Self {
        let x = (focus.x - width / 2.0).min(world.width - width).max(0.0);
        let y = (focus.y - height / 2.0).min(world.height - height).max(0.0);
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Convert a pointer position on screen to world space.
    pub fn screen_to_world(&self, screen_x: f64, screen_y: f64) -> Position {
        Position::new(screen_x + self.x, screen_y + self.y)
    }
}

/// A combatant as the renderer sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorView {
    /// Entity handle bits, stable for the entity's lifetime.
    pub id: u64,
    pub archetype: Archetype,
    pub team: Team,
    pub position: Position,
    pub width: f64,
    pub height: f64,
    pub facing_right: bool,
    pub alive: bool,
    /// Sprite key to draw, `None` when the clip has no frames.
    pub frame: Option<String>,
    pub anim: Option<AnimState>,
    pub fallback_color: String,
    pub health: i32,
    pub max_health: i32,
    /// Present only while alive and damaged.
    pub health_bar: Option<HealthBar>,
    pub ai_state: Option<AiState>,
}

/// Health bar overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthBar {
    /// Filled fraction in `[0, 1]`.
    pub fraction: f64,
    pub color: String,
}

impl HealthBar {
    pub fn for_health(health: &Health, alive: bool) -> Option<Self> {
        if !alive || !health.is_damaged() {
            return None;
        }
        let fraction = health.fraction().clamp(0.0, 1.0);
        let color = if fraction > HEALTH_BAR_HIGH {
            "#4CAF50"
        } else if fraction > HEALTH_BAR_LOW {
            "#FFC107"
        } else {
            "#F44336"
        };
        Some(Self {
            fraction,
            color: color.to_string(),
        })
    }
}

/// Fill colour when no sprite frame is available.
pub fn team_color(team: Team) -> &'static str {
    match team {
        Team::Player => "#00ff00",
        Team::Enemy => "#ff0000",
        Team::Zombie => "#800080",
        Team::Neutral => "#888888",
    }
}

/// A bullet with its fading trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub position: Position,
    pub angle: f64,
    pub width: f64,
    pub height: f64,
    pub team: Team,
    pub sprite: String,
    pub fallback_color: String,
    pub trail: Vec<TrailPoint>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrailPoint {
    pub position: Position,
    pub alpha: f64,
}

/// A particle, centred on `position`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleView {
    pub kind: ParticleKind,
    pub position: Position,
    pub width: f64,
    pub height: f64,
    pub frame: Option<String>,
    pub color: Option<String>,
    pub alpha: f64,
}

/// HUD numbers for the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub health: i32,
    pub max_health: i32,
    pub score: u64,
    pub kills: u32,
    pub aim_angle: f64,
    pub alive: bool,
}

/// Wave progress panel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub wave: u32,
    pub alive_soldiers: u32,
    pub alive_zombies: u32,
    /// True while every hostile is down and the next wave is pending.
    pub cleared: bool,
    /// Seconds until the next wave (only meaningful when `cleared`).
    pub next_wave_in_secs: f64,
    /// Bonus awarded when the next wave starts.
    pub next_wave_bonus: u64,
}
