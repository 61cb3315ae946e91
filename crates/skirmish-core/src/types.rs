//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in world space (world units, top-left origin, +y down).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity in world space (units/second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Hit points. `current` stays within `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

/// Result of applying damage to a `Health` pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Nothing changed (zero or negative amount).
    Ignored,
    /// Health dropped but is still above zero.
    Wounded,
    /// Health reached zero with this hit.
    Depleted,
}

/// Stable reference to a simulation entity (hecs entity bits).
/// Never owns the target; resolve through the world and re-check liveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Handle(pub u64);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_vec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle to another position in radians (0 = +x, clockwise on screen since +y is down).
    pub fn angle_to(&self, other: &Position) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Point offset from this one by `distance` along `angle`.
    pub fn offset(&self, angle: f64, distance: f64) -> Position {
        Position::new(
            self.x + angle.cos() * distance,
            self.y + angle.sin() * distance,
        )
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Velocity of magnitude `speed` along `angle`.
    pub fn from_angle(angle: f64, speed: f64) -> Self {
        Self {
            x: angle.cos() * speed,
            y: angle.sin() * speed,
        }
    }

    pub fn to_vec2(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Speed magnitude (units/s).
    pub fn speed(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl From<DVec2> for Velocity {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap test between two boxes (touching edges do not overlap).
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// Inclusive point containment.
    pub fn contains(&self, point: &Position) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

impl Health {
    pub fn full(max: i32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }

    pub fn is_damaged(&self) -> bool {
        self.current < self.max
    }

    /// Fraction of health remaining in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        self.current as f64 / self.max as f64
    }

    /// Subtract `amount`, flooring at zero. Zero and negative amounts never heal.
    pub fn apply_damage(&mut self, amount: i32) -> DamageOutcome {
        if amount <= 0 {
            return DamageOutcome::Ignored;
        }
        self.current = self.current.saturating_sub(amount).max(0);
        if self.current == 0 {
            DamageOutcome::Depleted
        } else {
            DamageOutcome::Wounded
        }
    }

    /// Restore up to `amount`, capped at `max`.
    pub fn heal(&mut self, amount: i32) {
        if amount > 0 {
            self.current = self.current.saturating_add(amount).min(self.max);
        }
    }
}

impl Handle {
    pub fn to_bits(self) -> u64 {
        self.0
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Box of `width`×`height` anchored at `pos` (top-left).
pub fn bounds_at(pos: &Position, width: f64, height: f64) -> Bounds {
    Bounds::new(pos.x, pos.y, width, height)
}
