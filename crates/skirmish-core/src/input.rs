//! Player intents polled once per tick.
//!
//! The host turns raw keyboard/pointer events into this snapshot; the
//! simulation never sees the input device.

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// Debounced player intents for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
    pub crouch: bool,
    /// Fire button held.
    pub fire: bool,
    /// Pointer in world space (screen position plus camera offset), if known.
    pub pointer: Option<Position>,
}

impl InputSnapshot {
    /// Snapshot with only the pointer set.
    pub fn aiming_at(x: f64, y: f64) -> Self {
        Self {
            pointer: Some(Position::new(x, y)),
            ..Default::default()
        }
    }

    pub fn with_fire(mut self, fire: bool) -> Self {
        self.fire = fire;
        self
    }
}
