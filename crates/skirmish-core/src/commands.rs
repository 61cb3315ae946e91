//! Session commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::Archetype;

/// Session lifecycle transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionCommand {
    /// Spawn the player with the chosen sprite set and start wave 1.
    StartGame { hero: Archetype },
    /// Clear every roster and return to the menu.
    ResetGame,
    /// Freeze the world.
    Pause,
    /// Unfreeze the world.
    Resume,
}
