//! Events emitted by the simulation for audio and UI collaborators.

use serde::{Deserialize, Serialize};

use crate::enums::Team;
use crate::types::Position;

/// Something noteworthy that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A bullet left a muzzle.
    ShotFired { team: Team, position: Position },
    /// A bullet or strike landed.
    Hit { attacker: Team, victim: Team, damage: i32 },
    /// A combatant died.
    Killed { victim: Team, by: Team },
    /// Every hostile is down; the inter-wave delay is running.
    WaveCleared { wave: u32 },
    /// A new wave spawned.
    WaveStarted { wave: u32, soldiers: u32, zombies: u32, bonus: u64 },
    /// The player died; the session is over.
    PlayerDied { score: u64, wave: u32 },
}
