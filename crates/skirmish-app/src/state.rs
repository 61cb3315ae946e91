//! Application state shared between the control surface and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use thiserror::Error;

use skirmish_core::commands::SessionCommand;
use skirmish_core::config::ConfigError;
use skirmish_core::input::InputSnapshot;
use skirmish_core::state::GameStateSnapshot;

/// Messages sent from the control surface to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A session command to forward to the simulation engine.
    Session(SessionCommand),
    /// Replace the input snapshot used for every following tick.
    Input(InputSnapshot),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Host-side failures. The simulation itself never fails.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("simulation already running")]
    AlreadyRunning,

    #[error("simulation not started")]
    NotStarted,

    #[error("game loop channel closed")]
    ChannelClosed,

    #[error("shared state lock poisoned")]
    Poisoned,

    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Shared application state.
///
/// - `mpsc::Sender` sits in a `Mutex` so the state is `Sync`
/// - `Mutex<Option<...>>` for handles that do not exist before `start_simulation`
/// - `Arc<Mutex<...>>` for the latest snapshot (shared with the game loop thread)
pub struct AppState {
    /// Channel sender to forward commands to the game loop thread.
    /// `None` before `start_simulation` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot for polling. Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    /// Join handle of the running game loop thread.
    pub loop_handle: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            loop_handle: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a game loop thread has been started and not stopped.
    pub fn is_running(&self) -> bool {
        self.command_tx.lock().is_ok_and(|tx| tx.is_some())
    }
}
