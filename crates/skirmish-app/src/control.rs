//! Control surface for a host embedding the simulation.
//!
//! These functions bridge host requests to the game loop thread via channels.
//! A windowed front end would call them from its event handlers.

use skirmish_core::commands::SessionCommand;
use skirmish_core::config::GameConfig;
use skirmish_core::input::InputSnapshot;
use skirmish_core::state::GameStateSnapshot;

use crate::game_loop;
use crate::state::{AppState, GameLoopCommand, HostError};

/// Start the simulation. Spawns the game loop thread if not already running.
pub fn start_simulation(state: &AppState, config: GameConfig) -> Result<(), HostError> {
    let mut tx_lock = state.command_tx.lock().map_err(|_| HostError::Poisoned)?;
    if tx_lock.is_some() {
        return Err(HostError::AlreadyRunning);
    }

    let (cmd_tx, handle) = game_loop::spawn_game_loop(config, state.latest_snapshot.clone())?;
    *tx_lock = Some(cmd_tx);
    *state.loop_handle.lock().map_err(|_| HostError::Poisoned)? = Some(handle);

    Ok(())
}

/// Send a session command to the simulation.
pub fn send_command(state: &AppState, command: SessionCommand) -> Result<(), HostError> {
    send(state, GameLoopCommand::Session(command))
}

/// Replace the input the simulation polls each tick.
pub fn send_input(state: &AppState, input: InputSnapshot) -> Result<(), HostError> {
    send(state, GameLoopCommand::Input(input))
}

/// Get the latest snapshot (for polling / initial state).
pub fn get_snapshot(state: &AppState) -> Result<Option<GameStateSnapshot>, HostError> {
    let lock = state.latest_snapshot.lock().map_err(|_| HostError::Poisoned)?;
    Ok(lock.clone())
}

/// Stop the game loop and wait for its thread to exit.
pub fn stop_simulation(state: &AppState) -> Result<(), HostError> {
    let tx = state
        .command_tx
        .lock()
        .map_err(|_| HostError::Poisoned)?
        .take()
        .ok_or(HostError::NotStarted)?;
    // A loop that already exited has dropped its receiver; joining is still fine.
    let _ = tx.send(GameLoopCommand::Shutdown);

    let handle = state.loop_handle.lock().map_err(|_| HostError::Poisoned)?.take();
    if let Some(handle) = handle {
        if handle.join().is_err() {
            log::error!("game loop thread panicked");
        }
    }
    Ok(())
}

fn send(state: &AppState, message: GameLoopCommand) -> Result<(), HostError> {
    let tx_lock = state.command_tx.lock().map_err(|_| HostError::Poisoned)?;
    match tx_lock.as_ref() {
        Some(tx) => tx.send(message).map_err(|_| HostError::ChannelClosed),
        None => Err(HostError::NotStarted),
    }
}
