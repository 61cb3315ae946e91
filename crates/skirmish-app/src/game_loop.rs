//! Game loop thread: runs the simulation engine at the display cadence and stores snapshots.
//!
//! The engine is created inside this thread so it never crosses a thread
//! boundary. Commands and input arrive via an `mpsc` channel. Each tick feeds
//! the measured wall time to the engine, which clamps it.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use skirmish_core::config::GameConfig;
use skirmish_core::constants::FRAME_RATE;
use skirmish_core::input::InputSnapshot;
use skirmish_core::state::GameStateSnapshot;
use skirmish_sim::engine::{SimConfig, SimulationEngine};

use crate::state::{GameLoopCommand, HostError};

/// Nominal duration of one frame.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread's join handle.
pub fn spawn_game_loop(
    config: GameConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>), HostError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("skirmish-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: GameConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut engine = SimulationEngine::new(SimConfig::from_game(config));
    let mut input = InputSnapshot::default();
    let mut last_tick = Instant::now();
    let mut next_tick_time = last_tick;

    log::info!("game loop started at {FRAME_RATE} Hz");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Session(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Input(snapshot)) => input = snapshot,
                Ok(GameLoopCommand::Shutdown) => {
                    log::info!("game loop shutting down");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick by the measured frame time
        let now = Instant::now();
        let elapsed = now.duration_since(last_tick).as_secs_f64();
        last_tick = now;
        let snapshot = engine.tick(elapsed, &input);

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next frame
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}
