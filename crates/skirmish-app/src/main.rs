//! Headless demo: plays one session with the autopilot and logs the result.
//!
//! Usage: `skirmish-app [config.json] [seconds]`

use std::time::{Duration, Instant};

use skirmish_app::autopilot;
use skirmish_app::control;
use skirmish_app::state::{AppState, HostError};
use skirmish_core::commands::SessionCommand;
use skirmish_core::config::GameConfig;
use skirmish_core::enums::GamePhase;

const DEFAULT_DEMO_SECS: u64 = 60;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), HostError> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => GameConfig::load(&path)?,
        None => GameConfig::default(),
    };
    let demo_secs = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_DEMO_SECS);

    let hero = config.default_hero;
    let state = AppState::new();
    control::start_simulation(&state, config)?;
    control::send_command(&state, SessionCommand::StartGame { hero })?;

    let deadline = Instant::now() + Duration::from_secs(demo_secs);
    let mut last_wave = 0;
    while Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(16));
        let Some(snapshot) = control::get_snapshot(&state)? else {
            continue;
        };

        if snapshot.wave.wave != last_wave {
            last_wave = snapshot.wave.wave;
            if let Some(player) = &snapshot.player {
                log::info!(
                    "wave {last_wave}: health {}/{}, score {}",
                    player.health,
                    player.max_health,
                    player.score
                );
            }
        }
        if snapshot.phase == GamePhase::GameOver {
            break;
        }

        control::send_input(&state, autopilot::steer(&snapshot))?;
    }

    if let Some(snapshot) = control::get_snapshot(&state)? {
        let (score, kills) = snapshot
            .player
            .map(|p| (p.score, p.kills))
            .unwrap_or_default();
        log::info!(
            "session ended in {:?} on wave {}: score {score}, kills {kills}",
            snapshot.phase,
            snapshot.wave.wave
        );
    }

    control::stop_simulation(&state)
}
