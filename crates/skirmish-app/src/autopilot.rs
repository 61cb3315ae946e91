//! Demo input: turns the latest snapshot into player intents.
//!
//! Aims at the nearest live hostile, fires when it is close enough to matter,
//! and backs away from anything inside arm's reach.

use skirmish_core::enums::Team;
use skirmish_core::input::InputSnapshot;
use skirmish_core::state::{ActorView, GameStateSnapshot};
use skirmish_core::types::Position;

/// Hostiles nearer than this are shot at.
const ENGAGE_RANGE: f64 = 450.0;
/// Hostiles nearer than this are retreated from.
const RETREAT_RANGE: f64 = 120.0;

/// Intents for the next tick.
pub fn steer(snapshot: &GameStateSnapshot) -> InputSnapshot {
    let Some(player) = snapshot.actors.iter().find(|a| a.team == Team::Player && a.alive) else {
        return InputSnapshot::default();
    };
    let me = center(player);

    let nearest = snapshot
        .actors
        .iter()
        .filter(|a| a.alive && matches!(a.team, Team::Enemy | Team::Zombie))
        .map(|a| (center(a), me.distance_to(&center(a))))
        .min_by(|a, b| a.1.total_cmp(&b.1));

    let Some((target, distance)) = nearest else {
        return InputSnapshot::default();
    };

    let mut input = InputSnapshot {
        pointer: Some(target),
        fire: distance < ENGAGE_RANGE,
        ..Default::default()
    };

    if distance < RETREAT_RANGE {
        input.left = target.x > me.x;
        input.right = !input.left;
        input.up = target.y > me.y;
        input.down = !input.up;
    }
    input
}

fn center(actor: &ActorView) -> Position {
    Position::new(
        actor.position.x + actor.width / 2.0,
        actor.position.y + actor.height / 2.0,
    )
}
