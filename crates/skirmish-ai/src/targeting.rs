//! Target acquisition.
//!
//! Candidates are offered in roster order; the nearest one strictly inside
//! the detection radius wins and the first found wins a tie.

use skirmish_core::types::{Handle, Position};

/// One potential target as seen this tick.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub handle: Handle,
    pub position: Position,
    pub alive: bool,
}

/// A chosen target with its distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Acquired {
    pub handle: Handle,
    pub position: Position,
    pub distance: f64,
}

/// Pick the nearest live candidate closer than `detection_range`.
pub fn acquire_target(origin: &Position, detection_range: f64, candidates: &[Candidate]) -> Option<Acquired> {
    let mut best: Option<Acquired> = None;
    let mut best_distance = detection_range;

    for candidate in candidates.iter().filter(|c| c.alive) {
        let distance = origin.distance_to(&candidate.position);
        if distance < best_distance {
            best_distance = distance;
            best = Some(Acquired {
                handle: candidate.handle,
                position: candidate.position,
                distance,
            });
        }
    }

    best
}
