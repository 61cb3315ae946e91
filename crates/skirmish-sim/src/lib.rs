//! Simulation engine for Skirmish.
//!
//! Owns the hecs ECS world and the entity rosters, runs the phase-ordered
//! systems once per tick, and produces GameStateSnapshots for the host.

pub mod engine;
pub mod roster;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use skirmish_core as core;

#[cfg(test)]
mod tests;
