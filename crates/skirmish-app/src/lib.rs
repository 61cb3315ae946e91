//! Skirmish headless host.
//!
//! This crate wires the simulation crates to a frame-paced game loop thread
//! and exposes a small control surface for whatever drives it.

pub mod autopilot;
pub mod control;
pub mod game_loop;
pub mod state;

pub use skirmish_core as core;
