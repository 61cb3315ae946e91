//! Hostile AI for Skirmish.
//!
//! Implements target acquisition, the patrol / chase / attack state machine,
//! and per-kind behavior profiles with wave scaling.

pub mod fsm;
pub mod profiles;
pub mod targeting;

pub use skirmish_core as core;
