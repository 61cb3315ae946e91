//! Core types and definitions for the Skirmish simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, the animation engine, input snapshots, session commands,
//! state snapshots, events, config and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod animation;
pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod input;
pub mod state;
pub mod types;
