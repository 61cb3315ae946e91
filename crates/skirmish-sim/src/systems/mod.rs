//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only)
//! plus the engine's rosters. They do not own state; all state lives in
//! components, the rosters, and the wave state.

pub mod cleanup;
pub mod combat;
pub mod hostile_ai;
pub mod movement;
pub mod particles;
pub mod player;
pub mod projectile;
pub mod snapshot;
pub mod wave_spawner;
