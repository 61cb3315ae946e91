//! Insertion-ordered rosters of live entities.
//!
//! The hecs world stores components; the rosters fix iteration order so
//! targeting ties and collision order are deterministic. Stored in
//! `SimulationEngine`, NOT as ECS entities.

use hecs::{Entity, World};

use skirmish_core::components::Actor;
use skirmish_core::types::Handle;

/// Every entity category the engine ticks, in spawn order.
#[derive(Debug, Clone, Default)]
pub struct Rosters {
    pub player: Option<Entity>,
    /// Soldiers.
    pub enemies: Vec<Entity>,
    pub zombies: Vec<Entity>,
    pub bullets: Vec<Entity>,
    pub particles: Vec<Entity>,
}

impl Rosters {
    /// Despawn everything and empty every roster.
    pub fn clear(&mut self, world: &mut World) {
        let all = self
            .player
            .take()
            .into_iter()
            .chain(self.enemies.drain(..))
            .chain(self.zombies.drain(..))
            .chain(self.bullets.drain(..))
            .chain(self.particles.drain(..));
        for entity in all {
            let _ = world.despawn(entity);
        }
    }

    /// Player first, then soldiers, then zombies.
    pub fn actors(&self) -> impl Iterator<Item = Entity> + '_ {
        self.player
            .iter()
            .copied()
            .chain(self.enemies.iter().copied())
            .chain(self.zombies.iter().copied())
    }

    pub fn alive_enemies(&self, world: &World) -> u32 {
        count_alive(world, &self.enemies)
    }

    pub fn alive_zombies(&self, world: &World) -> u32 {
        count_alive(world, &self.zombies)
    }
}

fn count_alive(world: &World, roster: &[Entity]) -> u32 {
    roster
        .iter()
        .filter(|&&e| world.get::<&Actor>(e).is_ok_and(|a| a.alive))
        .count() as u32
}

/// Stable handle for an entity.
pub fn handle_of(entity: Entity) -> Handle {
    Handle(entity.to_bits().get())
}

/// Resolve a handle back to an entity that still exists in `world`.
pub fn resolve(world: &World, handle: Handle) -> Option<Entity> {
    Entity::from_bits(handle.0).filter(|&e| world.contains(e))
}
