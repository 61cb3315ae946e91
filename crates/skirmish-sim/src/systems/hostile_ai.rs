//! Hostile AI system: updates soldiers or zombies each tick.
//!
//! Builds the candidate list from the rosters, calls the FSM from
//! skirmish-ai, then applies velocity, facing, clip and attack to the ECS.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use skirmish_ai::fsm::{evaluate, AttackAction, HostileContext};
use skirmish_ai::profiles::HostileKind;
use skirmish_ai::targeting::{acquire_target, Candidate};
use skirmish_core::animation::{Animator, SpriteCatalog};
use skirmish_core::components::{Actor, Behavior, Body};
use skirmish_core::events::GameEvent;
use skirmish_core::state::WorldView;
use skirmish_core::types::{bounds_at, Position, Velocity};

use crate::roster::{handle_of, resolve, Rosters};
use crate::systems::{combat, movement};

/// Run one hostile roster. Soldiers hunt the player and zombies; zombies hunt the player and soldiers.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rosters: &mut Rosters,
    kind: HostileKind,
    dt: f64,
    rng: &mut ChaCha8Rng,
    bounds: &WorldView,
    catalog: &dyn SpriteCatalog,
    events: &mut Vec<GameEvent>,
) {
    let roster = match kind {
        HostileKind::Soldier => rosters.enemies.clone(),
        HostileKind::Zombie => rosters.zombies.clone(),
    };

    for entity in roster {
        let alive = world.get::<&Actor>(entity).is_ok_and(|a| a.alive);
        if alive {
            think(world, rosters, entity, kind, dt, rng, catalog, events);
        }
        movement::step_actor(world, entity, dt, bounds);
    }
}

#[allow(clippy::too_many_arguments)]
fn think(
    world: &mut World,
    rosters: &mut Rosters,
    entity: Entity,
    kind: HostileKind,
    dt: f64,
    rng: &mut ChaCha8Rng,
    catalog: &dyn SpriteCatalog,
    events: &mut Vec<GameEvent>,
) {
    let Ok(position) = world.get::<&Position>(entity).map(|p| *p) else {
        return;
    };

    // Re-read the opposing rosters every tick; nothing is cached across ticks.
    let opponents = match kind {
        HostileKind::Soldier => &rosters.zombies,
        HostileKind::Zombie => &rosters.enemies,
    };
    let candidates = gather_candidates(world, rosters.player.iter().chain(opponents.iter()).copied());

    let (update, center) = {
        let Ok((actor, vel, body, animator, behavior)) =
            world.query_one_mut::<(&mut Actor, &mut Velocity, &Body, &mut Animator, &mut Behavior)>(entity)
        else {
            return;
        };
        let (Behavior::RangedAi(brain) | Behavior::MeleeAi(brain)) = behavior else {
            return;
        };

        let ctx = HostileContext {
            kind,
            position,
            target: acquire_target(&position, brain.detection_range, &candidates),
            dt,
        };
        let update = evaluate(brain, &ctx, rng);
        if update.state_changed {
            log::debug!("{kind:?} {entity:?} -> {:?}", update.state);
        }

        // A staggered hostile keeps drifting on its knockback.
        if brain.stagger > 0.0 {
            brain.stagger -= dt;
        } else {
            *vel = update.velocity;
        }
        if let Some(facing) = update.facing_right {
            actor.facing_right = facing;
        }
        if !animator.is_held() {
            animator.play(update.anim);
        }

        (update, bounds_at(&position, body.width, body.height).center())
    };

    match update.action {
        Some(AttackAction::Fire { angle, damage }) => {
            combat::fire(world, rosters, center, angle, kind.team(), damage, catalog, events);
        }
        Some(AttackAction::Strike { target, damage }) => {
            if let Some(victim) = resolve(world, target) {
                combat::apply_damage(world, victim, damage, kind.team(), events);
            }
        }
        None => {}
    }
}

fn gather_candidates(world: &World, entities: impl Iterator<Item = Entity>) -> Vec<Candidate> {
    entities
        .filter_map(|e| {
            let actor = world.get::<&Actor>(e).ok()?;
            let position = *world.get::<&Position>(e).ok()?;
            Some(Candidate {
                handle: handle_of(e),
                position,
                alive: actor.alive,
            })
        })
        .collect()
}
