//! Damage, death and firing, shared by the player, hostile and projectile systems.

use hecs::{Entity, World};

use skirmish_ai::profiles::{get_profile, HostileKind};
use skirmish_core::animation::{Animator, SpriteCatalog};
use skirmish_core::components::{Actor, Behavior, Pilot};
use skirmish_core::constants::{KILL_SCORE, PLAYER_HURT_HOLD};
use skirmish_core::enums::{AnimState, ParticleKind, Team};
use skirmish_core::events::GameEvent;
use skirmish_core::types::{DamageOutcome, Health, Position, Velocity};

use crate::roster::{resolve, Rosters};
use crate::world_setup;

/// What a damage call did to its victim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Victim already dead, missing, or the amount was not positive.
    Ignored,
    Wounded,
    Killed,
}

/// Apply `amount` damage to `victim`. A no-op on the dead.
pub fn apply_damage(
    world: &mut World,
    victim: Entity,
    amount: i32,
    attacker: Team,
    events: &mut Vec<GameEvent>,
) -> HitOutcome {
    let (victim_team, outcome) = {
        let Ok((actor, health)) = world.query_one_mut::<(&Actor, &mut Health)>(victim) else {
            return HitOutcome::Ignored;
        };
        if !actor.alive {
            return HitOutcome::Ignored;
        }
        (actor.team, health.apply_damage(amount))
    };

    match outcome {
        DamageOutcome::Ignored => HitOutcome::Ignored,
        DamageOutcome::Wounded => {
            events.push(GameEvent::Hit {
                attacker,
                victim: victim_team,
                damage: amount,
            });
            react_to_hit(world, victim, victim_team);
            HitOutcome::Wounded
        }
        DamageOutcome::Depleted => {
            events.push(GameEvent::Hit {
                attacker,
                victim: victim_team,
                damage: amount,
            });
            events.push(GameEvent::Killed {
                victim: victim_team,
                by: attacker,
            });
            die(world, victim);
            HitOutcome::Killed
        }
    }
}

/// Hurt clip for those that have one, knockback for those that stagger.
fn react_to_hit(world: &mut World, victim: Entity, team: Team) {
    let (hurt_hold, knockback_speed, stagger_secs) = match HostileKind::for_team(team) {
        Some(kind) => {
            let profile = get_profile(kind);
            (profile.hurt_hold, profile.knockback_speed, profile.stagger_secs)
        }
        None => (PLAYER_HURT_HOLD, 0.0, 0.0),
    };

    let away_from = if knockback_speed > 0.0 {
        target_position(world, victim)
    } else {
        None
    };

    let Ok((position, velocity, animator, behavior)) =
        world.query_one_mut::<(&Position, &mut Velocity, &mut Animator, &mut Behavior)>(victim)
    else {
        return;
    };

    if hurt_hold > 0.0 {
        animator.interrupt(AnimState::Hurt, hurt_hold);
    }
    if let Some(target) = away_from {
        let angle = position.angle_to(&target) + std::f64::consts::PI;
        *velocity = Velocity::from_angle(angle, knockback_speed);
        if let Behavior::RangedAi(brain) | Behavior::MeleeAi(brain) = behavior {
            brain.stagger = stagger_secs;
        }
    }
}

/// Position of the hostile's current target, if it still exists.
fn target_position(world: &World, entity: Entity) -> Option<Position> {
    let handle = match &*world.get::<&Behavior>(entity).ok()? {
        Behavior::RangedAi(brain) | Behavior::MeleeAi(brain) => brain.target?,
        Behavior::PlayerControlled(_) => return None,
    };
    let target = resolve(world, handle)?;
    let position = world.get::<&Position>(target).ok().map(|p| *p);
    position
}

/// One-way alive -> dead transition. Stays in its roster until pruned.
pub fn die(world: &mut World, entity: Entity) {
    let Ok((actor, velocity, animator)) =
        world.query_one_mut::<(&mut Actor, &mut Velocity, &mut Animator)>(entity)
    else {
        return;
    };
    if !actor.alive {
        return;
    }

    actor.alive = false;
    actor.dead_for = 0.0;
    *velocity = Velocity::zero();
    animator.release();
    animator.play(AnimState::Death);
    log::debug!("{:?} {:?} died", actor.team, actor.archetype);
}

/// Credit the player with a kill.
pub fn award_kill(world: &mut World, player: Option<Entity>) {
    if let Some(pilot) = player.and_then(|p| pilot_mut(world, p)) {
        pilot.kills += 1;
        pilot.score += KILL_SCORE;
    }
}

/// Add `points` to the player's score.
pub fn award_score(world: &mut World, player: Option<Entity>, points: u64) {
    if let Some(pilot) = player.and_then(|p| pilot_mut(world, p)) {
        pilot.score += points;
    }
}

fn pilot_mut(world: &mut World, player: Entity) -> Option<&mut Pilot> {
    match world.query_one_mut::<&mut Behavior>(player).ok()? {
        Behavior::PlayerControlled(pilot) => Some(pilot),
        _ => None,
    }
}

/// Spawn a bullet plus its muzzle flash at `origin` and log the shot.
#[allow(clippy::too_many_arguments)]
pub fn fire(
    world: &mut World,
    rosters: &mut Rosters,
    origin: Position,
    angle: f64,
    team: Team,
    damage: i32,
    catalog: &dyn SpriteCatalog,
    events: &mut Vec<GameEvent>,
) {
    rosters
        .bullets
        .push(world_setup::spawn_bullet(world, origin, angle, team, damage));
    rosters
        .particles
        .push(world_setup::spawn_effect(world, ParticleKind::Muzzle, origin, catalog));
    events.push(GameEvent::ShotFired {
        team,
        position: origin,
    });
}
