//! Foe sets, targets and opponent re-engagement.
//!
//! A foe is an entity currently attacking another entity and is tracked on
//! the victim's side. Every operation here is a silent no-op when its
//! preconditions do not hold; callers re-issue them freely every tick.

use std::mem;

use log::{debug, trace};
use skirmish_core::{EntityId, Event, Property};

use crate::{schedule::DeferredTask, World};

/// Engages `attacker` against `target` when both are alive.
///
/// An attacker that already has a target keeps it; it still joins the
/// target's foe set.
pub(crate) fn start_fight(
    world: &mut World,
    attacker: EntityId,
    target: EntityId,
    out_events: &mut Vec<Event>,
) {
    if attacker == target {
        return;
    }
    if !world.is_alive(target) {
        return;
    }
    let Some(entity) = world.entities.get_mut(&attacker) else {
        return;
    };
    if !entity.alive {
        return;
    }

    if entity.target.is_none() {
        entity.target = Some(target);
        out_events.push(Event::PropertyChanged {
            entity: attacker,
            property: Property::Target(Some(target)),
        });
    }
    if !entity.in_fight {
        entity.in_fight = true;
        out_events.push(Event::PropertyChanged {
            entity: attacker,
            property: Property::InFight(true),
        });
    }

    if let Some(victim) = world.entities.get_mut(&target) {
        victim.add_foe(attacker);
    }
    debug!("entity {} engaged entity {}", attacker.get(), target.get());
}

/// Takes the entity out of combat, clearing its fight flag and target together.
pub(crate) fn end_fight(world: &mut World, entity: EntityId, out_events: &mut Vec<Event>) {
    let Some(state) = world.entities.get_mut(&entity) else {
        return;
    };

    let was_in_fight = mem::replace(&mut state.in_fight, false);
    let previous_target = state.target.take();

    if was_in_fight {
        out_events.push(Event::PropertyChanged {
            entity,
            property: Property::InFight(false),
        });
    }
    if previous_target.is_some() {
        out_events.push(Event::PropertyChanged {
            entity,
            property: Property::Target(None),
        });
    }
}

/// Releases every foe of `entity`.
///
/// Each foe leaves combat, forgets `entity` as one of its own foes and asks
/// for re-engagement. The outcome does not depend on iteration order: each
/// foe is only ever mutated on its own behalf.
pub(crate) fn dissolve_all_foes(world: &mut World, entity: EntityId, out_events: &mut Vec<Event>) {
    let Some(state) = world.entities.get_mut(&entity) else {
        return;
    };
    let foes = mem::take(&mut state.foes);

    for foe in foes {
        end_fight(world, foe, out_events);
        if let Some(foe_state) = world.entities.get_mut(&foe) {
            foe_state.remove_foe(entity);
        }
        switch_opponent(world, foe);
    }
}

/// Removes `entity` from every foe set in the registry.
pub(crate) fn withdraw_from_foe_sets(world: &mut World, entity: EntityId) {
    for other in world.entities.values_mut() {
        if other.has_foe(entity) {
            other.remove_foe(entity);
        }
    }
}

/// Schedules re-engagement when the entity is still being attacked by someone.
///
/// Re-engagement never happens in the same step so death side effects can
/// settle first.
pub(crate) fn switch_opponent(world: &mut World, entity: EntityId) {
    let has_foes = world
        .entities
        .get(&entity)
        .is_some_and(|state| !state.foes.is_empty());
    if !has_foes {
        return;
    }

    let due = world.now + world.config.reengage_delay();
    world
        .scheduler
        .schedule(due, DeferredTask::Reengage { entity });
}

/// Fires a scheduled re-engagement.
///
/// The opponent is the live foe with the lowest identifier at fire time.
pub(crate) fn reengage(world: &mut World, entity: EntityId, out_events: &mut Vec<Event>) {
    let Some(state) = world.entities.get(&entity) else {
        trace!("re-engagement dropped: entity {} is gone", entity.get());
        return;
    };
    if !state.alive {
        trace!("re-engagement dropped: entity {} is dead", entity.get());
        return;
    }

    let opponent = state
        .foes
        .iter()
        .copied()
        .find(|foe| world.is_alive(*foe));
    let Some(opponent) = opponent else {
        trace!("re-engagement dropped: entity {} has no live foe", entity.get());
        return;
    };

    start_fight(world, entity, opponent, out_events);
}
