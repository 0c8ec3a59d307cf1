//! Per-entity update step driven by the external scheduler.

use skirmish_core::{cooldown_elapsed, EntityId, Event};

use crate::{combat, hooks::KindHooks, walk, World};

/// Runs every cooldown-gated action of one entity that is due at the world's
/// current instant: fighting, then walking, then the monster position check.
///
/// Each gate is evaluated independently. Dead and missing entities are
/// skipped.
pub fn tick_entity(world: &mut World, entity: EntityId, out_events: &mut Vec<Event>) {
    if fight_due(world, entity) {
        combat::update_fight(world, entity, out_events);
    }
    if walk_due(world, entity) {
        walk::update_walk(world, entity, out_events);
    }
    if position_check_due(world, entity) {
        check_position(world, entity, out_events);
    }
}

fn fight_due(world: &World, entity: EntityId) -> bool {
    world.entities.get(&entity).is_some_and(|state| {
        state.alive
            && state.in_fight
            && cooldown_elapsed(
                state.timers.last_fight_update,
                world.now,
                world.config.fight_update_delay(),
            )
    })
}

fn walk_due(world: &World, entity: EntityId) -> bool {
    world.entities.get(&entity).is_some_and(|state| {
        state.alive
            && state.route.is_some()
            && cooldown_elapsed(
                state.timers.last_walk_update,
                world.now,
                world.config.walk_update_delay(),
            )
    })
}

fn position_check_due(world: &World, entity: EntityId) -> bool {
    world.entities.get(&entity).is_some_and(|state| {
        state.alive
            && state.kind.position_check_anchor().is_some()
            && cooldown_elapsed(
                state.timers.last_position_check,
                world.now,
                world.config.position_check_delay(),
            )
    })
}

fn check_position(world: &mut World, entity: EntityId, out_events: &mut Vec<Event>) {
    let now = world.now;
    let Some(state) = world.entities.get_mut(&entity) else {
        return;
    };
    let Some(spawn) = state.kind.position_check_anchor() else {
        return;
    };
    state.timers.last_position_check = now;
    out_events.push(Event::PositionCheckRequested {
        entity,
        position: state.position,
        spawn,
    });
}
