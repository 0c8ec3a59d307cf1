//! Life clamping, death and monster respawn.

use log::debug;
use skirmish_core::{EntityId, Event, Property};

use crate::{
    foes,
    hooks::{DeathContext, KindHooks},
    World,
};

/// Adds `incr` to the entity's life and returns the change actually applied.
///
/// Life saturates at `0` and `max_life`; reaching zero kills the entity.
/// Dead or missing entities are left untouched and report no change.
pub(crate) fn apply_delta(
    world: &mut World,
    entity: EntityId,
    incr: i64,
    out_events: &mut Vec<Event>,
) -> i64 {
    let Some(state) = world.entities.get_mut(&entity) else {
        return 0;
    };
    if !state.alive {
        return 0;
    }

    let before = i64::from(state.vitals.life);
    let max_life = state.vitals.max_life;
    let requested = before.saturating_add(incr);
    let lethal = requested <= 0;
    state.vitals.life = if lethal {
        0
    } else {
        u32::try_from(requested).map_or(max_life, |life| life.min(max_life))
    };
    let life = state.vitals.life;
    let kind = state.kind;

    if lethal {
        die(world, entity, out_events);
    }
    kind.on_life_changed(entity, life, out_events);

    i64::from(life) - before
}

/// Tears down every combat relationship of the entity, then marks it dead.
pub(crate) fn die(world: &mut World, entity: EntityId, out_events: &mut Vec<Event>) {
    foes::dissolve_all_foes(world, entity, out_events);
    foes::withdraw_from_foe_sets(world, entity);

    let last_hitter = world
        .entities
        .get(&entity)
        .and_then(|state| state.last_hitter);
    if let Some(hitter) = last_hitter {
        out_events.push(Event::PropertyChanged {
            entity,
            property: Property::LastHitter(hitter),
        });
    }

    foes::end_fight(world, entity, out_events);

    let Some(state) = world.entities.get_mut(&entity) else {
        return;
    };
    state.alive = false;
    state.route = None;
    out_events.push(Event::PropertyChanged {
        entity,
        property: Property::Alive(false),
    });
    debug!(
        "entity {} died at ({}, {})",
        entity.get(),
        state.position.x(),
        state.position.y()
    );

    let (kind, position) = (state.kind, state.position);
    kind.on_killed(
        entity,
        position,
        DeathContext {
            now: world.now,
            config: &world.config,
            scheduler: &mut world.scheduler,
            out_events,
        },
    );
}

/// Brings a dead monster back as a fresh idle entity at its spawn tile.
pub(crate) fn respawn(world: &mut World, entity: EntityId, out_events: &mut Vec<Event>) {
    let now = world.now;
    let Some(state) = world.entities.get_mut(&entity) else {
        return;
    };
    if state.alive {
        return;
    }
    let Some(spawn) = state.kind.respawn_tile() else {
        return;
    };

    state.revive_at(spawn, now);
    out_events.push(Event::EntityRespawned {
        entity,
        position: spawn,
    });
    out_events.push(Event::PropertyChanged {
        entity,
        property: Property::Alive(true),
    });
    debug!("entity {} respawned", entity.get());
}
