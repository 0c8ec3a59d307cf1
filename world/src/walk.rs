//! Route assignment and time-based movement along routes.

use skirmish_core::{EntityId, Event, Route};
use skirmish_system_movement::interpolate;

use crate::{hooks::KindHooks, World};

/// Commits a living entity to `route`, replacing any route it was following.
pub(crate) fn set_route(
    world: &mut World,
    entity: EntityId,
    route: Route,
    out_events: &mut Vec<Event>,
) {
    let Some(state) = world.entities.get_mut(&entity) else {
        return;
    };
    if !state.alive {
        return;
    }

    let category = state.kind.tag();
    let view = route.trim(category);
    state.route = Some(route);
    out_events.push(Event::RouteAssigned {
        entity,
        category,
        position: state.position,
        route: view,
    });
}

/// Moves the entity to the waypoint matching the elapsed travel time.
pub(crate) fn update_walk(world: &mut World, entity: EntityId, out_events: &mut Vec<Event>) {
    let now = world.now;
    let Some(state) = world.entities.get_mut(&entity) else {
        return;
    };
    state.timers.last_walk_update = now;
    let Some(route) = state.route.as_ref() else {
        return;
    };

    let progress = interpolate(route, now);
    let action = route.action();
    let previous = state.position;
    if let Some(waypoint) = route.waypoint(progress.index) {
        state.position = waypoint;
    }
    let (kind, position) = (state.kind, state.position);

    if progress.completed {
        state.route = None;
        kind.on_path_complete(entity, position, action, out_events);
    }

    if position != previous {
        out_events.push(Event::PositionChanged {
            entity,
            from: previous,
            to: position,
        });
        kind.on_moved(entity, position, out_events);
    }
}
