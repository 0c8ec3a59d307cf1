mod support;

use std::time::Duration;

use rstest::rstest;
use skirmish_core::{
    Command, EntityId, Event, KindTag, Orientation, PathHook, Route, RouteAction, TilePosition,
    Timestamp, Vitals,
};
use skirmish_world::{query, World};
use support::{count, kill, monster_at, player_at, rat_profile, run, snapshot, spawn, test_config, tick};

fn eastward(from_x: u32, y: u32, tiles: u32, departure: Timestamp) -> Route {
    let path = (from_x..=from_x + tiles)
        .map(|x| TilePosition::new(x, y))
        .collect();
    Route::new(
        path,
        departure,
        Duration::from_secs(1),
        Some(RouteAction::new(7)),
        Orientation::East,
    )
    .expect("non-empty path")
}

fn set_route(world: &mut World, entity: EntityId, route: Route) -> Vec<Event> {
    run(world, Command::SetRoute { entity, route })
}

#[test]
fn completed_player_route_fires_hooks_in_order() {
    let mut world = World::with_config(test_config());
    let player = spawn(&mut world, player_at(0, 3, Vitals::new(10, 1, 1)));
    let _ = set_route(&mut world, player, eastward(0, 3, 4, Timestamp::ZERO));

    let events = tick(&mut world, 4_500);

    let arrival = TilePosition::new(4, 3);
    let hook = |hook| Event::PathHookTriggered {
        entity: player,
        position: arrival,
        hook,
    };
    assert_eq!(
        events,
        vec![
            Event::TimeAdvanced {
                now: Timestamp::from_millis(4_500),
            },
            hook(PathHook::Door),
            hook(PathHook::Item),
            hook(PathHook::Action(Some(RouteAction::new(7)))),
            hook(PathHook::Save),
            Event::PositionChanged {
                entity: player,
                from: TilePosition::new(0, 3),
                to: arrival,
            },
            Event::NearbyMonsterCheckRequested {
                entity: player,
                position: arrival,
            },
        ]
    );
    let state = snapshot(&world, player);
    assert_eq!(state.position, arrival);
    assert!(state.route.is_none());
}

#[test]
fn walking_waits_for_its_cooldown() {
    let mut world = World::with_config(test_config());
    let player = spawn(&mut world, player_at(0, 3, Vitals::new(10, 1, 1)));
    let _ = set_route(&mut world, player, eastward(0, 3, 4, Timestamp::ZERO));

    let early = tick(&mut world, 50);
    assert_eq!(early.len(), 1);
    assert_eq!(snapshot(&world, player).position, TilePosition::new(0, 3));

    let events = tick(&mut world, 50);
    assert!(events.contains(&Event::PositionChanged {
        entity: player,
        from: TilePosition::new(0, 3),
        to: TilePosition::new(1, 3),
    }));
    assert!(snapshot(&world, player).route.is_some());
}

#[test]
fn position_follows_elapsed_time_across_ticks() {
    let mut world = World::with_config(test_config());
    let player = spawn(&mut world, player_at(0, 0, Vitals::new(10, 1, 1)));
    let _ = set_route(&mut world, player, eastward(0, 0, 4, Timestamp::ZERO));

    let mut visited = Vec::new();
    for _ in 0..10 {
        let _ = tick(&mut world, 500);
        visited.push(snapshot(&world, player).position.x());
    }

    assert_eq!(visited, vec![1, 1, 2, 2, 3, 3, 4, 4, 4, 4]);
}

#[rstest]
#[case(500, 1)]
#[case(1_000, 1)]
#[case(1_001, 2)]
#[case(3_500, 4)]
#[case(9_000, 4)]
fn single_late_tick_lands_on_the_interpolated_tile(#[case] elapsed: u64, #[case] expected_x: u32) {
    let mut world = World::with_config(test_config());
    let player = spawn(&mut world, player_at(0, 0, Vitals::new(10, 1, 1)));
    let _ = set_route(&mut world, player, eastward(0, 0, 4, Timestamp::ZERO));

    let _ = tick(&mut world, elapsed);

    assert_eq!(snapshot(&world, player).position, TilePosition::new(expected_x, 0));
}

#[test]
fn monsters_walk_without_player_hooks() {
    let mut world = World::with_config(test_config());
    let monster = spawn(
        &mut world,
        monster_at(0, 3, Vitals::new(10, 1, 1), rat_profile(0, 3)),
    );
    let _ = set_route(&mut world, monster, eastward(0, 3, 2, Timestamp::ZERO));

    let events = tick(&mut world, 2_000);

    assert_eq!(snapshot(&world, monster).position, TilePosition::new(2, 3));
    assert_eq!(count(&events, |e| matches!(e, Event::PathHookTriggered { .. })), 0);
    assert_eq!(
        count(&events, |e| matches!(e, Event::NearbyMonsterCheckRequested { .. })),
        0
    );
    assert!(events.contains(&Event::PositionCheckRequested {
        entity: monster,
        position: TilePosition::new(2, 3),
        spawn: TilePosition::new(0, 3),
    }));
}

#[test]
fn route_assignment_publishes_a_trimmed_view() {
    let mut world = World::with_config(test_config());
    let player = spawn(&mut world, player_at(0, 0, Vitals::new(10, 1, 1)));
    let monster = spawn(
        &mut world,
        monster_at(0, 1, Vitals::new(10, 1, 1), rat_profile(0, 1)),
    );

    let player_events = set_route(&mut world, player, eastward(0, 0, 2, Timestamp::ZERO));
    let monster_events = set_route(&mut world, monster, eastward(0, 1, 2, Timestamp::ZERO));

    let Event::RouteAssigned {
        category, route, ..
    } = &player_events[0]
    else {
        panic!("expected route assignment, got {player_events:?}");
    };
    assert_eq!(*category, KindTag::Player);
    assert_eq!(route.action, Some(RouteAction::new(7)));

    let Event::RouteAssigned {
        category, route, ..
    } = &monster_events[0]
    else {
        panic!("expected route assignment, got {monster_events:?}");
    };
    assert_eq!(*category, KindTag::Monster);
    assert_eq!(route.action, None);
    assert_eq!(route.path.len(), 3);
}

#[test]
fn new_route_replaces_the_current_one() {
    let mut world = World::with_config(test_config());
    let player = spawn(&mut world, player_at(0, 0, Vitals::new(10, 1, 1)));
    let _ = set_route(&mut world, player, eastward(0, 0, 4, Timestamp::ZERO));
    let _ = tick(&mut world, 1_000);
    assert_eq!(snapshot(&world, player).position, TilePosition::new(1, 0));

    let southward = Route::new(
        vec![
            TilePosition::new(1, 0),
            TilePosition::new(1, 1),
            TilePosition::new(1, 2),
        ],
        query::now(&world),
        Duration::from_secs(1),
        None,
        Orientation::South,
    )
    .expect("non-empty path");
    let _ = set_route(&mut world, player, southward);
    let _ = tick(&mut world, 1_000);

    assert_eq!(snapshot(&world, player).position, TilePosition::new(1, 1));
}

#[test]
fn dead_entities_do_not_take_routes() {
    let mut world = World::with_config(test_config());
    let player = spawn(&mut world, player_at(0, 0, Vitals::new(10, 1, 1)));
    let _ = set_route(&mut world, player, eastward(0, 0, 4, Timestamp::ZERO));
    let _ = kill(&mut world, player);
    assert!(snapshot(&world, player).route.is_none());

    let events = set_route(&mut world, player, eastward(0, 0, 4, Timestamp::ZERO));
    assert!(events.is_empty());

    let _ = tick(&mut world, 5_000);
    assert_eq!(snapshot(&world, player).position, TilePosition::new(0, 0));
}
