#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives a Skirmish simulation from a scenario file.

mod logging;
mod scenario;

use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use clap::Parser;
use log::info;
use skirmish_core::{Command, EntityId, Event, Timestamp};
use skirmish_world::{self as world, query, World};

use scenario::{Roster, Scenario};

/// Runs a headless Skirmish simulation and prints every emitted event.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario TOML file; the built-in duel is used when omitted.
    #[arg(short, long)]
    scenario: Option<PathBuf>,
    /// Number of ticks to simulate.
    #[arg(short, long, default_value_t = 100)]
    ticks: u32,
    /// Simulated time advanced by each tick, in milliseconds.
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the Skirmish command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let scenario = match &args.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::builtin()?,
    };

    let mut world = World::with_config(scenario.config());
    let mut events = Vec::new();
    let roster = scenario.install(&mut world, &mut events)?;
    let mut respawns = Vec::new();
    report(&world, &roster, &events, &mut respawns);

    let dt = Duration::from_millis(args.tick_ms);
    for _ in 0..args.ticks {
        events.clear();
        world::apply(&mut world, Command::Tick { dt }, &mut events);
        run_due_respawns(&mut world, &mut respawns, &mut events);
        report(&world, &roster, &events, &mut respawns);
    }

    let alive = query::entity_view(&world)
        .iter()
        .filter(|entity| entity.alive)
        .count();
    info!(
        "simulated {} ms, {alive} entities alive",
        query::now(&world).offset().as_millis()
    );
    Ok(())
}

/// Prints `events` and remembers enabled respawn requests for later.
fn report(
    world: &World,
    roster: &Roster,
    events: &[Event],
    respawns: &mut Vec<(Timestamp, EntityId)>,
) {
    let now = query::now(world);
    for event in events {
        let subject = subject(event)
            .and_then(|entity| roster.name(entity))
            .unwrap_or("-");
        println!("{:>8} ms  {subject:<8} {event:?}", now.offset().as_millis());

        if let Event::RespawnRequested {
            entity,
            enabled: true,
            delay,
            ..
        } = event
        {
            respawns.push((now + *delay, *entity));
        }
    }
}

fn run_due_respawns(
    world: &mut World,
    respawns: &mut Vec<(Timestamp, EntityId)>,
    out_events: &mut Vec<Event>,
) {
    let now = query::now(world);
    respawns.retain(|&(due, entity)| {
        if due > now {
            return true;
        }
        world::apply(world, Command::RespawnEntity { entity }, out_events);
        false
    });
}

fn subject(event: &Event) -> Option<EntityId> {
    match event {
        Event::EntitySpawned { entity, .. }
        | Event::EntityRespawned { entity, .. }
        | Event::EntityDespawned { entity }
        | Event::RouteAssigned { entity, .. }
        | Event::PositionChanged { entity, .. }
        | Event::PathHookTriggered { entity, .. }
        | Event::NearbyMonsterCheckRequested { entity, .. }
        | Event::PositionCheckRequested { entity, .. }
        | Event::PropertyChanged { entity, .. }
        | Event::LifeChanged { entity, .. }
        | Event::RespawnRequested { entity, .. } => Some(*entity),
        Event::CombatUpdate { recipient, .. } => Some(*recipient),
        Event::Killed { killer, .. } => Some(*killer),
        Event::TimeAdvanced { .. }
        | Event::SpawnRejected { .. }
        | Event::LootDropRequested { .. }
        | Event::ChestAreaDecremented { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::{ChestAreaId, CombatUpdate};

    #[test]
    fn args_parse_with_defaults() {
        let args = Args::try_parse_from(["skirmish"]).expect("defaults parse");
        assert_eq!(args.ticks, 100);
        assert_eq!(args.tick_ms, 100);
        assert!(args.scenario.is_none());
        assert!(!args.verbose);
    }

    #[test]
    fn events_are_attributed_to_their_subject() {
        let hero = EntityId::new(4);
        assert_eq!(
            subject(&Event::CombatUpdate {
                recipient: hero,
                update: CombatUpdate::TargetAffected { amount: 3 },
            }),
            Some(hero)
        );
        assert_eq!(
            subject(&Event::ChestAreaDecremented {
                area: ChestAreaId::new(1),
            }),
            None
        );
    }

    #[test]
    fn enabled_respawns_fire_after_their_delay() {
        let scenario = Scenario::builtin().expect("built-in scenario parses");
        let mut world = World::with_config(scenario.config());
        let mut events = Vec::new();
        let roster = scenario
            .install(&mut world, &mut events)
            .expect("built-in scenario installs");
        let mut respawns = Vec::new();

        let mut respawned = false;
        for _ in 0..600 {
            events.clear();
            world::apply(
                &mut world,
                Command::Tick {
                    dt: Duration::from_millis(100),
                },
                &mut events,
            );
            run_due_respawns(&mut world, &mut respawns, &mut events);
            respawned |= events
                .iter()
                .any(|event| matches!(event, Event::EntityRespawned { .. }));
            report(&world, &roster, &events, &mut respawns);
        }

        assert!(respawned, "the rat dies and comes back within a minute");
    }
}
