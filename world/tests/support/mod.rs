#![allow(dead_code)]

use std::time::Duration;

use skirmish_core::{
    Command, EntityId, EntityKind, EntitySnapshot, EntityTemplate, Event, LootTableId,
    MonsterProfile, SimConfig, TilePosition, Vitals,
};
use skirmish_world::{self as world, query, World};

pub fn test_config() -> SimConfig {
    SimConfig::default()
        .with_walk_update_delay(Duration::from_millis(80))
        .with_fight_update_delay(Duration::from_millis(200))
        .with_damage_delay(Duration::from_millis(1_000))
        .with_position_check_delay(Duration::from_millis(1_000))
        .with_reengage_delay(Duration::from_millis(300))
        .with_loot_drop_delay(Duration::from_millis(200))
        .with_monster_respawn_delay(Duration::from_secs(10))
        .with_rng_seed(0x0bad_cafe)
}

pub fn player_at(x: u32, y: u32, vitals: Vitals) -> EntityTemplate {
    EntityTemplate {
        kind: EntityKind::Player,
        position: TilePosition::new(x, y),
        vitals,
    }
}

pub fn monster_at(x: u32, y: u32, vitals: Vitals, profile: MonsterProfile) -> EntityTemplate {
    EntityTemplate {
        kind: EntityKind::Monster(profile),
        position: TilePosition::new(x, y),
        vitals,
    }
}

pub fn rat_profile(x: u32, y: u32) -> MonsterProfile {
    MonsterProfile::new(TilePosition::new(x, y), true, LootTableId::new(3))
}

pub fn run(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    events
}

pub fn tick(world: &mut World, millis: u64) -> Vec<Event> {
    run(
        world,
        Command::Tick {
            dt: Duration::from_millis(millis),
        },
    )
}

pub fn spawn(world: &mut World, template: EntityTemplate) -> EntityId {
    let events = run(world, Command::SpawnEntity { template });
    events
        .iter()
        .find_map(|event| match event {
            Event::EntitySpawned { entity, .. } => Some(*entity),
            _ => None,
        })
        .expect("spawn accepted")
}

pub fn start_fight(world: &mut World, attacker: EntityId, target: EntityId) -> Vec<Event> {
    run(world, Command::StartFight { attacker, target })
}

pub fn kill(world: &mut World, entity: EntityId) -> Vec<Event> {
    run(
        world,
        Command::ApplyLifeDelta {
            entity,
            delta: -1_000_000,
        },
    )
}

pub fn snapshot(world: &World, entity: EntityId) -> EntitySnapshot {
    query::entity(world, entity).expect("entity registered")
}

pub fn count<F>(events: &[Event], predicate: F) -> usize
where
    F: Fn(&Event) -> bool,
{
    events.iter().filter(|event| predicate(event)).count()
}
