#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative entity registry and real-time simulation for Skirmish.
//!
//! The world owns every entity together with its route, foe set and
//! cooldown timers. It derives positions from elapsed simulation time,
//! resolves cooldown-gated combat, and tears down combat relationships on
//! death before any death side effect is dispatched. Work that must happen
//! later (opponent re-engagement, loot drops) is queued on an internal
//! scheduler and fired by [`Command::Tick`].

use std::collections::BTreeMap;

use log::debug;
use skirmish_core::{Command, EntityId, Event, SimConfig, SpawnError, Timestamp};
use skirmish_system_combat::DamageRoller;

mod combat;
mod entity;
mod foes;
mod hooks;
mod lifecycle;
mod schedule;
mod tick;
mod walk;

use entity::Entity;
use schedule::Scheduler;

pub use tick::tick_entity;

/// Represents the authoritative Skirmish world state.
#[derive(Debug)]
pub struct World {
    config: SimConfig,
    now: Timestamp,
    entities: BTreeMap<EntityId, Entity>,
    next_entity_id: Option<EntityId>,
    scheduler: Scheduler,
    roller: DamageRoller,
}

impl World {
    /// Creates an empty world using the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SimConfig::default())
    }

    /// Creates an empty world driven by the provided configuration.
    #[must_use]
    pub fn with_config(config: SimConfig) -> Self {
        Self {
            roller: DamageRoller::new(config.rng_seed()),
            config,
            now: Timestamp::ZERO,
            entities: BTreeMap::new(),
            next_entity_id: Some(EntityId::new(0)),
            scheduler: Scheduler::default(),
        }
    }

    fn allocate_id(&mut self) -> Option<EntityId> {
        let id = self.next_entity_id?;
        self.next_entity_id = id.get().checked_add(1).map(EntityId::new);
        Some(id)
    }

    fn is_alive(&self, entity: EntityId) -> bool {
        self.entities.get(&entity).is_some_and(|state| state.alive)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.now = world.now + dt;
            out_events.push(Event::TimeAdvanced { now: world.now });
            schedule::run_due(world, out_events);

            let ids: Vec<EntityId> = world.entities.keys().copied().collect();
            for id in ids {
                tick_entity(world, id, out_events);
            }
        }
        Command::SpawnEntity { template } => {
            if let Err(reason) = template.validate() {
                out_events.push(Event::SpawnRejected { reason });
                return;
            }
            let Some(id) = world.allocate_id() else {
                out_events.push(Event::SpawnRejected {
                    reason: SpawnError::IdsExhausted,
                });
                return;
            };
            let previous = world
                .entities
                .insert(id, Entity::spawn(id, template, world.now));
            debug_assert!(previous.is_none(), "entity ids are never reused");
            debug!("spawned entity {} as {:?}", id.get(), template.kind.tag());
            out_events.push(Event::EntitySpawned {
                entity: id,
                kind: template.kind.tag(),
                position: template.position,
            });
        }
        Command::DespawnEntity { entity } => {
            if world.entities.remove(&entity).is_some() {
                out_events.push(Event::EntityDespawned { entity });
            }
        }
        Command::RespawnEntity { entity } => lifecycle::respawn(world, entity, out_events),
        Command::SetRoute { entity, route } => walk::set_route(world, entity, route, out_events),
        Command::StartFight { attacker, target } => {
            foes::start_fight(world, attacker, target, out_events);
        }
        Command::EndFight { entity } => foes::end_fight(world, entity, out_events),
        Command::ApplyLifeDelta { entity, delta } => {
            let _ = lifecycle::apply_delta(world, entity, i64::from(delta), out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use skirmish_core::{EntityId, EntitySnapshot, EntityView, SimConfig, Timestamp};

    use super::World;

    /// Current instant of the simulation clock.
    #[must_use]
    pub fn now(world: &World) -> Timestamp {
        world.now
    }

    /// Configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &SimConfig {
        &world.config
    }

    /// Captures the state of a single entity, if it is registered.
    #[must_use]
    pub fn entity(world: &World, entity: EntityId) -> Option<EntitySnapshot> {
        world.entities.get(&entity).map(|state| state.snapshot())
    }

    /// Captures a read-only view of every registered entity.
    #[must_use]
    pub fn entity_view(world: &World) -> EntityView {
        EntityView::from_snapshots(world.entities.values().map(|state| state.snapshot()).collect())
    }

    /// Number of deferred tasks waiting to fire.
    #[must_use]
    pub fn pending_tasks(world: &World) -> usize {
        world.scheduler.len()
    }
}
