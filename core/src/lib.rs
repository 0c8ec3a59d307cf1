#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Skirmish simulation.
//!
//! This crate defines the message surface that connects the hosting server,
//! the authoritative world, and the pure systems. The server submits
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and every outward effect (position
//! changes, combat updates, kill attribution, respawn and loot requests) is
//! reported as an [`Event`]. Entities refer to each other exclusively through
//! [`EntityId`] values resolved by the world at use time.

use std::time::Duration;

use serde::{Deserialize, Serialize};

mod config;
mod kind;
mod route;
mod time;

pub use config::SimConfig;
pub use kind::{EntityKind, EntityTemplate, KindTag, MonsterProfile, SpawnError, Vitals};
pub use route::{Orientation, Route, RouteAction, RouteError, RouteView};
pub use time::{cooldown_elapsed, Timestamp};

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock, fires due deferred tasks and ticks every entity.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Registers a new entity built from the provided template.
    SpawnEntity {
        /// Kind, position and vitals of the entity.
        template: EntityTemplate,
    },
    /// Removes an entity from the registry.
    DespawnEntity {
        /// Identifier of the entity to remove.
        entity: EntityId,
    },
    /// Rebuilds a dead monster as a fresh idle entity at its spawn tile.
    RespawnEntity {
        /// Identifier of the monster to bring back.
        entity: EntityId,
    },
    /// Commits an entity to a new route, discarding any previous one.
    SetRoute {
        /// Identifier of the moving entity.
        entity: EntityId,
        /// Precomputed route to follow.
        route: Route,
    },
    /// Engages `attacker` against `target`.
    StartFight {
        /// Entity initiating the fight.
        attacker: EntityId,
        /// Entity being attacked.
        target: EntityId,
    },
    /// Ends the entity's current fight and clears its target.
    EndFight {
        /// Entity leaving combat.
        entity: EntityId,
    },
    /// Adds `delta` to the entity's life, clamped to its bounds.
    ApplyLifeDelta {
        /// Entity whose life changes.
        entity: EntityId,
        /// Signed life change; negative values deal damage.
        delta: i32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Simulation instant after the advance.
        now: Timestamp,
    },
    /// Confirms that an entity was registered.
    EntitySpawned {
        /// Identifier allocated to the entity.
        entity: EntityId,
        /// Category of the entity.
        kind: KindTag,
        /// Tile the entity occupies.
        position: TilePosition,
    },
    /// Reports that a spawn request was rejected.
    SpawnRejected {
        /// Specific reason the spawn failed.
        reason: SpawnError,
    },
    /// Confirms that a dead monster was rebuilt at its spawn tile.
    EntityRespawned {
        /// Identifier of the respawned monster.
        entity: EntityId,
        /// Tile the monster occupies after respawning.
        position: TilePosition,
    },
    /// Confirms that an entity was removed from the registry.
    EntityDespawned {
        /// Identifier of the removed entity.
        entity: EntityId,
    },
    /// Publishes a newly assigned route to observers of the entity.
    RouteAssigned {
        /// Identifier of the moving entity.
        entity: EntityId,
        /// Category of the moving entity.
        category: KindTag,
        /// Tile the entity occupied when the route was assigned.
        position: TilePosition,
        /// Category-trimmed copy of the route.
        route: RouteView,
    },
    /// Reports that interpolation moved an entity to a different tile.
    PositionChanged {
        /// Identifier of the entity that moved.
        entity: EntityId,
        /// Tile occupied before the movement evaluation.
        from: TilePosition,
        /// Tile occupied after the movement evaluation.
        to: TilePosition,
    },
    /// Requests one of the player path-completion checks.
    PathHookTriggered {
        /// Identifier of the player that completed its route.
        entity: EntityId,
        /// Tile the player arrived at.
        position: TilePosition,
        /// Check to perform.
        hook: PathHook,
    },
    /// Requests a scan for monsters near a player that changed tiles.
    NearbyMonsterCheckRequested {
        /// Identifier of the player that moved.
        entity: EntityId,
        /// Tile the player now occupies.
        position: TilePosition,
    },
    /// Requests the periodic position check of a monster.
    PositionCheckRequested {
        /// Identifier of the monster.
        entity: EntityId,
        /// Tile the monster currently occupies.
        position: TilePosition,
        /// Tile the monster spawned at.
        spawn: TilePosition,
    },
    /// Announces an observable change to an entity's combat or life state.
    PropertyChanged {
        /// Identifier of the entity that changed.
        entity: EntityId,
        /// New value of the property.
        property: Property,
    },
    /// Reports a player's life after a life change was applied.
    LifeChanged {
        /// Identifier of the player.
        entity: EntityId,
        /// Life after clamping.
        life: u32,
    },
    /// Reports the outcome of one resolved hit to an interested entity.
    CombatUpdate {
        /// Entity whose client receives the update.
        recipient: EntityId,
        /// Shape of the update from the recipient's perspective.
        update: CombatUpdate,
    },
    /// Attributes a death to the entity that landed the lethal hit.
    Killed {
        /// Entity that landed the lethal hit.
        killer: EntityId,
        /// Entity that died.
        victim: EntityId,
    },
    /// Asks the respawn collaborator to bring a dead monster back.
    RespawnRequested {
        /// Identifier of the dead monster.
        entity: EntityId,
        /// Tile the monster should reappear at.
        spawn: TilePosition,
        /// Whether the monster is configured to respawn.
        enabled: bool,
        /// Delay to wait before respawning.
        delay: Duration,
    },
    /// Asks the loot collaborator to drop loot at a tile.
    LootDropRequested {
        /// Loot table to roll.
        table: LootTableId,
        /// Tile where the loot appears.
        position: TilePosition,
    },
    /// Decrements a chest-area counter after one of its monsters died.
    ChestAreaDecremented {
        /// Identifier of the chest area.
        area: ChestAreaId,
    },
}

/// Observable per-entity state announced through [`Event::PropertyChanged`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Property {
    /// Whether the entity is currently engaged in combat.
    InFight(bool),
    /// Entity currently targeted, if any.
    Target(Option<EntityId>),
    /// Whether the entity is alive.
    Alive(bool),
    /// Last entity to hit the entity, kept for kill attribution.
    LastHitter(EntityId),
}

/// Shape of a combat update delivered to a client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatUpdate {
    /// The recipient hit its target for `amount` life.
    TargetAffected {
        /// Magnitude of the actual life change.
        amount: u32,
    },
    /// The recipient was hit by `attacker` for `amount` life.
    SelfAffected {
        /// Magnitude of the actual life change.
        amount: u32,
        /// Entity that landed the hit.
        attacker: EntityId,
    },
}

/// Player-only checks requested, in declaration order, when a route completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathHook {
    /// Check whether the arrival tile holds a door.
    Door,
    /// Check whether the arrival tile holds an item.
    Item,
    /// Resolve the route's action tag, if any.
    Action(Option<RouteAction>),
    /// Persist the player's state.
    Save,
}

/// Unique identifier assigned to an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of a loot table owned by the loot collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LootTableId(u32);

impl LootTableId {
    /// Creates a new loot table identifier.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of a chest-area counter owned by the world's hosting server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChestAreaId(u32);

impl ChestAreaId {
    /// Creates a new chest area identifier.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single map tile expressed as integer coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePosition {
    x: u32,
    y: u32,
}

impl TilePosition {
    /// Creates a new tile position.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column of the tile.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row of the tile.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }
}

/// Immutable representation of a single entity's state used for queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntitySnapshot {
    /// Unique identifier assigned to the entity.
    pub id: EntityId,
    /// Kind of the entity.
    pub kind: EntityKind,
    /// Tile currently occupied by the entity.
    pub position: TilePosition,
    /// Current vitals.
    pub vitals: Vitals,
    /// Whether the entity is alive.
    pub alive: bool,
    /// Whether the entity is engaged in combat.
    pub in_fight: bool,
    /// Entity currently targeted, if any.
    pub target: Option<EntityId>,
    /// Entities currently attacking this entity, in ascending order.
    pub foes: Vec<EntityId>,
    /// Last entity to hit this entity.
    pub last_hitter: Option<EntityId>,
    /// Route currently being followed, if any.
    pub route: Option<Route>,
}

/// Read-only snapshot describing every registered entity.
#[derive(Clone, Debug, Default)]
pub struct EntityView {
    snapshots: Vec<EntitySnapshot>,
}

impl EntityView {
    /// Creates a new entity view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EntitySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EntitySnapshot> {
        self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::{ChestAreaId, EntityId, LootTableId, Property, SpawnError, TilePosition};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn identifiers_round_trip_through_bincode() {
        assert_round_trip(&EntityId::new(42));
        assert_round_trip(&LootTableId::new(7));
        assert_round_trip(&ChestAreaId::new(3));
        assert_round_trip(&TilePosition::new(9, 4));
    }

    #[test]
    fn property_round_trips_through_bincode() {
        assert_round_trip(&Property::Target(Some(EntityId::new(5))));
        assert_round_trip(&Property::Target(None));
    }

    #[test]
    fn spawn_error_round_trips_through_bincode() {
        assert_round_trip(&SpawnError::LifeExceedsMax {
            life: 12,
            max_life: 10,
        });
    }
}
