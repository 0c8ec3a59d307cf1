//! TOML scenario files describing the initial state of a simulation.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::Path,
    time::Duration,
};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use skirmish_core::{
    ChestAreaId, Command, EntityId, EntityKind, EntityTemplate, Event, KindTag, LootTableId,
    MonsterProfile, Orientation, Route, RouteAction, SimConfig, TilePosition, Timestamp, Vitals,
};
use skirmish_world::{self as world, World};

const BUILTIN_DUEL: &str = include_str!("../scenarios/duel.toml");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioFile {
    #[serde(default)]
    config: SimConfig,
    #[serde(default)]
    entities: Vec<EntityEntry>,
    #[serde(default)]
    routes: Vec<RouteEntry>,
    #[serde(default)]
    fights: Vec<FightEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EntityEntry {
    name: String,
    kind: KindTag,
    x: u32,
    y: u32,
    max_life: u32,
    life: Option<u32>,
    atk: u32,
    def: u32,
    loot_table: Option<u32>,
    #[serde(default)]
    respawn: bool,
    chest_area: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RouteEntry {
    entity: String,
    path: Vec<[u32; 2]>,
    speed_ms: u64,
    #[serde(default)]
    departure_ms: u64,
    action: Option<u32>,
    orientation: Option<Orientation>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FightEntry {
    attacker: String,
    target: String,
}

/// Validated scenario ready to be installed into a fresh world.
#[derive(Debug)]
pub(crate) struct Scenario {
    config: SimConfig,
    entities: Vec<(String, EntityTemplate)>,
    routes: Vec<(String, Route)>,
    fights: Vec<(String, String)>,
}

impl Scenario {
    /// Scenario used when no file is given on the command line.
    pub(crate) fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_DUEL).context("built-in duel scenario is invalid")
    }

    /// Reads and validates the scenario stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid scenario {}", path.display()))
    }

    /// Parses scenario TOML, checking that every reference names a declared entity.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let file: ScenarioFile =
            toml::from_str(contents).context("failed to parse scenario toml contents")?;

        let mut kinds = HashMap::new();
        let mut entities = Vec::with_capacity(file.entities.len());
        for entry in file.entities {
            if kinds.insert(entry.name.clone(), entry.kind).is_some() {
                bail!("scenario declares entity `{}` more than once", entry.name);
            }
            let template = entry.template()?;
            entities.push((entry.name, template));
        }

        let mut routes = Vec::with_capacity(file.routes.len());
        for entry in file.routes {
            if !kinds.contains_key(&entry.entity) {
                bail!("route refers to unknown entity `{}`", entry.entity);
            }
            let route = entry
                .route()
                .with_context(|| format!("invalid route for `{}`", entry.entity))?;
            routes.push((entry.entity, route));
        }

        let mut fights = Vec::with_capacity(file.fights.len());
        for entry in file.fights {
            for name in [&entry.attacker, &entry.target] {
                if !kinds.contains_key(name) {
                    bail!("fight refers to unknown entity `{name}`");
                }
            }
            fights.push((entry.attacker, entry.target));
        }

        Ok(Self {
            config: file.config,
            entities,
            routes,
            fights,
        })
    }

    /// Configuration declared by the scenario's `[config]` table.
    pub(crate) fn config(&self) -> SimConfig {
        self.config
    }

    /// Spawns the entities, assigns routes and starts fights in declaration order.
    pub(crate) fn install(&self, world: &mut World, out_events: &mut Vec<Event>) -> Result<Roster> {
        let mut roster = Roster::default();
        for (name, template) in &self.entities {
            let first = out_events.len();
            world::apply(
                world,
                Command::SpawnEntity {
                    template: *template,
                },
                out_events,
            );
            let spawned = out_events[first..].iter().find_map(|event| match event {
                Event::EntitySpawned { entity, .. } => Some(Ok(*entity)),
                Event::SpawnRejected { reason } => Some(Err(*reason)),
                _ => None,
            });
            match spawned {
                Some(Ok(entity)) => roster.insert(name, entity),
                Some(Err(reason)) => bail!("entity `{name}` was rejected: {reason}"),
                None => bail!("entity `{name}` produced no spawn outcome"),
            }
        }

        for (name, route) in &self.routes {
            let entity = roster.id(name)?;
            world::apply(
                world,
                Command::SetRoute {
                    entity,
                    route: route.clone(),
                },
                out_events,
            );
        }

        for (attacker, target) in &self.fights {
            let attacker = roster.id(attacker)?;
            let target = roster.id(target)?;
            world::apply(world, Command::StartFight { attacker, target }, out_events);
        }

        Ok(roster)
    }
}

impl EntityEntry {
    fn template(&self) -> Result<EntityTemplate> {
        let position = TilePosition::new(self.x, self.y);
        let kind = match self.kind {
            KindTag::Player => {
                if self.loot_table.is_some() || self.chest_area.is_some() || self.respawn {
                    bail!("player `{}` declares monster-only fields", self.name);
                }
                EntityKind::Player
            }
            KindTag::Monster => {
                let Some(table) = self.loot_table else {
                    bail!("monster `{}` is missing its loot table", self.name);
                };
                let mut profile =
                    MonsterProfile::new(position, self.respawn, LootTableId::new(table));
                if let Some(area) = self.chest_area {
                    profile = profile.with_chest_area(ChestAreaId::new(area));
                }
                EntityKind::Monster(profile)
            }
        };

        let vitals = Vitals::new(self.max_life, self.atk, self.def);
        let vitals = match self.life {
            Some(life) => vitals.with_life(life),
            None => vitals,
        };
        Ok(EntityTemplate {
            kind,
            position,
            vitals,
        })
    }
}

impl RouteEntry {
    fn route(&self) -> Result<Route> {
        let path = self
            .path
            .iter()
            .map(|[x, y]| TilePosition::new(*x, *y))
            .collect();
        let route = Route::new(
            path,
            Timestamp::from_millis(self.departure_ms),
            Duration::from_millis(self.speed_ms),
            self.action.map(RouteAction::new),
            self.orientation.unwrap_or(Orientation::South),
        )?;
        Ok(route)
    }
}

/// Maps scenario names to the identifiers the world allocated for them.
#[derive(Debug, Default)]
pub(crate) struct Roster {
    ids: HashMap<String, EntityId>,
    names: BTreeMap<EntityId, String>,
}

impl Roster {
    fn insert(&mut self, name: &str, entity: EntityId) {
        let _ = self.ids.insert(name.to_owned(), entity);
        let _ = self.names.insert(entity, name.to_owned());
    }

    fn id(&self, name: &str) -> Result<EntityId> {
        self.ids
            .get(name)
            .copied()
            .with_context(|| format!("entity `{name}` was never spawned"))
    }

    /// Scenario name of `entity`, if it was declared by the scenario.
    pub(crate) fn name(&self, entity: EntityId) -> Option<&str> {
        self.names.get(&entity).map(String::as_str)
    }
}
