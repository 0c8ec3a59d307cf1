//! Authoritative per-entity state stored inside the world.

use std::collections::BTreeSet;

use skirmish_core::{
    EntityId, EntityKind, EntitySnapshot, EntityTemplate, Route, TilePosition, Timestamp, Vitals,
};

/// Instants at which each cooldown-gated action last ran.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Timers {
    pub(crate) last_fight_update: Timestamp,
    pub(crate) last_damage: Timestamp,
    pub(crate) last_walk_update: Timestamp,
    pub(crate) last_position_check: Timestamp,
}

impl Timers {
    fn started_at(now: Timestamp) -> Self {
        Self {
            last_fight_update: now,
            last_damage: now,
            last_walk_update: now,
            last_position_check: now,
        }
    }
}

/// A player or monster registered with the world.
///
/// `target`, `foes` and `last_hitter` are plain identifiers; they never keep
/// another entity alive and may refer to entities that have since despawned.
#[derive(Clone, Debug)]
pub(crate) struct Entity {
    pub(crate) id: EntityId,
    pub(crate) kind: EntityKind,
    pub(crate) position: TilePosition,
    pub(crate) vitals: Vitals,
    pub(crate) alive: bool,
    pub(crate) in_fight: bool,
    pub(crate) target: Option<EntityId>,
    pub(crate) foes: BTreeSet<EntityId>,
    pub(crate) last_hitter: Option<EntityId>,
    pub(crate) timers: Timers,
    pub(crate) route: Option<Route>,
}

impl Entity {
    pub(crate) fn spawn(id: EntityId, template: EntityTemplate, now: Timestamp) -> Self {
        Self {
            id,
            kind: template.kind,
            position: template.position,
            vitals: template.vitals,
            alive: true,
            in_fight: false,
            target: None,
            foes: BTreeSet::new(),
            last_hitter: None,
            timers: Timers::started_at(now),
            route: None,
        }
    }

    /// Rebuilds the entity as a fresh idle entity at `position` with full life.
    pub(crate) fn revive_at(&mut self, position: TilePosition, now: Timestamp) {
        self.position = position;
        self.vitals.life = self.vitals.max_life;
        self.alive = true;
        self.in_fight = false;
        self.target = None;
        self.foes.clear();
        self.last_hitter = None;
        self.timers = Timers::started_at(now);
        self.route = None;
    }

    /// Records `foe` as attacking this entity. Idempotent; ignores the entity's own id.
    pub(crate) fn add_foe(&mut self, foe: EntityId) {
        if foe == self.id {
            return;
        }
        let _ = self.foes.insert(foe);
    }

    pub(crate) fn remove_foe(&mut self, foe: EntityId) {
        let _ = self.foes.remove(&foe);
    }

    pub(crate) fn has_foe(&self, foe: EntityId) -> bool {
        self.foes.contains(&foe)
    }

    pub(crate) fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            vitals: self.vitals,
            alive: self.alive,
            in_fight: self.in_fight,
            target: self.target,
            foes: self.foes.iter().copied().collect(),
            last_hitter: self.last_hitter,
            route: self.route.clone(),
        }
    }
}
