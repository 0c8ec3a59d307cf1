//! Kind-specific reactions to movement, combat and death.

use skirmish_core::{
    CombatUpdate, EntityId, EntityKind, Event, PathHook, RouteAction, SimConfig, TilePosition,
    Timestamp,
};

use crate::schedule::{DeferredTask, Scheduler};

/// Everything a kind needs to dispatch its death side effects.
pub(crate) struct DeathContext<'a> {
    pub(crate) now: Timestamp,
    pub(crate) config: &'a SimConfig,
    pub(crate) scheduler: &'a mut Scheduler,
    pub(crate) out_events: &'a mut Vec<Event>,
}

/// Behaviour that differs between players and monsters.
pub(crate) trait KindHooks {
    /// Called once the entity reached the last waypoint of its route.
    fn on_path_complete(
        &self,
        entity: EntityId,
        position: TilePosition,
        action: Option<RouteAction>,
        out_events: &mut Vec<Event>,
    );

    /// Called after interpolation moved the entity to another tile.
    fn on_moved(&self, entity: EntityId, position: TilePosition, out_events: &mut Vec<Event>);

    /// Called on the attacker after one of its hits changed `victim`'s life by `amount`.
    fn on_hit_landed(
        &self,
        attacker: EntityId,
        victim: EntityId,
        amount: u32,
        out_events: &mut Vec<Event>,
    );

    /// Called after a life change was applied and clamped.
    fn on_life_changed(&self, entity: EntityId, life: u32, out_events: &mut Vec<Event>);

    /// Called once the entity died and its combat relationships were dissolved.
    fn on_killed(&self, entity: EntityId, position: TilePosition, context: DeathContext<'_>);

    /// Tile the periodic position check compares against; `None` opts out of the check.
    fn position_check_anchor(&self) -> Option<TilePosition>;

    /// Tile a dead entity of this kind is rebuilt at; `None` when it never respawns.
    fn respawn_tile(&self) -> Option<TilePosition>;
}

impl KindHooks for EntityKind {
    fn on_path_complete(
        &self,
        entity: EntityId,
        position: TilePosition,
        action: Option<RouteAction>,
        out_events: &mut Vec<Event>,
    ) {
        if let EntityKind::Player = self {
            for hook in [
                PathHook::Door,
                PathHook::Item,
                PathHook::Action(action),
                PathHook::Save,
            ] {
                out_events.push(Event::PathHookTriggered {
                    entity,
                    position,
                    hook,
                });
            }
        }
    }

    fn on_moved(&self, entity: EntityId, position: TilePosition, out_events: &mut Vec<Event>) {
        if let EntityKind::Player = self {
            out_events.push(Event::NearbyMonsterCheckRequested { entity, position });
        }
    }

    fn on_hit_landed(
        &self,
        attacker: EntityId,
        victim: EntityId,
        amount: u32,
        out_events: &mut Vec<Event>,
    ) {
        let event = match self {
            EntityKind::Player => Event::CombatUpdate {
                recipient: attacker,
                update: CombatUpdate::TargetAffected { amount },
            },
            EntityKind::Monster(_) => Event::CombatUpdate {
                recipient: victim,
                update: CombatUpdate::SelfAffected { amount, attacker },
            },
        };
        out_events.push(event);
    }

    fn on_life_changed(&self, entity: EntityId, life: u32, out_events: &mut Vec<Event>) {
        if let EntityKind::Player = self {
            out_events.push(Event::LifeChanged { entity, life });
        }
    }

    fn position_check_anchor(&self) -> Option<TilePosition> {
        match self {
            EntityKind::Player => None,
            EntityKind::Monster(profile) => Some(profile.spawn()),
        }
    }

    fn respawn_tile(&self) -> Option<TilePosition> {
        self.monster_profile().map(|profile| profile.spawn())
    }

    fn on_killed(&self, entity: EntityId, position: TilePosition, context: DeathContext<'_>) {
        let EntityKind::Monster(profile) = self else {
            return;
        };

        context.out_events.push(Event::RespawnRequested {
            entity,
            spawn: profile.spawn(),
            enabled: profile.respawn(),
            delay: context.config.monster_respawn_delay(),
        });
        context.scheduler.schedule(
            context.now + context.config.loot_drop_delay(),
            DeferredTask::DropLoot {
                table: profile.loot_table(),
                position,
            },
        );
        if let Some(area) = profile.chest_area() {
            context
                .out_events
                .push(Event::ChestAreaDecremented { area });
        }
    }
}
