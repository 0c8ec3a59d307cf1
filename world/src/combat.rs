//! Cooldown-gated hit resolution between an attacker and its target.

use log::debug;
use skirmish_core::{cooldown_elapsed, EntityId, Event};

use crate::{hooks::KindHooks, lifecycle, World};

/// Runs one fight evaluation for `attacker`.
pub(crate) fn update_fight(world: &mut World, attacker: EntityId, out_events: &mut Vec<Event>) {
    let now = world.now;
    if let Some(state) = world.entities.get_mut(&attacker) {
        state.timers.last_fight_update = now;
    }
    resolve_damage(world, attacker, out_events);
}

/// Applies one damage instance from `attacker` to its current target.
///
/// No-op unless both sides are alive and the attacker's damage cooldown has
/// elapsed.
pub(crate) fn resolve_damage(world: &mut World, attacker: EntityId, out_events: &mut Vec<Event>) {
    let now = world.now;
    let Some(state) = world.entities.get(&attacker) else {
        return;
    };
    if !state.alive {
        return;
    }
    let Some(target) = state.target else {
        return;
    };
    let Some(victim) = world.entities.get(&target) else {
        return;
    };
    if !victim.alive {
        return;
    }
    if !cooldown_elapsed(state.timers.last_damage, now, world.config.damage_delay()) {
        return;
    }

    let (atk, kind) = (state.vitals.atk, state.kind);
    let def = victim.vitals.def;
    if let Some(state) = world.entities.get_mut(&attacker) {
        state.timers.last_damage = now;
    }

    let damage = world.roller.roll(atk, def);
    if let Some(victim) = world.entities.get_mut(&target) {
        victim.last_hitter = Some(attacker);
    }

    let delta = lifecycle::apply_delta(world, target, -i64::from(damage), out_events);
    let amount = u32::try_from(delta.unsigned_abs()).unwrap_or(u32::MAX);
    kind.on_hit_landed(attacker, target, amount, out_events);

    if !world.is_alive(target) {
        debug!("entity {} killed entity {}", attacker.get(), target.get());
        out_events.push(Event::Killed {
            killer: attacker,
            victim: target,
        });
    }
}
