//! Deferred tasks keyed by the simulation instant they become due.

use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

use log::trace;
use skirmish_core::{EntityId, Event, LootTableId, TilePosition, Timestamp};

use crate::{foes, World};

/// Work postponed to a later tick.
///
/// Tasks name their subject by id only; a subject that no longer resolves
/// when the task fires turns the task into a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DeferredTask {
    /// Let `entity` pick a new opponent among its remaining foes.
    Reengage { entity: EntityId },
    /// Ask the loot collaborator to drop loot at `position`.
    DropLoot {
        table: LootTableId,
        position: TilePosition,
    },
}

#[derive(Debug)]
struct Scheduled {
    due: Timestamp,
    sequence: u64,
    task: DeferredTask,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.sequence).cmp(&(other.due, other.sequence))
    }
}

/// Min-queue of deferred tasks ordered by due instant, then scheduling order.
#[derive(Debug, Default)]
pub(crate) struct Scheduler {
    queue: BinaryHeap<Reverse<Scheduled>>,
    next_sequence: u64,
}

impl Scheduler {
    pub(crate) fn schedule(&mut self, due: Timestamp, task: DeferredTask) {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.wrapping_add(1);
        self.queue.push(Reverse(Scheduled {
            due,
            sequence,
            task,
        }));
    }

    /// Removes and returns the earliest task due at or before `now`.
    pub(crate) fn pop_due(&mut self, now: Timestamp) -> Option<DeferredTask> {
        let Reverse(head) = self.queue.peek()?;
        if head.due > now {
            return None;
        }
        self.queue.pop().map(|Reverse(scheduled)| scheduled.task)
    }

    pub(crate) fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Fires every task that became due at the world's current instant.
pub(crate) fn run_due(world: &mut World, out_events: &mut Vec<Event>) {
    while let Some(task) = world.scheduler.pop_due(world.now) {
        trace!("firing deferred task {task:?} at {:?}", world.now);
        match task {
            DeferredTask::Reengage { entity } => foes::reengage(world, entity, out_events),
            DeferredTask::DropLoot { table, position } => {
                out_events.push(Event::LootDropRequested { table, position });
            }
        }
    }
}
