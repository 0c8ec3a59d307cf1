//! Simulation clock primitives and the cooldown gate.

use std::{ops::Add, time::Duration};

use serde::{Deserialize, Serialize};

/// Instant on the simulation clock, measured from the start of the simulation.
///
/// The world never reads the wall clock directly. Callers advance time with
/// `Command::Tick`, which keeps every test free to inject its own timeline.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Timestamp(Duration);

impl Timestamp {
    /// Origin of the simulation clock.
    pub const ZERO: Self = Self(Duration::ZERO);

    /// Creates a timestamp the provided number of milliseconds after the origin.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    /// Creates a timestamp at the provided offset from the origin.
    #[must_use]
    pub const fn from_offset(offset: Duration) -> Self {
        Self(offset)
    }

    /// Offset of the timestamp from the origin.
    #[must_use]
    pub const fn offset(&self) -> Duration {
        self.0
    }

    /// Time elapsed since `earlier`.
    ///
    /// Saturates to zero when `earlier` lies in the future.
    #[must_use]
    pub fn saturating_since(self, earlier: Timestamp) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<Duration> for Timestamp {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self {
        Self(self.0.saturating_add(rhs))
    }
}

/// Reports whether at least `delay` separates `last` from `now`.
///
/// Every per-entity cooldown (walking, fighting, damage, position checks)
/// is gated through this comparison against the instant the action last ran.
#[must_use]
pub fn cooldown_elapsed(last: Timestamp, now: Timestamp, delay: Duration) -> bool {
    now.saturating_since(last) >= delay
}
