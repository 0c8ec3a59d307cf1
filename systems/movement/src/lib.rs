#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure movement interpolation along precomputed routes.
//!
//! Positions are derived from elapsed simulation time rather than from a step
//! counter: an entity that departed at `T` with a per-tile duration `S` sits
//! on waypoint `ceil((now - T) / S)`, clamped to the route bounds. Callers
//! decide how often to evaluate; the result never depends on that cadence.

use std::time::Duration;

use skirmish_core::{Route, Timestamp};

/// Outcome of evaluating a route at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteProgress {
    /// Index of the waypoint the entity occupies.
    pub index: usize,
    /// Whether the index reached the final waypoint.
    pub completed: bool,
}

/// Computes the waypoint occupied on `route` at `now`.
///
/// Instants before departure clamp to the first waypoint. A zero per-tile
/// duration completes the route immediately, as does a single-waypoint route.
#[must_use]
pub fn interpolate(route: &Route, now: Timestamp) -> RouteProgress {
    let last = route.last_index();
    let elapsed = now.saturating_since(route.departure());
    let travelled = tiles_travelled(elapsed, route.speed());
    let index = usize::try_from(travelled).map_or(last, |tiles| tiles.min(last));

    RouteProgress {
        index,
        completed: index == last,
    }
}

fn tiles_travelled(elapsed: Duration, speed: Duration) -> u128 {
    if speed.is_zero() {
        return u128::MAX;
    }
    elapsed.as_nanos().div_ceil(speed.as_nanos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_tiles_round_up() {
        assert_eq!(
            tiles_travelled(Duration::from_millis(1), Duration::from_millis(1_000)),
            1
        );
        assert_eq!(
            tiles_travelled(Duration::from_millis(1_000), Duration::from_millis(1_000)),
            1
        );
        assert_eq!(
            tiles_travelled(Duration::from_millis(1_001), Duration::from_millis(1_000)),
            2
        );
    }

    #[test]
    fn nothing_travelled_without_elapsed_time() {
        assert_eq!(tiles_travelled(Duration::ZERO, Duration::from_millis(50)), 0);
    }

    #[test]
    fn zero_speed_saturates() {
        assert_eq!(tiles_travelled(Duration::ZERO, Duration::ZERO), u128::MAX);
    }
}
