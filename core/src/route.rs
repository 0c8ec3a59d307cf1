//! Precomputed routes handed to the simulation and their broadcast views.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{KindTag, TilePosition, Timestamp};

/// Facing carried alongside a route for presentation purposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Facing toward decreasing `y`.
    North,
    /// Facing toward increasing `x`.
    East,
    /// Facing toward increasing `y`.
    South,
    /// Facing toward decreasing `x`.
    West,
}

/// Opaque action tag resolved by the consumer when a player completes a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteAction(u32);

impl RouteAction {
    /// Creates a new action tag with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the action tag.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Reasons a route cannot be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum RouteError {
    /// The waypoint list was empty.
    #[error("route must contain at least one waypoint")]
    EmptyPath,
}

/// Timed sequence of waypoints an entity is committed to traversing.
///
/// `speed` is the time needed to cross a single tile. A route always holds at
/// least one waypoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    path: Vec<TilePosition>,
    departure: Timestamp,
    speed: Duration,
    action: Option<RouteAction>,
    orientation: Orientation,
}

impl Route {
    /// Builds a route, rejecting an empty waypoint list.
    pub fn new(
        path: Vec<TilePosition>,
        departure: Timestamp,
        speed: Duration,
        action: Option<RouteAction>,
        orientation: Orientation,
    ) -> Result<Self, RouteError> {
        if path.is_empty() {
            return Err(RouteError::EmptyPath);
        }

        Ok(Self {
            path,
            departure,
            speed,
            action,
            orientation,
        })
    }

    /// Waypoints in traversal order.
    #[must_use]
    pub fn path(&self) -> &[TilePosition] {
        &self.path
    }

    /// Instant the entity left the first waypoint.
    #[must_use]
    pub const fn departure(&self) -> Timestamp {
        self.departure
    }

    /// Time needed to traverse one tile.
    #[must_use]
    pub const fn speed(&self) -> Duration {
        self.speed
    }

    /// Action to resolve when the route completes, if any.
    #[must_use]
    pub const fn action(&self) -> Option<RouteAction> {
        self.action
    }

    /// Facing announced alongside the route.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Index of the final waypoint.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Waypoint stored at `index`, if in range.
    #[must_use]
    pub fn waypoint(&self, index: usize) -> Option<TilePosition> {
        self.path.get(index).copied()
    }

    /// Produces the view broadcast to observers of an entity of `category`.
    ///
    /// Only players resolve actions on arrival, so monster views drop the tag.
    #[must_use]
    pub fn trim(&self, category: KindTag) -> RouteView {
        let action = match category {
            KindTag::Player => self.action,
            KindTag::Monster => None,
        };
        RouteView {
            path: self.path.clone(),
            departure: self.departure,
            speed: self.speed,
            orientation: self.orientation,
            action,
        }
    }
}

/// Category-appropriate copy of a route published to observers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteView {
    /// Waypoints in traversal order.
    pub path: Vec<TilePosition>,
    /// Instant the entity left the first waypoint.
    pub departure: Timestamp,
    /// Time needed to traverse one tile.
    pub speed: Duration,
    /// Facing announced alongside the route.
    pub orientation: Orientation,
    /// Action tag, present only for player routes.
    pub action: Option<RouteAction>,
}
