//! Directional scan shared by shooting and probing.
//!
//! A [`Ray`] walks away from an origin one cell at a time and stops on the
//! first wall, the first living actor, or the grid edge. [`cast`] folds the
//! walk into a [`RayCast`] summary.

use std::iter::FusedIterator;

use sketchbot_core::{ActorOrder, CellCoord, Facing, Tile};

use crate::{query, Map};

/// Reason a ray stopped travelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RayEnd {
    /// The next cell lies outside the grid.
    OutOfBounds,
    /// The ray reached a block tile.
    Wall,
    /// The ray reached a living actor.
    Actor(ActorOrder),
}

/// Single cell visited by a ray.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RayStep {
    /// One-based step count; the first cell beyond the origin is step 1.
    pub step: u32,
    /// Cell being visited.
    pub cell: CellCoord,
    /// Terrain of the visited cell.
    pub tile: Tile,
    /// Living actor standing on the visited cell.
    pub occupant: Option<ActorOrder>,
}

impl RayStep {
    /// Reports whether the ray stops on this cell.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.tile.is_solid() || self.occupant.is_some()
    }
}

/// Iterator over the cells a ray visits, including the cell that stops it.
#[derive(Clone, Debug)]
pub struct Ray<'a> {
    map: &'a Map,
    cursor: CellCoord,
    facing: Facing,
    step: u32,
    halted: bool,
}

impl<'a> Ray<'a> {
    /// Starts a ray at `origin`; the origin cell itself is never visited.
    #[must_use]
    pub fn new(map: &'a Map, origin: CellCoord, facing: Facing) -> Self {
        Self {
            map,
            cursor: origin,
            facing,
            step: 0,
            halted: false,
        }
    }
}

impl Iterator for Ray<'_> {
    type Item = RayStep;

    fn next(&mut self) -> Option<Self::Item> {
        if self.halted {
            return None;
        }

        let next = self.cursor.step(self.facing).and_then(|cell| {
            query::tile(self.map, cell).map(|tile| (cell, tile))
        });
        let Some((cell, tile)) = next else {
            self.halted = true;
            return None;
        };

        self.cursor = cell;
        self.step += 1;
        let visited = RayStep {
            step: self.step,
            cell,
            tile,
            occupant: query::actor_at(self.map, cell).map(|actor| actor.order),
        };
        self.halted = visited.is_terminal();
        Some(visited)
    }
}

impl FusedIterator for Ray<'_> {}

/// Summary of a completed ray.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RayCast {
    /// Reason the ray stopped.
    pub end: RayEnd,
    /// Number of open cells crossed before the stopping cell.
    pub distance: u32,
    /// Step at which a finish tile was first passed, if any.
    pub finish_step: Option<u32>,
}

/// Walks a ray to completion.
///
/// A finish tile under the actor that stops the ray still counts as passed.
#[must_use]
pub fn cast(map: &Map, origin: CellCoord, facing: Facing) -> RayCast {
    let mut distance = 0;
    let mut finish_step = None;

    for visited in Ray::new(map, origin, facing) {
        if visited.tile.is_solid() {
            return RayCast {
                end: RayEnd::Wall,
                distance,
                finish_step,
            };
        }
        if visited.tile == Tile::Finish && finish_step.is_none() {
            finish_step = Some(visited.step);
        }
        if let Some(order) = visited.occupant {
            return RayCast {
                end: RayEnd::Actor(order),
                distance,
                finish_step,
            };
        }
        distance += 1;
    }

    RayCast {
        end: RayEnd::OutOfBounds,
        distance,
        finish_step,
    }
}
