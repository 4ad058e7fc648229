#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative map state for the Sketchbot simulator.
//!
//! A [`Map`] is a full value snapshot: the static tile grid plus the roster of
//! living actors. Callers clone it to keep an inspectable "before" state and
//! mutate the clone exclusively through [`apply`] and [`remove_fallen`].

pub mod ray;
pub mod text;

use sketchbot_core::{Actor, ActorOrder, CellCoord, Command, Facing, ParseError, Tile};

use crate::ray::RayEnd;

/// Static grid plus the live actor roster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Map {
    columns: u32,
    rows: u32,
    tiles: Vec<Tile>,
    actors: Vec<Actor>,
}

impl Map {
    /// Builds a map from row-major terrain and an unordered actor list.
    ///
    /// The grid must be non-empty and rectangular, every actor must stand
    /// inside it with positive health, and orders must be pairwise distinct.
    /// Actors are stored sorted by order.
    pub fn from_rows(rows: Vec<Vec<Tile>>, mut actors: Vec<Actor>) -> Result<Self, ParseError> {
        let expected = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(ParseError::NoRows),
        };

        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != expected)
        {
            return Err(ParseError::NotRectangular {
                row,
                expected,
                found,
            });
        }

        let columns = u32::try_from(expected).map_err(|_| ParseError::NotRectangular {
            row: 0,
            expected,
            found: expected,
        })?;
        let row_count = u32::try_from(rows.len()).map_err(|_| ParseError::NotRectangular {
            row: rows.len(),
            expected,
            found: expected,
        })?;

        for actor in &actors {
            if actor.cell.column() >= columns || actor.cell.row() >= row_count {
                return Err(ParseError::ActorOutOfBounds { order: actor.order });
            }
            if actor.is_fallen() {
                return Err(ParseError::ZeroHealth { order: actor.order });
            }
        }

        actors.sort_by_key(|actor| actor.order);
        if let Some(pair) = actors
            .windows(2)
            .find(|pair| pair[0].order == pair[1].order)
        {
            return Err(ParseError::DuplicateOrder {
                order: pair[0].order,
            });
        }

        Ok(Self {
            columns,
            rows: row_count,
            tiles: rows.into_iter().flatten().collect(),
            actors,
        })
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }

    fn actor_index(&self, order: ActorOrder) -> Option<usize> {
        self.actors
            .binary_search_by_key(&order, |actor| actor.order)
            .ok()
    }

    fn is_open(&self, cell: CellCoord) -> bool {
        let open_tile = self
            .index(cell)
            .and_then(|index| self.tiles.get(index))
            .is_some_and(|tile| !tile.is_solid());
        open_tile && query::actor_at(self, cell).is_none()
    }

    fn wound(&mut self, index: usize) -> u8 {
        let actor = &mut self.actors[index];
        actor.health = actor.health.saturating_sub(1);
        actor.health
    }

    fn rotate(&mut self, index: usize, turn: fn(Facing) -> Facing) -> Outcome {
        let actor = &mut self.actors[index];
        actor.facing = turn(actor.facing);
        Outcome::Rotated {
            facing: actor.facing,
        }
    }

    fn advance(&mut self, index: usize) -> Outcome {
        let actor = self.actors[index];
        let destination = actor
            .cell
            .step(actor.facing)
            .filter(|cell| self.is_open(*cell));

        match destination {
            Some(to) => {
                self.actors[index].cell = to;
                Outcome::Moved {
                    from: actor.cell,
                    to,
                }
            }
            None => Outcome::Collided {
                health: self.wound(index),
            },
        }
    }

    fn fire(&mut self, index: usize) -> Outcome {
        let actor = self.actors[index];
        let cast = ray::cast(self, actor.cell, actor.facing);

        match cast.end {
            RayEnd::Actor(target) => match self.actor_index(target) {
                Some(target_index) => Outcome::Hit {
                    target,
                    health: self.wound(target_index),
                },
                None => Outcome::Missed { end: cast.end },
            },
            RayEnd::Wall | RayEnd::OutOfBounds => Outcome::Missed { end: cast.end },
        }
    }
}

/// Observable effect of resolving one command for one actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The acting order is not on the map.
    Absent,
    /// The actor turned to the provided facing.
    Rotated {
        /// Facing after the turn.
        facing: Facing,
    },
    /// The actor waited.
    Waited,
    /// The actor stepped into a free cell.
    Moved {
        /// Cell the actor left.
        from: CellCoord,
        /// Cell the actor entered.
        to: CellCoord,
    },
    /// The step was blocked, so the actor stayed put and took a point of damage.
    Collided {
        /// Health left after the collision.
        health: u8,
    },
    /// The shot struck an actor.
    Hit {
        /// Actor that was struck.
        target: ActorOrder,
        /// Health the struck actor has left.
        health: u8,
    },
    /// The shot left the grid or stopped on a wall.
    Missed {
        /// Reason the shot stopped.
        end: RayEnd,
    },
    /// The command lies outside the vocabulary and was not applied.
    Rejected {
        /// Offending symbol.
        symbol: char,
    },
}

/// Resolves a single command for the actor with the provided order.
///
/// Moving into a wall, another actor, or past the grid edge costs the mover
/// one point of health. Shooting wounds only the first actor along the ray.
/// Fallen actors stay on the roster until [`remove_fallen`] runs.
pub fn apply(map: &mut Map, order: ActorOrder, command: Command) -> Outcome {
    let Some(index) = map.actor_index(order) else {
        return Outcome::Absent;
    };

    match command {
        Command::RotateLeft => map.rotate(index, Facing::counter_clockwise),
        Command::RotateRight => map.rotate(index, Facing::clockwise),
        Command::Wait => Outcome::Waited,
        Command::Move => map.advance(index),
        Command::Shoot => map.fire(index),
        Command::Unknown(symbol) => Outcome::Rejected { symbol },
    }
}

/// Drops every actor whose health reached zero, returning their orders.
pub fn remove_fallen(map: &mut Map) -> Vec<ActorOrder> {
    let fallen: Vec<ActorOrder> = map
        .actors
        .iter()
        .filter(|actor| actor.is_fallen())
        .map(|actor| actor.order)
        .collect();
    if !fallen.is_empty() {
        map.actors.retain(|actor| !actor.is_fallen());
    }
    fallen
}

/// Query functions that provide read-only access to the map state.
pub mod query {
    use sketchbot_core::{Actor, ActorKind, ActorOrder, CellCoord, Tile};

    use super::Map;

    /// Number of columns and rows in the grid.
    #[must_use]
    pub fn dimensions(map: &Map) -> (u32, u32) {
        (map.columns, map.rows)
    }

    /// Terrain at the provided cell, or `None` outside the grid.
    #[must_use]
    pub fn tile(map: &Map, cell: CellCoord) -> Option<Tile> {
        map.index(cell).and_then(|index| map.tiles.get(index).copied())
    }

    /// Living actors sorted by order.
    #[must_use]
    pub fn actors(map: &Map) -> &[Actor] {
        &map.actors
    }

    /// Actor with the provided order, if still alive.
    #[must_use]
    pub fn actor(map: &Map, order: ActorOrder) -> Option<&Actor> {
        map.actor_index(order).map(|index| &map.actors[index])
    }

    /// Actor standing on the provided cell, if any.
    #[must_use]
    pub fn actor_at(map: &Map, cell: CellCoord) -> Option<&Actor> {
        map.actors.iter().find(|actor| actor.cell == cell)
    }

    /// Orders of every living actor in processing order.
    #[must_use]
    pub fn orders(map: &Map) -> Vec<ActorOrder> {
        map.actors.iter().map(|actor| actor.order).collect()
    }

    /// Number of living actors of the provided kind.
    #[must_use]
    pub fn count_kind(map: &Map, kind: ActorKind) -> usize {
        map.actors.iter().filter(|actor| actor.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchbot_core::ActorKind;

    fn actor(order: u8, kind: ActorKind, column: u32, row: u32) -> Actor {
        Actor {
            order: ActorOrder::new(order),
            kind,
            facing: Facing::East,
            health: 1,
            cell: CellCoord::new(column, row),
        }
    }

    #[test]
    fn empty_grid_is_rejected() {
        assert_eq!(Map::from_rows(Vec::new(), Vec::new()), Err(ParseError::NoRows));
        assert_eq!(
            Map::from_rows(vec![Vec::new()], Vec::new()),
            Err(ParseError::NoRows)
        );
    }

    #[test]
    fn ragged_grid_is_rejected() {
        let rows = vec![vec![Tile::Empty, Tile::Empty], vec![Tile::Empty]];
        assert_eq!(
            Map::from_rows(rows, Vec::new()),
            Err(ParseError::NotRectangular {
                row: 1,
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn actors_outside_the_grid_are_rejected() {
        let rows = vec![vec![Tile::Empty, Tile::Empty]];
        let actors = vec![actor(4, ActorKind::Target, 2, 0)];
        assert_eq!(
            Map::from_rows(rows, actors),
            Err(ParseError::ActorOutOfBounds {
                order: ActorOrder::new(4),
            })
        );
    }

    #[test]
    fn duplicate_orders_are_rejected() {
        let rows = vec![vec![Tile::Empty, Tile::Empty]];
        let actors = vec![
            actor(2, ActorKind::Player, 0, 0),
            actor(2, ActorKind::Enemy, 1, 0),
        ];
        assert_eq!(
            Map::from_rows(rows, actors),
            Err(ParseError::DuplicateOrder {
                order: ActorOrder::new(2),
            })
        );
    }

    #[test]
    fn actors_are_sorted_by_order() {
        let rows = vec![vec![Tile::Empty, Tile::Empty, Tile::Empty]];
        let actors = vec![
            actor(9, ActorKind::Enemy, 0, 0),
            actor(1, ActorKind::Player, 1, 0),
            actor(5, ActorKind::Target, 2, 0),
        ];
        let map = Map::from_rows(rows, actors).expect("valid map");
        let orders: Vec<u8> = query::orders(&map).iter().map(ActorOrder::get).collect();
        assert_eq!(orders, vec![1, 5, 9]);
    }

    #[test]
    fn remove_fallen_reports_removed_orders() {
        let rows = vec![vec![Tile::Empty, Tile::Empty]];
        let actors = vec![
            actor(0, ActorKind::Player, 0, 0),
            actor(1, ActorKind::Target, 1, 0),
        ];
        let mut map = Map::from_rows(rows, actors).expect("valid map");

        assert_eq!(
            apply(&mut map, ActorOrder::new(0), Command::Shoot),
            Outcome::Hit {
                target: ActorOrder::new(1),
                health: 0,
            }
        );
        assert_eq!(remove_fallen(&mut map), vec![ActorOrder::new(1)]);
        assert!(query::actor(&map, ActorOrder::new(1)).is_none());
        assert!(remove_fallen(&mut map).is_empty());
    }

    #[test]
    fn absent_actor_does_nothing() {
        let rows = vec![vec![Tile::Empty]];
        let mut map = Map::from_rows(rows, Vec::new()).expect("valid map");
        let before = map.clone();
        assert_eq!(
            apply(&mut map, ActorOrder::new(3), Command::Move),
            Outcome::Absent
        );
        assert_eq!(map, before);
    }
}
