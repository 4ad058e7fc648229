#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Sketchbot simulator.
//!
//! This crate defines the vocabulary that connects the map model, the pure
//! systems, and the adapters. The map owns a grid of [`Tile`] values and a
//! roster of [`Actor`] values, systems submit [`Command`] values on behalf of
//! actors, and adapters translate text input into these types. Everything here
//! is plain data: no type in this crate performs simulation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Terrain occupying a single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Open floor that actors may enter and rays may cross.
    Empty,
    /// Solid wall that stops movement and rays.
    Block,
    /// Goal tile; open like [`Tile::Empty`] but reported by probes.
    Finish,
}

impl Tile {
    /// Parses a terrain token from the map text format.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "_" => Some(Self::Empty),
            "x" => Some(Self::Block),
            "f" => Some(Self::Finish),
            _ => None,
        }
    }

    /// Letter used for the tile in the map text format.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Empty => '_',
            Self::Block => 'x',
            Self::Finish => 'f',
        }
    }

    /// Reports whether actors and rays are stopped by the tile.
    #[must_use]
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Block)
    }
}

/// Cardinal direction an actor points toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Toward decreasing row indices.
    North,
    /// Toward increasing column indices.
    East,
    /// Toward increasing row indices.
    South,
    /// Toward decreasing column indices.
    West,
}

impl Facing {
    /// Every facing in clockwise order starting from north.
    pub const ALL: [Facing; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Parses the single-letter facing used by actor tags.
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'n' => Some(Self::North),
            'e' => Some(Self::East),
            's' => Some(Self::South),
            'w' => Some(Self::West),
            _ => None,
        }
    }

    /// Letter used for the facing in actor tags.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::North => 'n',
            Self::East => 'e',
            Self::South => 's',
            Self::West => 'w',
        }
    }

    /// Facing after a quarter turn clockwise.
    #[must_use]
    pub const fn clockwise(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    /// Facing after a quarter turn counter-clockwise.
    #[must_use]
    pub const fn counter_clockwise(self) -> Self {
        self.clockwise().clockwise().clockwise()
    }

    /// Facing after a half turn.
    #[must_use]
    pub const fn reversed(self) -> Self {
        self.clockwise().clockwise()
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Returns the adjacent cell in the provided facing.
    ///
    /// Yields `None` when the step would leave the non-negative quadrant. The
    /// upper grid bounds are unknown here, so callers must still check them.
    #[must_use]
    pub fn step(self, facing: Facing) -> Option<Self> {
        match facing {
            Facing::North => self.row.checked_sub(1).map(|row| Self::new(self.column, row)),
            Facing::East => self
                .column
                .checked_add(1)
                .map(|column| Self::new(column, self.row)),
            Facing::South => self.row.checked_add(1).map(|row| Self::new(self.column, row)),
            Facing::West => self
                .column
                .checked_sub(1)
                .map(|column| Self::new(column, self.row)),
        }
    }
}

/// Unique identifier of an actor, doubling as its turn-processing priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorOrder(u8);

impl ActorOrder {
    /// Creates a new actor order with the provided numeric value.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the order.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for ActorOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kinds of actors that may stand on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    /// Controllable robot driven by a queued action string.
    Player,
    /// Passive target that never acts.
    Target,
    /// Hostile turret that shoots along its facing every turn.
    Enemy,
}

impl ActorKind {
    /// Parses the leading letter of an actor tag.
    #[must_use]
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'p' => Some(Self::Player),
            't' => Some(Self::Target),
            'e' => Some(Self::Enemy),
            _ => None,
        }
    }

    /// Leading letter of the actor tag.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Player => 'p',
            Self::Target => 't',
            Self::Enemy => 'e',
        }
    }

    /// Reports whether the actor consumes queued commands.
    #[must_use]
    pub const fn is_controllable(self) -> bool {
        matches!(self, Self::Player)
    }

    /// Reports whether the actor shoots automatically every turn.
    #[must_use]
    pub const fn fires_automatically(self) -> bool {
        matches!(self, Self::Enemy)
    }

    /// Marker a probe prints when its ray stops on this kind of actor.
    ///
    /// Targets and enemies both read as hostile.
    #[must_use]
    pub const fn probe_mark(self) -> char {
        match self {
            Self::Player => 'P',
            Self::Target | Self::Enemy => 'E',
        }
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Player => "player",
            Self::Target => "target",
            Self::Enemy => "enemy",
        };
        f.write_str(name)
    }
}

/// Positioned, faced, and healthed entity living on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    /// Unique identifier and processing priority.
    pub order: ActorOrder,
    /// Behavioural kind of the actor.
    pub kind: ActorKind,
    /// Direction used for movement and shooting.
    pub facing: Facing,
    /// Remaining health; the actor is removed once it reaches zero.
    pub health: u8,
    /// Grid cell currently occupied by the actor.
    pub cell: CellCoord,
}

impl Actor {
    /// Reports whether the actor has been eliminated.
    #[must_use]
    pub const fn is_fallen(&self) -> bool {
        self.health == 0
    }
}

/// Discrete command resolved for one actor during one turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Step one cell along the current facing.
    Move,
    /// Quarter turn counter-clockwise.
    RotateLeft,
    /// Quarter turn clockwise.
    RotateRight,
    /// Fire along the current facing.
    Shoot,
    /// Do nothing.
    Wait,
    /// Symbol outside the command vocabulary; halts the run when reached.
    Unknown(char),
}

impl Command {
    /// Interprets a single queued symbol, ignoring letter case.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Self {
        match symbol.to_ascii_uppercase() {
            'M' => Self::Move,
            'L' => Self::RotateLeft,
            'R' => Self::RotateRight,
            'S' => Self::Shoot,
            'W' => Self::Wait,
            _ => Self::Unknown(symbol),
        }
    }

    /// Canonical upper-case symbol, or `?` for unknown commands.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Move => 'M',
            Self::RotateLeft => 'L',
            Self::RotateRight => 'R',
            Self::Shoot => 'S',
            Self::Wait => 'W',
            Self::Unknown(_) => '?',
        }
    }

    /// Reports whether the command lies outside the vocabulary.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

/// Structural problems detected while building a map.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input contained no rows.
    #[error("no rows")]
    NoRows,
    /// A row differs in length from the first row.
    #[error("not rectangular: row {row} has {found} cells, expected {expected}")]
    NotRectangular {
        /// Zero-based index of the offending row.
        row: usize,
        /// Cell count of the first row.
        expected: usize,
        /// Cell count of the offending row.
        found: usize,
    },
    /// An actor tag does not have exactly four characters.
    #[error("malformed {kind} tag `{tag}`")]
    MalformedTag {
        /// Kind announced by the tag's first letter.
        kind: ActorKind,
        /// Offending tag.
        tag: String,
    },
    /// An actor tag carries a facing letter outside `n`, `e`, `s`, `w`.
    #[error("{kind} face invalid in `{tag}`")]
    InvalidFacing {
        /// Kind announced by the tag's first letter.
        kind: ActorKind,
        /// Offending tag.
        tag: String,
    },
    /// An actor tag carries an order or health that is not a hex digit.
    #[error("invalid hex digit in `{tag}`")]
    InvalidDigit {
        /// Offending tag.
        tag: String,
    },
    /// An actor starts with zero health.
    #[error("actor {order} must start with positive health")]
    ZeroHealth {
        /// Order of the offending actor.
        order: ActorOrder,
    },
    /// A token matches neither terrain nor an actor tag.
    #[error("unknown token `{token}`")]
    UnknownToken {
        /// Offending token.
        token: String,
    },
    /// An actor lies outside the grid.
    #[error("actor {order} lies outside the grid")]
    ActorOutOfBounds {
        /// Order of the misplaced actor.
        order: ActorOrder,
    },
    /// Two actors share the same order value.
    #[error("order must be unique: {order} appears more than once")]
    DuplicateOrder {
        /// Duplicated order value.
        order: ActorOrder,
    },
}
