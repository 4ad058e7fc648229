//! Map text format.
//!
//! One row per line, cells separated by whitespace. Terrain tokens are `x`
//! (block), `_` (empty) and `f` (finish). Actors are four-character tags
//! `<kind><order><facing><health>` such as `p0e3`, where order and health are
//! single hexadecimal digits; actors always stand on an empty tile.

use std::{fmt, str::FromStr};

use sketchbot_core::{Actor, ActorKind, ActorOrder, CellCoord, Facing, ParseError, Tile};

use crate::{query, Map};

/// Parses a map from its text representation.
pub fn parse(input: &str) -> Result<Map, ParseError> {
    let mut rows = Vec::new();
    let mut actors = Vec::new();

    for (row_index, line) in (0u32..).zip(input.trim().lines()) {
        let mut row = Vec::new();
        for (column_index, token) in (0u32..).zip(line.split_whitespace()) {
            match Tile::from_token(token) {
                Some(tile) => row.push(tile),
                None => {
                    let cell = CellCoord::new(column_index, row_index);
                    actors.push(parse_tag(token, cell)?);
                    row.push(Tile::Empty);
                }
            }
        }
        rows.push(row);
    }

    Map::from_rows(rows, actors)
}

/// Renders the map back into its text representation.
///
/// Every row ends with a newline. Rendering output always parses back into an
/// equal map.
#[must_use]
pub fn render(map: &Map) -> String {
    map.to_string()
}

fn parse_tag(token: &str, cell: CellCoord) -> Result<Actor, ParseError> {
    let mut chars = token.chars();
    let Some(kind) = chars.next().and_then(ActorKind::from_letter) else {
        return Err(ParseError::UnknownToken {
            token: token.to_owned(),
        });
    };

    let symbols: Vec<char> = chars.collect();
    let &[order, facing, health] = symbols.as_slice() else {
        return Err(ParseError::MalformedTag {
            kind,
            tag: token.to_owned(),
        });
    };

    let facing = Facing::from_letter(facing).ok_or_else(|| ParseError::InvalidFacing {
        kind,
        tag: token.to_owned(),
    })?;
    let order = hex_digit(order, token)?;
    let health = hex_digit(health, token)?;

    Ok(Actor {
        order: ActorOrder::new(order),
        kind,
        facing,
        health,
        cell,
    })
}

fn hex_digit(symbol: char, token: &str) -> Result<u8, ParseError> {
    symbol
        .to_digit(16)
        .and_then(|digit| u8::try_from(digit).ok())
        .ok_or_else(|| ParseError::InvalidDigit {
            tag: token.to_owned(),
        })
}

impl FromStr for Map {
    type Err = ParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        parse(input)
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (columns, rows) = query::dimensions(self);
        for row in 0..rows {
            for column in 0..columns {
                if column > 0 {
                    f.write_str(" ")?;
                }
                let cell = CellCoord::new(column, row);
                match query::actor_at(self, cell) {
                    Some(actor) => write!(
                        f,
                        "{}{:x}{}{:x}",
                        actor.kind.letter(),
                        actor.order.get(),
                        actor.facing.letter(),
                        actor.health
                    )?,
                    None => {
                        let tile = query::tile(self, cell).unwrap_or(Tile::Empty);
                        write!(f, "{}", tile.letter())?;
                    }
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
