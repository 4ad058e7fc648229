#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Text presentation of simulation histories and parsed maps.
//!
//! Presentation types borrow the data they describe and render through
//! [`fmt::Display`], so callers decide where the text goes.

use std::fmt;

use sketchbot_core::Actor;
use sketchbot_map::{query, Map};
use sketchbot_system_simulation::{SimulationResult, TurnRecord};

/// Switches that shape a [`Listing`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListingOptions {
    /// Prints the map snapshot under every turn heading.
    pub show_map: bool,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self { show_map: true }
    }
}

/// Turn by turn listing of a finished run.
#[derive(Clone, Copy, Debug)]
pub struct Listing<'a> {
    result: &'a SimulationResult,
    options: ListingOptions,
}

impl<'a> Listing<'a> {
    /// Creates a listing over the provided result.
    #[must_use]
    pub fn new(result: &'a SimulationResult, options: ListingOptions) -> Self {
        Self { result, options }
    }

    fn write_turn(
        &self,
        f: &mut fmt::Formatter<'_>,
        number: usize,
        turn: &TurnRecord,
    ) -> fmt::Result {
        writeln!(f, "Turn {number}")?;
        if self.options.show_map {
            write!(f, "{}", turn.map)?;
        }
        for (order, played) in &turn.players {
            writeln!(
                f,
                "player {order}: {} | {} | health {}",
                played.command.symbol(),
                played.probes,
                played.health
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (number, turn) in (1..).zip(&self.result.turns) {
            self.write_turn(f, number, turn)?;
        }
        match self.result.error_message() {
            Some(message) => writeln!(f, "{message}"),
            None => writeln!(f, "finished after {} turns", self.result.turns.len()),
        }
    }
}

/// Canonical rendering of a map followed by its actors.
#[derive(Clone, Copy, Debug)]
pub struct Roster<'a> {
    map: &'a Map,
}

impl<'a> Roster<'a> {
    /// Creates a roster view over the provided map.
    #[must_use]
    pub fn new(map: &'a Map) -> Self {
        Self { map }
    }
}

impl fmt::Display for Roster<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (columns, rows) = query::dimensions(self.map);
        writeln!(f, "{columns}x{rows}")?;
        write!(f, "{}", self.map)?;
        for actor in query::actors(self.map) {
            write_actor(f, actor)?;
        }
        Ok(())
    }
}

fn write_actor(f: &mut fmt::Formatter<'_>, actor: &Actor) -> fmt::Result {
    writeln!(
        f,
        "{} {} at ({}, {}) facing {} health {}",
        actor.kind,
        actor.order,
        actor.cell.column(),
        actor.cell.row(),
        actor.facing.letter(),
        actor.health
    )
}
