#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic turn loop that drives a scenario to completion.
//!
//! Every turn snapshots the incoming [`Map`], resolves each living actor in
//! ascending order against a private copy, and carries that copy into the next
//! turn. The loop ends when a driven player falls, when a queued command is
//! unknown, or on the first turn in which no player had anything left to do.

use std::collections::BTreeMap;

use sketchbot_core::{ActorKind, ActorOrder, Command};
use sketchbot_map::{self as map, query, Map};
use sketchbot_system_hostile_fire::HostileFire;
use sketchbot_system_probe as probe;
use thiserror::Error;
use tracing::{debug, trace};

/// Ordered commands for one controllable actor, consumed one per turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerQueue {
    /// Player driven by the queue.
    pub order: ActorOrder,
    /// Commands indexed by turn.
    pub commands: Vec<Command>,
}

impl PlayerQueue {
    /// Creates a queue from already interpreted commands.
    #[must_use]
    pub fn new(order: ActorOrder, commands: Vec<Command>) -> Self {
        Self { order, commands }
    }

    /// Builds a queue from an action string such as `"MMRS"`.
    ///
    /// Whitespace is dropped and letters are case-insensitive. Any other
    /// symbol becomes [`Command::Unknown`].
    #[must_use]
    pub fn parse(order: ActorOrder, actions: &str) -> Self {
        let commands = actions
            .chars()
            .filter(|symbol| !symbol.is_whitespace())
            .map(Command::from_symbol)
            .collect();
        Self { order, commands }
    }

    fn command_at(&self, turn: usize) -> Option<Command> {
        self.commands.get(turn).copied()
    }
}

/// What a driven player did during one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerTurn {
    /// Command taken from the queue.
    pub command: Command,
    /// Health when the player's slot came up, before its own command.
    pub health: u8,
    /// Probe report seen just before the command resolved.
    pub probes: String,
}

/// One entry of the simulation history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnRecord {
    /// Map as it stood before the turn resolved.
    pub map: Map,
    /// Driven players that acted this turn.
    pub players: BTreeMap<ActorOrder, PlayerTurn>,
}

/// Abnormal end of a simulation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Termination {
    /// Fewer players remain alive than were given queues.
    #[error("Friendly player died")]
    FriendlyPlayerDied,
    /// A queue reached a symbol outside the command vocabulary.
    #[error("unknown action `{symbol}` for player {order}")]
    UnknownAction {
        /// Player whose queue held the symbol.
        order: ActorOrder,
        /// Offending symbol.
        symbol: char,
    },
}

/// Full history of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationResult {
    /// One record per simulated turn.
    pub turns: Vec<TurnRecord>,
    /// Why the run stopped early, if it did.
    pub termination: Option<Termination>,
}

impl SimulationResult {
    /// Human readable termination message, if any.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.termination.map(|termination| termination.to_string())
    }
}

/// Queue problems detected before the first turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ScenarioError {
    /// The queue names an order that is not on the map.
    #[error("no actor with order {order} on the map")]
    UnknownActor {
        /// Requested order.
        order: ActorOrder,
    },
    /// The queue names an actor that cannot be driven.
    #[error("actor {order} is a {kind} and cannot be given actions")]
    NotControllable {
        /// Requested order.
        order: ActorOrder,
        /// Kind of the requested actor.
        kind: ActorKind,
    },
    /// Two queues name the same actor.
    #[error("actor {order} was given more than one action queue")]
    DuplicateQueue {
        /// Requested order.
        order: ActorOrder,
    },
}

/// Turn loop that reuses a scratch buffer for automatic commands.
#[derive(Debug, Default)]
pub struct Simulation {
    hostile_fire: HostileFire,
    scratch: Vec<Command>,
}

impl Simulation {
    /// Creates a new simulation with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the scenario until it terminates.
    ///
    /// The provided map is never mutated. Queues must be finite.
    pub fn run(
        &mut self,
        map: &Map,
        queues: &[PlayerQueue],
    ) -> Result<SimulationResult, ScenarioError> {
        let driven = driven_queues(map, queues)?;
        let mut current = map.clone();
        let mut turns = Vec::new();

        for turn in 0.. {
            let _span = tracing::debug_span!("turn", index = turn).entered();
            let mut working = current.clone();
            let players = self.resolve_turn(&mut working, &driven, turn);
            let acted = !players.is_empty();
            let unknown = players
                .iter()
                .find_map(|(order, played)| match played.command {
                    Command::Unknown(symbol) => Some(Termination::UnknownAction {
                        order: *order,
                        symbol,
                    }),
                    _ => None,
                });

            turns.push(TurnRecord {
                map: current,
                players,
            });

            let termination = if query::count_kind(&working, ActorKind::Player) < driven.len() {
                Some(Termination::FriendlyPlayerDied)
            } else {
                unknown
            };
            if termination.is_some() {
                debug!(?termination, turns = turns.len(), "simulation stopped");
                return Ok(SimulationResult { turns, termination });
            }
            if !acted {
                break;
            }
            current = working;
        }

        debug!(turns = turns.len(), "simulation finished");
        Ok(SimulationResult {
            turns,
            termination: None,
        })
    }

    fn resolve_turn(
        &mut self,
        working: &mut Map,
        driven: &BTreeMap<ActorOrder, &PlayerQueue>,
        turn: usize,
    ) -> BTreeMap<ActorOrder, PlayerTurn> {
        let mut players = BTreeMap::new();

        for order in query::orders(working) {
            let Some(actor) = query::actor(working, order).copied() else {
                trace!(order = order.get(), "skipping fallen actor");
                continue;
            };

            let queued = driven
                .get(&order)
                .and_then(|queue| queue.command_at(turn))
                .filter(|_| actor.kind.is_controllable());
            if let Some(command) = queued {
                let probes = probe::report(working, order)
                    .map(|report| report.to_string())
                    .unwrap_or_default();
                let previous = players.insert(
                    order,
                    PlayerTurn {
                        command,
                        health: actor.health,
                        probes,
                    },
                );
                debug_assert!(previous.is_none());
                let outcome = map::apply(working, order, command);
                trace!(order = order.get(), ?command, ?outcome, "player acted");
            }

            if let Some(actor) = query::actor(working, order).copied() {
                self.hostile_fire.handle(&actor, &mut self.scratch);
            }
            for command in self.scratch.drain(..) {
                let outcome = map::apply(working, order, command);
                trace!(order = order.get(), ?command, ?outcome, "automatic fire");
            }

            let fallen = map::remove_fallen(working);
            if !fallen.is_empty() {
                debug!(?fallen, "actors eliminated");
            }
        }

        players
    }
}

/// Runs the scenario with a fresh [`Simulation`].
pub fn simulate(map: &Map, queues: &[PlayerQueue]) -> Result<SimulationResult, ScenarioError> {
    Simulation::new().run(map, queues)
}

fn driven_queues<'q>(
    map: &Map,
    queues: &'q [PlayerQueue],
) -> Result<BTreeMap<ActorOrder, &'q PlayerQueue>, ScenarioError> {
    let mut driven = BTreeMap::new();

    for queue in queues {
        let order = queue.order;
        let actor = query::actor(map, order).ok_or(ScenarioError::UnknownActor { order })?;
        if !actor.kind.is_controllable() {
            return Err(ScenarioError::NotControllable {
                order,
                kind: actor.kind,
            });
        }
        if driven.insert(order, queue).is_some() {
            return Err(ScenarioError::DuplicateQueue { order });
        }
    }

    Ok(driven)
}
