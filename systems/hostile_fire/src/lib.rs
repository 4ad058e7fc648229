#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that emits the scripted shots of hostile turrets.
//!
//! Hostiles never plan: each one fires along its current facing once per turn
//! and keeps that facing whether or not the shot lands.

use sketchbot_core::{Actor, Command};

/// Hostile fire system that queues the automatic shot of eligible actors.
#[derive(Debug, Default)]
pub struct HostileFire;

impl HostileFire {
    /// Creates a new hostile fire system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits the automatic commands owed by `actor` this turn.
    pub fn handle(&self, actor: &Actor, out: &mut Vec<Command>) {
        if !actor.kind.fires_automatically() || actor.is_fallen() {
            return;
        }

        out.push(Command::Shoot);
    }
}
