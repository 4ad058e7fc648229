#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that reports the four-way sensor readings of a robot.
//!
//! Each reading is a ray cast rendered as `[mark]<distance>[/F<step>]`: the
//! mark is `E` for a target or enemy, `P` for a player and absent for walls or
//! the grid edge; the distance counts open cells before the obstacle; the
//! suffix names the step at which a finish tile was first passed.

use std::fmt;

use sketchbot_core::{ActorOrder, CellCoord, Facing};
use sketchbot_map::{
    query,
    ray::{self, RayEnd},
    Map,
};

/// Sensor reading along a single direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeReading {
    /// Marker of the actor that stopped the ray, if any.
    pub mark: Option<char>,
    /// Open cells between the robot and the obstacle.
    pub distance: u32,
    /// One-based step of the first finish tile passed.
    pub finish_step: Option<u32>,
}

impl fmt::Display for ProbeReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(mark) = self.mark {
            write!(f, "{mark}")?;
        }
        write!(f, "{}", self.distance)?;
        if let Some(step) = self.finish_step {
            write!(f, "/F{step}")?;
        }
        Ok(())
    }
}

/// Readings in the four directions relative to a robot's facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeReport {
    /// Along the current facing.
    pub front: ProbeReading,
    /// Opposite the current facing.
    pub back: ProbeReading,
    /// A quarter turn counter-clockwise.
    pub left: ProbeReading,
    /// A quarter turn clockwise.
    pub right: ProbeReading,
}

impl fmt::Display for ProbeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "front: {} back: {} left: {} right: {}",
            self.front, self.back, self.left, self.right
        )
    }
}

/// Casts a single probe from `origin` toward `facing`.
#[must_use]
pub fn reading(map: &Map, origin: CellCoord, facing: Facing) -> ProbeReading {
    let cast = ray::cast(map, origin, facing);
    let mark = match cast.end {
        RayEnd::Actor(order) => query::actor(map, order).map(|actor| actor.kind.probe_mark()),
        RayEnd::Wall | RayEnd::OutOfBounds => None,
    };

    ProbeReading {
        mark,
        distance: cast.distance,
        finish_step: cast.finish_step,
    }
}

/// Computes the four-way report for the actor with the provided order.
///
/// Returns `None` when the actor is not on the map.
#[must_use]
pub fn report(map: &Map, order: ActorOrder) -> Option<ProbeReport> {
    let actor = query::actor(map, order)?;
    let facing = actor.facing;
    let origin = actor.cell;

    Some(ProbeReport {
        front: reading(map, origin, facing),
        back: reading(map, origin, facing.reversed()),
        left: reading(map, origin, facing.counter_clockwise()),
        right: reading(map, origin, facing.clockwise()),
    })
}
