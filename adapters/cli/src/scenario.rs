//! Scenario loading: map files, TOML scenario files and `--player` queues.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use sketchbot_core::ActorOrder;
use sketchbot_map::Map;
use sketchbot_system_simulation::PlayerQueue;

const SUPPORTED_SCENARIO_VERSION: u32 = 1;

/// Map together with the queues that drive its players.
#[derive(Debug)]
pub(crate) struct Scenario {
    pub(crate) map: Map,
    pub(crate) queues: Vec<PlayerQueue>,
}

impl Scenario {
    /// Scenario with no queued actions.
    pub(crate) fn from_map(map: Map) -> Self {
        Self {
            map,
            queues: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioFile {
    version: u32,
    map: String,
    #[serde(default)]
    players: Vec<PlayerEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlayerEntry {
    order: u8,
    actions: String,
}

/// Reads and parses a map file.
pub(crate) fn load_map(path: &Path) -> Result<Map> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read map at {}", path.display()))?;
    contents
        .parse()
        .with_context(|| format!("invalid map in {}", path.display()))
}

/// Reads and parses a TOML scenario file.
pub(crate) fn load(path: &Path) -> Result<Scenario> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario at {}", path.display()))?;
    parse_scenario(&contents).with_context(|| format!("invalid scenario in {}", path.display()))
}

fn parse_scenario(contents: &str) -> Result<Scenario> {
    let file: ScenarioFile =
        toml::from_str(contents).context("failed to parse scenario toml contents")?;
    if file.version != SUPPORTED_SCENARIO_VERSION {
        bail!(
            "unsupported scenario version {}; expected {}",
            file.version,
            SUPPORTED_SCENARIO_VERSION
        );
    }

    let map = file.map.parse().context("invalid scenario map")?;
    let queues = file
        .players
        .into_iter()
        .map(|entry| PlayerQueue::parse(ActorOrder::new(entry.order), &entry.actions))
        .collect();
    Ok(Scenario { map, queues })
}

/// Parses a `--player` argument of the form `ORDER=ACTIONS`.
pub(crate) fn parse_player(argument: &str) -> Result<PlayerQueue> {
    let Some((order, actions)) = argument.split_once('=') else {
        bail!("expected ORDER=ACTIONS, found `{argument}`");
    };
    let order: u8 = order
        .trim()
        .parse()
        .with_context(|| format!("invalid player order `{order}`"))?;
    Ok(PlayerQueue::parse(ActorOrder::new(order), actions))
}

/// Replaces scenario queues with command-line queues for the same player.
pub(crate) fn merge_queues(
    mut scenario: Vec<PlayerQueue>,
    overrides: Vec<PlayerQueue>,
) -> Vec<PlayerQueue> {
    scenario.retain(|queue| !overrides.iter().any(|other| other.order == queue.order));
    scenario.extend(overrides);
    scenario
}
