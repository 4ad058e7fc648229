#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line front end that runs robot scenarios and prints their history.

mod scenario;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use sketchbot_rendering::{Listing, ListingOptions, Roster};
use sketchbot_system_simulation::{simulate, PlayerQueue};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::scenario::Scenario;

/// Grid robot scenario runner.
#[derive(Debug, Parser)]
#[command(name = "sketchbot")]
#[command(about = "Simulates queued robot actions on a text grid", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Simulate a scenario and print every turn
    Run(RunArgs),

    /// Parse a map and print its canonical form and actors
    Check {
        /// Map file in the grid text format
        #[arg(long)]
        map: PathBuf,
    },
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Map file in the grid text format
    #[arg(long, conflicts_with = "scenario", required_unless_present = "scenario")]
    map: Option<PathBuf>,

    /// TOML scenario holding the map and player queues
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Action queue for a player, replacing any queue the scenario gives it
    #[arg(long = "player", value_name = "ORDER=ACTIONS", value_parser = scenario::parse_player)]
    players: Vec<PlayerQueue>,

    /// Omit the map snapshot from each turn
    #[arg(long)]
    hide_map: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        CliCommand::Run(args) => run(args),
        CliCommand::Check { map } => check(map),
    }
}

fn run(args: RunArgs) -> Result<()> {
    let scenario = match (args.scenario, args.map) {
        (Some(path), _) => scenario::load(&path)?,
        (None, Some(path)) => Scenario::from_map(scenario::load_map(&path)?),
        (None, None) => anyhow::bail!("either --map or --scenario must be provided"),
    };
    let queues = scenario::merge_queues(scenario.queues, args.players);
    info!(players = queues.len(), "starting simulation");

    let result = simulate(&scenario.map, &queues).context("scenario rejected")?;
    info!(
        turns = result.turns.len(),
        termination = ?result.termination,
        "simulation finished"
    );

    let options = ListingOptions {
        show_map: !args.hide_map,
    };
    print!("{}", Listing::new(&result, options));
    Ok(())
}

fn check(path: PathBuf) -> Result<()> {
    let map = scenario::load_map(&path)?;
    print!("{}", Roster::new(&map));
    Ok(())
}
