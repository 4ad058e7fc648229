use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use sketchbot_core::{ActorOrder, Command};
use sketchbot_map::{text, Map};
use sketchbot_system_simulation::{PlayerQueue, Simulation, SimulationResult};

const FORTRESS: &str = "\
x x x x x
x p0e3 _ f x
x _ x _ x
x t1n1 _ e2w2 x
x x x x x
";

#[test]
fn replay_is_deterministic() {
    let map: Map = FORTRESS.parse().expect("valid map");
    let queues = [PlayerQueue::parse(ActorOrder::new(0), "MMRMMS")];

    let first = Simulation::new().run(&map, &queues).expect("valid scenario");
    let second = Simulation::new().run(&map, &queues).expect("valid scenario");

    assert_eq!(first, second, "simulation replay diverged");
    assert_eq!(fingerprint(&first), fingerprint(&second));
}

#[test]
fn simulation_instances_can_be_reused() {
    let map: Map = FORTRESS.parse().expect("valid map");
    let queues = [PlayerQueue::parse(ActorOrder::new(0), "MMRMMS")];

    let mut simulation = Simulation::new();
    let first = simulation.run(&map, &queues).expect("valid scenario");
    let second = simulation.run(&map, &queues).expect("valid scenario");

    assert_eq!(first, second);
}

#[test]
fn fortress_trace_matches_expectation() {
    let map: Map = FORTRESS.parse().expect("valid map");
    let queues = [PlayerQueue::parse(ActorOrder::new(0), "MMRMMS")];
    let result = Simulation::new().run(&map, &queues).expect("valid scenario");

    assert_eq!(result.turns.len(), 7);
    assert_eq!(result.termination, None);

    let probes: Vec<&str> = result
        .turns
        .iter()
        .filter_map(|turn| turn.players.get(&ActorOrder::new(0)))
        .map(|played| played.probes.as_str())
        .take(2)
        .collect();
    assert_eq!(
        probes,
        vec![
            "front: 2/F2 back: 0 left: 0 right: E1",
            "front: 1/F1 back: 1 left: 0 right: 0",
        ]
    );

    let commands: Vec<Command> = result
        .turns
        .iter()
        .filter_map(|turn| turn.players.get(&ActorOrder::new(0)))
        .map(|played| played.command)
        .collect();
    assert_eq!(
        commands,
        vec![
            Command::Move,
            Command::Move,
            Command::RotateRight,
            Command::Move,
            Command::Move,
            Command::Shoot,
        ]
    );

    let healths: Vec<u8> = result
        .turns
        .iter()
        .filter_map(|turn| turn.players.get(&ActorOrder::new(0)))
        .map(|played| played.health)
        .collect();
    assert_eq!(healths, vec![3, 3, 3, 3, 3, 2]);

    assert_eq!(
        text::render(&result.turns[1].map),
        "x x x x x\nx _ p0e3 f x\nx _ x _ x\nx _ _ e2w2 x\nx x x x x\n"
    );
    let last = result.turns.last().expect("at least one turn");
    assert_eq!(
        text::render(&last.map),
        "x x x x x\nx _ _ f x\nx _ x p0s2 x\nx _ _ e2w1 x\nx x x x x\n"
    );
}

fn fingerprint(result: &SimulationResult) -> u64 {
    let mut hasher = DefaultHasher::new();
    result.turns.len().hash(&mut hasher);
    for turn in &result.turns {
        text::render(&turn.map).hash(&mut hasher);
        for (order, played) in &turn.players {
            order.hash(&mut hasher);
            played.command.hash(&mut hasher);
            played.health.hash(&mut hasher);
            played.probes.hash(&mut hasher);
        }
    }
    result.error_message().hash(&mut hasher);
    hasher.finish()
}
