use sketchbot_core::{ActorOrder, CellCoord, Command, Facing};
use sketchbot_map::{self as map, query, ray::RayEnd, Map, Outcome};

const PLAYER: ActorOrder = ActorOrder::new(0);

fn load(text: &str) -> Map {
    text.parse().expect("valid map")
}

fn health(map: &Map, order: ActorOrder) -> Option<u8> {
    query::actor(map, order).map(|actor| actor.health)
}

#[test]
fn rotations_turn_a_quarter_without_moving() {
    let mut world = load("_ p0n2 _");

    assert_eq!(
        map::apply(&mut world, PLAYER, Command::RotateLeft),
        Outcome::Rotated {
            facing: Facing::West,
        }
    );
    assert_eq!(
        map::apply(&mut world, PLAYER, Command::RotateRight),
        Outcome::Rotated {
            facing: Facing::North,
        }
    );
    assert_eq!(
        map::apply(&mut world, PLAYER, Command::RotateRight),
        Outcome::Rotated {
            facing: Facing::East,
        }
    );

    let player = query::actor(&world, PLAYER).expect("player");
    assert_eq!(player.cell, CellCoord::new(1, 0));
    assert_eq!(player.health, 2);
}

#[test]
fn wait_leaves_the_map_untouched() {
    let mut world = load("p0e1 _");
    let before = world.clone();
    assert_eq!(
        map::apply(&mut world, PLAYER, Command::Wait),
        Outcome::Waited
    );
    assert_eq!(world, before);
}

#[test]
fn move_into_open_cell_keeps_facing() {
    let mut world = load("p0e1 f");
    assert_eq!(
        map::apply(&mut world, PLAYER, Command::Move),
        Outcome::Moved {
            from: CellCoord::new(0, 0),
            to: CellCoord::new(1, 0),
        }
    );
    let player = query::actor(&world, PLAYER).expect("player");
    assert_eq!(player.cell, CellCoord::new(1, 0));
    assert_eq!(player.facing, Facing::East);
    assert_eq!(player.health, 1);
}

#[test]
fn move_into_block_costs_one_health() {
    let mut world = load("p0e3 x");
    assert_eq!(
        map::apply(&mut world, PLAYER, Command::Move),
        Outcome::Collided { health: 2 }
    );
    let player = query::actor(&world, PLAYER).expect("player");
    assert_eq!(player.cell, CellCoord::new(0, 0));
}

#[test]
fn move_into_any_actor_behaves_like_a_block() {
    for neighbour in ["p1w1", "t1w1", "e1n1"] {
        let mut world = load(&format!("p0e3 {neighbour}"));
        assert_eq!(
            map::apply(&mut world, PLAYER, Command::Move),
            Outcome::Collided { health: 2 },
            "moving into {neighbour}"
        );
        assert_eq!(
            query::actor(&world, PLAYER).map(|actor| actor.cell),
            Some(CellCoord::new(0, 0))
        );
        assert_eq!(health(&world, ActorOrder::new(1)), Some(1));
    }
}

#[test]
fn move_past_the_grid_edge_is_a_collision() {
    let mut world = load("p0w2 _");
    assert_eq!(
        map::apply(&mut world, PLAYER, Command::Move),
        Outcome::Collided { health: 1 }
    );
}

#[test]
fn shot_wounds_only_the_first_actor() {
    let mut world = load("p0e1 _ t1w3 e2w3 x");
    assert_eq!(
        map::apply(&mut world, PLAYER, Command::Shoot),
        Outcome::Hit {
            target: ActorOrder::new(1),
            health: 2,
        }
    );
    assert_eq!(health(&world, ActorOrder::new(1)), Some(2));
    assert_eq!(health(&world, ActorOrder::new(2)), Some(3));
    assert_eq!(health(&world, PLAYER), Some(1));
}

#[test]
fn shot_may_strike_a_friendly_actor() {
    let mut world = load("p0s1\n_\np1n2");
    assert_eq!(
        map::apply(&mut world, PLAYER, Command::Shoot),
        Outcome::Hit {
            target: ActorOrder::new(1),
            health: 1,
        }
    );
}

#[test]
fn shot_stops_at_walls_and_edges() {
    let mut world = load("p0e1 x t1w1");
    assert_eq!(
        map::apply(&mut world, PLAYER, Command::Shoot),
        Outcome::Missed { end: RayEnd::Wall }
    );
    assert_eq!(
        map::apply(&mut world, PLAYER, Command::RotateLeft),
        Outcome::Rotated {
            facing: Facing::North,
        }
    );
    assert_eq!(
        map::apply(&mut world, PLAYER, Command::Shoot),
        Outcome::Missed {
            end: RayEnd::OutOfBounds,
        }
    );
    assert_eq!(health(&world, ActorOrder::new(1)), Some(1));
}

#[test]
fn unknown_commands_are_rejected_without_effect() {
    let mut world = load("p0e1 _");
    let before = world.clone();
    assert_eq!(
        map::apply(&mut world, PLAYER, Command::Unknown('z')),
        Outcome::Rejected { symbol: 'z' }
    );
    assert_eq!(world, before);
}

#[test]
fn fallen_actor_no_longer_blocks_movement() {
    let mut world = load("p0e2 t1w1 _");
    assert_eq!(
        map::apply(&mut world, PLAYER, Command::Shoot),
        Outcome::Hit {
            target: ActorOrder::new(1),
            health: 0,
        }
    );
    assert_eq!(map::remove_fallen(&mut world), vec![ActorOrder::new(1)]);
    assert_eq!(
        map::apply(&mut world, PLAYER, Command::Move),
        Outcome::Moved {
            from: CellCoord::new(0, 0),
            to: CellCoord::new(1, 0),
        }
    );
}

#[test]
fn walking_into_the_wall_after_a_step_eliminates_a_frail_player() {
    let mut world = load("p0e1 _ x");

    assert!(matches!(
        map::apply(&mut world, PLAYER, Command::Move),
        Outcome::Moved { .. }
    ));
    assert!(map::remove_fallen(&mut world).is_empty());

    assert_eq!(
        map::apply(&mut world, PLAYER, Command::Move),
        Outcome::Collided { health: 0 }
    );
    assert_eq!(
        query::actor(&world, PLAYER).map(|actor| actor.cell),
        Some(CellCoord::new(1, 0))
    );
    assert_eq!(map::remove_fallen(&mut world), vec![PLAYER]);
    assert!(query::actor(&world, PLAYER).is_none());
}
