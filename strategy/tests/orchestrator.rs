use std::collections::HashSet;

use lane_defence_core::{
    AttackDirection, Breach, Command, Owner, Position, StationaryUnitView, Turn, UnitKind,
};
use lane_defence_strategy::{Strategy, StrategyProfile};
use lane_defence_world::Board;
use rand::rngs::mock::StepRng;

fn cells(cells: &[(i32, i32)]) -> Vec<Position> {
    cells.iter().map(|&(x, y)| Position::new(x, y)).collect()
}

fn wall() -> StationaryUnitView {
    StationaryUnitView {
        kind: UnitKind::Wall,
        health: 60.0,
        max_health: 60.0,
        upgraded: false,
        owner: Owner::Player,
    }
}

/// Random source whose coin flips always land on `Left`.
fn always_left() -> StepRng {
    StepRng::new(0, 0)
}

/// Random source whose coin flips always land on `Right`.
fn always_right() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

fn mobile_spawns(commands: &[Command]) -> Vec<Command> {
    commands
        .iter()
        .filter(|command| matches!(command, Command::Spawn { kind, .. } if !kind.is_stationary()))
        .cloned()
        .collect()
}

fn spawned(commands: &[Command], wanted: UnitKind) -> HashSet<Position> {
    commands
        .iter()
        .filter_map(|command| match command {
            Command::Spawn {
                kind, positions, ..
            } if *kind == wanted => Some(positions.iter().copied()),
            _ => None,
        })
        .flatten()
        .collect()
}

#[test]
fn first_turn_builds_opening_then_only_the_gaps() {
    let mut strategy = Strategy::with_rng(StrategyProfile::fortified(), always_left());
    let mut board = Board::new(Turn::new(0));

    let direction = strategy.on_turn(&mut board);

    assert_eq!(direction, AttackDirection::Left);
    let commands = board.commands();
    match &commands[0] {
        Command::Spawn {
            kind: UnitKind::Wall,
            positions,
            count: 1,
        } => assert_eq!(positions.len(), 28),
        other => panic!("expected the opening walls first, got {other:?}"),
    }
    assert_eq!(
        commands[1],
        Command::spawn(
            UnitKind::Turret,
            cells(&[(3, 12), (24, 12), (7, 9), (20, 9), (12, 8), (15, 8)])
        )
    );
    assert_eq!(
        commands[2],
        Command::spawn(UnitKind::Wall, cells(&[(12, 9), (15, 9)])),
        "repair only requests front cells the opening left empty",
    );
    assert_eq!(
        commands[3],
        Command::spawn(UnitKind::Turret, cells(&[(9, 8), (18, 8)])),
    );

    let opening: HashSet<Position> = commands[..2]
        .iter()
        .flat_map(|command| command.positions().iter().copied())
        .collect();
    for command in &commands[2..] {
        if let Command::Spawn { positions, .. } = command {
            assert!(
                positions.iter().all(|position| !opening.contains(position)),
                "{command:?} duplicates an opening spawn",
            );
        }
    }
    assert!(
        mobile_spawns(commands).is_empty(),
        "no units are launched on the first turn"
    );
}

#[test]
fn lane_opening_turn_removes_the_committed_corner_only() {
    let mut strategy = Strategy::with_rng(StrategyProfile::baseline(), always_left());
    let mut board = Board::new(Turn::new(7));
    for position in cells(&[(0, 13), (1, 13), (1, 12)]) {
        board.place(position, wall());
    }

    let direction = strategy.on_turn(&mut board);

    assert_eq!(direction, AttackDirection::Left);
    let removals: Vec<&Command> = board
        .commands()
        .iter()
        .filter(|command| matches!(command, Command::Remove { .. }))
        .collect();
    assert_eq!(
        removals,
        vec![&Command::Remove {
            positions: cells(&[(0, 13), (1, 13), (1, 12)]),
        }],
    );
    assert_eq!(
        strategy.state().next_attack_direction(),
        AttackDirection::Left
    );
}

#[test]
fn reinforced_launch_goes_right_with_base_counts() {
    let mut strategy = Strategy::with_rng(StrategyProfile::baseline(), always_right());
    let _ = strategy.on_turn(&mut Board::new(Turn::new(7)));
    let mut board = Board::new(Turn::new(8));

    let direction = strategy.on_turn(&mut board);

    assert_eq!(direction, AttackDirection::Right);
    assert_eq!(
        mobile_spawns(board.commands()),
        vec![
            Command::Spawn {
                kind: UnitKind::Interceptor,
                positions: vec![Position::new(25, 11)],
                count: 1,
            },
            Command::Spawn {
                kind: UnitKind::Scout,
                positions: vec![Position::new(6, 7)],
                count: 5,
            },
            Command::Spawn {
                kind: UnitKind::Scout,
                positions: vec![Position::new(5, 8)],
                count: 1000,
            },
        ],
    );
}

#[test]
fn launch_turn_keeps_the_open_lane_clear() {
    let mut strategy = Strategy::with_rng(StrategyProfile::fortified(), always_right());
    let _ = strategy.on_turn(&mut Board::new(Turn::new(11)));
    let mut board = Board::new(Turn::new(12));

    let _ = strategy.on_turn(&mut board);

    let walls = spawned(board.commands(), UnitKind::Wall);
    let turrets = spawned(board.commands(), UnitKind::Turret);
    for position in cells(&[(27, 13), (26, 12)]) {
        assert!(!walls.contains(&position), "{position:?} must stay open");
    }
    assert!(!turrets.contains(&Position::new(26, 13)));
    for position in cells(&[(0, 13), (1, 12)]) {
        assert!(walls.contains(&position), "{position:?} is rebuilt");
    }
    assert!(turrets.contains(&Position::new(1, 13)));
}

#[test]
fn fortified_scouts_escalate_with_elapsed_cycles() {
    let mut strategy = Strategy::with_rng(StrategyProfile::fortified(), always_left());
    let mut board = Board::new(Turn::new(16));

    let _ = strategy.on_turn(&mut board);

    let spawns = mobile_spawns(board.commands());
    assert!(spawns.contains(&Command::Spawn {
        kind: UnitKind::Scout,
        positions: vec![Position::new(21, 7)],
        count: 9,
    }));
    assert!(spawns.contains(&Command::Spawn {
        kind: UnitKind::Scout,
        positions: vec![Position::new(22, 8)],
        count: 1004,
    }));
}

#[test]
fn launches_follow_the_lane_opened_before_them() {
    let profile = StrategyProfile::baseline();
    for seed in 0..16 {
        let mut strategy = Strategy::new(profile.clone(), seed);
        let mut opened = None;

        for turn in 0..=40 {
            let mut board = Board::new(Turn::new(turn));
            let direction = strategy.on_turn(&mut board);
            let turn = Turn::new(turn);

            if turn.is_lane_opening() {
                let lane = profile.attack_lanes.get(direction).as_slice().to_vec();
                assert!(board
                    .commands()
                    .contains(&Command::Remove { positions: lane }));
                opened = Some(direction);
            }
            if turn.is_launch() {
                assert_eq!(Some(direction), opened, "seed {seed}, {turn:?}");
                let first_scout = profile.scouts.get(direction)[0].position;
                assert!(mobile_spawns(board.commands())
                    .iter()
                    .any(|command| command.positions() == [first_scout]));
            }
        }
    }
}

#[test]
fn same_seed_replays_the_same_match() {
    let run = |seed| {
        let mut strategy = Strategy::new(StrategyProfile::fortified(), seed);
        (0..32)
            .map(|turn| strategy.on_turn(&mut Board::new(Turn::new(turn))))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(42), run(42));
}

#[test]
fn action_frames_record_opponent_breaches() {
    let mut strategy = Strategy::new(StrategyProfile::default(), 1);
    let breach = |x, y, owner| Breach {
        position: Position::new(x, y),
        damage: 1.0,
        unit_type: 3,
        unit_id: String::from("42"),
        owner,
    };

    let added = strategy.on_action_frame(&[
        breach(5, 13, Owner::Opponent),
        breach(10, 0, Owner::Player),
    ]);

    assert_eq!(added, 1);
    assert_eq!(
        strategy.state().scored_on_locations(),
        &[Position::new(5, 13)]
    );
}
