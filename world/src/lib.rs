#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-turn board state for the Lane Defence decision engine.
//!
//! The authoritative game lives in an external engine. This crate reads the
//! engine's start-of-match configuration and per-turn snapshots, exposes the
//! result as a [`Board`] implementing [`TurnState`], and encodes the commands
//! issued against it back into the engine's submission format.

mod catalog;
mod frame;
mod snapshot;
mod submission;

use std::collections::HashMap;

use lane_defence_core::{
    Command, Owner, Position, StationaryUnitView, Turn, TurnState, UnitKind,
};

pub use catalog::{ConfigError, HealthTable, UnitCatalog};
pub use frame::FrameError;
pub use snapshot::{GameStateMessage, SnapshotError, TurnPhase};
pub use submission::{StackEntry, Submission};

/// Width and height of the square board that bounds the diamond arena.
pub const ARENA_SIZE: i32 = 28;
/// Number of rows belonging to each side of the arena.
pub const HALF_ARENA: i32 = ARENA_SIZE / 2;

/// Resource pools reported for one side at the start of the turn.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Resources {
    /// Points spent on structures.
    pub structure_points: f32,
    /// Points spent on mobile units.
    pub mobility_points: f32,
}

/// Board snapshot for a single turn combined with the intents issued so far.
#[derive(Clone, Debug)]
pub struct Board {
    turn: Turn,
    resources: Resources,
    opponent_resources: Resources,
    health: HealthTable,
    units: HashMap<Position, StationaryUnitView>,
    commands: Vec<Command>,
}

impl Board {
    /// Creates an empty board for the provided turn using default structure health.
    #[must_use]
    pub fn new(turn: Turn) -> Self {
        Self::with_health_table(turn, HealthTable::default())
    }

    /// Creates an empty board whose same-turn spawns use the provided health table.
    #[must_use]
    pub fn with_health_table(turn: Turn, health: HealthTable) -> Self {
        Self {
            turn,
            resources: Resources::default(),
            opponent_resources: Resources::default(),
            health,
            units: HashMap::new(),
            commands: Vec::new(),
        }
    }

    /// Records a stationary unit reported by the engine snapshot.
    pub fn place(&mut self, position: Position, unit: StationaryUnitView) {
        let _ = self.units.insert(position, unit);
    }

    /// Records the resource pools reported for both sides.
    pub fn set_resources(&mut self, player: Resources, opponent: Resources) {
        self.resources = player;
        self.opponent_resources = opponent;
    }

    /// Commands issued so far this turn, in issue order.
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Consumes the board, yielding the commands to submit.
    #[must_use]
    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }

    fn spawn_placeholder(&mut self, kind: UnitKind, position: Position) {
        if !in_arena_bounds(position) || !on_player_side(position) {
            return;
        }
        if self.units.contains_key(&position) {
            return;
        }
        let Some(max_health) = self.health.max_health(kind, false) else {
            return;
        };
        self.place(
            position,
            StationaryUnitView {
                kind,
                health: max_health,
                max_health,
                upgraded: false,
                owner: Owner::Player,
            },
        );
    }
}

impl TurnState for Board {
    fn turn(&self) -> Turn {
        self.turn
    }

    fn stationary_unit(&self, position: Position) -> Option<StationaryUnitView> {
        self.units.get(&position).copied()
    }

    fn issue(&mut self, command: Command) {
        if command.positions().is_empty() {
            return;
        }
        apply(self, &command);
        self.commands.push(command);
    }
}

/// Applies the same-turn effect of a command to the board's occupancy overlay.
///
/// Stationary spawns occupy free cells on the player's half, upgrades flag the
/// player's structures as upgraded, and removals leave occupancy untouched
/// because the engine only clears flagged structures after the turn ends.
pub fn apply(board: &mut Board, command: &Command) {
    match command {
        Command::Spawn {
            kind, positions, ..
        } => {
            if !kind.is_stationary() {
                return;
            }
            for position in positions {
                board.spawn_placeholder(*kind, *position);
            }
        }
        Command::Upgrade { positions } => {
            for position in positions {
                if let Some(unit) = board.units.get_mut(position) {
                    if unit.owner == Owner::Player {
                        unit.upgraded = true;
                    }
                }
            }
        }
        Command::Remove { .. } => {}
    }
}

/// Reports whether the position lies inside the diamond-shaped arena.
#[must_use]
pub fn in_arena_bounds(position: Position) -> bool {
    let (x, y) = (position.x(), position.y());
    if !(0..ARENA_SIZE).contains(&y) {
        return false;
    }
    let row_size = if y < HALF_ARENA {
        y + 1
    } else {
        ARENA_SIZE - y
    };
    let start = HALF_ARENA - row_size;
    let end = start + 2 * row_size - 1;
    (start..=end).contains(&x)
}

fn on_player_side(position: Position) -> bool {
    position.y() < HALF_ARENA
}

/// Query functions that provide read-only access to the board.
pub mod query {
    use lane_defence_core::{Owner, Turn};

    use super::{Board, Resources};

    /// Turn the board was captured for.
    #[must_use]
    pub fn turn(board: &Board) -> Turn {
        board.turn
    }

    /// Resource pools available to the player at the start of the turn.
    #[must_use]
    pub fn resources(board: &Board) -> Resources {
        board.resources
    }

    /// Resource pools available to the opponent at the start of the turn.
    #[must_use]
    pub fn opponent_resources(board: &Board) -> Resources {
        board.opponent_resources
    }

    /// Counts the stationary units owned by the provided side.
    #[must_use]
    pub fn structure_count(board: &Board, owner: Owner) -> usize {
        board
            .units
            .values()
            .filter(|unit| unit.owner == owner)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall(health: f32) -> StationaryUnitView {
        StationaryUnitView {
            kind: UnitKind::Wall,
            health,
            max_health: 60.0,
            upgraded: false,
            owner: Owner::Player,
        }
    }

    #[test]
    fn arena_bounds_follow_the_diamond() {
        assert!(in_arena_bounds(Position::new(13, 0)));
        assert!(in_arena_bounds(Position::new(14, 0)));
        assert!(!in_arena_bounds(Position::new(12, 0)));
        assert!(in_arena_bounds(Position::new(0, 13)));
        assert!(in_arena_bounds(Position::new(27, 13)));
        assert!(in_arena_bounds(Position::new(0, 14)));
        assert!(!in_arena_bounds(Position::new(28, 14)));
        assert!(in_arena_bounds(Position::new(13, 27)));
        assert!(!in_arena_bounds(Position::new(13, 28)));
    }

    #[test]
    fn spawn_occupies_free_cells_for_the_rest_of_the_turn() {
        let mut board = Board::new(Turn::new(0));
        board.issue(Command::spawn(
            UnitKind::Turret,
            vec![Position::new(3, 12), Position::new(24, 12)],
        ));

        let unit = board
            .stationary_unit(Position::new(3, 12))
            .expect("spawned turret visible");
        assert_eq!(unit.kind, UnitKind::Turret);
        assert_eq!(unit.health, unit.max_health);
        assert!(board.contains_stationary_unit(Position::new(24, 12)));
        assert_eq!(board.commands().len(), 1);
    }

    #[test]
    fn spawn_keeps_existing_occupant() {
        let mut board = Board::new(Turn::new(2));
        board.place(Position::new(4, 11), wall(10.0));
        board.issue(Command::spawn(UnitKind::Turret, vec![Position::new(4, 11)]));

        let unit = board.stationary_unit(Position::new(4, 11)).expect("wall kept");
        assert_eq!(unit.kind, UnitKind::Wall);
        assert_eq!(unit.health, 10.0);
    }

    #[test]
    fn spawn_outside_player_half_is_not_recorded() {
        let mut board = Board::new(Turn::new(0));
        board.issue(Command::spawn(
            UnitKind::Wall,
            vec![Position::new(13, 14), Position::new(0, 0)],
        ));

        assert!(!board.contains_stationary_unit(Position::new(13, 14)));
        assert!(!board.contains_stationary_unit(Position::new(0, 0)));
        assert_eq!(board.commands().len(), 1, "intent still forwarded");
    }

    #[test]
    fn mobile_spawns_and_removals_leave_occupancy_untouched() {
        let mut board = Board::new(Turn::new(7));
        board.place(Position::new(0, 13), wall(60.0));
        board.issue(Command::Spawn {
            kind: UnitKind::Scout,
            positions: vec![Position::new(6, 7)],
            count: 5,
        });
        board.issue(Command::Remove {
            positions: vec![Position::new(0, 13)],
        });

        assert!(!board.contains_stationary_unit(Position::new(6, 7)));
        assert!(board.contains_stationary_unit(Position::new(0, 13)));
    }

    #[test]
    fn upgrade_flags_player_structures() {
        let mut board = Board::new(Turn::new(1));
        board.place(Position::new(0, 13), wall(60.0));
        board.issue(Command::Upgrade {
            positions: vec![Position::new(0, 13), Position::new(27, 13)],
        });

        let unit = board.stationary_unit(Position::new(0, 13)).expect("wall");
        assert!(unit.upgraded);
        assert!(!board.contains_stationary_unit(Position::new(27, 13)));
    }

    #[test]
    fn empty_commands_are_dropped() {
        let mut board = Board::new(Turn::new(3));
        board.issue(Command::spawn(UnitKind::Wall, Vec::new()));
        board.issue(Command::Upgrade {
            positions: Vec::new(),
        });
        assert!(board.into_commands().is_empty());
    }

    #[test]
    fn structure_count_separates_owners() {
        let mut board = Board::new(Turn::new(4));
        board.place(Position::new(0, 13), wall(60.0));
        board.place(
            Position::new(10, 20),
            StationaryUnitView {
                owner: Owner::Opponent,
                ..wall(60.0)
            },
        );
        assert_eq!(query::structure_count(&board, Owner::Player), 1);
        assert_eq!(query::structure_count(&board, Owner::Opponent), 1);
    }
}
