//! Parsing of the engine's per-turn game state messages.

use lane_defence_core::{Owner, Position, StationaryUnitView, Turn, UnitKind};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::{catalog::UnitCatalog, Board, Resources};

/// Index of the upgrade marker list within a side's unit table.
const UPGRADE_LIST: usize = 7;

/// Errors raised while reading a per-turn game state message.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The message was not valid JSON of the expected shape.
    #[error("could not parse game state: {0}")]
    InvalidJson(#[from] serde_json::Error),
    /// The `turnInfo` header is missing its phase or turn number.
    #[error("game state has an incomplete turn header")]
    MissingTurnInfo,
    /// The phase code in the turn header is not recognised.
    #[error("unknown turn phase {0}")]
    UnknownPhase(i64),
    /// The turn number is negative.
    #[error("turn number {0} is out of range")]
    InvalidTurn(i64),
    /// A side's resource statistics are missing or truncated.
    #[error("game state is missing resource stats for {side:?}")]
    MissingStats {
        /// Side whose stats are missing.
        side: Owner,
    },
    /// A unit entry lacks a coordinate or health value.
    #[error("malformed {side:?} unit entry in list {list}")]
    MalformedUnit {
        /// Side owning the malformed entry.
        side: Owner,
        /// Unit table index holding the entry.
        list: usize,
    },
}

/// Stage of the turn the engine is reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    /// Both players place intents; the engine waits for a submission.
    Deploy,
    /// One simulation frame of the action phase; no submission expected.
    Action,
    /// The match has finished.
    End,
}

/// Raw game state line sent by the engine each deploy phase and action frame.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateMessage {
    turn_info: Vec<i64>,
    #[serde(default)]
    p1_stats: Vec<f32>,
    #[serde(default)]
    p2_stats: Vec<f32>,
    #[serde(default)]
    p1_units: Vec<Vec<Vec<Value>>>,
    #[serde(default)]
    p2_units: Vec<Vec<Vec<Value>>>,
    #[serde(default)]
    pub(crate) events: Option<Value>,
}

impl GameStateMessage {
    /// Parses a single game state line.
    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Stage of the turn this message describes.
    pub fn phase(&self) -> Result<TurnPhase, SnapshotError> {
        match self.turn_info.first() {
            Some(0) => Ok(TurnPhase::Deploy),
            Some(1) => Ok(TurnPhase::Action),
            Some(2) => Ok(TurnPhase::End),
            Some(other) => Err(SnapshotError::UnknownPhase(*other)),
            None => Err(SnapshotError::MissingTurnInfo),
        }
    }

    /// Turn number this message belongs to.
    pub fn turn(&self) -> Result<Turn, SnapshotError> {
        let raw = *self.turn_info.get(1).ok_or(SnapshotError::MissingTurnInfo)?;
        u32::try_from(raw)
            .map(Turn::new)
            .map_err(|_| SnapshotError::InvalidTurn(raw))
    }

    /// Builds the board for this turn from both sides' structures and resources.
    pub fn board(&self, catalog: &UnitCatalog) -> Result<Board, SnapshotError> {
        let mut board = Board::with_health_table(self.turn()?, catalog.health());
        board.set_resources(
            resources(&self.p1_stats, Owner::Player)?,
            resources(&self.p2_stats, Owner::Opponent)?,
        );
        place_units(&mut board, catalog, &self.p1_units, Owner::Player)?;
        place_units(&mut board, catalog, &self.p2_units, Owner::Opponent)?;
        Ok(board)
    }
}

fn resources(stats: &[f32], side: Owner) -> Result<Resources, SnapshotError> {
    match stats {
        [_, structure_points, mobility_points, ..] => Ok(Resources {
            structure_points: *structure_points,
            mobility_points: *mobility_points,
        }),
        _ => Err(SnapshotError::MissingStats { side }),
    }
}

fn place_units(
    board: &mut Board,
    catalog: &UnitCatalog,
    lists: &[Vec<Vec<Value>>],
    side: Owner,
) -> Result<(), SnapshotError> {
    let health = catalog.health();
    for (list, entries) in lists.iter().enumerate() {
        let Some(kind) = UnitKind::from_config_index(list).filter(|kind| kind.is_stationary())
        else {
            continue;
        };
        for entry in entries {
            let (position, current) =
                unit_entry(entry).ok_or(SnapshotError::MalformedUnit { side, list })?;
            let max_health = health.max_health(kind, false).unwrap_or(current);
            board.place(
                position,
                StationaryUnitView {
                    kind,
                    health: current,
                    max_health,
                    upgraded: false,
                    owner: side,
                },
            );
        }
    }

    for entry in lists.get(UPGRADE_LIST).into_iter().flatten() {
        let (position, _) = unit_entry(entry).ok_or(SnapshotError::MalformedUnit {
            side,
            list: UPGRADE_LIST,
        })?;
        if let Some(mut unit) = board.units.get(&position).copied() {
            unit.upgraded = true;
            unit.max_health = health.max_health(unit.kind, true).unwrap_or(unit.max_health);
            board.place(position, unit);
        }
    }
    Ok(())
}

fn unit_entry(entry: &[Value]) -> Option<(Position, f32)> {
    let x = i32::try_from(entry.first()?.as_i64()?).ok()?;
    let y = i32::try_from(entry.get(1)?.as_i64()?).ok()?;
    let health = entry.get(2)?.as_f64()? as f32;
    Some((Position::new(x, y), health))
}

#[cfg(test)]
mod tests {
    use lane_defence_core::TurnState;

    use super::*;

    const CONFIG: &str = r#"{"unitInformation": [
        {"shorthand": "FF", "startHealth": 60, "upgrade": {"startHealth": 120}},
        {"shorthand": "EF", "startHealth": 30},
        {"shorthand": "DF", "startHealth": 75},
        {"shorthand": "PI"}, {"shorthand": "EI"}, {"shorthand": "SI"},
        {"shorthand": "RM"}, {"shorthand": "UP"}
    ]}"#;

    fn catalog() -> UnitCatalog {
        UnitCatalog::from_json(CONFIG).expect("valid config")
    }

    #[test]
    fn reads_phase_and_turn_from_header() {
        let message = GameStateMessage::from_json(r#"{"turnInfo": [1, 6, 12, 0]}"#)
            .expect("valid message");
        assert_eq!(message.phase().expect("phase"), TurnPhase::Action);
        assert_eq!(message.turn().expect("turn"), Turn::new(6));
    }

    #[test]
    fn unknown_phase_is_rejected() {
        let message =
            GameStateMessage::from_json(r#"{"turnInfo": [5, 0, -1, 0]}"#).expect("valid json");
        assert!(matches!(message.phase(), Err(SnapshotError::UnknownPhase(5))));
    }

    #[test]
    fn board_marks_upgraded_structures_with_upgraded_health() {
        let message = GameStateMessage::from_json(
            r#"{
                "turnInfo": [0, 3, -1, 0],
                "p1Stats": [30, 4.5, 7.0, 1200],
                "p2Stats": [30, 2.0, 5.0, 900],
                "p1Units": [
                    [[0, 13, 90, "1"], [1, 13, 20, "2"]],
                    [],
                    [[3, 12, 75, "3"]],
                    [], [], [], [],
                    [[0, 13, 90, "1"]]
                ],
                "p2Units": [[[13, 20, 60, "4"]], [], [], [], [], [], [], []]
            }"#,
        )
        .expect("valid message");
        let board = message.board(&catalog()).expect("board");

        let corner = board.stationary_unit(Position::new(0, 13)).expect("wall");
        assert!(corner.upgraded);
        assert_eq!(corner.max_health, 120.0);
        assert_eq!(corner.health, 90.0);

        let plain = board.stationary_unit(Position::new(1, 13)).expect("wall");
        assert!(!plain.upgraded);
        assert_eq!(plain.max_health, 60.0);

        let turret = board.stationary_unit(Position::new(3, 12)).expect("turret");
        assert_eq!(turret.kind, UnitKind::Turret);

        let enemy = board.stationary_unit(Position::new(13, 20)).expect("enemy");
        assert_eq!(enemy.owner, Owner::Opponent);

        let resources = crate::query::resources(&board);
        assert_eq!(resources.structure_points, 4.5);
        assert_eq!(resources.mobility_points, 7.0);
    }

    #[test]
    fn truncated_unit_entry_is_fatal() {
        let message = GameStateMessage::from_json(
            r#"{"turnInfo": [0, 1, -1, 0], "p1Stats": [30, 1, 1, 0], "p2Stats": [30, 1, 1, 0],
                "p1Units": [[[0, 13]]]}"#,
        )
        .expect("valid json");
        assert!(matches!(
            message.board(&catalog()),
            Err(SnapshotError::MalformedUnit {
                side: Owner::Player,
                list: 0
            })
        ));
    }

    #[test]
    fn missing_stats_are_fatal() {
        let message =
            GameStateMessage::from_json(r#"{"turnInfo": [0, 1, -1, 0]}"#).expect("valid json");
        assert!(matches!(
            message.board(&catalog()),
            Err(SnapshotError::MissingStats {
                side: Owner::Player
            })
        ));
    }
}
