#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure attrition system that recycles worn structures.
//!
//! A structure at or below the health threshold is flagged for removal so the
//! next repair pass rebuilds it at full health. Scheduled corner cells still
//! holding a wall are flagged too, which lets the repair pass replace them
//! with turrets one pair at a time.

use std::collections::HashSet;

use lane_defence_core::{Command, Position, PositionSet, TurnState, UnitKind};
use serde::{Deserialize, Serialize};

/// Fraction of maximum health at or below which a structure is recycled.
pub const DEFAULT_HEALTH_RATIO: f32 = 0.5;

/// Cells whose walls are replaced once the match reaches `from_turn`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationStage {
    /// First turn on which the stage applies. Stays active afterwards.
    pub from_turn: u32,
    /// Cells whose walls are removed.
    pub positions: Vec<Position>,
}

/// Cells watched by the attrition system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Groups of cells inspected for worn structures, in order.
    pub watched: Vec<PositionSet>,
    /// Structures with health at or below this fraction of their maximum are removed.
    pub health_ratio: f32,
    /// Wall-to-turret migration schedule. Empty when migration is disabled.
    pub corner_migration: Vec<MigrationStage>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            watched: Vec::new(),
            health_ratio: DEFAULT_HEALTH_RATIO,
            corner_migration: Vec::new(),
        }
    }
}

/// Attrition system that batches removal requests.
#[derive(Clone, Debug)]
pub struct Attrition {
    config: Config,
}

impl Attrition {
    /// Creates a new attrition system for the provided configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Issues a single removal covering every worn or migrating structure.
    ///
    /// Nothing is issued when no structure qualifies. A cell qualifying for
    /// several reasons appears once, at its first occurrence.
    pub fn handle<S: TurnState>(&self, state: &mut S) {
        let turn = state.turn().get();
        let mut batch = Vec::new();
        let mut seen = HashSet::new();

        for position in self.config.watched.iter().flat_map(PositionSet::iter) {
            let Some(unit) = state.stationary_unit(position) else {
                continue;
            };
            if unit.health_at_or_below(self.config.health_ratio) && seen.insert(position) {
                batch.push(position);
            }
        }

        let due = self
            .config
            .corner_migration
            .iter()
            .filter(|stage| turn >= stage.from_turn)
            .flat_map(|stage| stage.positions.iter().copied());
        for position in due {
            let still_wall = state
                .stationary_unit(position)
                .is_some_and(|unit| unit.kind == UnitKind::Wall);
            if still_wall && seen.insert(position) {
                batch.push(position);
            }
        }

        if batch.is_empty() {
            return;
        }
        tracing::debug!(turn, count = batch.len(), "recycling structures");
        state.issue(Command::Remove { positions: batch });
    }
}
