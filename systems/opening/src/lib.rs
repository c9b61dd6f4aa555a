#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure opening system that replays a fixed build plan over the first turns.

use lane_defence_core::{Command, Position, TurnState, UnitKind};
use serde::{Deserialize, Serialize};

/// Number of turns covered by the opening. Later turns never consult the plan.
pub const OPENING_TURNS: u32 = 4;

/// Structures spawned and upgraded on a single opening turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnPlan {
    /// Cells that receive a wall.
    pub walls: Vec<Position>,
    /// Cells that receive a turret.
    pub turrets: Vec<Position>,
    /// Walls upgraded after spawning.
    pub wall_upgrades: Vec<Position>,
    /// Turrets upgraded after spawning.
    pub turret_upgrades: Vec<Position>,
}

/// Opening build plan indexed by turn number.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpeningPlan {
    turns: Vec<TurnPlan>,
}

impl OpeningPlan {
    /// Creates a plan whose `n`-th entry applies to turn `n`.
    #[must_use]
    pub fn new(turns: Vec<TurnPlan>) -> Self {
        Self { turns }
    }

    /// Plan entry for the provided turn number, if any.
    #[must_use]
    pub fn for_turn(&self, turn: u32) -> Option<&TurnPlan> {
        if turn >= OPENING_TURNS {
            return None;
        }
        self.turns.get(usize::try_from(turn).ok()?)
    }
}

/// Opening system that spawns and upgrades the planned structures.
#[derive(Clone, Debug)]
pub struct Opening {
    plan: OpeningPlan,
}

impl Opening {
    /// Creates a new opening system for the provided plan.
    #[must_use]
    pub fn new(plan: OpeningPlan) -> Self {
        Self { plan }
    }

    /// Issues the current turn's planned spawns, then its planned upgrades.
    ///
    /// Does nothing from turn [`OPENING_TURNS`] onwards. Requests are not
    /// checked against occupancy; the engine drops the ones it cannot honour.
    pub fn handle<S: TurnState>(&self, state: &mut S) {
        let turn = state.turn().get();
        let Some(plan) = self.plan.for_turn(turn) else {
            return;
        };
        tracing::debug!(
            turn,
            walls = plan.walls.len(),
            turrets = plan.turrets.len(),
            "replaying opening plan"
        );

        state.issue(Command::spawn(UnitKind::Wall, plan.walls.clone()));
        state.issue(Command::spawn(UnitKind::Turret, plan.turrets.clone()));
        state.issue(Command::Upgrade {
            positions: plan.wall_upgrades.clone(),
        });
        state.issue(Command::Upgrade {
            positions: plan.turret_upgrades.clone(),
        });
    }
}
