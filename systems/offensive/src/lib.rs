#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure offensive system that times attack launches on a four-turn cycle.
//!
//! The attack direction for a cycle is decided on its last turn, when that
//! side's lane is opened, and reused on the following launch turn. Launch
//! turns send scouts through the open lane and, from
//! [`REINFORCEMENT_FROM_TURN`] onwards, interceptors to meet the opponent's
//! counter-attack.

use lane_defence_core::{
    AttackDirection, Command, Deployment, PositionSet, Sided, Turn, TurnState, UnitKind,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// First turn on which launches are accompanied by interceptors and demolishers.
pub const REINFORCEMENT_FROM_TURN: u32 = 8;

/// Launch tables for each attack direction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Corner cells removed the turn before launching in that direction.
    pub attack_lanes: Sided<PositionSet>,
    /// Scout launch cells and base counts.
    pub scouts: Sided<Vec<Deployment>>,
    /// Interceptor cells and counts covering the launch.
    pub interceptors: Sided<Vec<Deployment>>,
    /// Demolisher cells and counts, used only when enabled.
    pub demolishers: Sided<Vec<Deployment>>,
    /// Adds one scout per elapsed cycle to every scout deployment.
    pub escalate_scouts: bool,
    /// Enables the demolisher launch.
    pub demolishers_enabled: bool,
}

/// Resolves the attack direction for the turn and updates the carried direction.
///
/// The first turn of a cycle reuses `next`. Every other turn draws a fair coin
/// and stores the result in `next`, so the direction used at launch is the one
/// drawn on the preceding cycle's last turn.
pub fn commit_direction<R>(turn: Turn, next: &mut AttackDirection, rng: &mut R) -> AttackDirection
where
    R: Rng + ?Sized,
{
    if turn.cycle_phase() == 0 {
        return *next;
    }
    let direction = AttackDirection::from_coin(rng.gen_bool(0.5));
    *next = direction;
    direction
}

/// Offensive system that opens lanes and launches mobile units.
#[derive(Clone, Debug)]
pub struct Offensive {
    config: Config,
}

impl Offensive {
    /// Creates a new offensive system using the provided launch tables.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Issues the lane opening or launch commands due this turn.
    pub fn handle<S: TurnState>(&self, state: &mut S, direction: AttackDirection) {
        let turn = state.turn();
        let config = &self.config;

        if turn.is_launch() && turn.get() >= REINFORCEMENT_FROM_TURN {
            deploy(state, UnitKind::Interceptor, config.interceptors.get(direction), 0);
            if config.demolishers_enabled {
                deploy(state, UnitKind::Demolisher, config.demolishers.get(direction), 0);
            }
        }

        if turn.is_lane_opening() {
            tracing::debug!(turn = turn.get(), ?direction, "opening attack lane");
            state.issue(Command::Remove {
                positions: config.attack_lanes.get(direction).as_slice().to_vec(),
            });
        }

        if turn.is_launch() {
            let bonus = if config.escalate_scouts {
                turn.cycles_elapsed()
            } else {
                0
            };
            tracing::debug!(turn = turn.get(), ?direction, bonus, "launching scouts");
            deploy(state, UnitKind::Scout, config.scouts.get(direction), bonus);
        }
    }
}

fn deploy<S: TurnState>(state: &mut S, kind: UnitKind, deployments: &[Deployment], bonus: u32) {
    for deployment in deployments {
        state.issue(Command::Spawn {
            kind,
            positions: vec![deployment.position],
            count: deployment.count.saturating_add(bonus),
        });
    }
}
