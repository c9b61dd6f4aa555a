#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure repair system that keeps the defensive layout filled and upgraded.
//!
//! Layers are split by how they react to an offensive. The front layer and the
//! vital turrets are filled every turn except for the committed attack lane on
//! a launch turn, so that the gap opened the turn before stays open while
//! units leave. The second layer and the supports never open and are filled
//! unconditionally.

use lane_defence_core::{
    AttackDirection, Command, Position, PositionSet, Sided, TurnState, UnitKind,
};
use serde::{Deserialize, Serialize};

/// Inner turret and support tiers added once the core layout is in place.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalTiers {
    /// Extra turret cells behind the vital turrets.
    pub turrets: PositionSet,
    /// Extra support cells deep inside the player's half.
    pub supports: PositionSet,
}

/// Layout maintained by the repair system.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Outer wall perimeter, opened at the attack lane on launch turns.
    pub front_layer: PositionSet,
    /// Backup wall row that is never opened.
    pub second_layer: PositionSet,
    /// Turret cells, opened at the attack lane on launch turns.
    pub vital_turrets: PositionSet,
    /// Support cells that are never opened.
    pub vital_supports: PositionSet,
    /// Corner cells vacated for each attack direction.
    pub attack_lanes: Sided<PositionSet>,
    /// Optional inner tiers, filled and upgraded after everything else.
    pub additional: Option<AdditionalTiers>,
}

/// Repair system that re-issues spawns for missing structures and upgrades.
#[derive(Clone, Debug)]
pub struct Repair {
    config: Config,
}

impl Repair {
    /// Creates a new repair system maintaining the provided layout.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Issues spawns for every empty tracked cell and upgrades for the layout.
    ///
    /// `direction` is the attack direction committed for the current turn. It
    /// only matters on launch turns, where that side's lane cells are skipped
    /// by the front layer and vital turret passes.
    pub fn handle<S: TurnState>(&self, state: &mut S, direction: AttackDirection) {
        let config = &self.config;
        let open_lane = state
            .turn()
            .is_launch()
            .then(|| config.attack_lanes.get(direction));
        let kept_closed =
            |position: &Position| open_lane.map_or(true, |lane| !lane.contains(*position));

        fill(state, UnitKind::Wall, config.front_layer.iter().filter(kept_closed));
        fill(
            state,
            UnitKind::Turret,
            config.vital_turrets.iter().filter(kept_closed),
        );

        state.issue(Command::Upgrade {
            positions: config.attack_lanes.left.as_slice().to_vec(),
        });
        state.issue(Command::Upgrade {
            positions: config.attack_lanes.right.as_slice().to_vec(),
        });
        upgrade_occupied(state, &config.vital_turrets);

        fill(state, UnitKind::Wall, config.second_layer.iter());
        fill(state, UnitKind::Support, config.vital_supports.iter());

        if let Some(additional) = &config.additional {
            fill(state, UnitKind::Turret, additional.turrets.iter());
            fill(state, UnitKind::Support, additional.supports.iter());
            upgrade_occupied(state, &additional.turrets);
            upgrade_occupied(state, &additional.supports);
        }
    }
}

fn fill<S, I>(state: &mut S, kind: UnitKind, positions: I)
where
    S: TurnState,
    I: Iterator<Item = Position>,
{
    let missing: Vec<Position> = positions
        .filter(|position| !state.contains_stationary_unit(*position))
        .collect();
    if !missing.is_empty() {
        tracing::debug!(?kind, count = missing.len(), "filling gaps in the defence");
    }
    state.issue(Command::spawn(kind, missing));
}

fn upgrade_occupied<S: TurnState>(state: &mut S, positions: &PositionSet) {
    let occupied: Vec<Position> = positions
        .iter()
        .filter(|position| state.contains_stationary_unit(*position))
        .collect();
    state.issue(Command::Upgrade {
        positions: occupied,
    });
}
