#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Turn orchestrator that drives the phase systems from a strategy profile.
//!
//! The orchestrator owns the only state that survives between turns: the
//! attack direction carried into the next cycle and the history of opponent
//! breaches. Each deploy phase resolves the direction first, then runs the
//! opening, repair, attrition and offensive systems in that order against the
//! same turn state, so every phase sees the spawns and upgrades issued by the
//! ones before it.

mod profile;
mod tables;

pub use profile::{ProfileError, ProfileVersion, StrategyProfile};

use lane_defence_core::{AttackDirection, Breach, Position, TurnState};
use lane_defence_system_attrition::Attrition;
use lane_defence_system_breach_log::BreachHistory;
use lane_defence_system_offensive::{commit_direction, Offensive};
use lane_defence_system_opening::Opening;
use lane_defence_system_repair::Repair;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// State carried across turns for the whole match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StrategyState {
    next_attack_direction: AttackDirection,
    scored_on: BreachHistory,
}

impl StrategyState {
    /// Direction the next launch will use unless redrawn first.
    #[must_use]
    pub fn next_attack_direction(&self) -> AttackDirection {
        self.next_attack_direction
    }

    /// Cells through which the opponent has scored, oldest first.
    #[must_use]
    pub fn scored_on_locations(&self) -> &[Position] {
        self.scored_on.locations()
    }

    /// Full breach history.
    #[must_use]
    pub fn breach_history(&self) -> &BreachHistory {
        &self.scored_on
    }
}

/// Decision engine for a single match.
#[derive(Debug)]
pub struct Strategy<R = ChaCha8Rng> {
    version: ProfileVersion,
    opening: Opening,
    repair: Repair,
    attrition: Attrition,
    offensive: Offensive,
    state: StrategyState,
    rng: R,
}

impl Strategy<ChaCha8Rng> {
    /// Creates an engine whose direction draws are reproducible from `seed`.
    #[must_use]
    pub fn new(profile: StrategyProfile, seed: u64) -> Self {
        Self::with_rng(profile, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Strategy<R> {
    /// Creates an engine drawing attack directions from `rng`.
    #[must_use]
    pub fn with_rng(profile: StrategyProfile, rng: R) -> Self {
        Self {
            version: profile.version,
            opening: Opening::new(profile.opening.clone()),
            repair: Repair::new(profile.repair_config()),
            attrition: Attrition::new(profile.attrition_config()),
            offensive: Offensive::new(profile.offensive_config()),
            state: StrategyState::default(),
            rng,
        }
    }

    /// Profile variant the engine was built from.
    #[must_use]
    pub fn version(&self) -> ProfileVersion {
        self.version
    }

    /// Issues every command for the turn and returns the committed direction.
    pub fn on_turn<S: TurnState>(&mut self, state: &mut S) -> AttackDirection {
        let turn = state.turn();
        let direction = commit_direction(
            turn,
            &mut self.state.next_attack_direction,
            &mut self.rng,
        );

        self.opening.handle(state);
        self.repair.handle(state, direction);
        self.attrition.handle(state);
        self.offensive.handle(state, direction);

        tracing::debug!(
            turn = turn.get(),
            ?direction,
            launch = turn.is_launch(),
            lane_opening = turn.is_lane_opening(),
            "turn decided"
        );
        direction
    }

    /// Records the breaches reported by an action frame.
    ///
    /// Returns the number of opponent breaches added to the history.
    pub fn on_action_frame(&mut self, breaches: &[Breach]) -> usize {
        self.state.scored_on.record(breaches)
    }

    /// State carried across turns.
    #[must_use]
    pub fn state(&self) -> &StrategyState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_attacks_left() {
        let strategy = Strategy::new(StrategyProfile::default(), 0);
        assert_eq!(
            strategy.state().next_attack_direction(),
            AttackDirection::Left
        );
        assert!(strategy.state().scored_on_locations().is_empty());
        assert_eq!(strategy.version(), ProfileVersion::Fortified);
    }
}
