#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Breach logger that remembers where the opponent scored.

use std::collections::HashMap;

use lane_defence_core::{Breach, Owner, Position};

/// Append-only record of the cells through which opponent units breached.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BreachHistory {
    locations: Vec<Position>,
}

impl BreachHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every opponent breach in the frame and returns how many were added.
    ///
    /// Breaches by the player's own units are ignored.
    pub fn record(&mut self, breaches: &[Breach]) -> usize {
        let before = self.locations.len();
        for breach in breaches.iter().filter(|breach| breach.owner == Owner::Opponent) {
            tracing::info!(
                x = breach.position.x(),
                y = breach.position.y(),
                damage = breach.damage,
                "got scored on"
            );
            self.locations.push(breach.position);
        }

        let added = self.locations.len() - before;
        if added > 0 {
            tracing::debug!(locations = ?self.locations, "breach history");
        }
        added
    }

    /// Breach cells in the order they were observed.
    #[must_use]
    pub fn locations(&self) -> &[Position] {
        &self.locations
    }

    /// Breach counts per cell, most frequent first, ties ordered by position.
    #[must_use]
    pub fn hotspots(&self) -> Vec<(Position, usize)> {
        let mut counts: HashMap<Position, usize> = HashMap::new();
        for position in &self.locations {
            *counts.entry(*position).or_default() += 1;
        }
        let mut hotspots: Vec<(Position, usize)> = counts.into_iter().collect();
        hotspots.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        hotspots
    }
}
