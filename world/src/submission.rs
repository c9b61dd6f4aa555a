//! Encoding of a turn's commands into the engine's two submission stacks.

use lane_defence_core::{Command, Position};
use serde::Serialize;

use crate::catalog::UnitCatalog;

/// Single `[shorthand, x, y]` entry of a submission stack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StackEntry(pub String, pub i32, pub i32);

impl StackEntry {
    fn new(shorthand: &str, position: Position) -> Self {
        Self(shorthand.to_owned(), position.x(), position.y())
    }
}

/// Build and deploy stacks sent to the engine once per turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Submission {
    build: Vec<StackEntry>,
    deploy: Vec<StackEntry>,
}

impl Submission {
    /// Encodes commands in issue order.
    ///
    /// Structure spawns, upgrades and removals go to the build stack. Mobile
    /// spawns go to the deploy stack, one entry per requested unit.
    #[must_use]
    pub fn encode(commands: &[Command], catalog: &UnitCatalog) -> Self {
        let mut submission = Self::default();
        for command in commands {
            match command {
                Command::Spawn {
                    kind,
                    positions,
                    count,
                } => {
                    let shorthand = catalog.shorthand(*kind);
                    if kind.is_stationary() {
                        submission.push_build(shorthand, positions);
                    } else {
                        for position in positions {
                            for _ in 0..*count {
                                submission.deploy.push(StackEntry::new(shorthand, *position));
                            }
                        }
                    }
                }
                Command::Upgrade { positions } => {
                    submission.push_build(catalog.upgrade_shorthand(), positions);
                }
                Command::Remove { positions } => {
                    submission.push_build(catalog.remove_shorthand(), positions);
                }
            }
        }
        submission
    }

    fn push_build(&mut self, shorthand: &str, positions: &[Position]) {
        self.build.extend(
            positions
                .iter()
                .map(|position| StackEntry::new(shorthand, *position)),
        );
    }

    /// Entries placed during the build stage.
    #[must_use]
    pub fn build_stack(&self) -> &[StackEntry] {
        &self.build
    }

    /// Entries placed during the deploy stage.
    #[must_use]
    pub fn deploy_stack(&self) -> &[StackEntry] {
        &self.deploy
    }

    /// Serializes both stacks, build first, as the two lines the engine expects.
    pub fn to_lines(&self) -> Result<[String; 2], serde_json::Error> {
        Ok([
            serde_json::to_string(&self.build)?,
            serde_json::to_string(&self.deploy)?,
        ])
    }
}
