//! Start-of-match unit configuration resolved into engine identifiers.

use lane_defence_core::UnitKind;
use serde::Deserialize;
use thiserror::Error;

/// Index of the removal pseudo-unit within the engine's unit table.
const REMOVE_INDEX: usize = 6;
/// Index of the upgrade pseudo-unit within the engine's unit table.
const UPGRADE_INDEX: usize = 7;
const STATIONARY_KINDS: usize = 3;

/// Errors raised while resolving the start-of-match configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration line was not valid JSON of the expected shape.
    #[error("could not parse match configuration: {0}")]
    InvalidJson(#[from] serde_json::Error),
    /// The unit table does not contain an entry at the required index.
    #[error("unit table has no entry at index {index}")]
    MissingUnit {
        /// Index that was expected to be present.
        index: usize,
    },
    /// A unit entry exists but carries no shorthand identifier.
    #[error("unit entry {index} has no shorthand")]
    MissingShorthand {
        /// Index of the incomplete entry.
        index: usize,
    },
    /// A structure entry carries no starting health.
    #[error("structure {kind:?} has no starting health")]
    MissingStartHealth {
        /// Structure kind lacking health information.
        kind: UnitKind,
    },
}

/// Starting health of each structure kind, before and after upgrading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HealthTable {
    base: [f32; STATIONARY_KINDS],
    upgraded: [f32; STATIONARY_KINDS],
}

impl HealthTable {
    /// Creates a table from per-kind values ordered wall, support, turret.
    #[must_use]
    pub const fn new(base: [f32; STATIONARY_KINDS], upgraded: [f32; STATIONARY_KINDS]) -> Self {
        Self { base, upgraded }
    }

    /// Maximum health of a structure kind at the given upgrade level.
    ///
    /// Mobile kinds have no entry and yield `None`.
    #[must_use]
    pub fn max_health(&self, kind: UnitKind, upgraded: bool) -> Option<f32> {
        let table = if upgraded { &self.upgraded } else { &self.base };
        table.get(kind.config_index()).copied()
    }
}

impl Default for HealthTable {
    fn default() -> Self {
        Self::new([60.0, 30.0, 75.0], [120.0, 30.0, 75.0])
    }
}

/// Engine identifiers for every unit kind plus the removal and upgrade actions.
///
/// Resolved once from the start-of-match configuration and immutable afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitCatalog {
    shorthands: [String; 6],
    remove: String,
    upgrade: String,
    health: HealthTable,
}

impl UnitCatalog {
    /// Parses the engine's configuration line and resolves the unit table.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: RawConfig = serde_json::from_str(text)?;
        Self::resolve(&config.unit_information)
    }

    fn resolve(units: &[RawUnitInformation]) -> Result<Self, ConfigError> {
        let shorthand = |index: usize| -> Result<String, ConfigError> {
            let entry = units.get(index).ok_or(ConfigError::MissingUnit { index })?;
            entry
                .shorthand
                .clone()
                .ok_or(ConfigError::MissingShorthand { index })
        };

        let mut shorthands: [String; 6] = Default::default();
        for kind in UnitKind::ALL {
            shorthands[kind.config_index()] = shorthand(kind.config_index())?;
        }

        let mut base = [0.0; STATIONARY_KINDS];
        let mut upgraded = [0.0; STATIONARY_KINDS];
        for kind in UnitKind::ALL.into_iter().filter(|kind| kind.is_stationary()) {
            let index = kind.config_index();
            let entry = &units[index];
            let start = entry
                .start_health
                .ok_or(ConfigError::MissingStartHealth { kind })?;
            base[index] = start;
            upgraded[index] = entry
                .upgrade
                .as_ref()
                .and_then(|upgrade| upgrade.start_health)
                .unwrap_or(start);
        }

        let catalog = Self {
            shorthands,
            remove: shorthand(REMOVE_INDEX)?,
            upgrade: shorthand(UPGRADE_INDEX)?,
            health: HealthTable::new(base, upgraded),
        };
        tracing::info!(
            wall = catalog.shorthand(UnitKind::Wall),
            support = catalog.shorthand(UnitKind::Support),
            turret = catalog.shorthand(UnitKind::Turret),
            "resolved unit catalog"
        );
        Ok(catalog)
    }

    /// Engine identifier of the provided unit kind.
    #[must_use]
    pub fn shorthand(&self, kind: UnitKind) -> &str {
        &self.shorthands[kind.config_index()]
    }

    /// Engine identifier of the removal action.
    #[must_use]
    pub fn remove_shorthand(&self) -> &str {
        &self.remove
    }

    /// Engine identifier of the upgrade action.
    #[must_use]
    pub fn upgrade_shorthand(&self) -> &str {
        &self.upgrade
    }

    /// Starting health of every structure kind.
    #[must_use]
    pub const fn health(&self) -> HealthTable {
        self.health
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    unit_information: Vec<RawUnitInformation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUnitInformation {
    shorthand: Option<String>,
    start_health: Option<f32>,
    upgrade: Option<RawUpgrade>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUpgrade {
    start_health: Option<f32>,
}
