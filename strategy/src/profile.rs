//! Versioned strategy bundles and their TOML representation.

use std::{fmt, str::FromStr};

use lane_defence_core::{Deployment, PositionSet, Sided};
use lane_defence_system_attrition::{self as attrition, MigrationStage, DEFAULT_HEALTH_RATIO};
use lane_defence_system_offensive as offensive;
use lane_defence_system_opening::{OpeningPlan, TurnPlan};
use lane_defence_system_repair::{self as repair, AdditionalTiers};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tables;

/// Errors raised while reading or writing a profile file.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The profile text is not valid TOML or does not match the profile layout.
    #[error("invalid profile: {0}")]
    Parse(#[from] toml::de::Error),
    /// The profile could not be rendered as TOML.
    #[error("failed to render profile: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Built-in strategy variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileVersion {
    /// Core layout only.
    Baseline,
    /// Core layout plus inner tiers, corner migration and escalating scouts.
    #[default]
    Fortified,
}

impl fmt::Display for ProfileVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Baseline => f.write_str("baseline"),
            Self::Fortified => f.write_str("fortified"),
        }
    }
}

impl FromStr for ProfileVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "baseline" => Ok(Self::Baseline),
            "fortified" => Ok(Self::Fortified),
            other => Err(format!(
                "unknown profile `{other}`, expected `baseline` or `fortified`"
            )),
        }
    }
}

/// Every table, threshold and switch the strategy runs on.
///
/// Plain values come first so the bundle renders as valid TOML.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrategyProfile {
    /// Variant this bundle was derived from.
    pub version: ProfileVersion,
    /// Structures at or below this fraction of their maximum health are recycled.
    pub health_ratio: f32,
    /// Adds one scout per elapsed attack cycle to every scout launch.
    pub escalate_scouts: bool,
    /// Sends demolishers alongside interceptors on reinforced launches.
    pub demolishers_enabled: bool,
    /// Outer wall perimeter.
    pub front_layer: PositionSet,
    /// Backup wall row.
    pub second_layer: PositionSet,
    /// Turret cells maintained every turn.
    pub vital_turrets: PositionSet,
    /// Support cells maintained every turn.
    pub vital_supports: PositionSet,
    /// Corner cells opened for each attack direction.
    pub attack_lanes: Sided<PositionSet>,
    /// Scout launch cells and base counts.
    pub scouts: Sided<Vec<Deployment>>,
    /// Interceptor launch cells and counts.
    pub interceptors: Sided<Vec<Deployment>>,
    /// Demolisher launch cells and counts.
    pub demolishers: Sided<Vec<Deployment>>,
    /// Inner tiers, absent when disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_tiers: Option<AdditionalTiers>,
    /// Build plan for the opening turns.
    pub opening: OpeningPlan,
    /// Wall-to-turret migration schedule, empty when disabled.
    #[serde(default)]
    pub corner_migration: Vec<MigrationStage>,
}

impl Default for StrategyProfile {
    fn default() -> Self {
        Self::for_version(ProfileVersion::default())
    }
}

impl StrategyProfile {
    /// Built-in bundle for the provided variant.
    #[must_use]
    pub fn for_version(version: ProfileVersion) -> Self {
        match version {
            ProfileVersion::Baseline => Self::baseline(),
            ProfileVersion::Fortified => Self::fortified(),
        }
    }

    /// Core layout with fixed scout counts and no corner migration.
    #[must_use]
    pub fn baseline() -> Self {
        Self {
            version: ProfileVersion::Baseline,
            health_ratio: DEFAULT_HEALTH_RATIO,
            escalate_scouts: false,
            demolishers_enabled: false,
            front_layer: tables::set(tables::FRONT_LAYER),
            second_layer: tables::set(tables::SECOND_LAYER),
            vital_turrets: tables::set(tables::CORE_TURRETS),
            vital_supports: tables::set(tables::VITAL_SUPPORTS),
            attack_lanes: Sided::new(
                tables::set(tables::LEFT_LANE),
                tables::set(tables::RIGHT_LANE),
            ),
            scouts: Sided::new(
                tables::launches(tables::LEFT_SCOUTS),
                tables::launches(tables::RIGHT_SCOUTS),
            ),
            interceptors: Sided::new(
                tables::launches(tables::LEFT_INTERCEPTORS),
                tables::launches(tables::RIGHT_INTERCEPTORS),
            ),
            demolishers: Sided::new(
                tables::launches(tables::LEFT_DEMOLISHERS),
                tables::launches(tables::RIGHT_DEMOLISHERS),
            ),
            additional_tiers: None,
            opening: opening_plan(),
            corner_migration: Vec::new(),
        }
    }

    /// Baseline plus inner tiers, turrets in the corner gaps and escalating scouts.
    #[must_use]
    pub fn fortified() -> Self {
        let corner_migration: Vec<MigrationStage> = tables::CORNER_MIGRATION
            .iter()
            .map(|&(from_turn, cells)| MigrationStage {
                from_turn,
                positions: tables::cells(cells),
            })
            .collect();

        // Corner gap turrets sit between the first and last core pair.
        let mut vital_turrets = tables::cells(&tables::CORE_TURRETS[..2]);
        vital_turrets.extend(
            corner_migration
                .iter()
                .flat_map(|stage| stage.positions.iter().copied()),
        );
        vital_turrets.extend(tables::cells(&tables::CORE_TURRETS[2..]));

        Self {
            version: ProfileVersion::Fortified,
            escalate_scouts: true,
            vital_turrets: vital_turrets.into_iter().collect(),
            additional_tiers: Some(AdditionalTiers {
                turrets: tables::set(tables::ADDITIONAL_TURRETS),
                supports: tables::set(tables::ADDITIONAL_SUPPORTS),
            }),
            corner_migration,
            ..Self::baseline()
        }
    }

    /// Parses a bundle from TOML.
    ///
    /// Only the inner tiers and the migration schedule may be omitted.
    pub fn from_toml_str(text: &str) -> Result<Self, ProfileError> {
        Ok(toml::from_str(text)?)
    }

    /// Renders the bundle as TOML, suitable for editing and loading back.
    pub fn to_toml_string(&self) -> Result<String, ProfileError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub(crate) fn repair_config(&self) -> repair::Config {
        repair::Config {
            front_layer: self.front_layer.clone(),
            second_layer: self.second_layer.clone(),
            vital_turrets: self.vital_turrets.clone(),
            vital_supports: self.vital_supports.clone(),
            attack_lanes: self.attack_lanes.clone(),
            additional: self.additional_tiers.clone(),
        }
    }

    pub(crate) fn attrition_config(&self) -> attrition::Config {
        attrition::Config {
            watched: vec![
                self.front_layer.clone(),
                self.second_layer.clone(),
                self.vital_turrets.clone(),
                self.vital_supports.clone(),
            ],
            health_ratio: self.health_ratio,
            corner_migration: self.corner_migration.clone(),
        }
    }

    pub(crate) fn offensive_config(&self) -> offensive::Config {
        offensive::Config {
            attack_lanes: self.attack_lanes.clone(),
            scouts: self.scouts.clone(),
            interceptors: self.interceptors.clone(),
            demolishers: self.demolishers.clone(),
            escalate_scouts: self.escalate_scouts,
            demolishers_enabled: self.demolishers_enabled,
        }
    }
}

fn opening_plan() -> OpeningPlan {
    let turns = (0..tables::OPENING_WALLS.len())
        .map(|turn| TurnPlan {
            walls: tables::cells(tables::OPENING_WALLS[turn]),
            turrets: tables::cells(tables::OPENING_TURRETS[turn]),
            wall_upgrades: tables::cells(tables::OPENING_WALL_UPGRADES[turn]),
            turret_upgrades: tables::cells(tables::OPENING_TURRET_UPGRADES[turn]),
        })
        .collect();
    OpeningPlan::new(turns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lane_defence_core::Position;

    #[test]
    fn fortified_vital_turrets_keep_source_order() {
        let profile = StrategyProfile::fortified();
        let expected: Vec<Position> = [
            (3, 12),
            (24, 12),
            (2, 13),
            (25, 13),
            (3, 13),
            (24, 13),
            (1, 13),
            (26, 13),
            (7, 9),
            (20, 9),
            (12, 8),
            (15, 8),
            (9, 8),
            (18, 8),
        ]
        .into_iter()
        .map(|(x, y)| Position::new(x, y))
        .collect();
        assert_eq!(profile.vital_turrets.as_slice(), expected.as_slice());
    }

    #[test]
    fn baseline_omits_corner_turrets() {
        let profile = StrategyProfile::baseline();
        assert_eq!(profile.vital_turrets.len(), 8);
        assert!(!profile.vital_turrets.contains(Position::new(2, 13)));
        assert!(profile.corner_migration.is_empty());
        assert!(profile.additional_tiers.is_none());
        assert!(!profile.escalate_scouts);
    }

    #[test]
    fn table_sizes_match_layout() {
        let profile = StrategyProfile::fortified();
        assert_eq!(profile.front_layer.len(), 24);
        assert_eq!(profile.second_layer.len(), 23);
        let tiers = profile.additional_tiers.as_ref().map(|tiers| {
            (tiers.turrets.len(), tiers.supports.len())
        });
        assert_eq!(tiers, Some((8, 18)));
        assert_eq!(
            profile.opening.for_turn(0).map(|plan| (plan.walls.len(), plan.turrets.len())),
            Some((28, 6))
        );
    }

    #[test]
    fn version_parses_case_insensitively() {
        assert_eq!("Baseline".parse::<ProfileVersion>(), Ok(ProfileVersion::Baseline));
        assert_eq!("fortified".parse::<ProfileVersion>(), Ok(ProfileVersion::Fortified));
        assert!("aggressive".parse::<ProfileVersion>().is_err());
    }

    #[test]
    fn demolishers_are_off_in_both_bundles() {
        assert!(!StrategyProfile::baseline().demolishers_enabled);
        assert!(!StrategyProfile::fortified().demolishers_enabled);
    }
}
