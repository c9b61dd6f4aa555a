#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lane Defence decision engine.
//!
//! This crate defines the message surface that connects the host adapter, the
//! per-turn board, and the pure decision systems. Systems query a
//! [`TurnState`] for the stationary units visible this turn and respond
//! exclusively by issuing [`Command`] intents. The external game engine is the
//! sole arbiter of whether an intent is legal; nothing here validates
//! resources or placement.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Number of consecutive turns that make up one attack cycle.
pub const ATTACK_CYCLE: u32 = 4;

/// Location of a single board cell expressed as x and y coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new board position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate of the cell. Row zero is the player's back edge.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }
}

impl From<[i32; 2]> for Position {
    fn from([x, y]: [i32; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Position> for [i32; 2] {
    fn from(position: Position) -> Self {
        [position.x, position.y]
    }
}

/// Closed set of unit types understood by the game engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// Cheap blocking structure.
    Wall,
    /// Structure that shields friendly mobile units passing nearby.
    Support,
    /// Structure that attacks enemy mobile units in range.
    Turret,
    /// Fast, fragile mobile unit.
    Scout,
    /// Slow mobile unit that targets structures.
    Demolisher,
    /// Mobile unit that hunts enemy mobile units.
    Interceptor,
}

impl UnitKind {
    /// Every unit kind in the engine's configuration order.
    pub const ALL: [UnitKind; 6] = [
        UnitKind::Wall,
        UnitKind::Support,
        UnitKind::Turret,
        UnitKind::Scout,
        UnitKind::Demolisher,
        UnitKind::Interceptor,
    ];

    /// Reports whether the kind occupies a board cell until destroyed or removed.
    #[must_use]
    pub const fn is_stationary(self) -> bool {
        matches!(self, Self::Wall | Self::Support | Self::Turret)
    }

    /// Index of the kind within the engine's unit configuration table.
    #[must_use]
    pub const fn config_index(self) -> usize {
        match self {
            Self::Wall => 0,
            Self::Support => 1,
            Self::Turret => 2,
            Self::Scout => 3,
            Self::Demolisher => 4,
            Self::Interceptor => 5,
        }
    }

    /// Resolves the kind stored at the provided configuration index.
    #[must_use]
    pub fn from_config_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Side of the match that owns a unit or caused an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    /// The side this engine plays for.
    Player,
    /// The opposing side.
    Opponent,
}

/// Immutable view of a stationary unit standing on a board cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StationaryUnitView {
    /// Type of structure occupying the cell.
    pub kind: UnitKind,
    /// Remaining health.
    pub health: f32,
    /// Health of the structure when freshly built at its current upgrade level.
    pub max_health: f32,
    /// Indicates whether the structure has been upgraded.
    pub upgraded: bool,
    /// Side that owns the structure.
    pub owner: Owner,
}

impl StationaryUnitView {
    /// Reports whether remaining health is at or below `ratio` of maximum health.
    #[must_use]
    pub fn health_at_or_below(&self, ratio: f32) -> bool {
        self.health <= self.max_health * ratio
    }
}

/// Intents submitted to the game engine at the end of a turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Requests `count` units of `kind` at every listed position.
    Spawn {
        /// Type of unit to create.
        kind: UnitKind,
        /// Cells to spawn at, in request order.
        positions: Vec<Position>,
        /// Number of units per position. Always one for stationary kinds.
        count: u32,
    },
    /// Requests an upgrade of the structures standing at the listed positions.
    Upgrade {
        /// Cells holding structures to upgrade.
        positions: Vec<Position>,
    },
    /// Flags the structures at the listed positions for removal.
    Remove {
        /// Cells holding structures to remove.
        positions: Vec<Position>,
    },
}

impl Command {
    /// Creates a single-unit spawn request for each position.
    #[must_use]
    pub fn spawn(kind: UnitKind, positions: Vec<Position>) -> Self {
        Self::Spawn {
            kind,
            positions,
            count: 1,
        }
    }

    /// Positions targeted by the command.
    #[must_use]
    pub fn positions(&self) -> &[Position] {
        match self {
            Self::Spawn { positions, .. }
            | Self::Upgrade { positions }
            | Self::Remove { positions } => positions,
        }
    }
}

/// Breach reported in an action frame: a mobile unit reached an edge of the board.
#[derive(Clone, Debug, PartialEq)]
pub struct Breach {
    /// Cell at which the unit left the board.
    pub position: Position,
    /// Damage dealt to the defending side's health.
    pub damage: f32,
    /// Engine unit type index of the breaching unit.
    pub unit_type: u32,
    /// Engine-assigned identifier of the breaching unit.
    pub unit_id: String,
    /// Side that owns the breaching unit.
    pub owner: Owner,
}

/// Corner of the board through which an offensive is launched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackDirection {
    /// Launch through the left corner lane.
    #[default]
    Left,
    /// Launch through the right corner lane.
    Right,
}

impl AttackDirection {
    /// Maps a fair coin flip onto a direction, `true` meaning left.
    #[must_use]
    pub const fn from_coin(is_left: bool) -> Self {
        if is_left {
            Self::Left
        } else {
            Self::Right
        }
    }
}

/// Pair of values keyed by attack direction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sided<T> {
    /// Value used when attacking through the left corner.
    pub left: T,
    /// Value used when attacking through the right corner.
    pub right: T,
}

impl<T> Sided<T> {
    /// Creates a new pair from explicit left and right values.
    #[must_use]
    pub const fn new(left: T, right: T) -> Self {
        Self { left, right }
    }

    /// Selects the value associated with the provided direction.
    #[must_use]
    pub const fn get(&self, direction: AttackDirection) -> &T {
        match direction {
            AttackDirection::Left => &self.left,
            AttackDirection::Right => &self.right,
        }
    }
}

/// Number of mobile units to spawn at a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deployment {
    /// Cell the units are spawned at.
    pub position: Position,
    /// Base number of units to spawn.
    pub count: u32,
}

impl Deployment {
    /// Creates a new deployment descriptor.
    #[must_use]
    pub const fn new(position: Position, count: u32) -> Self {
        Self { position, count }
    }
}

/// Ordered collection of positions with constant-time membership checks.
///
/// Iteration follows insertion order so that requests are issued in table
/// order; duplicates are dropped on construction.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Position>", into = "Vec<Position>")]
pub struct PositionSet {
    ordered: Vec<Position>,
    members: HashSet<Position>,
}

impl PositionSet {
    /// Builds a set from the provided positions, keeping the first occurrence of each.
    #[must_use]
    pub fn from_slice(positions: &[Position]) -> Self {
        positions.iter().copied().collect()
    }

    /// Reports whether the position belongs to the set.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.members.contains(&position)
    }

    /// Iterates over the positions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.ordered.iter().copied()
    }

    /// Positions in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[Position] {
        &self.ordered
    }

    /// Number of distinct positions in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Reports whether the set holds no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

impl PartialEq for PositionSet {
    fn eq(&self, other: &Self) -> bool {
        self.ordered == other.ordered
    }
}

impl Eq for PositionSet {}

impl FromIterator<Position> for PositionSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut set = Self::default();
        for position in iter {
            if set.members.insert(position) {
                set.ordered.push(position);
            }
        }
        set
    }
}

impl From<Vec<Position>> for PositionSet {
    fn from(positions: Vec<Position>) -> Self {
        positions.into_iter().collect()
    }
}

impl From<PositionSet> for Vec<Position> {
    fn from(set: PositionSet) -> Self {
        set.ordered
    }
}

/// Zero-based turn index reported by the game engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Turn(u32);

impl Turn {
    /// Creates a new turn index.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric turn index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Position of the turn inside its attack cycle, in `0..ATTACK_CYCLE`.
    #[must_use]
    pub const fn cycle_phase(&self) -> u32 {
        self.0 % ATTACK_CYCLE
    }

    /// Number of whole attack cycles completed before this turn.
    #[must_use]
    pub const fn cycles_elapsed(&self) -> u32 {
        self.0 / ATTACK_CYCLE
    }

    /// Reports whether offensive units launch this turn.
    ///
    /// Launches happen on the first turn of every cycle except the opening one.
    #[must_use]
    pub const fn is_launch(&self) -> bool {
        self.0 >= ATTACK_CYCLE && self.cycle_phase() == 0
    }

    /// Reports whether the attack lane is opened this turn, one turn before launch.
    #[must_use]
    pub const fn is_lane_opening(&self) -> bool {
        self.cycle_phase() == ATTACK_CYCLE - 1
    }
}

/// Per-turn board access offered to decision systems.
///
/// Implementations answer occupancy queries against the engine's snapshot
/// combined with every intent issued earlier in the same turn, so that a
/// cell requested for a spawn reads as occupied for the rest of the turn.
pub trait TurnState {
    /// Turn currently being decided.
    fn turn(&self) -> Turn;

    /// Returns the stationary unit standing at the position, if any.
    fn stationary_unit(&self, position: Position) -> Option<StationaryUnitView>;

    /// Reports whether any stationary unit stands at the position.
    fn contains_stationary_unit(&self, position: Position) -> bool {
        self.stationary_unit(position).is_some()
    }

    /// Queues a command for submission at the end of the turn.
    fn issue(&mut self, command: Command);
}
