//! Board coordinates of the built-in defensive layout and launch tables.

use lane_defence_core::{Deployment, Position, PositionSet};

pub(crate) type Cells = &'static [(i32, i32)];

pub(crate) const OPENING_WALLS: [Cells; 4] = [
    &[
        (0, 13),
        (1, 13),
        (2, 13),
        (3, 13),
        (4, 12),
        (5, 11),
        (6, 10),
        (7, 10),
        (8, 9),
        (9, 9),
        (10, 9),
        (11, 9),
        (13, 9),
        (14, 9),
        (16, 9),
        (17, 9),
        (18, 9),
        (19, 9),
        (20, 10),
        (21, 10),
        (22, 11),
        (23, 12),
        (24, 13),
        (25, 13),
        (26, 13),
        (27, 13),
        (1, 12),
        (26, 12),
    ],
    &[(12, 9), (15, 9)],
    &[(4, 11), (5, 10), (22, 10), (23, 11)],
    &[],
];

pub(crate) const OPENING_TURRETS: [Cells; 4] = [
    &[(3, 12), (24, 12), (7, 9), (20, 9), (12, 8), (15, 8)],
    &[],
    &[],
    &[],
];

pub(crate) const OPENING_WALL_UPGRADES: [Cells; 4] =
    [&[], &[(0, 13), (27, 13)], &[], &[(26, 13), (26, 12)]];

pub(crate) const OPENING_TURRET_UPGRADES: [Cells; 4] = [&[], &[], &[], &[(7, 9)]];

pub(crate) const LEFT_LANE: Cells = &[(0, 13), (1, 13), (1, 12)];
pub(crate) const RIGHT_LANE: Cells = &[(27, 13), (26, 13), (26, 12)];

// The corner gaps at (1, 13), (2, 13), (3, 13) and their mirrors are held by
// turrets rather than walls.
pub(crate) const FRONT_LAYER: Cells = &[
    (0, 13),
    (1, 12),
    (26, 12),
    (27, 13),
    (4, 12),
    (23, 12),
    (5, 11),
    (6, 10),
    (7, 10),
    (20, 10),
    (21, 10),
    (22, 11),
    (8, 9),
    (9, 9),
    (10, 9),
    (11, 9),
    (12, 9),
    (13, 9),
    (14, 9),
    (15, 9),
    (16, 9),
    (17, 9),
    (18, 9),
    (19, 9),
];

pub(crate) const SECOND_LAYER: Cells = &[
    (4, 11),
    (5, 10),
    (6, 9),
    (5, 12),
    (6, 11),
    (21, 11),
    (22, 12),
    (21, 9),
    (22, 10),
    (23, 11),
    (8, 10),
    (9, 10),
    (10, 10),
    (11, 10),
    (12, 10),
    (13, 10),
    (14, 10),
    (15, 10),
    (16, 10),
    (17, 10),
    (18, 10),
    (19, 10),
    (20, 10),
];

pub(crate) const CORE_TURRETS: Cells = &[
    (3, 12),
    (24, 12),
    (7, 9),
    (20, 9),
    (12, 8),
    (15, 8),
    (9, 8),
    (18, 8),
];

/// Migration stages as `(from_turn, cells)`, outermost pair last.
pub(crate) const CORNER_MIGRATION: [(u32, Cells); 3] = [
    (5, &[(2, 13), (25, 13)]),
    (6, &[(3, 13), (24, 13)]),
    (7, &[(1, 13), (26, 13)]),
];

pub(crate) const ADDITIONAL_TURRETS: Cells = &[
    (6, 7),
    (21, 7),
    (10, 8),
    (17, 8),
    (7, 6),
    (20, 6),
    (8, 6),
    (19, 6),
];

pub(crate) const VITAL_SUPPORTS: Cells = &[(8, 8), (19, 8)];

pub(crate) const ADDITIONAL_SUPPORTS: Cells = &[
    (10, 6),
    (11, 6),
    (12, 6),
    (13, 6),
    (14, 6),
    (15, 6),
    (16, 6),
    (17, 6),
    (9, 5),
    (10, 5),
    (11, 5),
    (12, 5),
    (13, 5),
    (14, 5),
    (15, 5),
    (16, 5),
    (17, 5),
    (18, 5),
];

/// Launch tables as `(x, y, base count)` per direction.
pub(crate) type Launches = &'static [(i32, i32, u32)];

pub(crate) const LEFT_SCOUTS: Launches = &[(21, 7, 5), (22, 8, 1000)];
pub(crate) const RIGHT_SCOUTS: Launches = &[(6, 7, 5), (5, 8, 1000)];
pub(crate) const LEFT_INTERCEPTORS: Launches = &[(2, 11, 1)];
pub(crate) const RIGHT_INTERCEPTORS: Launches = &[(25, 11, 1)];
pub(crate) const LEFT_DEMOLISHERS: Launches = &[(2, 11, 2)];
pub(crate) const RIGHT_DEMOLISHERS: Launches = &[(25, 11, 2)];

pub(crate) fn cells(table: &[(i32, i32)]) -> Vec<Position> {
    table.iter().map(|&(x, y)| Position::new(x, y)).collect()
}

pub(crate) fn set(table: &[(i32, i32)]) -> PositionSet {
    table.iter().map(|&(x, y)| Position::new(x, y)).collect()
}

pub(crate) fn launches(table: Launches) -> Vec<Deployment> {
    table
        .iter()
        .map(|&(x, y, count)| Deployment::new(Position::new(x, y), count))
        .collect()
}
