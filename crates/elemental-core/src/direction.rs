//! Step vectors shared by move generation and reaction patterns.
//!
//! Each entry is `(d_row, d_col)`; row 0 is rank 8.

/// Rook directions, clockwise from north.
pub const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

/// Bishop directions, clockwise from north-east.
pub const DIAGONAL: [(i8, i8); 4] = [(-1, 1), (1, 1), (1, -1), (-1, -1)];

/// All eight king directions, clockwise from north.
pub const ALL_EIGHT: [(i8, i8); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

/// Knight jumps.
pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, 2),
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
];
