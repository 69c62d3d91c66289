//! Pieces module - the static tetromino catalog
//!
//! Every shape owns an authored list of rotation states. Each state is a 5x5
//! occupancy grid; the blank margin keeps offset math identical for all shapes.
//! Rotation counts differ per shape (S, Z and I have two states, O has one) and
//! are kept exactly as authored.

use crate::types::{Shape, SPAWN_X, SPAWN_Y, TEMPLATE_SIZE};

const N: usize = TEMPLATE_SIZE as usize;

/// One rotation state: `grid[row][col]`, `true` where the piece has a block
pub type Template = [[bool; N]; N];

/// Offset of a single filled template cell from the template origin
pub type CellOffset = (i8, i8);

/// Build a template from five rows of `.` (blank) and `O` (filled).
const fn grid(rows: [&str; N]) -> Template {
    let mut out = [[false; N]; N];
    let mut y = 0;
    while y < N {
        let bytes = rows[y].as_bytes();
        let mut x = 0;
        while x < N {
            out[y][x] = bytes[x] == b'O';
            x += 1;
        }
        y += 1;
    }
    out
}

static S_ROTATIONS: [Template; 2] = [
    grid([".....", ".....", "..OO.", ".OO..", "....."]),
    grid([".....", "..O..", "..OO.", "...O.", "....."]),
];

static Z_ROTATIONS: [Template; 2] = [
    grid([".....", ".....", ".OO..", "..OO.", "....."]),
    grid([".....", "..O..", ".OO..", ".O...", "....."]),
];

static I_ROTATIONS: [Template; 2] = [
    grid(["..O..", "..O..", "..O..", "..O..", "....."]),
    grid([".....", ".....", "OOOO.", ".....", "....."]),
];

static O_ROTATIONS: [Template; 1] = [grid([".....", ".....", ".OO..", ".OO..", "....."])];

static J_ROTATIONS: [Template; 4] = [
    grid([".....", ".O...", ".OOO.", ".....", "....."]),
    grid([".....", "..OO.", "..O..", "..O..", "....."]),
    grid([".....", ".....", ".OOO.", "...O.", "....."]),
    grid([".....", "..O..", "..O..", ".OO..", "....."]),
];

static L_ROTATIONS: [Template; 4] = [
    grid([".....", "...O.", ".OOO.", ".....", "....."]),
    grid([".....", "..O..", "..O..", "..OO.", "....."]),
    grid([".....", ".....", ".OOO.", ".O...", "....."]),
    grid([".....", ".OO..", "..O..", "..O..", "....."]),
];

static T_ROTATIONS: [Template; 4] = [
    grid([".....", "..O..", ".OOO.", ".....", "....."]),
    grid([".....", "..O..", "..OO.", "..O..", "....."]),
    grid([".....", ".....", ".OOO.", "..O..", "....."]),
    grid([".....", "..O..", ".OO..", "..O..", "....."]),
];

/// All authored rotation states of a shape, in rotation order
pub fn rotations(shape: Shape) -> &'static [Template] {
    match shape {
        Shape::S => &S_ROTATIONS,
        Shape::Z => &Z_ROTATIONS,
        Shape::I => &I_ROTATIONS,
        Shape::O => &O_ROTATIONS,
        Shape::J => &J_ROTATIONS,
        Shape::L => &L_ROTATIONS,
        Shape::T => &T_ROTATIONS,
    }
}

/// Number of distinct rotation states of a shape
pub fn rotation_count(shape: Shape) -> usize {
    rotations(shape).len()
}

/// Wrap any rotation step into `0..rotation_count(shape)`
pub fn wrap_rotation(shape: Shape, rotation: i32) -> usize {
    rotation.rem_euclid(rotation_count(shape) as i32) as usize
}

/// Template for a shape and rotation index (taken modulo the rotation count)
pub fn template(shape: Shape, rotation: usize) -> &'static Template {
    let states = rotations(shape);
    &states[rotation % states.len()]
}

/// Filled template cells as `(dx, dy)` offsets from the template origin
pub fn filled_cells(shape: Shape, rotation: usize) -> impl Iterator<Item = CellOffset> {
    let grid = template(shape, rotation);
    (0..N).flat_map(move |y| {
        (0..N).filter_map(move |x| grid[y][x].then_some((x as i8, y as i8)))
    })
}

/// Spawn origin for new pieces (x, y)
pub const SPAWN_POSITION: (i8, i8) = (SPAWN_X, SPAWN_Y);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_state_has_four_blocks() {
        for shape in Shape::ALL {
            for rotation in 0..rotation_count(shape) {
                assert_eq!(
                    filled_cells(shape, rotation).count(),
                    4,
                    "{:?} rotation {} should have 4 blocks",
                    shape,
                    rotation
                );
            }
        }
    }

    #[test]
    fn test_authored_rotation_counts() {
        assert_eq!(rotation_count(Shape::S), 2);
        assert_eq!(rotation_count(Shape::Z), 2);
        assert_eq!(rotation_count(Shape::I), 2);
        assert_eq!(rotation_count(Shape::O), 1);
        assert_eq!(rotation_count(Shape::J), 4);
        assert_eq!(rotation_count(Shape::L), 4);
        assert_eq!(rotation_count(Shape::T), 4);
    }

    #[test]
    fn test_template_index_wraps() {
        assert_eq!(template(Shape::T, 5), template(Shape::T, 1));
        assert_eq!(template(Shape::O, 3), template(Shape::O, 0));
        assert_eq!(wrap_rotation(Shape::J, -1), 3);
        assert_eq!(wrap_rotation(Shape::S, 2), 0);
    }

    #[test]
    fn test_grid_parsing() {
        let o = template(Shape::O, 0);
        let filled: Vec<_> = filled_cells(Shape::O, 0).collect();
        assert_eq!(filled, vec![(1, 2), (2, 2), (1, 3), (2, 3)]);
        assert!(o[2][1] && o[3][2]);
        assert!(!o[0][0]);
    }
}
