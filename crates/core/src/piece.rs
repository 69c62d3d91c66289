//! Falling piece - position, rotation and validation against the board
//!
//! A piece is valid when every filled template cell that has reached row 0 or
//! below lies inside the column range, above the bottom edge, and on an empty
//! board cell. Cells still above the board are ignored so a piece can fall into
//! view. Every `try_*` operation leaves the piece untouched when it fails.

use crate::board::Board;
use crate::pieces::{filled_cells, rotation_count, wrap_rotation, SPAWN_POSITION};
use crate::types::{Color, RotationDirection, Shape};

/// Per-piece lifecycle as seen by the game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PiecePhase {
    /// No piece has been played yet; the next one is promoted on the next step
    Spawning,
    /// A piece is falling and can still move down
    Falling,
    /// The falling piece rests on the stack and lands on the next fall step
    Landing,
    /// The last piece was merged into the board; the next one spawns on the next step
    Merged,
    /// The promoted piece did not fit; the session is over
    GameOver,
}

/// The active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FallingPiece {
    pub shape: Shape,
    /// Index into the shape's authored rotation list
    pub rotation: usize,
    /// Board column of the template origin
    pub x: i8,
    /// Board row of the template origin; negative while above the board
    pub y: i8,
    pub color: Color,
}

impl FallingPiece {
    /// Create a piece at the spawn origin
    pub fn spawn(shape: Shape, rotation: usize) -> Self {
        let (x, y) = SPAWN_POSITION;
        Self {
            shape,
            rotation: wrap_rotation(shape, rotation as i32),
            x,
            y,
            color: shape.color(),
        }
    }

    /// Board coordinates of the filled cells in the current rotation
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        filled_cells(self.shape, self.rotation).map(move |(dx, dy)| (x + dx, y + dy))
    }

    /// Check the piece at `(x + dx, y + dy)` in rotation `rotation`
    pub fn is_valid_with(&self, board: &Board, rotation: usize, dx: i8, dy: i8) -> bool {
        filled_cells(self.shape, rotation).all(|(cx, cy)| {
            let col = self.x + cx + dx;
            let row = self.y + cy + dy;
            if row < 0 {
                return true;
            }
            board.is_on_board(col, row) && !board.is_occupied(col, row)
        })
    }

    /// Check the piece shifted by `(dx, dy)` in its current rotation
    pub fn is_valid_at(&self, board: &Board, dx: i8, dy: i8) -> bool {
        self.is_valid_with(board, self.rotation, dx, dy)
    }

    /// Check the piece where it is
    pub fn is_valid(&self, board: &Board) -> bool {
        self.is_valid_at(board, 0, 0)
    }

    /// Move by `(dx, dy)` if the target position is valid
    pub fn try_move(&mut self, board: &Board, dx: i8, dy: i8) -> bool {
        if !self.is_valid_at(board, dx, dy) {
            return false;
        }
        self.x += dx;
        self.y += dy;
        true
    }

    /// Step to the neighbouring rotation state in place (no wall kicks)
    pub fn try_rotate(&mut self, board: &Board, direction: RotationDirection) -> bool {
        let next = wrap_rotation(self.shape, self.rotation as i32 + direction.step());
        if !self.is_valid_with(board, next, 0, 0) {
            return false;
        }
        self.rotation = next;
        true
    }

    /// Number of rows the piece can still fall
    pub fn drop_distance(&self, board: &Board) -> u32 {
        let mut adj: i8 = 1;
        while adj < i8::MAX && self.is_valid_at(board, 0, adj) {
            adj += 1;
        }
        (adj - 1) as u32
    }

    /// Drop to the lowest valid row and return the rows travelled
    pub fn hard_drop(&mut self, board: &Board) -> u32 {
        let rows = self.drop_distance(board);
        self.y += rows as i8;
        rows
    }

    /// Copy of the piece at the row a hard drop would land on
    pub fn ghost(&self, board: &Board) -> FallingPiece {
        FallingPiece {
            y: self.y + self.drop_distance(board) as i8,
            ..*self
        }
    }

    /// Whether the piece rests on the floor or on lit cells
    pub fn is_grounded(&self, board: &Board) -> bool {
        !self.is_valid_at(board, 0, 1)
    }

    pub fn rotation_count(&self) -> usize {
        rotation_count(self.shape)
    }
}
