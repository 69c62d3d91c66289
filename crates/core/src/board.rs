//! Board module - manages the LED playfield grid
//!
//! The board is a 10x20 grid where each cell is either empty or lit with a palette color.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (col, row) where col ranges 0..9 (left to right), row ranges 0..19 (top to bottom).
//! Pieces spawn with their template origin at (3, -2), above the visible board.

use crate::piece::FallingPiece;
use crate::types::{Cell, Color, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * WIDTH + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (col, row) coordinates
    #[inline(always)]
    fn index(col: i8, row: i8) -> Option<usize> {
        if col < 0 || col >= BOARD_WIDTH as i8 || row < 0 || row >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((row as usize) * (BOARD_WIDTH as usize) + (col as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (col, row)
    /// Returns None if out of bounds
    pub fn get(&self, col: i8, row: i8) -> Option<Cell> {
        Self::index(col, row).map(|idx| self.cells[idx])
    }

    /// Set cell at position (col, row)
    /// Returns false if out of bounds
    pub fn set(&mut self, col: i8, row: i8, cell: Cell) -> bool {
        match Self::index(col, row) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a piece cell may sit at (col, row).
    ///
    /// Only the column range and the bottom edge are checked; rows above the
    /// board are legal while a piece falls into view.
    pub fn is_on_board(&self, col: i8, row: i8) -> bool {
        col >= 0 && col < BOARD_WIDTH as i8 && row < BOARD_HEIGHT as i8
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, col: i8, row: i8) -> bool {
        matches!(self.get(col, row), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_complete_row(&self, row: usize) -> bool {
        if row >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = row * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove `row` and pull every row above it down by one; row 0 becomes empty.
    fn collapse_row(&mut self, row: usize) {
        let width = BOARD_WIDTH as usize;

        // copy_within handles the overlapping ranges
        for r in (1..=row).rev() {
            let src_start = (r - 1) * width;
            self.cells.copy_within(src_start..src_start + width, r * width);
        }

        for cell in &mut self.cells[..width] {
            *cell = None;
        }
    }

    /// Clear all complete rows and return how many were removed.
    ///
    /// Scans bottom to top. After collapsing a complete row the same row index
    /// is examined again, so a row that slid down into a cleared slot and is
    /// itself complete gets removed as well.
    pub fn clear_completed_rows(&mut self) -> usize {
        let mut removed = 0;
        let mut row = BOARD_HEIGHT as isize - 1;

        while row >= 0 {
            if self.is_complete_row(row as usize) {
                self.collapse_row(row as usize);
                removed += 1;
            } else {
                row -= 1;
            }
        }

        removed
    }

    /// Write the piece color into every filled cell of its current rotation.
    ///
    /// The position must already be validated; nothing is checked here. Cells
    /// still above row 0 cannot be stored and are dropped.
    pub fn merge_piece(&mut self, piece: &FallingPiece) {
        for (col, row) in piece.cells() {
            self.set(col, row, Some(piece.color));
        }
    }

    /// Number of lit cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Fill a whole row with one color, leaving the listed columns empty
    pub fn fill_row_except(&mut self, row: i8, color: Color, gaps: &[i8]) {
        for col in 0..BOARD_WIDTH as i8 {
            let cell = if gaps.contains(&col) { None } else { Some(color) };
            self.set(col, row, cell);
        }
    }

    /// Convert to 2D vector for testing/display
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        let width = BOARD_WIDTH as usize;
        self.cells.chunks(width).map(|row| row.to_vec()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Color {
        Color::new(2)
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_is_on_board_has_no_top_edge() {
        let board = Board::new();
        assert!(board.is_on_board(0, -5));
        assert!(board.is_on_board(9, 19));
        assert!(!board.is_on_board(-1, 0));
        assert!(!board.is_on_board(10, 0));
        assert!(!board.is_on_board(0, 20));
    }

    #[test]
    fn test_clear_single_row_pulls_rows_down() {
        let mut board = Board::new();
        board.fill_row_except(19, red(), &[]);
        board.set(4, 18, Some(Color::new(5)));

        assert_eq!(board.clear_completed_rows(), 1);
        assert_eq!(board.get(4, 19), Some(Some(Color::new(5))));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_clear_cascade_with_gap_between() {
        let mut board = Board::new();
        board.fill_row_except(19, red(), &[]);
        board.fill_row_except(18, red(), &[0]);
        board.fill_row_except(17, red(), &[]);

        assert_eq!(board.clear_completed_rows(), 2);
        // The incomplete row ends at the bottom.
        assert!(!board.is_complete_row(19));
        assert_eq!(board.get(0, 19), Some(None));
        assert_eq!(board.get(1, 19), Some(Some(red())));
        assert_eq!(board.filled_count(), 9);
    }

    #[test]
    fn test_clear_nothing() {
        let mut board = Board::new();
        board.fill_row_except(19, red(), &[3]);
        let before = board.clone();
        assert_eq!(board.clear_completed_rows(), 0);
        assert_eq!(board, before);
    }
}
