//! Game state module - one Tetris game without any I/O
//!
//! This module ties together the board, the falling piece, the generator and
//! the scoring policy. It has no clock: the caller reports elapsed time and
//! the state advances its fall timer from that.
//!
//! A session drives it in three steps per tick:
//! 1. [`GameState::spawn_if_needed`] promotes the next piece when none is falling
//! 2. [`GameState::apply_action`] for every controller action of the tick
//! 3. [`GameState::advance`] moves the piece down or lands it

use log::debug;

use crate::board::Board;
use crate::error::CoreError;
use crate::piece::{FallingPiece, PiecePhase};
use crate::rng::PieceGenerator;
use crate::scoring::{hard_drop_score, level_and_fall_interval, line_score};
use crate::types::{Action, RotationDirection, Shape};

/// Result of a piece landing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landing {
    pub shape: Shape,
    pub rows_cleared: usize,
    pub score_delta: u32,
    /// Whether the landing raised the level
    pub level_up: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    falling: Option<FallingPiece>,
    next: FallingPiece,
    generator: PieceGenerator,
    score: u32,
    lines: u32,
    level: u32,
    fall_interval_ms: u32,
    fall_timer_ms: u32,
    /// Set by a hard drop; the next `advance` lands without waiting for the timer
    hard_dropped: bool,
    game_over: bool,
    pieces_spawned: u32,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_board(seed, Board::new())
    }

    /// Create a game on a prepared board
    pub fn with_board(seed: u32, board: Board) -> Self {
        let mut generator = PieceGenerator::new(seed);
        let next = generator.next_piece();
        let (level, fall_interval_ms) = level_and_fall_interval(0);

        Self {
            board,
            falling: None,
            next,
            generator,
            score: 0,
            lines: 0,
            level,
            fall_interval_ms,
            fall_timer_ms: 0,
            hard_dropped: false,
            game_over: false,
            pieces_spawned: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn falling(&self) -> Option<FallingPiece> {
        self.falling
    }

    pub fn next(&self) -> FallingPiece {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    pub fn fall_timer_ms(&self) -> u32 {
        self.fall_timer_ms
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn phase(&self) -> PiecePhase {
        match self.falling {
            _ if self.game_over => PiecePhase::GameOver,
            Some(piece) if piece.is_grounded(&self.board) => PiecePhase::Landing,
            Some(_) => PiecePhase::Falling,
            None if self.pieces_spawned > 0 => PiecePhase::Merged,
            None => PiecePhase::Spawning,
        }
    }

    /// Where the falling piece would land on a hard drop
    pub fn ghost(&self) -> Option<FallingPiece> {
        self.falling.map(|piece| piece.ghost(&self.board))
    }

    /// Replace the upcoming piece (scripted scenarios and tests)
    pub fn set_next(&mut self, shape: Shape, rotation: usize) {
        self.next = FallingPiece::spawn(shape, rotation);
    }

    /// Put `piece` in play if it fits; returns false and changes nothing otherwise
    pub fn place_falling(&mut self, piece: FallingPiece) -> bool {
        if self.game_over || !piece.is_valid(&self.board) {
            return false;
        }
        self.falling = Some(piece);
        self.hard_dropped = false;
        true
    }

    /// Promote the next piece when nothing is falling.
    ///
    /// Returns `Ok(true)` when a piece was spawned, `Ok(false)` when one was
    /// already falling. A promoted piece that does not fit ends the game.
    pub fn spawn_if_needed(&mut self) -> Result<bool, CoreError> {
        if self.game_over {
            return Err(CoreError::GameOver);
        }
        if self.falling.is_some() {
            return Ok(false);
        }

        let upcoming = self.generator.next_piece();
        let piece = std::mem::replace(&mut self.next, upcoming);
        self.fall_timer_ms = 0;
        self.hard_dropped = false;

        if !piece.is_valid(&self.board) {
            self.game_over = true;
            debug!("spawn blocked for {:?} after {} pieces", piece.shape, self.pieces_spawned);
            return Err(CoreError::SpawnBlocked { shape: piece.shape });
        }

        self.falling = Some(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        debug!(
            "spawned {:?} rotation {}, next {:?}",
            piece.shape, piece.rotation, self.next.shape
        );
        Ok(true)
    }

    /// Apply a movement action to the falling piece.
    ///
    /// Returns whether the piece changed. `Start`, `Select` and `Quit` belong
    /// to the session and are ignored here.
    pub fn apply_action(&mut self, action: Action) -> bool {
        if self.game_over {
            return false;
        }
        let Some(mut piece) = self.falling else {
            return false;
        };

        let changed = match action {
            Action::Left => piece.try_move(&self.board, -1, 0),
            Action::Right => piece.try_move(&self.board, 1, 0),
            Action::Down => piece.try_move(&self.board, 0, 1),
            Action::Up => {
                let rows = piece.hard_drop(&self.board);
                self.score = self.score.saturating_add(hard_drop_score(rows));
                self.hard_dropped = true;
                true
            }
            Action::RotateCw => piece.try_rotate(&self.board, RotationDirection::Cw),
            Action::RotateCcw => piece.try_rotate(&self.board, RotationDirection::Ccw),
            Action::Start | Action::Select | Action::Quit => false,
        };

        self.falling = Some(piece);
        changed
    }

    /// Advance the fall timer by `elapsed_ms`.
    ///
    /// When the timer reaches the fall interval (or a hard drop just
    /// happened) the piece moves down one row, or lands if it cannot.
    pub fn advance(&mut self, elapsed_ms: u32) -> Option<Landing> {
        if self.game_over {
            return None;
        }
        let mut piece = self.falling?;

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if !self.hard_dropped && self.fall_timer_ms < self.fall_interval_ms {
            return None;
        }
        self.hard_dropped = false;

        if piece.try_move(&self.board, 0, 1) {
            self.falling = Some(piece);
            self.fall_timer_ms = 0;
            return None;
        }

        Some(self.land(piece))
    }

    /// Merge the piece, clear rows and update score, lines and level
    fn land(&mut self, piece: FallingPiece) -> Landing {
        self.board.merge_piece(&piece);
        self.falling = None;

        let rows_cleared = self.board.clear_completed_rows();
        let score_delta = line_score(rows_cleared, self.level);
        self.score = self.score.saturating_add(score_delta);
        self.lines = self.lines.saturating_add(rows_cleared as u32);

        let previous_level = self.level;
        let (level, fall_interval_ms) = level_and_fall_interval(self.lines);
        self.level = level;
        self.fall_interval_ms = fall_interval_ms;

        debug!(
            "landed {:?}: {} rows, +{} (score {}, level {})",
            piece.shape, rows_cleared, score_delta, self.score, self.level
        );

        Landing {
            shape: piece.shape,
            rows_cleared,
            score_delta,
            level_up: level > previous_level,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
