//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the Tetris rules of the LED console: the piece catalog,
//! the board, the falling piece, scoring and the game state that ties them
//! together. It has **no dependencies** on displays, controllers, files or
//! clocks, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every rule can be checked without hardware
//! - **Portable**: The same code runs on the LED matrix and the desktop stand-in
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven shapes and their authored 5x5 rotation templates
//! - [`board`]: 10x20 grid with row completion and cascading line clears
//! - [`piece`]: the falling piece and its move / rotate / drop validation
//! - [`scoring`]: line-clear points, level curve and fall interval
//! - [`rng`]: seeded random shape and rotation for new pieces
//! - [`game_state`]: spawn, actions, fall timer and landing
//!
//! # Game Rules
//!
//! - **Random pieces**: shape and starting rotation are drawn independently
//! - **Rotation**: steps through the authored states in place, no wall kicks
//! - **Hard drop**: one point per row, lands immediately
//! - **Ghost piece**: shows where the current piece will land
//! - **Scoring**: 40 / 100 / 300 / 1200 per landing, times the level
//! - **Levels**: one level per 6 lines, capped at 10
//!
//! # Example
//!
//! ```
//! use ledtris_core::GameState;
//! use ledtris_types::Action;
//!
//! let mut game = GameState::new(12345);
//! game.spawn_if_needed().unwrap();
//!
//! game.apply_action(Action::Right);
//! game.apply_action(Action::RotateCw);
//! game.apply_action(Action::Up);
//!
//! // The hard drop lands on the next advance.
//! let landing = game.advance(0).unwrap();
//! assert_eq!(landing.rows_cleared, 0);
//! assert!(game.score() > 0);
//! ```
//!
//! # Timing
//!
//! The caller owns the clock and reports elapsed milliseconds to
//! [`GameState::advance`](game_state::GameState::advance):
//! - **Fall interval**: 640ms at level 1, 60ms less per level, 50ms floor
//! - **Hard drop**: lands on the next advance regardless of the timer

pub mod board;
pub mod error;
pub mod game_state;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;

pub use ledtris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use error::CoreError;
pub use game_state::{GameState, Landing};
pub use piece::{FallingPiece, PiecePhase};
pub use pieces::{filled_cells, rotation_count, template, Template};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{display_score, fall_interval_ms, level_for_lines, line_score};
