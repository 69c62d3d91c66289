use thiserror::Error;

use crate::types::Shape;

/// Failures that end a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The promoted piece overlaps the stack at its spawn position
    #[error("spawn blocked: {shape:?} does not fit at the spawn position")]
    SpawnBlocked { shape: Shape },
    /// The game already ended; no more pieces are spawned
    #[error("game is over")]
    GameOver,
}
