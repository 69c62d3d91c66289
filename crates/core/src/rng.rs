//! RNG module - random piece generation
//!
//! Every new piece picks a shape uniformly from the seven, then a rotation
//! uniformly from that shape's authored rotation states. There is no bag: the
//! LED console plays with independent draws.
//!
//! Also provides a simple LCG so a seed reproduces a whole game.

use crate::piece::FallingPiece;
use crate::pieces::rotation_count;
use crate::types::Shape;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max.max(1)
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Source of new falling pieces
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: SimpleRng,
}

impl PieceGenerator {
    /// Create a new generator with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw a piece at the spawn origin with a random shape and rotation
    pub fn next_piece(&mut self) -> FallingPiece {
        let shape = Shape::ALL[self.rng.next_range(Shape::ALL.len() as u32) as usize];
        let rotation = self.rng.next_range(rotation_count(shape) as u32) as usize;
        FallingPiece::spawn(shape, rotation)
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1)
    }
}
