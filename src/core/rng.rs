//! RNG module - seedable randomness for spawning.
//!
//! A small LCG (constants from Numerical Recipes) keeps the backdrop
//! deterministic under test without pulling in an RNG crate.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed.
    pub fn new(seed: u32) -> Self {
        // Avoid the all-zero orbit.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate the next random u32.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate a random value in [0, max). `max` must be nonzero.
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Draw a piece kind uniformly from the catalog.
    pub fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.next_range(PieceKind::ALL.len() as u32) as usize]
    }
}
