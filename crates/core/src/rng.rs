//! RNG module - seeded uniform piece selection.
//!
//! The original behavior picks each spawn uniformly at random among the seven
//! kinds (no bag). A small LCG keeps sessions deterministic per seed, which
//! the tests and the bench rely on.

use tui_blockfall_types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG.
/// Uses constants from Numerical Recipes.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed.
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range `[0, max)`.
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Current internal state, usable as a seed to replay the remaining
    /// sequence.
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Uniform random piece source.
#[derive(Debug, Clone)]
pub struct PieceSampler {
    rng: SimpleRng,
}

impl PieceSampler {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw the next kind, each of the seven equally likely.
    pub fn draw(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.next_range(7) as usize]
    }

    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceSampler {
    fn default() -> Self {
        Self::new(1)
    }
}
