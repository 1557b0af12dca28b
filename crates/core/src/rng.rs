//! RNG module - injectable random source for animation jitter
//!
//! The board only needs randomness for one thing: giving freshly generated
//! stones slightly different fall speeds so a refill does not land as one flat
//! sheet. The source is a trait so tests can pin the values.
//!
//! Also provides a simple LCG for deterministic runs.

/// A source of uniformly distributed `u32` values.
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;
}

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

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Fall speed of a freshly generated stone, in `[4.0, 7.6]` px per tick.
pub fn spawn_fall_speed<R: RandomSource + ?Sized>(rng: &mut R) -> f32 {
    (rng.next_u32() % 10 + 10) as f32 / 2.5
}
