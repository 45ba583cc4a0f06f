//! Deterministic pseudo-random numbers.
//!
//! Character creation and wandering need randomness, but tests and
//! replays need the same world for the same seed, so the world carries its
//! own xorshift generator instead of using a global source.

use serde::{Deserialize, Serialize};

/// Xorshift64 generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        // Ensure non-zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    /// Generate next random u64.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate random usize in [0, max).
    pub fn below(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        let Ok(bound) = u64::try_from(max) else {
            return 0;
        };
        usize::try_from(self.next_u64() % bound).unwrap_or(0)
    }

    /// Generate random f64 in [0, 1).
    #[allow(clippy::cast_precision_loss)]
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// `true` with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Pick a random element.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            items.get(self.below(items.len()))
        }
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(0)
    }
}
