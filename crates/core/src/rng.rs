//! RNG module - small deterministic generator for game modules
//!
//! Game modules get randomness from the engine handle so that a fixed seed
//! replays the same rotation (useful for tests and for recording demos).

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
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // High bits of an LCG are far better distributed than the low ones.
        (((self.next_u32() >> 16) as u64 * max as u64) >> 16) as u32
    }

    /// Random value in `[lo, hi]` (inclusive).
    pub fn between(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        let span = hi as i64 - lo as i64 + 1;
        let offset = match u32::try_from(span) {
            Ok(span) => self.next_range(span) as i64,
            // Full i32 range: every u32 is a valid offset.
            Err(_) => self.next_u32() as i64,
        };
        (lo as i64 + offset) as i32
    }

    /// `true` with probability `num / den`.
    pub fn chance(&mut self, num: u32, den: u32) -> bool {
        self.next_range(den) < num
    }

    /// Derive an independent generator (one per session).
    pub fn fork(&mut self) -> SimpleRng {
        SimpleRng::new(self.next_u32())
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
