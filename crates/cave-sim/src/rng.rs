//! The game's pseudo-random source.
//!
//! A linear congruential generator whose parameters were tested against
//! Knuth vol. 2. Everything random in a session draws from one instance, so
//! a seed plus a command sequence fully determines the game.

const MULTIPLIER: u32 = 1093;
const INCREMENT: u32 = 221_587;
const MODULUS: u32 = 1 << 20;

/// Seeded LCG shared by every randomized decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Create a generator from a seed.
    pub fn new(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.set_seed(seed);
        rng
    }

    /// Restart the sequence from `seed`.
    pub fn set_seed(&mut self, seed: u64) {
        self.state = (seed % u64::from(MODULUS)) as u32;
    }

    /// Return the current value and step the generator.
    fn draw(&mut self) -> u32 {
        let value = self.state;
        self.state = (MULTIPLIER * value + INCREMENT) % MODULUS;
        value
    }

    /// Uniform integer in `0..n`.
    pub fn range(&mut self, n: u32) -> u32 {
        (u64::from(n) * u64::from(self.draw()) / u64::from(MODULUS)) as u32
    }

    /// True with probability `percent`/100.
    pub fn pct(&mut self, percent: u32) -> bool {
        self.range(100) < percent
    }
}
