//! Deterministic random number generation for replayable resolution.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Context streams**: Independent sequences for deck building, skill
//!   checks, and gold theft so one domain never shifts another
//! - **Serializable**: O(1) state capture and restore
//!
//! ## Usage
//!
//! ```
//! use frontier_engine::core::GameRng;
//!
//! let run = GameRng::new(42);
//!
//! let mut deck_rng = run.for_context("deck");
//! let mut skill_rng = run.for_context("skill");
//!
//! // Same context from the same seed replays the same rolls
//! let mut again = GameRng::new(42).for_context("skill");
//! assert_eq!(skill_rng.roll(), again.roll());
//! # let _ = deck_rng.gen_bool(0.5);
//! ```

use std::ops::RangeInclusive;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG injected into every resolution that needs chance.
///
/// Uses ChaCha8 for speed while keeping a high-quality stream.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    /// FNV-1a keeps the derivation stable across Rust releases.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in self.seed.to_le_bytes().iter().chain(context.as_bytes()) {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        Self::new(hash)
    }

    /// Draw a child stream seeded from this one. Each call advances this
    /// stream, so successive children differ.
    pub fn split(&mut self) -> Self {
        Self::new(self.inner.gen::<u64>())
    }

    /// Uniform roll in `[0, 1)`, used for skill checks.
    pub fn roll(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Generate a random integer in the inclusive range.
    ///
    /// An empty range (`start > end`) yields `start`.
    pub fn gen_range_inclusive(&mut self, range: RangeInclusive<i64>) -> i64 {
        if range.start() > range.end() {
            return *range.start();
        }
        self.inner.gen_range(range)
    }

    /// Generate a random usize below `upper`. Returns 0 when `upper` is 0.
    pub fn gen_index(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        self.inner.gen_range(0..upper)
    }

    /// Generate a random boolean with given probability of true.
    ///
    /// The probability is clamped into `[0, 1]`.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        let p = if probability.is_nan() { 0.0 } else { probability.clamp(0.0, 1.0) };
        self.inner.gen_bool(p)
    }

    /// Shuffle a deck slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Capture the stream position so a saved run can resume mid-day.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Rebuild a stream from a captured position.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state for checkpointing a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Seed the stream was created from
    pub seed: u64,
    /// Words consumed so far
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range_inclusive(0..=1000), rng2.gen_range_inclusive(0..=1000));
        }
    }

    #[test]
    fn test_context_streams_differ() {
        let rng = GameRng::new(42);
        let mut deck = rng.for_context("deck");
        let mut skill = rng.for_context("skill");

        let seq1: Vec<_> = (0..10).map(|_| deck.gen_index(1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| skill.gen_index(1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_context_is_deterministic() {
        let mut a = GameRng::new(7).for_context("steal");
        let mut b = GameRng::new(7).for_context("steal");

        for _ in 0..10 {
            assert_eq!(a.gen_range_inclusive(1..=6), b.gen_range_inclusive(1..=6));
        }
    }

    #[test]
    fn test_split_children_differ_but_replay() {
        let mut a = GameRng::new(5);
        let mut b = GameRng::new(5);
        let (first, second) = (a.split(), a.split());
        assert_ne!(first.seed(), second.seed());
        assert_eq!(b.split().seed(), first.seed());
    }

    #[test]
    fn test_roll_in_unit_interval() {
        let mut rng = GameRng::new(3);
        for _ in 0..200 {
            let r = rng.roll();
            assert!((0.0..1.0).contains(&r));
        }
    }

    #[test]
    fn test_degenerate_ranges() {
        let mut rng = GameRng::new(1);
        assert_eq!(rng.gen_range_inclusive(5..=2), 5);
        assert_eq!(rng.gen_index(0), 0);
        assert!(!rng.gen_bool(-1.0));
        assert!(rng.gen_bool(2.0));
    }

    #[test]
    fn test_state_restore() {
        let mut rng = GameRng::new(42);
        for _ in 0..50 {
            rng.roll();
        }

        let state = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.gen_index(1000)).collect();

        let mut restored = GameRng::from_state(&state);
        let actual: Vec<_> = (0..10).map(|_| restored.gen_index(1000)).collect();

        assert_eq!(expected, actual);
    }
}
