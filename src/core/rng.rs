//! Seeded randomness for dealing.
//!
//! A game owns one `GameRng`. Every round deals from `round_rng()`, a child
//! generator whose seed depends only on the game seed and the round count,
//! so a seeded game replays the same boards across restarts.
//!
//! ```
//! use memory_pairs::core::GameRng;
//!
//! let mut game_rng = GameRng::new(42);
//! let mut first = game_rng.round_rng();
//! let mut second = game_rng.round_rng();
//!
//! let mut a = vec![1, 2, 3, 4, 5, 6, 7, 8];
//! let mut b = a.clone();
//! first.shuffle(&mut a);
//! second.shuffle(&mut b);
//! assert_ne!(a, b);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Golden-ratio increment; spreads child seeds across the `u64` range.
const ROUND_SEED_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

/// ChaCha8 generator that remembers its seed and how many rounds it dealt.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    rounds: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            rounds: 0,
        }
    }

    /// Seed from the operating system. Used when the config has no seed.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generator for the next round's deal.
    pub fn round_rng(&mut self) -> Self {
        self.rounds += 1;
        Self::new(self.seed.wrapping_add(self.rounds.wrapping_mul(ROUND_SEED_STEP)))
    }

    /// Shuffle in place.
    ///
    /// `SliceRandom::shuffle` is Fisher-Yates: `i` walks from the last index
    /// down to 1 and swaps with a uniform slot in `[0, i]`, so every ordering
    /// is equally likely.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}
