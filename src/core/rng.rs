//! Decision points and deterministic randomness.
//!
//! Every random outcome the rules produce (random targets, random cards,
//! deck shuffles) goes through a [`DecisionSource`]. Swapping the source
//! is how replays and tests pin outcomes without touching the rules.
//!
//! ## Sources
//!
//! - [`GameRng`]: seeded ChaCha8, reproducible and checkpointable
//! - [`ScriptedDecisions`]: replays a fixed list of picks
//!
//! ```
//! use ccg_rules::core::{DecisionPoint, DecisionSource, GameRng};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! for _ in 0..10 {
//!     assert_eq!(
//!         a.pick(DecisionPoint::RandomTarget, 5),
//!         b.pick(DecisionPoint::RandomTarget, 5),
//!     );
//! }
//! ```

use std::collections::VecDeque;

use im::Vector;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Why the rules are asking for a pick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionPoint {
    /// Choosing among candidate entities for a random selector.
    RandomTarget,
    /// Choosing a card from a pool (e.g. a random entourage card).
    RandomCard,
    /// One step of a Fisher–Yates shuffle.
    Shuffle,
    /// Choosing a position to insert a card into a deck.
    DeckPosition,
}

/// Pluggable source of every random choice the rules make.
pub trait DecisionSource: std::fmt::Debug {
    /// Pick an index in `0..candidates`. `candidates` is always non-zero.
    fn pick(&mut self, point: DecisionPoint, candidates: usize) -> usize;
}

/// Seeded, reproducible randomness.
///
/// Uses ChaCha8 for speed with good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Split off an independent stream, e.g. to simulate ahead without
    /// disturbing the game's own sequence.
    ///
    /// Each fork gets a different but reproducible seed.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        let seed = self.seed.wrapping_add(self.forks.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(seed)
    }

    /// Capture the stream position for checkpointing.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            forks: self.forks,
        }
    }

    /// Resume a stream captured with [`GameRng::state`].
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            forks: state.forks,
        }
    }
}

impl DecisionSource for GameRng {
    fn pick(&mut self, point: DecisionPoint, candidates: usize) -> usize {
        debug_assert!(candidates > 0, "{point:?} asked to pick from nothing");
        if candidates <= 1 {
            return 0;
        }
        self.inner.gen_range(0..candidates)
    }
}

/// Serializable RNG position.
///
/// The ChaCha8 word position makes save/restore O(1) regardless of how
/// many numbers were drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
    pub forks: u64,
}

/// Replays a fixed script of picks, then falls back to index 0.
///
/// Out-of-range picks are clamped to the last candidate.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDecisions {
    picks: VecDeque<usize>,
    log: Vec<(DecisionPoint, usize)>,
}

impl ScriptedDecisions {
    #[must_use]
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
            log: Vec::new(),
        }
    }

    /// Picks that have not been consumed yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.picks.len()
    }

    /// Every decision asked so far, with the number of candidates.
    #[must_use]
    pub fn log(&self) -> &[(DecisionPoint, usize)] {
        &self.log
    }
}

impl DecisionSource for ScriptedDecisions {
    fn pick(&mut self, point: DecisionPoint, candidates: usize) -> usize {
        self.log.push((point, candidates));
        let pick = self.picks.pop_front().unwrap_or(0);
        pick.min(candidates.saturating_sub(1))
    }
}

/// Fisher–Yates shuffle with every swap drawn from `source`.
pub fn shuffle<T: Clone>(source: &mut dyn DecisionSource, items: &mut Vector<T>) {
    for i in (1..items.len()).rev() {
        let j = source.pick(DecisionPoint::Shuffle, i + 1);
        items.swap(i, j);
    }
}
