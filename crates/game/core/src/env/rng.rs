//! RNG oracle for deterministic random number generation.
//!
//! Maze carving, dead-end and coin placement, and question draws all take
//! their randomness from an [`RngOracle`] keyed by derived seeds. Given the
//! same session seed, a session replays identically.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }

    /// Uniform index into a collection of `len` elements (`len` must be > 0).
    fn index(&self, seed: u64, len: usize) -> usize {
        self.range(seed, 0, len.saturating_sub(1) as u32) as usize
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 32-bit output from 64-bit state. A single step is
/// applied per seed, so callers derive a fresh seed for every roll via
/// [`compute_seed`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Independent random streams within one session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RngStream {
    Carve = 1,
    DeadEnds = 2,
    Coins = 3,
    QuestionDraw = 4,
}

/// Compute deterministic seed from session components.
///
/// * `game_seed` - Base seed set at session start
/// * `nonce` - Command sequence number, or maze generation counter
/// * `stream` - Which subsystem is rolling
/// * `counter` - Roll index within the same nonce and stream
pub fn compute_seed(game_seed: u64, nonce: u64, stream: RngStream, counter: u32) -> u64 {
    // SplitMix64 / FxHash style mixing
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (stream as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (counter as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Sequence of rolls sharing a seed, nonce, and stream.
pub struct RollSequence<'a> {
    rng: &'a dyn RngOracle,
    game_seed: u64,
    nonce: u64,
    stream: RngStream,
    counter: u32,
}

impl<'a> RollSequence<'a> {
    pub fn new(rng: &'a dyn RngOracle, game_seed: u64, nonce: u64, stream: RngStream) -> Self {
        Self {
            rng,
            game_seed,
            nonce,
            stream,
            counter: 0,
        }
    }

    fn next_seed(&mut self) -> u64 {
        let seed = compute_seed(self.game_seed, self.nonce, self.stream, self.counter);
        self.counter = self.counter.wrapping_add(1);
        seed
    }

    /// Uniform index in `0..len` (`len` must be > 0).
    pub fn index(&mut self, len: usize) -> usize {
        let seed = self.next_seed();
        self.rng.index(seed, len)
    }

    /// Fisher–Yates shuffle.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }
}
