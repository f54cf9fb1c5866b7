use crate::question::Difficulty;

/// Game configuration constants and tunable parameters.
///
/// Coin amounts are signed deltas applied to the session balance, so penalties
/// are stored as negative numbers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Awarded for a correct answer.
    pub correct_answer: i64,
    /// Applied for a wrong answer.
    pub wrong_answer: i64,
    /// Applied when the player is sent back to a dead end or walks into one.
    pub dead_end: i64,
    /// Awarded once per collected coin cell.
    pub coin_pickup: i64,
    /// Price of moving anyway after a wrong answer.
    pub override_cost: i64,
    /// Balance at or below which a reset-to-zero is offered.
    pub debt_threshold: i64,
    /// Ticks an issued question may stay unanswered before the lock is forced open.
    pub question_timeout: u64,
    /// Added to the persistent total on every completed run.
    pub completion_bonus: i64,
    /// Added once when the last remaining difficulty is completed.
    pub all_clear_bonus: i64,
    /// Upper bound on generation-time dead ends.
    pub max_dead_ends: usize,
    /// Coin cells seeded into a fresh maze.
    pub coins: PerDifficulty<usize>,
    /// Shortest acceptable origin-to-exit distance for a generated maze.
    pub min_exit_distance: PerDifficulty<u32>,
}

/// One value per difficulty tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerDifficulty<T> {
    pub easy: T,
    pub medium: T,
    pub hard: T,
}

impl<T: Copy> PerDifficulty<T> {
    pub const fn new(easy: T, medium: T, hard: T) -> Self {
        Self { easy, medium, hard }
    }

    pub fn get(&self, difficulty: Difficulty) -> T {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

impl GameConfig {
    // ===== compile-time constants =====
    pub const CORRECT_ANSWER: i64 = 10;
    pub const WRONG_ANSWER: i64 = -5;
    pub const DEAD_END: i64 = -2;
    pub const COIN_PICKUP: i64 = 5;
    pub const OVERRIDE_COST: i64 = 5;
    pub const DEBT_THRESHOLD: i64 = -50;
    pub const QUESTION_TIMEOUT: u64 = 30;
    pub const COMPLETION_BONUS: i64 = 50;
    pub const ALL_CLEAR_BONUS: i64 = 200;
    pub const MAX_DEAD_ENDS: usize = 8;
    pub const COINS: PerDifficulty<usize> = PerDifficulty::new(3, 4, 5);
    pub const MIN_EXIT_DISTANCE: PerDifficulty<u32> = PerDifficulty::new(5, 10, 15);

    /// Random placement attempts for generation-time dead ends.
    pub const DEAD_END_ATTEMPTS: usize = 100;
    /// Re-carve attempts when the exit ends up too close to the origin.
    pub const MAX_CARVE_ATTEMPTS: u32 = 16;

    pub fn new() -> Self {
        Self {
            correct_answer: Self::CORRECT_ANSWER,
            wrong_answer: Self::WRONG_ANSWER,
            dead_end: Self::DEAD_END,
            coin_pickup: Self::COIN_PICKUP,
            override_cost: Self::OVERRIDE_COST,
            debt_threshold: Self::DEBT_THRESHOLD,
            question_timeout: Self::QUESTION_TIMEOUT,
            completion_bonus: Self::COMPLETION_BONUS,
            all_clear_bonus: Self::ALL_CLEAR_BONUS,
            max_dead_ends: Self::MAX_DEAD_ENDS,
            coins: Self::COINS,
            min_exit_distance: Self::MIN_EXIT_DISTANCE,
        }
    }

    pub fn coins_for(&self, difficulty: Difficulty) -> usize {
        self.coins.get(difficulty)
    }

    pub fn exit_distance_for(&self, difficulty: Difficulty) -> u32 {
        self.min_exit_distance.get(difficulty)
    }

    /// Number of dead ends to place on an `size`×`size` grid.
    pub fn dead_ends_for(&self, size: usize) -> usize {
        self.max_dead_ends.min(size * 3 / 2)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
