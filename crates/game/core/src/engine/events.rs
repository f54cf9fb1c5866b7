//! Observable outcomes of command execution.
//!
//! Events are the only channel from the core to renderers, prompt and audio
//! collaborators. They are emitted in the order the state changed.

use crate::env::ProgressError;
use crate::question::{Difficulty, QuestionPrompt};
use crate::state::{Position, TimeoutTicket};

/// Why the player changed cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveReason {
    /// No question was required.
    Free,
    /// A correct answer unlocked the move.
    Answered,
    /// Paid override after a wrong answer.
    Override,
    /// Sent back after a wrong answer.
    Retreat,
    /// Reached the exit too early.
    FalseExit,
}

/// Why the balance changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoinReason {
    CorrectAnswer,
    WrongAnswer,
    Override,
    DeadEnd,
    CoinPickup,
    DebtRelief,
}

/// Player-facing notices that do not change position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Warning {
    /// The exit was reached while questions remain.
    FalseExit,
    /// Dead ends are closed once nothing is left to answer.
    DeadEndBlocked,
    /// The safety timeout forced the lock open.
    QuestionTimedOut,
}

/// Fire-and-forget audio signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SoundCue {
    CorrectAnswer,
    WrongAnswer,
    CoinCollect,
    DeadEnd,
}

/// Result of a completed run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    pub difficulty: Difficulty,
    /// Session balance carried into the persistent total.
    pub balance: i64,
    pub completion_bonus: i64,
    /// Non-zero only on the completion that finished every tier.
    pub all_clear_bonus: i64,
    /// Persistent total after this run.
    pub total_coins: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    /// A question was drawn for a move towards `target`.
    QuestionIssued {
        prompt: QuestionPrompt,
        target: Position,
    },
    /// The caller must fire `Timeout { ticket }` after `ticks` units.
    TimeoutArmed { ticket: TimeoutTicket, ticks: u64 },
    /// The armed timeout must not fire any more.
    TimeoutCancelled { ticket: TimeoutTicket },
    AnswerEvaluated { correct: bool, explanation: String },
    MoveExecuted {
        from: Position,
        to: Position,
        reason: MoveReason,
    },
    CoinsChanged {
        delta: i64,
        balance: i64,
        reason: CoinReason,
    },
    CoinCollected { position: Position },
    /// Wrong answer with enough coins: pay `cost` to move anyway.
    OverrideOffered { target: Position, cost: i64 },
    /// Balance reached the debt threshold.
    DebtReliefOffered { balance: i64 },
    /// A failed target became a dead end.
    DeadEndMarked { position: Position },
    RemainingChanged { remaining: u32 },
    Warning(Warning),
    Cue(SoundCue),
    /// The exit is unreachable from the player; `remaining` was forced to 0.
    ConsistencyViolation { from: Position },
    MazeRegenerated { size: usize, digest: [u8; 32] },
    GameCompleted(RunSummary),
    /// A progress write or read failed; the transition went ahead regardless.
    PersistenceFailed(ProgressError),
}
