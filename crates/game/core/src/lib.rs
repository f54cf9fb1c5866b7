//! Deterministic rules of the quiz maze.
//!
//! `maze-core` carves mazes, answers shortest-distance queries, selects the
//! question pool, and runs the progression state machine that gates movement
//! behind answers. It performs no I/O: randomness and persistence come in
//! through the oracles in [`env`], and every state change goes out as a
//! [`GameEvent`]. All state mutation flows through [`engine::GameEngine`].
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod maze;
pub mod question;
pub mod state;

pub use config::{GameConfig, PerDifficulty};
pub use engine::{
    CoinReason, Command, CommandError, ExecuteError, ExecutionOutcome, GameEngine, GameEvent,
    MoveReason, RunSummary, SoundCue, Warning, start_session,
};
pub use env::{
    Env, GameEnv, OracleError, PcgRng, ProgressError, ProgressOracle, RngOracle, RngStream,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use maze::{MazeGenerator, MazeLayout, shortest_distance};
pub use question::{
    Difficulty, DifficultySet, OPTION_LETTERS, Question, QuestionBank, QuestionId, QuestionPrompt,
    QuestionSource,
};
pub use state::{Cell, Direction, GameState, Grid, MazeState, Phase, Position, SessionState, TimeoutTicket};
