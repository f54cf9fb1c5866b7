//! Authoritative session state.
//!
//! [`GameState`] bundles the maze (grid, player, special cells) with the
//! progression bookkeeping (balance, remaining counter, move-lock, pending
//! question). Runtime layers clone or query this state but mutate it
//! exclusively through the engine.
mod common;
mod grid;

use std::collections::BTreeSet;

pub use common::{Direction, Position, TimeoutTicket};
pub use grid::{Cell, Grid, GridParseError};

use crate::config::GameConfig;
use crate::env::RngOracle;
use crate::maze::{MazeGenerator, MazeLayout, shortest_distance};
use crate::question::{Difficulty, Question, QuestionId};

/// Where the progression state machine currently stands.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Awaiting directional input.
    #[default]
    Idle,
    /// A question is in flight for a move towards `target`.
    AwaitingAnswer {
        question: Question,
        target: Position,
        ticket: TimeoutTicket,
    },
    /// The answer was wrong and the player may pay to move anyway.
    AwaitingOverride {
        target: Position,
        ticket: TimeoutTicket,
    },
    /// The exit was reached with nothing left to answer.
    Complete,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::AwaitingAnswer { .. } => "awaiting_answer",
            Phase::AwaitingOverride { .. } => "awaiting_override",
            Phase::Complete => "complete",
        }
    }

    /// Ticket of the safety timeout armed for the current round-trip.
    pub fn ticket(&self) -> Option<TimeoutTicket> {
        match self {
            Phase::AwaitingAnswer { ticket, .. } | Phase::AwaitingOverride { ticket, .. } => {
                Some(*ticket)
            }
            Phase::Idle | Phase::Complete => None,
        }
    }
}

/// Maze half of the state: everything a renderer needs.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeState {
    pub grid: Grid,
    pub player: Position,
    /// Uncollected coin cells.
    pub coins: BTreeSet<Position>,
    /// Dead ends in creation order. The retreat target is tracked separately
    /// in [`SessionState::last_dead_end`].
    pub dead_ends: Vec<Position>,
    /// Maze generation counter, bumped on every regeneration.
    pub generation: u64,
}

impl MazeState {
    pub fn from_layout(layout: MazeLayout, generation: u64) -> Self {
        Self {
            grid: layout.grid,
            player: Position::ORIGIN,
            coins: layout.coins,
            dead_ends: layout.dead_ends,
            generation,
        }
    }

    /// Builds a maze from an existing grid, deriving coins and dead ends from
    /// its markings. The origin is not listed as a dead end.
    pub fn from_grid(grid: Grid) -> Self {
        let coins = grid.positions_of(Cell::Coin).collect();
        let dead_ends = grid
            .positions_of(Cell::DeadEnd)
            .filter(|p| *p != Position::ORIGIN)
            .collect();
        Self {
            grid,
            player: Position::ORIGIN,
            coins,
            dead_ends,
            generation: 0,
        }
    }

    pub fn at_exit(&self) -> bool {
        self.player == self.grid.exit()
    }
}

/// Progression bookkeeping for one session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    /// Signed coin balance; negative values are debt.
    pub balance: i64,
    /// Shortest distance from the player to the exit. Derived, recomputed
    /// after every position or maze change.
    pub remaining: u32,
    /// Held while a question or override offer is pending.
    pub move_locked: bool,
    /// Retreat target: the most recently recorded dead end, either created by
    /// a failed answer or entered by the player.
    pub last_dead_end: Option<Position>,
    /// True until the first move of the current maze commits.
    pub first_move: bool,
    /// True while the player occupies a `DeadEnd` cell.
    pub in_dead_end: bool,
    /// Questions not yet asked this session.
    pub pool: Vec<Question>,
    /// Dead-end questions not yet asked this session.
    pub dead_end_pool: Vec<Question>,
    /// Ids of dead-end questions already asked.
    pub consumed_dead_end: Vec<QuestionId>,
    pub debt_relief_pending: bool,
    pub phase: Phase,
    /// Last issued timeout ticket.
    pub last_ticket: TimeoutTicket,
}

impl SessionState {
    pub fn new(pool: Vec<Question>, dead_end_pool: Vec<Question>) -> Self {
        Self {
            balance: 0,
            remaining: 0,
            move_locked: false,
            last_dead_end: None,
            first_move: true,
            in_dead_end: false,
            pool,
            dead_end_pool,
            consumed_dead_end: Vec::new(),
            debt_relief_pending: false,
            phase: Phase::Idle,
            last_ticket: TimeoutTicket::default(),
        }
    }

    /// Issues a fresh ticket for a new question round-trip.
    pub fn issue_ticket(&mut self) -> TimeoutTicket {
        self.last_ticket = self.last_ticket.next();
        self.last_ticket
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, Phase::Complete)
    }
}

/// Canonical snapshot of the deterministic session state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed for every random draw of the session.
    ///
    /// Set once at creation and never modified. Combined with `nonce` (question
    /// draws) or `maze.generation` (layouts) to derive per-roll seeds.
    pub game_seed: u64,

    /// Number of executed commands.
    pub nonce: u64,

    pub difficulty: Difficulty,
    pub config: GameConfig,
    pub maze: MazeState,
    pub session: SessionState,
}

impl GameState {
    /// Starts a session on a freshly generated maze.
    pub fn new(
        config: GameConfig,
        difficulty: Difficulty,
        game_seed: u64,
        rng: &dyn RngOracle,
        pool: Vec<Question>,
        dead_end_pool: Vec<Question>,
    ) -> Self {
        let layout = MazeGenerator::new(rng, game_seed, &config).generate(difficulty, 0);
        Self::assemble(
            config,
            difficulty,
            game_seed,
            MazeState::from_layout(layout, 0),
            pool,
            dead_end_pool,
        )
    }

    /// Starts a session on a prepared grid.
    pub fn from_grid(
        config: GameConfig,
        difficulty: Difficulty,
        game_seed: u64,
        grid: Grid,
        pool: Vec<Question>,
        dead_end_pool: Vec<Question>,
    ) -> Self {
        Self::assemble(
            config,
            difficulty,
            game_seed,
            MazeState::from_grid(grid),
            pool,
            dead_end_pool,
        )
    }

    fn assemble(
        config: GameConfig,
        difficulty: Difficulty,
        game_seed: u64,
        maze: MazeState,
        pool: Vec<Question>,
        dead_end_pool: Vec<Question>,
    ) -> Self {
        let mut state = Self {
            game_seed,
            nonce: 0,
            difficulty,
            config,
            maze,
            session: SessionState::new(pool, dead_end_pool),
        };
        state.session.in_dead_end = state.player_in_dead_end();
        state.recompute_remaining();
        state
    }

    /// Whether the player's cell is marked `DeadEnd`. Generated mazes mark
    /// the origin, so this holds at the start of every fresh maze.
    pub fn player_in_dead_end(&self) -> bool {
        self.maze.grid.cell(self.maze.player) == Some(Cell::DeadEnd)
    }

    /// Refreshes the remaining counter from the player's position.
    ///
    /// Returns `false` when the exit is unreachable; the counter is then set
    /// to zero so the session cannot get stuck.
    pub fn recompute_remaining(&mut self) -> bool {
        let distance = shortest_distance(&self.maze.grid, self.maze.player, self.maze.grid.exit());
        self.session.remaining = distance.unwrap_or(0);
        distance.is_some()
    }

    pub fn player(&self) -> Position {
        self.maze.player
    }

    pub fn grid(&self) -> &Grid {
        &self.maze.grid
    }
}
