//! Read-only session views for renderers.

use maze_core::{
    Difficulty, GameState, Grid, Phase, Position, QuestionPrompt, TimeoutTicket,
};

/// What is pending, without the answer of an open question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PhaseView {
    Idle,
    AwaitingAnswer {
        prompt: QuestionPrompt,
        target: Position,
        ticket: TimeoutTicket,
    },
    AwaitingOverride {
        target: Position,
        cost: i64,
    },
    Complete,
}

impl PhaseView {
    fn of(state: &GameState) -> Self {
        match &state.session.phase {
            Phase::Idle => PhaseView::Idle,
            Phase::AwaitingAnswer {
                question,
                target,
                ticket,
            } => PhaseView::AwaitingAnswer {
                prompt: question.prompt(),
                target: *target,
                ticket: *ticket,
            },
            Phase::AwaitingOverride { target, .. } => PhaseView::AwaitingOverride {
                target: *target,
                cost: state.config.override_cost,
            },
            Phase::Complete => PhaseView::Complete,
        }
    }
}

/// Copy of everything a renderer needs to draw one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub grid: Grid,
    pub player: Position,
    pub remaining: u32,
    pub balance: i64,
    pub phase: PhaseView,
    pub difficulty: Difficulty,
    pub move_locked: bool,
    pub debt_relief_pending: bool,
    pub generation: u64,
    pub seed: u64,
}

impl SessionSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            grid: state.maze.grid.clone(),
            player: state.maze.player,
            remaining: state.session.remaining,
            balance: state.session.balance,
            phase: PhaseView::of(state),
            difficulty: state.difficulty,
            move_locked: state.session.move_locked,
            debt_relief_pending: state.session.debt_relief_pending,
            generation: state.maze.generation,
            seed: state.game_seed,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase == PhaseView::Complete
    }

    /// ASCII rendering with the player drawn as `@`.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.grid.size() + 1) * self.grid.size());
        for (row, cells) in self.grid.rows().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let here = Position::new(col as i32, row as i32);
                out.push(if here == self.player {
                    '@'
                } else {
                    cell.as_char()
                });
            }
            out.push('\n');
        }
        out
    }
}
