use crate::state::{Direction, TimeoutTicket};

/// External event fed to the state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// Directional intent. Only unit axis vectors are accepted.
    Move { dx: i32, dy: i32 },
    /// Raw answer from the prompt collaborator.
    SubmitAnswer(String),
    /// Player decision on a paid override after a wrong answer.
    ResolveOverride { accept: bool },
    /// Player decision on resetting a debt to zero.
    ResolveDebtRelief { accept: bool },
    /// Safety timeout fired.
    Timeout { ticket: TimeoutTicket },
    /// Replace the maze, keeping balance and question pool.
    Regenerate,
}

impl Command {
    pub fn step(direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Command::Move { dx, dy }
    }

    pub fn answer(raw: impl Into<String>) -> Self {
        Command::SubmitAnswer(raw.into())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Move { .. } => "move",
            Command::SubmitAnswer(_) => "submit_answer",
            Command::ResolveOverride { .. } => "resolve_override",
            Command::ResolveDebtRelief { .. } => "resolve_debt_relief",
            Command::Timeout { .. } => "timeout",
            Command::Regenerate => "regenerate",
        }
    }
}
