//! Command dispatch and the movement/question lifecycle.

use crate::env::{ProgressOracle, RngOracle, RngStream, RollSequence};
use crate::maze::MazeGenerator;
use crate::question::Question;
use crate::state::{Cell, Direction, GameState, MazeState, Phase, Position, TimeoutTicket};

use super::command::Command;
use super::errors::CommandError;
use super::events::{CoinReason, GameEvent, MoveReason, SoundCue, Warning};

/// One command in flight: the state, its collaborators, and the events
/// produced so far.
pub(super) struct Transition<'s> {
    pub(super) state: &'s mut GameState,
    pub(super) rng: &'s dyn RngOracle,
    pub(super) progress: &'s dyn ProgressOracle,
    pub(super) events: Vec<GameEvent>,
}

impl<'s> Transition<'s> {
    pub(super) fn new(
        state: &'s mut GameState,
        rng: &'s dyn RngOracle,
        progress: &'s dyn ProgressOracle,
    ) -> Self {
        Self {
            state,
            rng,
            progress,
            events: Vec::new(),
        }
    }

    pub(super) fn finish(self) -> Vec<GameEvent> {
        self.events
    }

    /// Routes a command to its handler. Handlers validate before mutating,
    /// so an `Err` always means the state is unchanged.
    pub(super) fn dispatch(&mut self, command: &Command) -> Result<(), CommandError> {
        if self.state.session.is_complete() {
            return Err(CommandError::SessionComplete);
        }

        match command {
            Command::Move { dx, dy } => self.request_move(*dx, *dy),
            Command::SubmitAnswer(raw) => self.submit_answer(raw),
            Command::ResolveOverride { accept } => self.resolve_override(*accept),
            Command::ResolveDebtRelief { accept } => self.resolve_debt_relief(*accept),
            Command::Timeout { ticket } => self.expire(*ticket),
            Command::Regenerate => self.regenerate(),
        }
    }

    pub(super) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    // ===== directional input =====

    fn request_move(&mut self, dx: i32, dy: i32) -> Result<(), CommandError> {
        let direction =
            Direction::from_delta(dx, dy).ok_or(CommandError::InvalidDirection { dx, dy })?;
        if self.state.session.move_locked {
            return Err(CommandError::MoveLocked);
        }

        let target = self.state.player().step(direction);
        let cell = match self.state.grid().cell(target) {
            None => return Err(CommandError::OutOfBounds { target }),
            Some(Cell::Wall) => return Err(CommandError::Blocked { target }),
            Some(cell) => cell,
        };

        if self.state.session.remaining == 0 {
            if cell == Cell::DeadEnd {
                self.emit(GameEvent::Warning(Warning::DeadEndBlocked));
            } else {
                self.commit(target, MoveReason::Free);
            }
            return Ok(());
        }

        match self.draw_question() {
            Some(question) => self.issue(question, target),
            None => self.commit(target, MoveReason::Free),
        }
        Ok(())
    }

    /// Removes one question from the active pool. While the player stands in
    /// a dead end the dead-end pool is tried first.
    fn draw_question(&mut self) -> Option<Question> {
        let mut rolls = RollSequence::new(
            self.rng,
            self.state.game_seed,
            self.state.nonce,
            RngStream::QuestionDraw,
        );
        let session = &mut self.state.session;

        if session.in_dead_end && !session.dead_end_pool.is_empty() {
            let index = rolls.index(session.dead_end_pool.len());
            let question = session.dead_end_pool.remove(index);
            session.consumed_dead_end.push(question.id.clone());
            return Some(question);
        }

        if session.pool.is_empty() {
            return None;
        }
        let index = rolls.index(session.pool.len());
        Some(session.pool.remove(index))
    }

    fn issue(&mut self, question: Question, target: Position) {
        let ticket = self.state.session.issue_ticket();
        let prompt = question.prompt();

        self.state.session.move_locked = true;
        self.state.session.phase = Phase::AwaitingAnswer {
            question,
            target,
            ticket,
        };

        self.emit(GameEvent::QuestionIssued { prompt, target });
        self.emit(GameEvent::TimeoutArmed {
            ticket,
            ticks: self.state.config.question_timeout,
        });
    }

    // ===== answers and decisions =====

    fn submit_answer(&mut self, raw: &str) -> Result<(), CommandError> {
        let (question, target, ticket) = match std::mem::take(&mut self.state.session.phase) {
            Phase::AwaitingAnswer {
                question,
                target,
                ticket,
            } => (question, target, ticket),
            other => {
                self.state.session.phase = other;
                return Err(CommandError::NoPendingQuestion);
            }
        };

        let correct = question.is_correct(raw);
        self.emit(GameEvent::AnswerEvaluated {
            correct,
            explanation: question.explanation,
        });

        if correct {
            self.emit(GameEvent::Cue(SoundCue::CorrectAnswer));
            self.adjust(self.state.config.correct_answer, CoinReason::CorrectAnswer);
            self.commit(target, MoveReason::Answered);
            self.release(Some(ticket));
            return Ok(());
        }

        self.emit(GameEvent::Cue(SoundCue::WrongAnswer));
        self.adjust(self.state.config.wrong_answer, CoinReason::WrongAnswer);

        let cost = self.state.config.override_cost;
        if self.state.session.balance >= cost {
            self.state.session.phase = Phase::AwaitingOverride { target, ticket };
            self.emit(GameEvent::OverrideOffered { target, cost });
        } else {
            self.retreat(target);
            self.release(Some(ticket));
        }
        Ok(())
    }

    fn resolve_override(&mut self, accept: bool) -> Result<(), CommandError> {
        let Phase::AwaitingOverride { target, ticket } = self.state.session.phase else {
            return Err(CommandError::NoPendingDecision);
        };
        self.state.session.phase = Phase::Idle;

        let cost = self.state.config.override_cost;
        if accept && self.state.session.balance >= cost {
            self.adjust(-cost, CoinReason::Override);
            self.commit(target, MoveReason::Override);
        } else {
            self.retreat(target);
        }
        self.release(Some(ticket));
        Ok(())
    }

    /// Safety timeout: forces the lock open. A pending override offer is
    /// treated as declined.
    fn expire(&mut self, ticket: TimeoutTicket) -> Result<(), CommandError> {
        if self.state.session.phase.ticket() != Some(ticket) {
            return Err(CommandError::StaleTimeout { ticket });
        }

        let pending = std::mem::take(&mut self.state.session.phase);
        self.emit(GameEvent::Warning(Warning::QuestionTimedOut));
        if let Phase::AwaitingOverride { target, .. } = pending {
            self.retreat(target);
        }
        self.release(None);
        Ok(())
    }

    /// Clears the move-lock. `ticket` is the timeout to cancel, if it has
    /// not fired already.
    fn release(&mut self, ticket: Option<TimeoutTicket>) {
        self.state.session.move_locked = false;
        if let Some(ticket) = ticket {
            self.emit(GameEvent::TimeoutCancelled { ticket });
        }
    }

    // ===== movement =====

    /// Moves the player onto `target` and applies every landing effect:
    /// coin pickup, path marking, dead-end penalty, and the exit check.
    fn commit(&mut self, target: Position, reason: MoveReason) {
        let from = self.state.player();
        let counter_before = self.state.session.remaining;
        self.state.maze.player = target;
        self.state.session.first_move = false;
        self.emit(GameEvent::MoveExecuted {
            from,
            to: target,
            reason,
        });

        if self.state.maze.coins.remove(&target) {
            self.state.maze.grid.set(target, Cell::Path);
            self.emit(GameEvent::CoinCollected { position: target });
            self.emit(GameEvent::Cue(SoundCue::CoinCollect));
            self.adjust(self.state.config.coin_pickup, CoinReason::CoinPickup);
        }

        let cell = self.state.grid().cell(target);
        if reason == MoveReason::Answered && cell == Some(Cell::Path) {
            self.state.maze.grid.set(target, Cell::CorrectPath);
        }

        let in_dead_end = cell == Some(Cell::DeadEnd);
        self.state.session.in_dead_end = in_dead_end;
        if in_dead_end {
            self.state.session.last_dead_end = Some(target);
            self.emit(GameEvent::Cue(SoundCue::DeadEnd));
            self.adjust(self.state.config.dead_end, CoinReason::DeadEnd);
        }

        if target != self.state.grid().exit() {
            self.refresh_remaining();
            return;
        }

        // An override skips the question, so it is judged by the counter it
        // started from.
        let counter = if reason == MoveReason::Override {
            counter_before
        } else {
            self.refresh_remaining();
            self.state.session.remaining
        };
        if counter > 0 {
            self.false_exit();
        } else {
            self.complete();
        }
    }

    /// Wrong answer without an override: the failed target becomes a dead
    /// end and the player is sent back to the last recorded one, created or
    /// entered.
    fn retreat(&mut self, failed: Position) {
        let session = &self.state.session;
        let destination = if session.first_move {
            Position::ORIGIN
        } else {
            session.last_dead_end.unwrap_or(Position::ORIGIN)
        };

        let markable = matches!(
            self.state.grid().cell(failed),
            Some(Cell::Path | Cell::CorrectPath)
        );
        if markable && failed != self.state.grid().exit() {
            self.state.maze.grid.set(failed, Cell::DeadEnd);
            self.state.maze.dead_ends.push(failed);
            self.state.session.last_dead_end = Some(failed);
            self.emit(GameEvent::DeadEndMarked { position: failed });
        }

        let from = self.state.player();
        self.state.maze.player = destination;
        self.state.session.first_move = false;
        self.state.session.in_dead_end = self.state.player_in_dead_end();
        self.emit(GameEvent::MoveExecuted {
            from,
            to: destination,
            reason: MoveReason::Retreat,
        });
        self.emit(GameEvent::Cue(SoundCue::DeadEnd));
        self.adjust(self.state.config.dead_end, CoinReason::DeadEnd);
        self.refresh_remaining();
    }

    fn false_exit(&mut self) {
        let from = self.state.player();
        self.emit(GameEvent::Warning(Warning::FalseExit));
        self.state.maze.player = Position::ORIGIN;
        self.state.session.in_dead_end = self.state.player_in_dead_end();
        self.emit(GameEvent::MoveExecuted {
            from,
            to: Position::ORIGIN,
            reason: MoveReason::FalseExit,
        });
        self.refresh_remaining();
    }

    /// Recomputes the remaining counter, reporting an unreachable exit.
    fn refresh_remaining(&mut self) {
        if !self.state.recompute_remaining() {
            self.emit(GameEvent::ConsistencyViolation {
                from: self.state.player(),
            });
        }
        self.emit(GameEvent::RemainingChanged {
            remaining: self.state.session.remaining,
        });
    }

    // ===== maze lifecycle =====

    fn regenerate(&mut self) -> Result<(), CommandError> {
        if self.state.session.move_locked {
            return Err(CommandError::MoveLocked);
        }

        let generation = self.state.maze.generation + 1;
        let layout = MazeGenerator::new(self.rng, self.state.game_seed, &self.state.config)
            .generate(self.state.difficulty, generation);
        self.state.maze = MazeState::from_layout(layout, generation);
        let in_dead_end = self.state.player_in_dead_end();

        let session = &mut self.state.session;
        session.last_dead_end = None;
        session.first_move = true;
        session.in_dead_end = in_dead_end;

        self.emit(GameEvent::MazeRegenerated {
            size: self.state.grid().size(),
            digest: self.state.grid().digest(),
        });
        self.refresh_remaining();
        Ok(())
    }
}
