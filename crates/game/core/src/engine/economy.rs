//! Coin balance, debt relief, and run completion.

use crate::env::ProgressError;
use crate::question::DifficultySet;
use crate::state::Phase;

use super::errors::CommandError;
use super::events::{CoinReason, GameEvent, RunSummary};
use super::transition::Transition;

impl Transition<'_> {
    /// Applies a signed balance change, then re-evaluates the debt offer.
    pub(super) fn adjust(&mut self, delta: i64, reason: CoinReason) {
        let session = &mut self.state.session;
        session.balance += delta;
        let balance = session.balance;
        self.emit(GameEvent::CoinsChanged {
            delta,
            balance,
            reason,
        });
        self.check_debt();
    }

    /// Offers relief whenever the balance sits at or below the threshold and
    /// no offer is open. An open offer is withdrawn once the balance recovers.
    fn check_debt(&mut self) {
        let threshold = self.state.config.debt_threshold;
        let session = &mut self.state.session;
        match (session.balance <= threshold, session.debt_relief_pending) {
            (true, false) => {
                session.debt_relief_pending = true;
                let balance = session.balance;
                self.emit(GameEvent::DebtReliefOffered { balance });
            }
            (false, true) => session.debt_relief_pending = false,
            _ => {}
        }
    }

    pub(super) fn resolve_debt_relief(&mut self, accept: bool) -> Result<(), CommandError> {
        if !self.state.session.debt_relief_pending {
            return Err(CommandError::NoPendingDecision);
        }
        self.state.session.debt_relief_pending = false;

        if accept {
            let delta = -self.state.session.balance;
            self.state.session.balance = 0;
            self.emit(GameEvent::CoinsChanged {
                delta,
                balance: 0,
                reason: CoinReason::DebtRelief,
            });
        }
        Ok(())
    }

    /// Records the completed tier and banks the session balance plus bonuses.
    ///
    /// Progress failures are reported and skipped; the run completes anyway.
    /// The total is only written back when it could be read.
    pub(super) fn complete(&mut self) {
        let difficulty = self.state.difficulty;
        let config = &self.state.config;
        let (completion_bonus, all_clear) = (config.completion_bonus, config.all_clear_bonus);
        let balance = self.state.session.balance;

        let completed: DifficultySet = match self.progress.load_completed_difficulties() {
            Ok(tiers) => tiers.into_iter().collect(),
            Err(error) => {
                self.persistence_failed(error);
                DifficultySet::empty()
            }
        };
        if let Err(error) = self.progress.save_completed_difficulty(difficulty) {
            self.persistence_failed(error);
        }

        let now_completed = completed | difficulty.flag();
        let all_clear_bonus = if !completed.is_all() && now_completed.is_all() {
            all_clear
        } else {
            0
        };
        let earned = balance + completion_bonus + all_clear_bonus;

        let total_coins = match self.progress.load_total_coins() {
            Ok(previous) => {
                let total = previous + earned;
                if let Err(error) = self.progress.save_total_coins(total) {
                    self.persistence_failed(error);
                }
                total
            }
            Err(error) => {
                self.persistence_failed(error);
                earned
            }
        };

        let session = &mut self.state.session;
        session.phase = Phase::Complete;
        session.move_locked = false;
        self.emit(GameEvent::GameCompleted(RunSummary {
            difficulty,
            balance,
            completion_bonus,
            all_clear_bonus,
            total_coins,
        }));
    }

    fn persistence_failed(&mut self, error: ProgressError) {
        self.emit(GameEvent::PersistenceFailed(error));
    }
}
