//! Repository trait definitions.

use maze_core::{ProgressOracle, Question, QuestionId};

use super::{ProgressRecord, Result};

/// Storage of a [`ProgressRecord`], usable as the core's progress port.
pub trait ProgressRepository: ProgressOracle {
    /// Reads the whole record; an empty store yields the default.
    fn load(&self) -> Result<ProgressRecord>;

    /// Applies `update` to the stored record and writes it back.
    fn update(&self, update: &mut dyn FnMut(&mut ProgressRecord)) -> Result<()>;

    /// The same repository seen through the core port.
    fn as_oracle(&self) -> &dyn ProgressOracle;

    fn save_custom_questions(&self, questions: Vec<Question>) -> Result<()> {
        let mut questions = Some(questions);
        self.update(&mut |record| {
            if let Some(questions) = questions.take() {
                record.set_custom_questions(questions);
            }
        })
    }

    fn save_disabled_ids(&self, ids: Vec<QuestionId>) -> Result<()> {
        let mut ids = Some(ids);
        self.update(&mut |record| {
            if let Some(ids) = ids.take() {
                record.set_disabled_ids(ids);
            }
        })
    }
}

/// Implements [`ProgressOracle`] for a type in terms of its
/// [`ProgressRepository::load`] and [`ProgressRepository::update`].
macro_rules! progress_oracle_via_record {
    ($repo:ty) => {
        impl maze_core::ProgressOracle for $repo {
            fn load_custom_questions(
                &self,
            ) -> std::result::Result<Vec<maze_core::Question>, maze_core::ProgressError> {
                Ok(self.load()?.custom_questions)
            }

            fn load_disabled_ids(
                &self,
            ) -> std::result::Result<Vec<maze_core::QuestionId>, maze_core::ProgressError> {
                Ok(self.load()?.disabled_ids)
            }

            fn load_completed_difficulties(
                &self,
            ) -> std::result::Result<Vec<maze_core::Difficulty>, maze_core::ProgressError> {
                Ok(self.load()?.completed.into_iter().collect())
            }

            fn save_completed_difficulty(
                &self,
                tier: maze_core::Difficulty,
            ) -> std::result::Result<(), maze_core::ProgressError> {
                self.update(&mut |record| {
                    record.completed.insert(tier);
                })?;
                Ok(())
            }

            fn load_total_coins(&self) -> std::result::Result<i64, maze_core::ProgressError> {
                Ok(self.load()?.total_coins)
            }

            fn save_total_coins(
                &self,
                total: i64,
            ) -> std::result::Result<(), maze_core::ProgressError> {
                self.update(&mut |record| record.total_coins = total)?;
                Ok(())
            }
        }
    };
}

pub(super) use progress_oracle_via_record;
