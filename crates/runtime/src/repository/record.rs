//! Serialized shape of stored progress.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use maze_core::{Difficulty, Question, QuestionId, QuestionSource};

/// Everything a progress repository keeps.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressRecord {
    pub custom_questions: Vec<Question>,
    /// Built-in ids excluded from selection.
    pub disabled_ids: Vec<QuestionId>,
    pub completed: BTreeSet<Difficulty>,
    pub total_coins: i64,
}

impl ProgressRecord {
    /// Replaces the custom set, tagging every entry as player-authored.
    pub fn set_custom_questions(&mut self, questions: Vec<Question>) {
        self.custom_questions = questions
            .into_iter()
            .map(|question| Question {
                source: QuestionSource::Custom,
                ..question
            })
            .collect();
    }

    pub fn set_disabled_ids(&mut self, mut ids: Vec<QuestionId>) {
        ids.sort();
        ids.dedup();
        self.disabled_ids = ids;
    }
}
