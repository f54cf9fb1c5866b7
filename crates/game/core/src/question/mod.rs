//! Question records, difficulty tiers, and pool selection.
//!
//! Question content is external data: `maze-content` ships the built-in bank,
//! players author custom questions through the progress store. The core only
//! decides which records make up a session's pool and checks answers.

mod selector;

use std::fmt;

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

pub use selector::QuestionBank;

/// Difficulty tier of a session and of individual questions.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, EnumString, AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Side length of the maze grid.
    pub const fn grid_size(self) -> usize {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Medium => 7,
            Difficulty::Hard => 9,
        }
    }

    /// Question tiers visible at this difficulty (cumulative).
    pub fn tiers(self) -> impl Iterator<Item = Difficulty> {
        Difficulty::iter().filter(move |tier| *tier <= self)
    }

    pub fn includes(self, tier: Difficulty) -> bool {
        tier <= self
    }

    pub const fn flag(self) -> DifficultySet {
        match self {
            Difficulty::Easy => DifficultySet::EASY,
            Difficulty::Medium => DifficultySet::MEDIUM,
            Difficulty::Hard => DifficultySet::HARD,
        }
    }
}

bitflags::bitflags! {
    /// Set of completed difficulty tiers.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct DifficultySet: u8 {
        const EASY = 1 << 0;
        const MEDIUM = 1 << 1;
        const HARD = 1 << 2;
    }
}

impl FromIterator<Difficulty> for DifficultySet {
    fn from_iter<T: IntoIterator<Item = Difficulty>>(iter: T) -> Self {
        iter.into_iter()
            .fold(DifficultySet::empty(), |set, tier| set | tier.flag())
    }
}

/// Stable identifier of a question (`easy-03`, `custom-7`, ...).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct QuestionId(pub String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a question came from. Only built-ins can be disabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuestionSource {
    #[default]
    Builtin,
    Custom,
}

/// Option labels for fixed-choice questions, in display order.
pub const OPTION_LETTERS: [&str; 4] = ["A", "B", "C", "D"];

/// Immutable question record.
///
/// `answer` is one of [`OPTION_LETTERS`] for fixed-choice questions and free
/// text for legacy questions without options.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub answer: String,
    pub explanation: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub options: Option<Vec<String>>,
    pub difficulty: Difficulty,
    #[cfg_attr(feature = "serde", serde(default))]
    pub source: QuestionSource,
}

impl Question {
    /// Case-insensitive comparison of trimmed input against the canonical answer.
    pub fn is_correct(&self, raw: &str) -> bool {
        let given = raw.trim();
        !given.is_empty() && given.to_lowercase() == self.answer.trim().to_lowercase()
    }

    /// What the prompt collaborator is allowed to see.
    pub fn prompt(&self) -> QuestionPrompt {
        QuestionPrompt {
            id: self.id.clone(),
            text: self.text.clone(),
            options: self.options.clone().unwrap_or_default(),
        }
    }
}

/// Question as shown to the player: no answer, no explanation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestionPrompt {
    pub id: QuestionId,
    pub text: String,
    pub options: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(answer: &str) -> Question {
        Question {
            id: QuestionId::new("q"),
            text: "?".into(),
            answer: answer.into(),
            explanation: String::new(),
            options: None,
            difficulty: Difficulty::Easy,
            source: QuestionSource::Builtin,
        }
    }

    #[test]
    fn answers_are_trimmed_and_case_insensitive() {
        let q = question("B");
        assert!(q.is_correct("b"));
        assert!(q.is_correct("  B \n"));
        assert!(!q.is_correct("c"));
        assert!(!q.is_correct(""));

        let free = question("Thread visibility");
        assert!(free.is_correct("thread VISIBILITY "));
        assert!(!free.is_correct("thread"));
    }

    #[test]
    fn tiers_are_cumulative() {
        assert_eq!(Difficulty::Easy.tiers().collect::<Vec<_>>(), [Difficulty::Easy]);
        assert_eq!(
            Difficulty::Hard.tiers().collect::<Vec<_>>(),
            [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
        );
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("MEDIUM".parse::<Difficulty>().ok(), Some(Difficulty::Medium));
        assert_eq!(Difficulty::Hard.to_string(), "hard");
    }

    #[test]
    fn difficulty_set_collects_flags() {
        let set: DifficultySet = [Difficulty::Easy, Difficulty::Hard].into_iter().collect();
        assert!(set.contains(DifficultySet::EASY | DifficultySet::HARD));
        assert!(!set.contains(DifficultySet::MEDIUM));
        assert!(!set.is_all());
    }
}
