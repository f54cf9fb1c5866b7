use crate::question::{Difficulty, Question, QuestionId, QuestionSource};

/// Built-in question content, as shipped by the content crate.
///
/// Selection is a pure function of the bank and its arguments; drawing from
/// the resulting pool is the engine's job.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionBank {
    builtin: Vec<Question>,
    dead_end: Vec<Question>,
}

impl QuestionBank {
    pub fn new(builtin: Vec<Question>, dead_end: Vec<Question>) -> Self {
        Self { builtin, dead_end }
    }

    pub fn builtin(&self) -> &[Question] {
        &self.builtin
    }

    pub fn dead_end(&self) -> &[Question] {
        &self.dead_end
    }

    /// Active question pool for a session.
    ///
    /// - tiers are cumulative: hard sees easy, medium, and hard content
    /// - built-ins listed in `disabled` are skipped
    /// - custom questions ignore `disabled` entirely
    /// - an empty result falls back to every built-in easy question
    pub fn select_pool(
        &self,
        difficulty: Difficulty,
        custom: &[Question],
        disabled: &[QuestionId],
    ) -> Vec<Question> {
        let builtin = self
            .builtin
            .iter()
            .filter(|q| difficulty.includes(q.difficulty))
            .filter(|q| !disabled.contains(&q.id));
        let custom = custom
            .iter()
            .filter(|q| difficulty.includes(q.difficulty))
            .map(|q| Question {
                source: QuestionSource::Custom,
                ..q.clone()
            });

        let pool: Vec<Question> = builtin.cloned().chain(custom).collect();
        if !pool.is_empty() {
            return pool;
        }

        self.builtin
            .iter()
            .filter(|q| q.difficulty == Difficulty::Easy)
            .cloned()
            .collect()
    }

    /// Dead-end questions for a session, using the same cumulative tiers.
    pub fn select_dead_end_pool(&self, difficulty: Difficulty) -> Vec<Question> {
        self.dead_end
            .iter()
            .filter(|q| difficulty.includes(q.difficulty))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn question(id: &str, difficulty: Difficulty) -> Question {
        Question {
            id: QuestionId::new(id),
            text: format!("question {id}"),
            answer: "A".into(),
            explanation: String::new(),
            options: Some(vec!["1".into(), "2".into(), "3".into(), "4".into()]),
            difficulty,
            source: QuestionSource::Builtin,
        }
    }

    fn bank() -> QuestionBank {
        QuestionBank::new(
            vec![
                question("easy-1", Difficulty::Easy),
                question("easy-2", Difficulty::Easy),
                question("medium-1", Difficulty::Medium),
                question("hard-1", Difficulty::Hard),
            ],
            vec![question("dead-easy", Difficulty::Easy), question("dead-hard", Difficulty::Hard)],
        )
    }

    fn ids(pool: &[Question]) -> Vec<&str> {
        pool.iter().map(|q| q.id.as_str()).collect()
    }

    #[test]
    fn tiers_are_strict_supersets() {
        let bank = bank();
        let custom = [question("custom-1", Difficulty::Medium)];
        let disabled = [QuestionId::new("easy-2")];

        let pools: Vec<Vec<Question>> = Difficulty::iter()
            .map(|tier| bank.select_pool(tier, &custom, &disabled))
            .collect();

        for window in pools.windows(2) {
            let (lower, higher) = (&window[0], &window[1]);
            assert!(lower.iter().all(|q| higher.contains(q)));
            assert!(higher.len() > lower.len());
        }
    }

    #[test]
    fn disabled_only_applies_to_builtins() {
        let bank = bank();
        let custom = [question("easy-1", Difficulty::Easy)];
        let disabled = [QuestionId::new("easy-1")];

        let pool = bank.select_pool(Difficulty::Easy, &custom, &disabled);
        assert_eq!(ids(&pool), ["easy-2", "easy-1"]);
        assert_eq!(pool[1].source, QuestionSource::Custom);
    }

    #[test]
    fn empty_selection_falls_back_to_easy_builtins() {
        let bank = bank();
        let disabled = [QuestionId::new("easy-1"), QuestionId::new("easy-2")];

        let pool = bank.select_pool(Difficulty::Easy, &[], &disabled);
        assert_eq!(ids(&pool), ["easy-1", "easy-2"]);
    }

    #[test]
    fn selection_is_deterministic() {
        let bank = bank();
        let a = bank.select_pool(Difficulty::Hard, &[], &[]);
        let b = bank.select_pool(Difficulty::Hard, &[], &[]);
        assert_eq!(a, b);
    }

    #[test]
    fn dead_end_pool_uses_cumulative_tiers() {
        let bank = bank();
        assert_eq!(ids(&bank.select_dead_end_pool(Difficulty::Easy)), ["dead-easy"]);
        assert_eq!(
            ids(&bank.select_dead_end_pool(Difficulty::Hard)),
            ["dead-easy", "dead-hard"]
        );
    }
}
