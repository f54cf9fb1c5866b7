//! Question catalog loader.

use std::collections::HashSet;
use std::path::Path;

use maze_core::{OPTION_LETTERS, Question, QuestionSource};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Question catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionCatalog {
    pub questions: Vec<Question>,
}

/// Loader for question catalogs from RON files.
pub struct QuestionLoader;

impl QuestionLoader {
    /// Load a catalog of player-authored questions.
    ///
    /// Every record is tagged [`QuestionSource::Custom`] regardless of what
    /// the file says, so disabling never applies to it.
    pub fn load_custom(path: &Path) -> LoadResult<Vec<Question>> {
        let content = read_file(path)?;
        let questions = Self::parse(&content)?
            .into_iter()
            .map(|question| Question {
                source: QuestionSource::Custom,
                ..question
            })
            .collect();
        Ok(questions)
    }

    /// Parse and validate a RON catalog.
    ///
    /// Ids must be unique and answers non-empty; fixed-choice questions need
    /// two to four options and a letter answer that points at one of them.
    pub fn parse(content: &str) -> LoadResult<Vec<Question>> {
        let catalog: QuestionCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse question catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for question in &catalog.questions {
            if !seen.insert(question.id.clone()) {
                anyhow::bail!("Duplicate question id '{}'", question.id);
            }
            validate(question)?;
        }

        Ok(catalog.questions)
    }
}

fn validate(question: &Question) -> LoadResult<()> {
    let answer = question.answer.trim();
    if answer.is_empty() {
        anyhow::bail!("Question '{}' has an empty answer", question.id);
    }

    let Some(options) = &question.options else {
        return Ok(());
    };
    if !(2..=OPTION_LETTERS.len()).contains(&options.len()) {
        anyhow::bail!(
            "Question '{}' has {} options, expected 2 to {}",
            question.id,
            options.len(),
            OPTION_LETTERS.len()
        );
    }
    let letter = OPTION_LETTERS[..options.len()]
        .iter()
        .any(|letter| letter.eq_ignore_ascii_case(answer));
    if !letter {
        anyhow::bail!(
            "Question '{}' answer '{}' is not one of its option letters",
            question.id,
            answer
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ENTRY: &str = r#"(
        id: "custom-1",
        text: "What does `final` mean on a variable?",
        options: Some(["Mutable", "Assigned once", "Static", "Volatile"]),
        answer: "B",
        explanation: "A final variable can be assigned only once.",
        difficulty: medium,
    )"#;

    fn catalog(entries: &[&str]) -> String {
        format!("QuestionCatalog(questions: [{}])", entries.join(", "))
    }

    #[test]
    fn custom_questions_are_tagged_custom() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(catalog(&[ENTRY]).as_bytes()).unwrap();

        let questions = QuestionLoader::load_custom(file.path()).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].source, QuestionSource::Custom);
        assert_eq!(questions[0].id.as_str(), "custom-1");
        assert!(questions[0].is_correct("b"));
    }

    #[test]
    fn answer_must_name_an_option() {
        let bad = ENTRY.replace(r#"answer: "B""#, r#"answer: "E""#);
        let err = QuestionLoader::parse(&catalog(&[&bad])).unwrap_err();
        assert!(err.to_string().contains("not one of its option letters"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = QuestionLoader::parse(&catalog(&[ENTRY, ENTRY])).unwrap_err();
        assert!(err.to_string().contains("Duplicate question id"));
    }

    #[test]
    fn free_text_questions_need_no_options() {
        let free = r#"(id: "x", text: "JVM?", answer: "Java Virtual Machine", explanation: "", difficulty: easy)"#;
        let questions = QuestionLoader::parse(&catalog(&[free])).unwrap();
        assert_eq!(questions[0].options, None);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(QuestionLoader::load_custom(Path::new("/nonexistent/questions.ron")).is_err());
    }
}
