//! Question bank compiled into the binary.

use maze_core::QuestionBank;

use crate::loaders::{LoadResult, QuestionLoader};

const BUILTIN_RON: &str = include_str!("../data/questions/builtin.ron");
const DEAD_END_RON: &str = include_str!("../data/questions/dead_end.ron");

/// Parses the embedded catalogs into a [`QuestionBank`].
pub fn builtin_bank() -> LoadResult<QuestionBank> {
    let builtin = QuestionLoader::parse(BUILTIN_RON)?;
    let dead_end = QuestionLoader::parse(DEAD_END_RON)?;
    Ok(QuestionBank::new(builtin, dead_end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::{Difficulty, QuestionSource};
    use strum::IntoEnumIterator;

    #[test]
    fn embedded_catalogs_parse() {
        let bank = builtin_bank().unwrap();
        assert!(bank.builtin().len() >= 20);
        assert!(!bank.dead_end().is_empty());
        assert!(bank.builtin().iter().all(|q| q.options.is_some()));
        assert!(bank.dead_end().iter().all(|q| q.options.is_none()));
        assert!(bank.builtin().iter().all(|q| q.source == QuestionSource::Builtin));
    }

    #[test]
    fn every_tier_has_content() {
        let bank = builtin_bank().unwrap();
        for tier in Difficulty::iter() {
            assert!(bank.builtin().iter().any(|q| q.difficulty == tier), "{tier}");
            assert!(bank.dead_end().iter().any(|q| q.difficulty == tier), "{tier}");
        }
    }

    #[test]
    fn hard_pool_covers_a_hard_maze() {
        let bank = builtin_bank().unwrap();
        let pool = bank.select_pool(Difficulty::Hard, &[], &[]);
        assert_eq!(pool.len(), bank.builtin().len());
        // A 9x9 maze is at least 16 steps from origin to exit.
        assert!(pool.len() >= 16);
    }
}
