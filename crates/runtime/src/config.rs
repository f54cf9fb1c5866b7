//! Runtime configuration and environment loading.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use maze_core::{Difficulty, GameConfig};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub difficulty: Difficulty,
    /// Session seed; drawn at random when unset.
    pub seed: Option<u64>,
    /// Replaces the configured question timeout, in ticks.
    pub question_timeout: Option<u64>,
    /// Wall-clock length of one core tick.
    pub tick: Duration,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Store progress on disk instead of in memory.
    pub enable_persistence: bool,
    pub save_dir: Option<PathBuf>,
    /// TOML game configuration; `<save dir>/config.toml` when unset.
    pub config_path: Option<PathBuf>,
    /// RON catalog of player questions; `<save dir>/questions/custom.ron` when unset.
    pub custom_questions_path: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            difficulty: Difficulty::Easy,
            seed: None,
            question_timeout: None,
            tick: Duration::from_secs(1),
            event_buffer_size: 100,
            command_buffer_size: 32,
            enable_persistence: false,
            save_dir: None,
            config_path: None,
            custom_questions_path: None,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `MAZE_DIFFICULTY` - `easy`, `medium` or `hard` (default: easy)
    /// - `MAZE_SEED` - Session seed (default: random)
    /// - `MAZE_QUESTION_TIMEOUT_SECS` - Safety timeout for open questions (default: 30)
    /// - `MAZE_ENABLE_PERSISTENCE` - Keep progress on disk (default: false)
    /// - `MAZE_SAVE_DIR` - Directory for progress and content (default: platform-specific)
    /// - `MAZE_CONFIG_PATH` - TOML game configuration file
    /// - `MAZE_CUSTOM_QUESTIONS` - RON catalog of custom questions
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(difficulty) = read_env::<Difficulty>("MAZE_DIFFICULTY") {
            config.difficulty = difficulty;
        }

        config.seed = read_env::<u64>("MAZE_SEED");

        // One tick is one second, so seconds map onto ticks directly.
        config.question_timeout =
            read_env::<u64>("MAZE_QUESTION_TIMEOUT_SECS").map(|secs| secs.max(1));

        if let Some(enable) = read_env::<bool>("MAZE_ENABLE_PERSISTENCE") {
            config.enable_persistence = enable;
        } else if env::var("MAZE_ENABLE_PERSISTENCE").is_ok() {
            // Also accept just setting the variable without value as "true"
            config.enable_persistence = true;
        }

        config.save_dir = env::var("MAZE_SAVE_DIR").ok().map(PathBuf::from);
        config.config_path = env::var("MAZE_CONFIG_PATH").ok().map(PathBuf::from);
        config.custom_questions_path = env::var("MAZE_CUSTOM_QUESTIONS").ok().map(PathBuf::from);

        config
    }

    /// Directory for progress and player content.
    ///
    /// Follows platform conventions:
    /// - Linux: `~/.local/share/quizmaze` (or `$XDG_DATA_HOME/quizmaze`)
    /// - macOS: `~/Library/Application Support/quizmaze`
    /// - Windows: `%APPDATA%\quizmaze`
    /// - Fallback: `./save_data`
    pub fn resolved_save_dir(&self) -> PathBuf {
        self.save_dir.clone().unwrap_or_else(|| {
            directories::ProjectDirs::from("", "", "quizmaze")
                .map(|dirs| dirs.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("./save_data"))
        })
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_save_dir_wins() {
        let config = RuntimeConfig {
            save_dir: Some(PathBuf::from("/tmp/maze-save")),
            ..RuntimeConfig::default()
        };
        assert_eq!(config.resolved_save_dir(), PathBuf::from("/tmp/maze-save"));
    }

    #[test]
    fn defaults_match_game_rules() {
        let config = RuntimeConfig::default();
        assert_eq!(config.game_config.question_timeout, 30);
        assert_eq!(config.question_timeout, None);
        assert_eq!(config.tick, Duration::from_secs(1));
        assert!(!config.enable_persistence);
    }
}
