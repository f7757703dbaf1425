use std::env;
use std::path::PathBuf;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub seed: u64,
    /// Levels the headless runner plays before stopping
    pub levels: u32,
    pub high_score_path: Option<PathBuf>,
    /// Name used for stats and leaderboard submissions
    pub player: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            levels: 3,
            high_score_path: None,
            player: "player".to_string(),
        }
    }
}

impl SessionConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create from any key lookup; unset or unparseable values use the defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let seed = lookup("GEMFALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        let levels = lookup("GEMFALL_LEVELS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&n: &u32| n > 0)
            .unwrap_or(defaults.levels);

        let high_score_path = lookup("GEMFALL_HIGH_SCORE_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        let player = lookup("GEMFALL_PLAYER")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.player);

        Self {
            seed,
            levels,
            high_score_path,
            player,
        }
    }
}
