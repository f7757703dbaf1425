//! Session layer around the board engine
//!
//! Everything the rules engine deliberately leaves to its caller lives here:
//! level bookkeeping (moves, target, outcome), the next-level difficulty
//! providers, fire-and-forget stats and leaderboard sinks, the persisted high
//! score and env-driven configuration.
//!
//! # Example
//!
//! ```
//! use gemfall_session::Session;
//!
//! let mut session = Session::new(7, "ana");
//! let (a, b) = session.hint().expect("fresh boards are playable");
//! session.swap(a, b).unwrap();
//!
//! assert_eq!(session.level().moves_remaining, 29);
//! assert_eq!(session.total_score(), session.level().score);
//! ```

pub mod config;
pub mod error;
pub mod high_score;
pub mod level;
pub mod provider;
pub mod session;
pub mod sinks;
pub mod suggestion;

pub use config::SessionConfig;
pub use error::{HighScoreError, ProviderError, SessionError, SuggestionError};
pub use high_score::HighScoreStore;
pub use level::{LevelParams, LevelState, NextLevelRequest, Outcome};
pub use provider::{FallbackPolicy, LevelParamsProvider, SuggestionProvider};
pub use session::Session;
pub use sinks::{
    LeaderboardEntry, LeaderboardSink, LogSink, MemorySink, NullSink, StatsRecord, StatsSink,
};
pub use suggestion::parse_suggestion;
