//! Session: one player's run through consecutive levels
//!
//! The session owns the board engine, the current [`LevelState`], the running
//! total across levels and the external collaborators. Board operations are
//! forwarded to [`GameBoard`]; only successful ones consume a move.

use log::{debug, info, warn};

use gemfall_core::types::Position;
use gemfall_core::{GameBoard, GameSnapshot, SwapOutcome};

use crate::config::SessionConfig;
use crate::error::{ProviderError, SessionError};
use crate::high_score::HighScoreStore;
use crate::level::{LevelParams, LevelState, NextLevelRequest, Outcome};
use crate::provider::{FallbackPolicy, LevelParamsProvider};
use crate::sinks::{LeaderboardEntry, LeaderboardSink, NullSink, StatsRecord, StatsSink};

/// Board seed for a level, so every level of a run gets its own board
fn level_seed(seed: u64, level: u32) -> u64 {
    seed.wrapping_add(u64::from(level.saturating_sub(1)).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

pub struct Session {
    player: String,
    seed: u64,
    board: GameBoard,
    level: LevelState,
    total_score: u32,
    fallback: FallbackPolicy,
    provider: Box<dyn LevelParamsProvider>,
    stats: Box<dyn StatsSink>,
    leaderboard: Box<dyn LeaderboardSink>,
    high_score: HighScoreStore,
}

impl Session {
    /// Start at level 1 with the fallback difficulty curve and no-op sinks
    pub fn new(seed: u64, player: impl Into<String>) -> Self {
        let fallback = FallbackPolicy;
        Self {
            player: player.into(),
            seed,
            board: GameBoard::new(level_seed(seed, 1)),
            level: LevelState::new(1, fallback.params_for(1)),
            total_score: 0,
            fallback,
            provider: Box::new(fallback),
            stats: Box::new(NullSink),
            leaderboard: Box::new(NullSink),
            high_score: HighScoreStore::in_memory(),
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        let high_score = match &config.high_score_path {
            Some(path) => HighScoreStore::open(path),
            None => HighScoreStore::in_memory(),
        };
        Self::new(config.seed, config.player.clone()).with_high_score(high_score)
    }

    pub fn with_provider(mut self, provider: impl LevelParamsProvider + 'static) -> Self {
        self.provider = Box::new(provider);
        self
    }

    pub fn with_stats_sink(mut self, sink: impl StatsSink + 'static) -> Self {
        self.stats = Box::new(sink);
        self
    }

    pub fn with_leaderboard_sink(mut self, sink: impl LeaderboardSink + 'static) -> Self {
        self.leaderboard = Box::new(sink);
        self
    }

    pub fn with_high_score(mut self, store: HighScoreStore) -> Self {
        self.high_score = store;
        self
    }

    /// Replace the parameters of the level in progress, restarting it
    pub fn with_level_params(mut self, params: LevelParams) -> Self {
        self.level = LevelState::new(self.level.level, params);
        self
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    pub fn level(&self) -> &LevelState {
        &self.level
    }

    /// Score accumulated over every level of this run
    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.best()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.board.snapshot()
    }

    pub fn hint(&self) -> Option<(Position, Position)> {
        self.board.hint()
    }

    /// Swap two tiles. Consumes a move only if the swap is accepted.
    pub fn swap(&mut self, a: Position, b: Position) -> Result<SwapOutcome, SessionError> {
        self.ensure_in_progress()?;
        let outcome = self.board.try_swap(a, b)?;
        self.commit(&outcome);
        Ok(outcome)
    }

    /// Detonate a power-up. Consumes a move like a swap.
    pub fn activate(&mut self, pos: Position) -> Result<SwapOutcome, SessionError> {
        self.ensure_in_progress()?;
        let outcome = self.board.activate(pos)?;
        self.commit(&outcome);
        Ok(outcome)
    }

    /// Advance to the next level after a win.
    ///
    /// Parameters come from the provider; any provider failure or invalid
    /// answer falls back to the deterministic curve.
    pub fn next_level(&mut self) -> Result<&LevelState, SessionError> {
        if self.level.outcome != Outcome::Won {
            return Err(SessionError::LevelNotWon);
        }

        let request = NextLevelRequest::from(&self.level);
        let next = request.current_level.saturating_add(1);
        let suggested = self.provider.next_params(&request).and_then(|p| {
            LevelParams::checked(p.moves, p.target_score).map_err(ProviderError::from)
        });
        let params = match suggested {
            Ok(params) => params,
            Err(e) => {
                warn!("level provider failed, using fallback: {}", e);
                self.fallback.params_for(next)
            }
        };

        self.start_level(next, params);
        Ok(&self.level)
    }

    /// Start over from level 1. The high score is kept.
    pub fn restart(&mut self) {
        self.total_score = 0;
        self.start_level(1, self.fallback.params_for(1));
    }

    /// Send the run total to the leaderboard under `name`
    pub fn submit_score(&mut self, name: &str) -> Result<LeaderboardEntry, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        let entry = LeaderboardEntry {
            name: name.to_string(),
            score: self.total_score,
        };
        if let Err(e) = self.leaderboard.submit(&entry) {
            warn!("leaderboard submission failed: {:#}", e);
        }
        Ok(entry)
    }

    fn ensure_in_progress(&self) -> Result<(), SessionError> {
        match self.level.outcome {
            Outcome::InProgress => Ok(()),
            finished => Err(SessionError::LevelOver(finished)),
        }
    }

    fn commit(&mut self, outcome: &SwapOutcome) {
        let combo = u32::try_from(outcome.combo()).unwrap_or(u32::MAX);
        let finished = self.level.record_move(outcome.score_delta, combo);
        self.total_score = self.total_score.saturating_add(outcome.score_delta);
        debug!(
            "move committed: +{} (combo {}), level score {}, {} moves left",
            outcome.score_delta, combo, self.level.score, self.level.moves_remaining
        );

        match self.high_score.observe(self.total_score) {
            Ok(true) => debug!("new high score {}", self.total_score),
            Ok(false) => {}
            Err(e) => warn!("could not persist high score: {}", e),
        }

        if let Some(result) = finished {
            self.finish(result);
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        info!(
            "level {} {}: {} / {} points",
            self.level.level,
            if outcome == Outcome::Won { "won" } else { "lost" },
            self.level.score,
            self.level.target_score
        );
        let record = StatsRecord {
            user_id: self.player.clone(),
            level: self.level.level,
            score: self.level.score,
            did_win: outcome == Outcome::Won,
        };
        if let Err(e) = self.stats.record(&record) {
            warn!("stats sink failed: {:#}", e);
        }
    }

    fn start_level(&mut self, level: u32, params: LevelParams) {
        self.board = GameBoard::new(level_seed(self.seed, level));
        self.level = LevelState::new(level, params);
        info!(
            "level {} started: {} moves, target {}",
            level, params.moves, params.target_score
        );
    }
}
