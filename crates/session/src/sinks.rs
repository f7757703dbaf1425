//! Fire-and-forget collaborators notified of finished levels and scores
//!
//! Failures are returned to the session, which logs them. They never roll
//! back state that was already committed.

use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use log::info;
use serde::Serialize;

/// Final result of one level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    pub user_id: String,
    pub level: u32,
    pub score: u32,
    pub did_win: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
}

pub trait StatsSink {
    fn record(&mut self, record: &StatsRecord) -> anyhow::Result<()>;
}

pub trait LeaderboardSink {
    fn submit(&mut self, entry: &LeaderboardEntry) -> anyhow::Result<()>;
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl StatsSink for NullSink {
    fn record(&mut self, _record: &StatsRecord) -> anyhow::Result<()> {
        Ok(())
    }
}

impl LeaderboardSink for NullSink {
    fn submit(&mut self, _entry: &LeaderboardEntry) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Writes every record to the log as JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl StatsSink for LogSink {
    fn record(&mut self, record: &StatsRecord) -> anyhow::Result<()> {
        info!("stats {}", serde_json::to_string(record)?);
        Ok(())
    }
}

impl LeaderboardSink for LogSink {
    fn submit(&mut self, entry: &LeaderboardEntry) -> anyhow::Result<()> {
        info!("leaderboard {}", serde_json::to_string(entry)?);
        Ok(())
    }
}

/// Keeps everything in memory. Clones share the same buffers.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    stats: Arc<Mutex<Vec<StatsRecord>>>,
    entries: Arc<Mutex<Vec<LeaderboardEntry>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> Vec<StatsRecord> {
        self.stats.lock().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn entries(&self) -> Vec<LeaderboardEntry> {
        self.entries.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl StatsSink for MemorySink {
    fn record(&mut self, record: &StatsRecord) -> anyhow::Result<()> {
        self.stats
            .lock()
            .map_err(|_| anyhow!("stats buffer poisoned"))?
            .push(record.clone());
        Ok(())
    }
}

impl LeaderboardSink for MemorySink {
    fn submit(&mut self, entry: &LeaderboardEntry) -> anyhow::Result<()> {
        self.entries
            .lock()
            .map_err(|_| anyhow!("leaderboard buffer poisoned"))?
            .push(entry.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_clones_share_buffers() {
        let sink = MemorySink::new();
        let mut writer = sink.clone();
        writer
            .record(&StatsRecord {
                user_id: "ana".to_string(),
                level: 2,
                score: 1700,
                did_win: true,
            })
            .unwrap();
        writer
            .submit(&LeaderboardEntry {
                name: "ana".to_string(),
                score: 1700,
            })
            .unwrap();

        assert_eq!(sink.stats().len(), 1);
        assert_eq!(sink.entries()[0].score, 1700);
    }

    #[test]
    fn test_stats_record_wire_names() {
        let json = serde_json::to_string(&StatsRecord {
            user_id: "u1".to_string(),
            level: 1,
            score: 10,
            did_win: false,
        })
        .unwrap();
        assert_eq!(json, r#"{"userId":"u1","level":1,"score":10,"didWin":false}"#);
    }
}
