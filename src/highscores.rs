//! Leaderboard
//!
//! Persisted as a bare JSON array of `{score, time, ts}` under one key, top 5,
//! best score first and the faster run first on ties.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_HIGH_SCORES;
use crate::persistence::{KeyValueStore, StorageResult};

/// A single finished run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    /// Survival time (ms)
    pub time: f64,
    /// Unix timestamp (ms) when achieved
    pub ts: f64,
}

impl ScoreEntry {
    /// Leaderboard order: score descending, then survival time ascending
    pub fn rank_cmp(&self, other: &ScoreEntry) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.time.total_cmp(&other.time))
    }
}

/// Top-score leaderboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<ScoreEntry>,
}

impl HighScores {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "jumpTop5";

    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary entries, restoring order and size
    pub fn from_entries(mut entries: Vec<ScoreEntry>) -> Self {
        entries.sort_by(ScoreEntry::rank_cmp);
        entries.truncate(MAX_HIGH_SCORES);
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Insert an entry. Returns the rank achieved (1-indexed), or None if it
    /// fell off the end.
    pub fn insert(&mut self, entry: ScoreEntry) -> Option<usize> {
        // Stable: equal entries keep arrival order
        let pos = self
            .entries
            .iter()
            .position(|e| entry.rank_cmp(e) == Ordering::Less)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    /// Load from storage. Missing or corrupt data yields an empty board.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let json = match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                return Self::new();
            }
            Err(e) => {
                log::warn!("Could not read high scores: {}", e);
                return Self::new();
            }
        };

        match serde_json::from_str::<Vec<ScoreEntry>>(&json) {
            Ok(entries) => {
                let scores = Self::from_entries(entries);
                log::info!("Loaded {} high scores", scores.len());
                scores
            }
            Err(e) => {
                log::warn!("Discarding corrupt high scores: {}", e);
                Self::new()
            }
        }
    }

    /// Write the whole board
    pub fn save(&self, store: &mut impl KeyValueStore) -> StorageResult<()> {
        let json = serde_json::to_string(self)
            .map_err(|e| crate::persistence::StorageError::Backend(e.to_string()))?;
        store.set(Self::STORAGE_KEY, &json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }

    /// Read-modify-write one entry into the stored board. Returns the fresh
    /// board and the rank achieved. A failed write is logged; the returned
    /// board still includes the entry.
    pub fn record(store: &mut impl KeyValueStore, entry: ScoreEntry) -> (Self, Option<usize>) {
        let mut scores = Self::load(store);
        let rank = scores.insert(entry);
        if let Err(e) = scores.save(store) {
            log::warn!("Could not save high scores: {}", e);
        }
        (scores, rank)
    }

    /// Display rows, `1. 12 pts - 8.4s`
    pub fn board_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{}. {} pts - {}s", i + 1, e.score, format_secs(e.time)))
            .collect()
    }

    /// Full leaderboard text
    pub fn board_text(&self) -> String {
        if self.is_empty() {
            return "Leaderboard\nNo scores yet".to_string();
        }
        let mut text = String::from("Leaderboard");
        for line in self.board_lines() {
            text.push('\n');
            text.push_str(&line);
        }
        text
    }
}

/// Milliseconds as seconds with one decimal
pub fn format_secs(ms: f64) -> String {
    format!("{:.1}", ms / 1000.0)
}
