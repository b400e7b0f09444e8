//! Personal-best tables
//!
//! One top-10 list per game, serialized to JSON for the host's key-value
//! store. Nothing here touches storage directly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::sim::{Game, Session, Variant};

/// Maximum number of high scores kept per game
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    /// Coins the run earned
    pub coins: u32,
    /// Length of the run in ticks
    pub ticks: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub tables: BTreeMap<Variant, Vec<HighScoreEntry>>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries for one game, best first
    pub fn entries(&self, variant: Variant) -> &[HighScoreEntry] {
        self.tables.get(&variant).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check if a score would make the table
    pub fn qualifies(&self, variant: Variant, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        let entries = self.entries(variant);
        if entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, variant: Variant, score: u32) -> Option<usize> {
        if !self.qualifies(variant, score) {
            return None;
        }
        let entries = self.entries(variant);
        let rank = entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(entries.len()) + 1)
    }

    /// Insert an entry if it qualifies; returns the rank achieved
    pub fn add_score(&mut self, variant: Variant, entry: HighScoreEntry) -> Option<usize> {
        let rank = self.potential_rank(variant, entry.score)?;
        let entries = self.tables.entry(variant).or_default();
        entries.insert(rank - 1, entry);
        entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Record a finished run. Sessions that have not ended are ignored.
    pub fn record<G: Game>(&mut self, session: &Session<G>) -> Option<usize> {
        if !session.state().is_terminal() {
            return None;
        }
        let entry = HighScoreEntry {
            score: session.score(),
            coins: session.reward().unwrap_or(0),
            ticks: session.frame_count(),
        };
        let rank = self.add_score(session.variant(), entry);
        if let Some(rank) = rank {
            log::info!(
                "New {} high score #{}: {}",
                session.variant().title(),
                rank,
                entry.score
            );
        }
        rank
    }

    pub fn top_score(&self, variant: Variant) -> Option<u32> {
        self.entries(variant).first().map(|e| e.score)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.values().all(Vec::is_empty)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
