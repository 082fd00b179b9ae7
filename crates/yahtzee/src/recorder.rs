// ABOUTME: Receives final scores of finished games for the owning player.
// ABOUTME: PlayerStats keeps games played and high score per player in memory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sink for final scores, called exactly once per finished game.
pub trait ScoreRecorder {
    fn record(&mut self, owner: &str, final_score: u32);
}

/// Aggregate for one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub total_played: u32,
    pub high_score: u32,
}

/// In-memory player records keyed by owner id.
#[derive(Debug, Clone, Default)]
pub struct PlayerStats {
    players: HashMap<String, PlayerRecord>,
}

impl PlayerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, owner: &str) -> Option<PlayerRecord> {
        self.players.get(owner).copied()
    }
}

impl ScoreRecorder for PlayerStats {
    fn record(&mut self, owner: &str, final_score: u32) {
        let record = self.players.entry(owner.to_string()).or_default();
        record.total_played += 1;
        record.high_score = record.high_score.max(final_score);
    }
}
