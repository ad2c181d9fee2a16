//! High score tracking
//!
//! The core only ever asks two questions of persistence: what is the best
//! score, and "here is a score, did it beat the best?". Anything that can
//! answer those is a [`HighScoreStore`].

use serde::{Deserialize, Serialize};

use crate::consts::SPECIAL_SCORE;

/// Persistence collaborator for the single integer high score
pub trait HighScoreStore {
    /// Current best score (0 when nothing is recorded)
    fn high_score(&self) -> u32;

    /// Offer a finished or in-progress score. Returns true if it set a new
    /// high score.
    fn report_score(&mut self, score: u32) -> bool;

    /// Forget the recorded high score
    fn clear(&mut self);
}

/// The saved high score record, `{"highscore": <int>}` on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    #[serde(rename = "highscore", default)]
    pub best: u32,
}

impl HighScores {
    pub fn new(best: u32) -> Self {
        Self { best }
    }

    /// Record a score; returns true if it beat the previous best
    pub fn submit(&mut self, score: u32) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Whether the special start screen and music are unlocked
    pub fn special_unlocked(&self) -> bool {
        self.best >= SPECIAL_SCORE
    }
}

/// In-memory store (tests, and the fallback when no save file is wanted)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    scores: HighScores,
}

impl MemoryStore {
    pub fn new(best: u32) -> Self {
        Self {
            scores: HighScores::new(best),
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn high_score(&self) -> u32 {
        self.scores.best
    }

    fn report_score(&mut self, score: u32) -> bool {
        self.scores.submit(score)
    }

    fn clear(&mut self) {
        self.scores = HighScores::default();
    }
}
