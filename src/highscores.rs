//! In-session best distance board
//!
//! Lives only as long as the host; nothing is written to storage.

/// Maximum number of runs to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighScoreEntry {
    /// Distance climbed (km)
    pub score: u32,
    /// Frames survived
    pub frames: u64,
}

/// Best runs of this session, sorted descending by score
#[derive(Debug, Clone, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the board
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Record a finished run. Returns the rank achieved (1-indexed) or None
    /// if it didn't qualify
    pub fn add_score(&mut self, score: u32, frames: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry { score, frames };
        let rank = match self.entries.iter().position(|e| score > e.score) {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best distance so far (0 before any scoring run)
    pub fn best(&self) -> u32 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_and_best() {
        let mut board = HighScores::new();
        assert_eq!(board.best(), 0);
        assert_eq!(board.add_score(0, 10), None);
        assert_eq!(board.add_score(50, 100), Some(1));
        assert_eq!(board.add_score(80, 100), Some(1));
        assert_eq!(board.add_score(60, 100), Some(2));
        assert_eq!(board.best(), 80);
        let scores: Vec<_> = board.entries.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![80, 60, 50]);
    }

    #[test]
    fn test_board_is_bounded() {
        let mut board = HighScores::new();
        for s in 1..=(MAX_HIGH_SCORES as u32 + 5) {
            board.add_score(s, 0);
        }
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert!(!board.qualifies(5));
        assert!(board.qualifies(100));
        assert_eq!(board.best(), MAX_HIGH_SCORES as u32 + 5);
    }
}
