//! Global leaderboard: best score per player
//!
//! Each player (by fid) holds one entry, replaced only by a strictly higher
//! score. The retained set is capped; ranks are positions in that set.

mod error;
mod repository;

pub use error::LeaderboardError;
pub use repository::{InMemoryLeaderboard, LeaderboardRepository};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entries kept after every submission
pub const MAX_RETAINED: usize = 1000;
/// Entries returned by the listing endpoint
pub const TOP_N: usize = 100;

/// Incoming score. Everything is optional on the wire; `validate` decides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub fid: Option<u64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub score: Option<u64>,
    #[serde(default)]
    pub wave: Option<u32>,
}

/// One retained row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub fid: u64,
    pub username: String,
    pub score: u64,
    pub wave: u32,
    /// Unix timestamp (ms) of the accepted submission
    pub timestamp: i64,
}

/// Result of an accepted submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    /// 1-based rank, or None if the entry didn't make the retained set
    pub rank: Option<usize>,
}

impl Submission {
    pub fn new(fid: u64, score: u64) -> Self {
        Self {
            fid: Some(fid),
            score: Some(score),
            ..Self::default()
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_wave(mut self, wave: u32) -> Self {
        self.wave = Some(wave);
        self
    }

    /// Turn into an entry, filling defaults (display name `FID:<fid>`, wave 1)
    pub fn validate(self, now: DateTime<Utc>) -> Result<LeaderboardEntry, LeaderboardError> {
        let fid = self
            .fid
            .filter(|fid| *fid != 0)
            .ok_or(LeaderboardError::MissingField("fid"))?;
        let score = self.score.ok_or(LeaderboardError::MissingField("score"))?;
        let username = self
            .username
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("FID:{}", fid));

        Ok(LeaderboardEntry {
            fid,
            username,
            score,
            wave: self.wave.filter(|w| *w != 0).unwrap_or(1),
            timestamp: now.timestamp_millis(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_fills_defaults() {
        let now = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        let entry = Submission::new(42, 100).validate(now).unwrap();
        assert_eq!(entry.username, "FID:42");
        assert_eq!(entry.wave, 1);
        assert_eq!(entry.timestamp, 1_700_000_000_000);
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let now = Utc::now();
        let no_fid = Submission {
            score: Some(10),
            ..Submission::default()
        };
        assert_eq!(
            no_fid.validate(now),
            Err(LeaderboardError::MissingField("fid"))
        );

        let zero_fid = Submission::new(0, 10);
        assert!(zero_fid.validate(now).is_err());

        let no_score = Submission {
            fid: Some(3),
            ..Submission::default()
        };
        assert_eq!(
            no_score.validate(now),
            Err(LeaderboardError::MissingField("score"))
        );
    }

    #[test]
    fn test_zero_score_is_present() {
        let entry = Submission::new(5, 0).validate(Utc::now()).unwrap();
        assert_eq!(entry.score, 0);
    }

    #[test]
    fn test_error_message_matches_wire_text() {
        assert_eq!(
            LeaderboardError::MissingField("score").to_string(),
            "Missing required fields"
        );
    }
}
