use std::sync::Mutex;

use chrono::{DateTime, Utc};

use super::{LeaderboardEntry, LeaderboardError, MAX_RETAINED, SubmitOutcome, Submission};

/// Storage seam for the leaderboard
///
/// Implementations must make `submit` atomic: concurrent submissions for the
/// same player may not lose the higher score.
pub trait LeaderboardRepository: Send + Sync {
    fn submit(
        &self,
        submission: Submission,
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome, LeaderboardError>;

    /// Best `n` entries, highest first
    fn top(&self, n: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError>;

    /// Number of retained entries
    fn count(&self) -> Result<usize, LeaderboardError>;
}

/// Process-local leaderboard (lost on restart)
#[derive(Debug)]
pub struct InMemoryLeaderboard {
    /// Sorted by descending score; ties keep submission order
    entries: Mutex<Vec<LeaderboardEntry>>,
    max_entries: usize,
}

impl InMemoryLeaderboard {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            max_entries: max_entries.max(1),
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<LeaderboardEntry>>, LeaderboardError> {
        self.entries
            .lock()
            .map_err(|_| LeaderboardError::Storage("leaderboard lock poisoned".to_string()))
    }
}

impl Default for InMemoryLeaderboard {
    fn default() -> Self {
        Self::new(MAX_RETAINED)
    }
}

impl LeaderboardRepository for InMemoryLeaderboard {
    fn submit(
        &self,
        submission: Submission,
        now: DateTime<Utc>,
    ) -> Result<SubmitOutcome, LeaderboardError> {
        let entry = submission.validate(now)?;
        let fid = entry.fid;

        let mut entries = self.lock()?;
        match entries.iter_mut().find(|e| e.fid == fid) {
            Some(existing) => {
                if entry.score > existing.score {
                    log::debug!("fid {} improved {} -> {}", fid, existing.score, entry.score);
                    *existing = entry;
                }
            }
            None => entries.push(entry),
        }

        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(self.max_entries);

        let rank = entries.iter().position(|e| e.fid == fid).map(|i| i + 1);
        Ok(SubmitOutcome { rank })
    }

    fn top(&self, n: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let entries = self.lock()?;
        Ok(entries.iter().take(n).cloned().collect())
    }

    fn count(&self) -> Result<usize, LeaderboardError> {
        Ok(self.lock()?.len())
    }
}
