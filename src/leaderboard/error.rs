use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LeaderboardError {
    /// Client sent a submission without an identifier or a score
    #[error("Missing required fields")]
    MissingField(&'static str),
    /// The backing store failed; the client can't do anything about it
    #[error("leaderboard storage failed: {0}")]
    Storage(String),
}

impl LeaderboardError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, LeaderboardError::MissingField(_))
    }
}
