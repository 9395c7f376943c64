use thiserror::Error;

pub mod db_error;
pub mod leaderboard_error;

pub use db_error::DbError;
pub use leaderboard_error::LeaderboardError;

pub type Result<T, E = ApplicationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Leaderboard(#[from] LeaderboardError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

/// The outcome classes a caller of the leaderboard has to tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ScoreRejected,
    Conflict,
    NotFound,
    Infrastructure,
}

impl ApplicationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApplicationError::Leaderboard(LeaderboardError::ScoreRejected { .. }) => {
                ErrorKind::ScoreRejected
            }
            ApplicationError::Leaderboard(LeaderboardError::Conflict { .. }) => ErrorKind::Conflict,
            ApplicationError::Leaderboard(LeaderboardError::EntryPlayerMismatch { .. }) => {
                ErrorKind::NotFound
            }
            ApplicationError::Db(e) if e.is_not_found() => ErrorKind::NotFound,
            ApplicationError::Db(_) | ApplicationError::Infrastructure(_) => {
                ErrorKind::Infrastructure
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
