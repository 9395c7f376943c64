use thiserror::Error;
use uuid::Uuid;

/// Errors for db stuff.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Quiz with ID {0} not found")]
    QuizNotFound(Uuid),

    #[error("Leaderboard entry with ID {0} not found")]
    EntryNotFound(Uuid),

    #[error("Player {player_id} has no leaderboard entry for quiz {quiz_id}")]
    PlayerEntryNotFound { quiz_id: Uuid, player_id: Uuid },

    #[error("Corrupted row: {0}")]
    CorruptedRow(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("{0} must be set")]
    MissingDatabaseUrl(&'static str),
}

impl DbError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DbError::QuizNotFound(_)
                | DbError::EntryNotFound(_)
                | DbError::PlayerEntryNotFound { .. }
        )
    }
}
