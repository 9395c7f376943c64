use thiserror::Error;
use uuid::Uuid;

/// Errors for leaderboard rules.
#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("Score {score} exceeds the maximum of {max_score} for quiz {quiz_id}")]
    ScoreRejected {
        quiz_id: Uuid,
        score: u32,
        max_score: u32,
    },

    #[error("Player {player_id} already has a leaderboard entry for quiz {quiz_id}")]
    Conflict { quiz_id: Uuid, player_id: Uuid },

    #[error("Entry {entry_id} does not belong to player {player_id} on quiz {quiz_id}")]
    EntryPlayerMismatch {
        entry_id: Uuid,
        quiz_id: Uuid,
        player_id: Uuid,
    },
}
