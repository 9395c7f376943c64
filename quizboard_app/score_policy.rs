use std::sync::Arc;
use uuid::Uuid;

use quizboard_types::errors::{ApplicationError, LeaderboardError};

use crate::repository::QuizRepository;

/// Rejects scores above a quiz's ceiling.
///
/// This only guards the ceiling; whether a score is achievable for the
/// reported time or answers is checked elsewhere.
pub struct ScorePolicy<'a> {
    quizzes: Arc<dyn QuizRepository + 'a>,
}

impl<'a> ScorePolicy<'a> {
    pub fn new(quizzes: Arc<dyn QuizRepository + 'a>) -> Self {
        Self { quizzes }
    }

    pub async fn validate(&self, quiz_id: Uuid, score: u32) -> Result<(), ApplicationError> {
        let max_score = self.quizzes.get_max_score(quiz_id).await?;

        check_ceiling(quiz_id, score, max_score).inspect_err(|_| {
            tracing::warn!(%quiz_id, score, max_score, "Rejected score above quiz ceiling");
        })?;

        Ok(())
    }
}

pub fn check_ceiling(quiz_id: Uuid, score: u32, max_score: u32) -> Result<(), LeaderboardError> {
    if score > max_score {
        return Err(LeaderboardError::ScoreRejected {
            quiz_id,
            score,
            max_score,
        });
    }
    Ok(())
}
