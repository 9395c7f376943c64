use uuid::Uuid;

use quizboard_types::errors::ApplicationError;

/// Read-only access to quiz metadata owned outside the leaderboard.
#[async_trait::async_trait]
pub trait QuizRepository: Send + Sync {
    /// Returns the highest score the quiz can award, or `DbError::QuizNotFound`.
    async fn get_max_score(&self, quiz_id: Uuid) -> Result<u32, ApplicationError>;
}
