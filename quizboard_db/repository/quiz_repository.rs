use sqlx::{Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use quizboard_app::repository::QuizRepository;
use quizboard_types::errors::{ApplicationError, DbError};

#[derive(Clone)]
pub struct PostgresQuizRepository<'a> {
    tx: Arc<Mutex<Transaction<'a, Postgres>>>,
}

impl<'a> PostgresQuizRepository<'a> {
    pub fn new(tx: Arc<Mutex<Transaction<'a, Postgres>>>) -> Self {
        Self { tx }
    }
}

#[async_trait::async_trait]
impl<'a> QuizRepository for PostgresQuizRepository<'a> {
    async fn get_max_score(&self, quiz_id: Uuid) -> Result<u32, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let max_score: Option<i64> =
            sqlx::query_scalar("SELECT max_score FROM quizzes WHERE id = $1")
                .bind(quiz_id)
                .fetch_optional(&mut *tx_guard.as_mut())
                .await
                .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        let max_score = max_score.ok_or(ApplicationError::Db(DbError::QuizNotFound(quiz_id)))?;

        u32::try_from(max_score).map_err(|_| {
            ApplicationError::Db(DbError::CorruptedRow(format!(
                "max_score out of range for quiz {quiz_id}: {max_score}"
            )))
        })
    }
}
