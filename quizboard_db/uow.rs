use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;

use quizboard_app::{
    repository::*,
    uow::{UnitOfWork, UnitOfWorkProvider},
};
use quizboard_types::errors::{ApplicationError, DbError};

use crate::repository::*;

#[derive(Debug, Clone)]
pub struct PostgresUnitOfWorkProvider {
    pool: PgPool,
}

impl PostgresUnitOfWorkProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UnitOfWorkProvider for PostgresUnitOfWorkProvider {
    async fn begin<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>, ApplicationError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;

        Ok(Box::new(PostgresUnitOfWork::new(tx)))
    }
}

/// Every repository handed out shares the same transaction.
#[derive(Debug, Clone)]
pub struct PostgresUnitOfWork<'a> {
    tx: Arc<Mutex<Transaction<'a, Postgres>>>,
}

impl<'a> PostgresUnitOfWork<'a> {
    pub fn new(tx: Transaction<'a, Postgres>) -> Self {
        Self {
            tx: Arc::new(Mutex::new(tx)),
        }
    }
}

#[async_trait::async_trait]
impl<'a> UnitOfWork<'a> for PostgresUnitOfWork<'a> {
    fn leaderboard(&self) -> Arc<dyn LeaderboardRepository + 'a> {
        Arc::new(PostgresLeaderboardRepository::new(self.tx.clone()))
    }

    fn quizzes(&self) -> Arc<dyn QuizRepository + 'a> {
        Arc::new(PostgresQuizRepository::new(self.tx.clone()))
    }

    async fn commit(self: Box<Self>) -> Result<(), ApplicationError> {
        // A repository still holding the transaction means a handler leaked it;
        // the transaction then rolls back on drop.
        let Ok(mutex) = Arc::try_unwrap(self.tx) else {
            return Err(ApplicationError::Db(DbError::Transaction(
                "transaction still has multiple owners".to_string(),
            )));
        };

        mutex
            .into_inner()
            .commit()
            .await
            .map_err(|e| ApplicationError::Db(DbError::Database(e)))
    }

    async fn rollback(self: Box<Self>) -> Result<(), ApplicationError> {
        if let Ok(mutex) = Arc::try_unwrap(self.tx) {
            mutex
                .into_inner()
                .rollback()
                .await
                .map_err(|e| ApplicationError::Db(DbError::Database(e)))?;
        }
        Ok(())
    }
}
