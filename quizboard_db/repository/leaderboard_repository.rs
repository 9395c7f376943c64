use sqlx::{Postgres, Transaction};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use quizboard_app::{
    pagination::{PageWindow, PositionProbe},
    repository::LeaderboardRepository,
};
use quizboard_types::{
    errors::{ApplicationError, DbError, LeaderboardError},
    leaderboard::{LeaderboardEntry, NewLeaderboardEntry, RankQuery, RankedEntry, ScoreUpdate},
};

use crate::{
    mapping::{escape_like, to_db_int},
    models as db_models,
};

/// Ranked board of one quiz.
///
/// Binds: `$1` quiz id, `$2` oldest `recorded_at` (NULL for no window),
/// `$3` escaped name needle (NULL for no name filter). Ranks are computed
/// over the recency window only; the name filter applies to the ranked rows.
/// Tails start after the outer WHERE and continue with `$4`.
macro_rules! ranked_board {
    ($tail:literal) => {
        concat!(
            r#"
            WITH board AS (
                SELECT e.id, e.quiz_id, e.player_id, e.score, e.elapsed_time, e.recorded_at,
                       p.display_name AS player_name,
                       q.title AS quiz_title,
                       DENSE_RANK() OVER (ORDER BY e.score DESC, e.elapsed_time ASC) AS rank
                FROM leaderboard_entries e
                JOIN players p ON p.id = e.player_id
                JOIN quizzes q ON q.id = e.quiz_id
                WHERE e.quiz_id = $1
                  AND ($2::timestamptz IS NULL OR e.recorded_at >= $2)
            )
            SELECT id, quiz_id, player_id, score, elapsed_time, recorded_at,
                   player_name, quiz_title, rank
            FROM board
            WHERE ($3::text IS NULL OR player_name ILIKE '%' || $3 || '%' ESCAPE '\')
            "#,
            $tail
        )
    };
}

const ENTRY_COLUMNS: &str = "id, quiz_id, player_id, score, elapsed_time, recorded_at";

#[derive(Clone)]
pub struct PostgresLeaderboardRepository<'a> {
    tx: Arc<Mutex<Transaction<'a, Postgres>>>,
}

impl<'a> PostgresLeaderboardRepository<'a> {
    pub fn new(tx: Arc<Mutex<Transaction<'a, Postgres>>>) -> Self {
        Self { tx }
    }
}

fn db_error(e: sqlx::Error) -> ApplicationError {
    ApplicationError::Db(DbError::Database(e))
}

fn needle(query: &RankQuery) -> Option<String> {
    query.name_contains.as_deref().map(escape_like)
}

#[async_trait::async_trait]
impl<'a> PositionProbe<RankQuery> for PostgresLeaderboardRepository<'a> {
    async fn exists_at(&self, query: &RankQuery, position: i64) -> Result<bool, ApplicationError> {
        if position < 0 {
            return Ok(false);
        }

        let mut tx_guard = self.tx.lock().await;
        let row: Option<db_models::RankedEntry> = sqlx::query_as(ranked_board!(
            "ORDER BY score DESC, elapsed_time ASC, recorded_at ASC, id ASC OFFSET $4 LIMIT 1"
        ))
        .bind(query.quiz_id)
        .bind(query.recorded_since)
        .bind(needle(query))
        .bind(position)
        .fetch_optional(&mut *tx_guard.as_mut())
        .await
        .map_err(db_error)?;

        Ok(row.is_some())
    }
}

#[async_trait::async_trait]
impl<'a> LeaderboardRepository for PostgresLeaderboardRepository<'a> {
    async fn create(
        &self,
        entry: &NewLeaderboardEntry,
    ) -> Result<LeaderboardEntry, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        // The unique (quiz_id, player_id) constraint arbitrates concurrent
        // first submissions: the loser gets no row back.
        let sql = format!(
            "INSERT INTO leaderboard_entries ({ENTRY_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT (quiz_id, player_id) DO NOTHING
             RETURNING {ENTRY_COLUMNS}"
        );
        let row: Option<db_models::LeaderboardEntry> = sqlx::query_as(&sql)
            .bind(Uuid::new_v4())
            .bind(entry.quiz_id)
            .bind(entry.player_id)
            .bind(to_db_int(entry.score))
            .bind(to_db_int(entry.elapsed_time))
            .bind(entry.recorded_at)
            .fetch_optional(&mut *tx_guard.as_mut())
            .await
            .map_err(db_error)?;

        let row = row.ok_or(ApplicationError::Leaderboard(LeaderboardError::Conflict {
            quiz_id: entry.quiz_id,
            player_id: entry.player_id,
        }))?;

        Ok(row.try_into()?)
    }

    async fn update(
        &self,
        entry_id: Uuid,
        update: &ScoreUpdate,
    ) -> Result<LeaderboardEntry, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let sql = format!(
            "UPDATE leaderboard_entries
             SET score = $2, elapsed_time = $3, recorded_at = $4
             WHERE id = $1
             RETURNING {ENTRY_COLUMNS}"
        );
        let row: Option<db_models::LeaderboardEntry> = sqlx::query_as(&sql)
            .bind(entry_id)
            .bind(to_db_int(update.score))
            .bind(to_db_int(update.elapsed_time))
            .bind(update.recorded_at)
            .fetch_optional(&mut *tx_guard.as_mut())
            .await
            .map_err(db_error)?;

        let row = row.ok_or(ApplicationError::Db(DbError::EntryNotFound(entry_id)))?;
        Ok(row.try_into()?)
    }

    async fn get(
        &self,
        quiz_id: Uuid,
        player_id: Uuid,
    ) -> Result<LeaderboardEntry, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM leaderboard_entries
             WHERE quiz_id = $1 AND player_id = $2"
        );
        let row: Option<db_models::LeaderboardEntry> = sqlx::query_as(&sql)
            .bind(quiz_id)
            .bind(player_id)
            .fetch_optional(&mut *tx_guard.as_mut())
            .await
            .map_err(db_error)?;

        let row = row.ok_or(ApplicationError::Db(DbError::PlayerEntryNotFound {
            quiz_id,
            player_id,
        }))?;
        Ok(row.try_into()?)
    }

    async fn get_by_id(&self, entry_id: Uuid) -> Result<LeaderboardEntry, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let sql = format!("SELECT {ENTRY_COLUMNS} FROM leaderboard_entries WHERE id = $1");
        let row: Option<db_models::LeaderboardEntry> = sqlx::query_as(&sql)
            .bind(entry_id)
            .fetch_optional(&mut *tx_guard.as_mut())
            .await
            .map_err(db_error)?;

        let row = row.ok_or(ApplicationError::Db(DbError::EntryNotFound(entry_id)))?;
        Ok(row.try_into()?)
    }

    async fn delete(&self, entry_id: Uuid) -> Result<(), ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let result = sqlx::query("DELETE FROM leaderboard_entries WHERE id = $1")
            .bind(entry_id)
            .execute(&mut *tx_guard.as_mut())
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(ApplicationError::Db(DbError::EntryNotFound(entry_id)));
        }
        Ok(())
    }

    async fn ranked_page(
        &self,
        query: &RankQuery,
        window: PageWindow,
    ) -> Result<Vec<RankedEntry>, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;

        let rows: Vec<db_models::RankedEntry> = sqlx::query_as(ranked_board!(
            "ORDER BY score DESC, elapsed_time ASC, recorded_at ASC, id ASC LIMIT $4 OFFSET $5"
        ))
        .bind(query.quiz_id)
        .bind(query.recorded_since)
        .bind(needle(query))
        .bind(window.limit)
        .bind(window.offset())
        .fetch_all(&mut *tx_guard.as_mut())
        .await
        .map_err(db_error)?;

        let entries = rows
            .into_iter()
            .map(RankedEntry::try_from)
            .collect::<Result<Vec<_>, DbError>>()?;
        Ok(entries)
    }

    async fn ranked_entry(
        &self,
        quiz_id: Uuid,
        player_id: Uuid,
    ) -> Result<RankedEntry, ApplicationError> {
        let mut tx_guard = self.tx.lock().await;
        let query = RankQuery::whole_board(quiz_id);

        let row: Option<db_models::RankedEntry> =
            sqlx::query_as(ranked_board!("AND player_id = $4"))
                .bind(query.quiz_id)
                .bind(query.recorded_since)
                .bind(needle(&query))
                .bind(player_id)
                .fetch_optional(&mut *tx_guard.as_mut())
                .await
                .map_err(db_error)?;

        let row = row.ok_or(ApplicationError::Db(DbError::PlayerEntryNotFound {
            quiz_id,
            player_id,
        }))?;
        Ok(row.try_into()?)
    }
}
