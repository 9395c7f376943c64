use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow, Clone)]
pub struct LeaderboardEntry {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub player_id: Uuid,
    pub score: i64,
    pub elapsed_time: i64,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, FromRow, Clone)]
pub struct RankedEntry {
    #[sqlx(flatten)]
    pub entry: LeaderboardEntry,
    pub rank: i64,
    pub player_name: String,
    pub quiz_title: String,
}
