use quizboard_types::{
    errors::DbError,
    leaderboard::{LeaderboardEntry, RankedEntry},
};

use crate::models::{self as db_models};

fn to_u32(column: &str, value: i64) -> Result<u32, DbError> {
    u32::try_from(value)
        .map_err(|_| DbError::CorruptedRow(format!("{column} out of range: {value}")))
}

impl TryFrom<db_models::LeaderboardEntry> for LeaderboardEntry {
    type Error = DbError;

    fn try_from(row: db_models::LeaderboardEntry) -> Result<Self, Self::Error> {
        Ok(LeaderboardEntry {
            id: row.id,
            quiz_id: row.quiz_id,
            player_id: row.player_id,
            score: to_u32("score", row.score)?,
            elapsed_time: to_u32("elapsed_time", row.elapsed_time)?,
            recorded_at: row.recorded_at,
        })
    }
}

impl TryFrom<db_models::RankedEntry> for RankedEntry {
    type Error = DbError;

    fn try_from(row: db_models::RankedEntry) -> Result<Self, Self::Error> {
        Ok(RankedEntry {
            rank: to_u32("rank", row.rank)?,
            entry: row.entry.try_into()?,
            player_name: row.player_name,
            quiz_title: row.quiz_title,
        })
    }
}

/// Converts a domain value into the BIGINT columns.
pub fn to_db_int(value: u32) -> i64 {
    i64::from(value)
}

/// Escapes LIKE wildcards so a name needle matches literally.
pub fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
