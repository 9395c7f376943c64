use uuid::Uuid;

use quizboard_types::{
    errors::ApplicationError,
    leaderboard::{LeaderboardEntry, NewLeaderboardEntry, RankQuery, RankedEntry, ScoreUpdate},
};

use crate::pagination::{PageWindow, PositionProbe};

/// Durable storage of leaderboard entries plus ranked reads over them.
///
/// The position probe inherited from `PositionProbe` must follow the same
/// order and filters as `ranked_page`.
#[async_trait::async_trait]
pub trait LeaderboardRepository: PositionProbe<RankQuery> + Send + Sync {
    /// Inserts a new entry with a fresh id, unless the player already has one
    /// for the quiz, in which case it fails with `LeaderboardError::Conflict`.
    /// The check and the insert must be a single atomic step.
    async fn create(&self, entry: &NewLeaderboardEntry)
    -> Result<LeaderboardEntry, ApplicationError>;

    /// Overwrites score, time and `recorded_at` of an existing entry.
    async fn update(
        &self,
        entry_id: Uuid,
        update: &ScoreUpdate,
    ) -> Result<LeaderboardEntry, ApplicationError>;

    /// Returns the entry of a player on a quiz.
    async fn get(&self, quiz_id: Uuid, player_id: Uuid)
    -> Result<LeaderboardEntry, ApplicationError>;

    /// Returns an entry by id.
    async fn get_by_id(&self, entry_id: Uuid) -> Result<LeaderboardEntry, ApplicationError>;

    /// Deletes an entry for good.
    async fn delete(&self, entry_id: Uuid) -> Result<(), ApplicationError>;

    /// Returns one page of the ranked board described by `query`.
    async fn ranked_page(
        &self,
        query: &RankQuery,
        window: PageWindow,
    ) -> Result<Vec<RankedEntry>, ApplicationError>;

    /// Returns a player's entry ranked against the whole quiz board.
    async fn ranked_entry(
        &self,
        quiz_id: Uuid,
        player_id: Uuid,
    ) -> Result<RankedEntry, ApplicationError>;
}
