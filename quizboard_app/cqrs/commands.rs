use uuid::Uuid;

use quizboard_types::leaderboard::LeaderboardEntry;

use crate::cqrs::Command;

/// Records a player's first score on a quiz.
#[derive(Debug, Clone)]
pub struct SubmitScore {
    pub quiz_id: Uuid,
    pub player_id: Uuid,
    pub score: u32,
    pub elapsed_time: u32,
}

impl Command for SubmitScore {
    type Output = LeaderboardEntry;
}

/// Overwrites the score of an existing entry ("try again").
/// A lower score than the recorded one is accepted as well.
#[derive(Debug, Clone)]
pub struct ResubmitScore {
    pub entry_id: Uuid,
    pub quiz_id: Uuid,
    pub player_id: Uuid,
    pub score: u32,
    pub elapsed_time: u32,
}

impl Command for ResubmitScore {
    type Output = LeaderboardEntry;
}

/// Deletes an entry.
#[derive(Debug, Clone)]
pub struct RemoveEntry {
    pub entry_id: Uuid,
}

impl Command for RemoveEntry {
    type Output = ();
}
