use serde::Serialize;
use uuid::Uuid;

use quizboard_types::leaderboard::{LeaderboardFilter, RankedEntry};

use crate::{cqrs::Query, pagination::PageWindow};

/// Fetch one page of a quiz leaderboard.
#[derive(Debug, Clone)]
pub struct GetLeaderboardPage {
    pub quiz_id: Uuid,
    pub filter: LeaderboardFilter,
    pub window: PageWindow,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardPage {
    pub entries: Vec<RankedEntry>,
    pub has_next: bool,
}

impl Query for GetLeaderboardPage {
    type Output = LeaderboardPage;
}

/// Fetch a player's entry on a quiz, ranked against the whole board.
#[derive(Debug, Clone)]
pub struct GetPlayerEntry {
    pub quiz_id: Uuid,
    pub player_id: Uuid,
}

impl Query for GetPlayerEntry {
    type Output = RankedEntry;
}
