use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use uuid::Uuid;

/// A player's recorded result on one quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub player_id: Uuid,
    pub score: u32,
    /// Seconds taken to complete the attempt; lower wins ties on score.
    pub elapsed_time: u32,
    pub recorded_at: DateTime<Utc>,
}

/// Values for a fresh entry. Identity is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLeaderboardEntry {
    pub quiz_id: Uuid,
    pub player_id: Uuid,
    pub score: u32,
    pub elapsed_time: u32,
    pub recorded_at: DateTime<Utc>,
}

/// Replacement values for an existing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreUpdate {
    pub score: u32,
    pub elapsed_time: u32,
    pub recorded_at: DateTime<Utc>,
}

/// An entry as shown on a leaderboard, with its dense rank and display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    #[serde(flatten)]
    pub entry: LeaderboardEntry,
    pub rank: u32,
    pub player_name: String,
    pub quiz_title: String,
}

#[derive(Debug, Error)]
#[error("Unknown recency filter '{0}', expected one of: all, day, week")]
pub struct UnknownRecencyFilter(pub String);

/// Time window applied to `recorded_at`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecencyFilter {
    #[default]
    All,
    /// Last 24 hours.
    Day,
    /// Last 8 days.
    Week,
}

impl RecencyFilter {
    pub fn window(&self) -> Option<Duration> {
        match self {
            RecencyFilter::All => None,
            RecencyFilter::Day => Some(Duration::hours(24)),
            RecencyFilter::Week => Some(Duration::days(8)),
        }
    }

    /// Oldest `recorded_at` still inside the window, as seen from `now`.
    pub fn since(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.window().map(|window| now - window)
    }
}

impl FromStr for RecencyFilter {
    type Err = UnknownRecencyFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(RecencyFilter::All),
            "day" => Ok(RecencyFilter::Day),
            "week" => Ok(RecencyFilter::Week),
            _ => Err(UnknownRecencyFilter(s.to_string())),
        }
    }
}

impl fmt::Display for RecencyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecencyFilter::All => "all",
            RecencyFilter::Day => "day",
            RecencyFilter::Week => "week",
        };
        f.write_str(name)
    }
}

/// Caller-facing filters for a leaderboard listing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LeaderboardFilter {
    pub recency: RecencyFilter,
    pub name: Option<String>,
}

impl LeaderboardFilter {
    pub fn new(recency: RecencyFilter, name: Option<String>) -> Self {
        Self { recency, name }
    }
}

/// A leaderboard filter resolved against a point in time.
///
/// The recency window decides which entries are ranked at all; the name
/// needle only selects rows from the ranked board, so matched players keep
/// the rank they hold on the full board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankQuery {
    pub quiz_id: Uuid,
    pub recorded_since: Option<DateTime<Utc>>,
    pub name_contains: Option<String>,
}

impl RankQuery {
    pub fn resolve(quiz_id: Uuid, filter: &LeaderboardFilter, now: DateTime<Utc>) -> Self {
        let name_contains = filter
            .name
            .as_deref()
            .map(str::trim)
            .filter(|needle| !needle.is_empty())
            .map(str::to_string);

        Self {
            quiz_id,
            recorded_since: filter.recency.since(now),
            name_contains,
        }
    }

    /// The whole board of a quiz, unfiltered.
    pub fn whole_board(quiz_id: Uuid) -> Self {
        Self {
            quiz_id,
            recorded_since: None,
            name_contains: None,
        }
    }

    pub fn in_window(&self, entry: &LeaderboardEntry) -> bool {
        entry.quiz_id == self.quiz_id
            && self
                .recorded_since
                .is_none_or(|since| entry.recorded_at >= since)
    }

    /// Case-insensitive substring match against a player's display name.
    pub fn matches_name(&self, player_name: &str) -> bool {
        match &self.name_contains {
            Some(needle) => player_name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_recorded_at(quiz_id: Uuid, recorded_at: DateTime<Utc>) -> LeaderboardEntry {
        LeaderboardEntry {
            id: Uuid::new_v4(),
            quiz_id,
            player_id: Uuid::new_v4(),
            score: 10,
            elapsed_time: 30,
            recorded_at,
        }
    }

    #[test]
    fn test_recency_windows() {
        let now = Utc::now();
        let quiz_id = Uuid::new_v4();
        let two_days_old = entry_recorded_at(quiz_id, now - Duration::days(2));

        let day = RankQuery::resolve(quiz_id, &LeaderboardFilter::new(RecencyFilter::Day, None), now);
        let week =
            RankQuery::resolve(quiz_id, &LeaderboardFilter::new(RecencyFilter::Week, None), now);
        let all = RankQuery::resolve(quiz_id, &LeaderboardFilter::default(), now);

        assert!(!day.in_window(&two_days_old));
        assert!(week.in_window(&two_days_old));
        assert!(all.in_window(&two_days_old));
        assert_eq!(week.recorded_since, Some(now - Duration::days(8)));
    }

    #[test]
    fn test_window_excludes_other_quizzes() {
        let now = Utc::now();
        let query = RankQuery::whole_board(Uuid::new_v4());
        let foreign = entry_recorded_at(Uuid::new_v4(), now);

        assert!(!query.in_window(&foreign));
    }

    #[test]
    fn test_name_filter_is_case_insensitive_substring() {
        let filter = LeaderboardFilter::new(RecencyFilter::All, Some("  ali ".to_string()));
        let query = RankQuery::resolve(Uuid::new_v4(), &filter, Utc::now());

        assert_eq!(query.name_contains.as_deref(), Some("ali"));
        assert!(query.matches_name("Alice"));
        assert!(query.matches_name("NATALIA"));
        assert!(!query.matches_name("Bob"));
    }

    #[test]
    fn test_blank_name_filter_is_ignored() {
        let filter = LeaderboardFilter::new(RecencyFilter::All, Some("   ".to_string()));
        let query = RankQuery::resolve(Uuid::new_v4(), &filter, Utc::now());

        assert_eq!(query.name_contains, None);
        assert!(query.matches_name("anyone"));
    }

    #[test]
    fn test_recency_filter_parsing() {
        assert_eq!("day".parse::<RecencyFilter>().unwrap(), RecencyFilter::Day);
        assert_eq!("WEEK".parse::<RecencyFilter>().unwrap(), RecencyFilter::Week);
        assert_eq!("all".parse::<RecencyFilter>().unwrap(), RecencyFilter::All);
        assert!("month".parse::<RecencyFilter>().is_err());
        assert_eq!(RecencyFilter::Week.to_string(), "week");
    }

    #[test]
    fn test_ranked_entry_serializes_flat() {
        let entry = entry_recorded_at(Uuid::new_v4(), Utc::now());
        let ranked = RankedEntry {
            entry: entry.clone(),
            rank: 3,
            player_name: "Alice".to_string(),
            quiz_title: "Capitals".to_string(),
        };

        let json = serde_json::to_value(&ranked).unwrap();
        assert_eq!(json["rank"], 3);
        assert_eq!(json["score"], 10);
        assert_eq!(json["player_id"], entry.player_id.to_string());
    }
}
