//! In-memory rank ordering for leaderboard entries.
//!
//! Entries are ordered by score descending, then elapsed time ascending.
//! Rows tied on both keys share a rank and are laid out by `recorded_at`
//! then id, so page boundaries are stable between calls. Ranks are dense:
//! the next distinct `(score, elapsed_time)` pair gets the previous rank + 1.
//!
//! Backs the in-memory repository in `test_utils`; Postgres ranks with
//! `DENSE_RANK()` and must agree with this ordering.

use std::cmp::Ordering;

use quizboard_types::leaderboard::{LeaderboardEntry, RankQuery};

pub fn rank_order(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.elapsed_time.cmp(&b.elapsed_time))
        .then_with(|| a.recorded_at.cmp(&b.recorded_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sorts `entries` into rank order and pairs each with its dense rank.
pub fn dense_rank(mut entries: Vec<LeaderboardEntry>) -> Vec<(u32, LeaderboardEntry)> {
    entries.sort_by(rank_order);

    let mut rank = 0;
    let mut previous: Option<(u32, u32)> = None;

    entries
        .into_iter()
        .map(|entry| {
            let key = (entry.score, entry.elapsed_time);
            if previous != Some(key) {
                rank += 1;
                previous = Some(key);
            }
            (rank, entry)
        })
        .collect()
}

/// Ranks the entries of the query's recency window, then keeps the rows
/// whose player name matches the query's needle.
///
/// `player_name` resolves display names; players without one never match a
/// name needle.
pub fn ranked_board<'n, I, N>(
    entries: I,
    query: &RankQuery,
    player_name: N,
) -> Vec<(u32, LeaderboardEntry)>
where
    I: IntoIterator<Item = LeaderboardEntry>,
    N: Fn(&LeaderboardEntry) -> Option<&'n str>,
{
    let in_window = entries
        .into_iter()
        .filter(|entry| query.in_window(entry))
        .collect();

    dense_rank(in_window)
        .into_iter()
        .filter(|(_, entry)| match &query.name_contains {
            Some(_) => player_name(entry).is_some_and(|name| query.matches_name(name)),
            None => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, Utc};
    use std::collections::HashMap;
    use uuid::Uuid;

    use quizboard_types::leaderboard::{LeaderboardFilter, RecencyFilter};

    use super::*;

    fn entry(quiz_id: Uuid, score: u32, elapsed_time: u32, recorded_at: DateTime<Utc>) -> LeaderboardEntry {
        LeaderboardEntry {
            id: Uuid::new_v4(),
            quiz_id,
            player_id: Uuid::new_v4(),
            score,
            elapsed_time,
            recorded_at,
        }
    }

    fn ranks(board: &[(u32, LeaderboardEntry)]) -> Vec<u32> {
        board.iter().map(|(rank, _)| *rank).collect()
    }

    #[test]
    fn test_ties_share_rank_without_gaps() {
        let quiz_id = Uuid::new_v4();
        let now = Utc::now();
        let board = dense_rank(vec![
            entry(quiz_id, 30, 60, now),
            entry(quiz_id, 50, 60, now),
            entry(quiz_id, 50, 60, now),
        ]);

        assert_eq!(ranks(&board), vec![1, 1, 2]);
        assert_eq!(board[2].1.score, 30);
    }

    #[test]
    fn test_lower_elapsed_time_wins_score_ties() {
        let quiz_id = Uuid::new_v4();
        let now = Utc::now();
        let slow = entry(quiz_id, 70, 200, now);
        let fast = entry(quiz_id, 70, 100, now);

        let board = dense_rank(vec![slow.clone(), fast.clone()]);

        assert_eq!(board[0], (1, fast));
        assert_eq!(board[1], (2, slow));
    }

    #[test]
    fn test_full_ties_are_laid_out_oldest_first() {
        let quiz_id = Uuid::new_v4();
        let now = Utc::now();
        let newer = entry(quiz_id, 40, 90, now);
        let older = entry(quiz_id, 40, 90, now - Duration::minutes(5));

        let board = dense_rank(vec![newer.clone(), older.clone()]);

        assert_eq!(board, vec![(1, older), (1, newer)]);
    }

    #[test]
    fn test_name_filter_keeps_board_ranks() {
        let quiz_id = Uuid::new_v4();
        let now = Utc::now();
        let first = entry(quiz_id, 90, 10, now);
        let second = entry(quiz_id, 80, 10, now);
        let third = entry(quiz_id, 70, 10, now);

        let names: HashMap<Uuid, &str> = HashMap::from([
            (first.player_id, "Bob"),
            (second.player_id, "Carol"),
            (third.player_id, "caroline"),
        ]);

        let filter = LeaderboardFilter::new(RecencyFilter::All, Some("CAROL".to_string()));
        let query = RankQuery::resolve(quiz_id, &filter, now);
        let board = ranked_board(vec![first, second, third], &query, |e| {
            names.get(&e.player_id).copied()
        });

        assert_eq!(ranks(&board), vec![2, 3]);
    }

    #[test]
    fn test_recency_window_defines_ranked_population() {
        let quiz_id = Uuid::new_v4();
        let now = Utc::now();
        let stale_leader = entry(quiz_id, 100, 10, now - Duration::days(2));
        let fresh = entry(quiz_id, 60, 10, now - Duration::hours(1));
        let other_quiz = entry(Uuid::new_v4(), 100, 1, now);

        let day = RankQuery::resolve(quiz_id, &LeaderboardFilter::new(RecencyFilter::Day, None), now);
        let board = ranked_board(vec![stale_leader, fresh.clone(), other_quiz], &day, |_| None);

        assert_eq!(board, vec![(1, fresh)]);
    }
}
