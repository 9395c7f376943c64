#[cfg(any(test, feature = "test-utils"))]
#[cfg(not(tarpaulin_include))]
pub mod tests {
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};
    use std::{
        collections::HashMap,
        sync::{
            Arc, Mutex,
            atomic::{AtomicBool, AtomicUsize, Ordering},
        },
    };
    use uuid::Uuid;

    use quizboard_types::{
        errors::{ApplicationError, DbError, LeaderboardError},
        leaderboard::{
            LeaderboardEntry, NewLeaderboardEntry, RankQuery, RankedEntry, ScoreUpdate,
        },
    };

    use crate::{
        clock::Clock,
        pagination::{PageWindow, PositionProbe},
        ranking::ranked_board,
        repository::{LeaderboardRepository, QuizRepository},
        uow::{UnitOfWork, UnitOfWorkProvider},
    };

    /// A clock that only moves when told to.
    #[derive(Clone)]
    pub struct FixedClock {
        now: Arc<Mutex<DateTime<Utc>>>,
    }

    impl FixedClock {
        pub fn new(now: DateTime<Utc>) -> Self {
            Self {
                now: Arc::new(Mutex::new(now)),
            }
        }

        pub fn set(&self, now: DateTime<Utc>) {
            *self.now.lock().unwrap() = now;
        }

        pub fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now += by;
        }
    }

    impl Default for FixedClock {
        fn default() -> Self {
            Self::new(Utc::now())
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    #[derive(Default, Clone)]
    pub struct EntryFactoryOptions {
        pub id: Option<Uuid>,
        pub quiz_id: Option<Uuid>,
        pub player_id: Option<Uuid>,
        pub score: Option<u32>,
        pub elapsed_time: Option<u32>,
        pub recorded_at: Option<DateTime<Utc>>,
    }

    pub fn entry_factory(options: EntryFactoryOptions) -> LeaderboardEntry {
        LeaderboardEntry {
            id: options.id.unwrap_or_else(Uuid::new_v4),
            quiz_id: options.quiz_id.unwrap_or_else(Uuid::new_v4),
            player_id: options.player_id.unwrap_or_else(Uuid::new_v4),
            score: options.score.unwrap_or(10),
            elapsed_time: options.elapsed_time.unwrap_or(60),
            recorded_at: options.recorded_at.unwrap_or_else(Utc::now),
        }
    }

    #[derive(Default, Clone)]
    pub struct MockLeaderboardRepository {
        entries: Arc<Mutex<HashMap<Uuid, LeaderboardEntry>>>,
        player_names: Arc<Mutex<HashMap<Uuid, String>>>,
        quiz_titles: Arc<Mutex<HashMap<Uuid, String>>>,
    }

    impl MockLeaderboardRepository {
        pub fn add_player(&self, player_id: Uuid, display_name: &str) {
            self.player_names
                .lock()
                .unwrap()
                .insert(player_id, display_name.to_string());
        }

        pub fn add_quiz_title(&self, quiz_id: Uuid, title: &str) {
            self.quiz_titles
                .lock()
                .unwrap()
                .insert(quiz_id, title.to_string());
        }

        /// Seeds an entry as-is, bypassing the uniqueness check.
        pub fn insert(&self, entry: LeaderboardEntry) {
            self.entries.lock().unwrap().insert(entry.id, entry);
        }

        pub fn len(&self) -> usize {
            self.entries.lock().unwrap().len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        fn board(&self, query: &RankQuery) -> Vec<RankedEntry> {
            let entries = self.entries.lock().unwrap();
            let names = self.player_names.lock().unwrap();
            let titles = self.quiz_titles.lock().unwrap();

            ranked_board(entries.values().cloned(), query, |entry| {
                names.get(&entry.player_id).map(String::as_str)
            })
            .into_iter()
            .map(|(rank, entry)| RankedEntry {
                rank,
                player_name: names.get(&entry.player_id).cloned().unwrap_or_default(),
                quiz_title: titles.get(&entry.quiz_id).cloned().unwrap_or_default(),
                entry,
            })
            .collect()
        }
    }

    #[async_trait]
    impl PositionProbe<RankQuery> for MockLeaderboardRepository {
        async fn exists_at(
            &self,
            query: &RankQuery,
            position: i64,
        ) -> Result<bool, ApplicationError> {
            let Ok(position) = usize::try_from(position) else {
                return Ok(false);
            };
            Ok(self.board(query).len() > position)
        }
    }

    #[async_trait]
    impl LeaderboardRepository for MockLeaderboardRepository {
        async fn create(
            &self,
            entry: &NewLeaderboardEntry,
        ) -> Result<LeaderboardEntry, ApplicationError> {
            let mut entries = self.entries.lock().unwrap();

            if entries
                .values()
                .any(|e| e.quiz_id == entry.quiz_id && e.player_id == entry.player_id)
            {
                return Err(ApplicationError::Leaderboard(LeaderboardError::Conflict {
                    quiz_id: entry.quiz_id,
                    player_id: entry.player_id,
                }));
            }

            let created = LeaderboardEntry {
                id: Uuid::new_v4(),
                quiz_id: entry.quiz_id,
                player_id: entry.player_id,
                score: entry.score,
                elapsed_time: entry.elapsed_time,
                recorded_at: entry.recorded_at,
            };
            entries.insert(created.id, created.clone());

            Ok(created)
        }

        async fn update(
            &self,
            entry_id: Uuid,
            update: &ScoreUpdate,
        ) -> Result<LeaderboardEntry, ApplicationError> {
            let mut entries = self.entries.lock().unwrap();
            let entry = entries
                .get_mut(&entry_id)
                .ok_or(ApplicationError::Db(DbError::EntryNotFound(entry_id)))?;

            entry.score = update.score;
            entry.elapsed_time = update.elapsed_time;
            entry.recorded_at = update.recorded_at;

            Ok(entry.clone())
        }

        async fn get(
            &self,
            quiz_id: Uuid,
            player_id: Uuid,
        ) -> Result<LeaderboardEntry, ApplicationError> {
            self.entries
                .lock()
                .unwrap()
                .values()
                .find(|e| e.quiz_id == quiz_id && e.player_id == player_id)
                .cloned()
                .ok_or(ApplicationError::Db(DbError::PlayerEntryNotFound {
                    quiz_id,
                    player_id,
                }))
        }

        async fn get_by_id(&self, entry_id: Uuid) -> Result<LeaderboardEntry, ApplicationError> {
            self.entries
                .lock()
                .unwrap()
                .get(&entry_id)
                .cloned()
                .ok_or(ApplicationError::Db(DbError::EntryNotFound(entry_id)))
        }

        async fn delete(&self, entry_id: Uuid) -> Result<(), ApplicationError> {
            match self.entries.lock().unwrap().remove(&entry_id) {
                Some(_) => Ok(()),
                None => Err(ApplicationError::Db(DbError::EntryNotFound(entry_id))),
            }
        }

        async fn ranked_page(
            &self,
            query: &RankQuery,
            window: PageWindow,
        ) -> Result<Vec<RankedEntry>, ApplicationError> {
            let offset = usize::try_from(window.offset()).unwrap_or(0);
            let limit = usize::try_from(window.limit).unwrap_or(0);

            Ok(self
                .board(query)
                .into_iter()
                .skip(offset)
                .take(limit)
                .collect())
        }

        async fn ranked_entry(
            &self,
            quiz_id: Uuid,
            player_id: Uuid,
        ) -> Result<RankedEntry, ApplicationError> {
            self.board(&RankQuery::whole_board(quiz_id))
                .into_iter()
                .find(|ranked| ranked.entry.player_id == player_id)
                .ok_or(ApplicationError::Db(DbError::PlayerEntryNotFound {
                    quiz_id,
                    player_id,
                }))
        }
    }

    #[derive(Default, Clone)]
    pub struct MockQuizRepository {
        max_scores: Arc<Mutex<HashMap<Uuid, u32>>>,
        unavailable: Arc<AtomicBool>,
    }

    impl MockQuizRepository {
        pub fn add_quiz(&self, quiz_id: Uuid, max_score: u32) {
            self.max_scores.lock().unwrap().insert(quiz_id, max_score);
        }

        /// Makes every lookup fail as if the metadata store were down.
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl QuizRepository for MockQuizRepository {
        async fn get_max_score(&self, quiz_id: Uuid) -> Result<u32, ApplicationError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(ApplicationError::Infrastructure(
                    "quiz metadata store unavailable".to_string(),
                ));
            }

            self.max_scores
                .lock()
                .unwrap()
                .get(&quiz_id)
                .copied()
                .ok_or(ApplicationError::Db(DbError::QuizNotFound(quiz_id)))
        }
    }

    /// In-memory UoW. Writes are applied immediately, so rollback can't undo
    /// them; it only counts how the UoW was closed.
    #[derive(Default, Clone)]
    pub struct MockUnitOfWork {
        leaderboard: Arc<MockLeaderboardRepository>,
        quizzes: Arc<MockQuizRepository>,
        commits: Arc<AtomicUsize>,
        rollbacks: Arc<AtomicUsize>,
    }

    impl MockUnitOfWork {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn add_quiz(&self, quiz_id: Uuid, title: &str, max_score: u32) {
            self.quizzes.add_quiz(quiz_id, max_score);
            self.leaderboard.add_quiz_title(quiz_id, title);
        }

        pub fn add_player(&self, player_id: Uuid, display_name: &str) {
            self.leaderboard.add_player(player_id, display_name);
        }

        pub fn mock_leaderboard(&self) -> &MockLeaderboardRepository {
            &self.leaderboard
        }

        pub fn mock_quizzes(&self) -> &MockQuizRepository {
            &self.quizzes
        }

        pub fn commits(&self) -> usize {
            self.commits.load(Ordering::SeqCst)
        }

        pub fn rollbacks(&self) -> usize {
            self.rollbacks.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl<'a> UnitOfWork<'a> for MockUnitOfWork {
        fn leaderboard(&self) -> Arc<dyn LeaderboardRepository + 'a> {
            self.leaderboard.clone()
        }

        fn quizzes(&self) -> Arc<dyn QuizRepository + 'a> {
            self.quizzes.clone()
        }

        async fn commit(self: Box<Self>) -> Result<(), ApplicationError> {
            self.commits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn rollback(self: Box<Self>) -> Result<(), ApplicationError> {
            self.rollbacks.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Hands out UoWs that all share the same in-memory state.
    #[derive(Default, Clone)]
    pub struct MockUnitOfWorkProvider {
        uow: MockUnitOfWork,
    }

    impl MockUnitOfWorkProvider {
        pub fn new(uow: MockUnitOfWork) -> Self {
            Self { uow }
        }

        pub fn uow(&self) -> &MockUnitOfWork {
            &self.uow
        }
    }

    #[async_trait]
    impl UnitOfWorkProvider for MockUnitOfWorkProvider {
        async fn begin<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>, ApplicationError> {
            Ok(Box::new(self.uow.clone()))
        }
    }
}
