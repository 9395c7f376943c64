use std::sync::Arc;

use quizboard_types::{
    errors::ApplicationError,
    leaderboard::{LeaderboardEntry, RankedEntry},
};

use crate::{
    clock::Clock,
    command_handlers::{
        RemoveEntryCommandHandler, ResubmitScoreCommandHandler, SubmitScoreCommandHandler,
    },
    config::Config,
    cqrs::{
        Command, CommandHandler, Query, QueryHandler,
        commands::{RemoveEntry, ResubmitScore, SubmitScore},
        queries::{GetLeaderboardPage, GetPlayerEntry, LeaderboardPage},
    },
    queries_handlers::{GetLeaderboardPageHandler, GetPlayerEntryHandler},
    uow::UnitOfWorkProvider,
};

/// Entry point for every leaderboard operation.
///
/// It holds no state between calls. Its roles are:
/// 1. Managing Unit of Work (transaction) lifecycles.
/// 2. Dispatching Commands and Queries to their respective handlers.
///
/// Nothing is retried here; every error reaches the caller as-is.
pub struct LeaderboardService {
    config: Arc<Config>,
    uow_provider: Arc<dyn UnitOfWorkProvider>,
    clock: Arc<dyn Clock>,
}

impl LeaderboardService {
    pub fn new(
        config: Arc<Config>,
        uow_provider: Arc<dyn UnitOfWorkProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            uow_provider,
            clock,
        }
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// One page of a quiz board plus whether another page follows.
    pub async fn list_page(
        &self,
        query: GetLeaderboardPage,
    ) -> Result<LeaderboardPage, ApplicationError> {
        self.query(query, GetLeaderboardPageHandler::new(self.clock.clone()))
            .await
    }

    pub async fn get_player_entry(
        &self,
        query: GetPlayerEntry,
    ) -> Result<RankedEntry, ApplicationError> {
        self.query(query, GetPlayerEntryHandler::new()).await
    }

    pub async fn submit(&self, cmd: SubmitScore) -> Result<LeaderboardEntry, ApplicationError> {
        self.execute(cmd, SubmitScoreCommandHandler::new(self.clock.clone()))
            .await
    }

    pub async fn resubmit(
        &self,
        cmd: ResubmitScore,
    ) -> Result<LeaderboardEntry, ApplicationError> {
        self.execute(cmd, ResubmitScoreCommandHandler::new(self.clock.clone()))
            .await
    }

    pub async fn remove(&self, cmd: RemoveEntry) -> Result<(), ApplicationError> {
        self.execute(cmd, RemoveEntryCommandHandler::new()).await
    }

    /// Executes a command inside a Unit of Work, committing on success
    /// and rolling back on failure.
    pub async fn execute<C, H>(&self, cmd: C, handler: H) -> Result<C::Output, ApplicationError>
    where
        C: Command,
        H: CommandHandler<C>,
    {
        let uow = self.uow_provider.begin().await?;

        match handler.handle(cmd, &uow, &self.config).await {
            Ok(output) => {
                uow.commit().await?;
                Ok(output)
            }
            Err(e) => {
                uow.rollback().await?;
                Err(e)
            }
        }
    }

    /// Executes a query. The Unit of Work is always rolled back.
    pub async fn query<Q, H>(&self, query: Q, handler: H) -> Result<Q::Output, ApplicationError>
    where
        Q: Query,
        H: QueryHandler<Q>,
    {
        let uow = self.uow_provider.begin().await?;

        let result = handler.handle(query, &uow, &self.config).await;

        uow.rollback().await?;

        result
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use uuid::Uuid;

    use quizboard_types::{
        errors::ErrorKind,
        leaderboard::{LeaderboardFilter, RecencyFilter},
    };

    use super::*;
    use crate::{
        pagination::PageWindow,
        test_utils::tests::{FixedClock, MockUnitOfWork, MockUnitOfWorkProvider},
    };

    struct App {
        service: Arc<LeaderboardService>,
        mock: MockUnitOfWork,
        clock: FixedClock,
        quiz_id: Uuid,
    }

    fn setup() -> App {
        let mock = MockUnitOfWork::new();
        let quiz_id = Uuid::new_v4();
        mock.add_quiz(quiz_id, "Q1", 100);

        let clock = FixedClock::default();
        let provider = Arc::new(MockUnitOfWorkProvider::new(mock.clone()));
        let service = Arc::new(LeaderboardService::new(
            Arc::new(Config::default()),
            provider,
            Arc::new(clock.clone()),
        ));

        App {
            service,
            mock,
            clock,
            quiz_id,
        }
    }

    fn submit(quiz_id: Uuid, player_id: Uuid, score: u32, elapsed_time: u32) -> SubmitScore {
        SubmitScore {
            quiz_id,
            player_id,
            score,
            elapsed_time,
        }
    }

    fn first_page(quiz_id: Uuid) -> GetLeaderboardPage {
        GetLeaderboardPage {
            quiz_id,
            filter: LeaderboardFilter::default(),
            window: PageWindow::new(0, 10),
        }
    }

    #[tokio::test]
    async fn test_end_to_end_scenario() {
        let app = setup();
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();
        app.mock.add_player(p1, "P1");
        app.mock.add_player(p2, "P2");

        let p1_entry = app.service.submit(submit(app.quiz_id, p1, 80, 120)).await.unwrap();
        let ranked = app
            .service
            .get_player_entry(GetPlayerEntry {
                quiz_id: app.quiz_id,
                player_id: p1,
            })
            .await
            .unwrap();
        assert_eq!(ranked.rank, 1);

        app.service.submit(submit(app.quiz_id, p2, 90, 150)).await.unwrap();
        let page = app.service.list_page(first_page(app.quiz_id)).await.unwrap();
        let order: Vec<(String, u32)> = page
            .entries
            .iter()
            .map(|e| (e.player_name.clone(), e.rank))
            .collect();
        assert_eq!(order, vec![("P2".to_string(), 1), ("P1".to_string(), 2)]);
        assert!(!page.has_next);

        app.clock.advance(Duration::minutes(5));
        app.service
            .resubmit(ResubmitScore {
                entry_id: p1_entry.id,
                quiz_id: app.quiz_id,
                player_id: p1,
                score: 95,
                elapsed_time: 100,
            })
            .await
            .unwrap();

        let page = app.service.list_page(first_page(app.quiz_id)).await.unwrap();
        let order: Vec<(String, u32)> = page
            .entries
            .iter()
            .map(|e| (e.player_name.clone(), e.rank))
            .collect();
        assert_eq!(order, vec![("P1".to_string(), 1), ("P2".to_string(), 2)]);
    }

    #[tokio::test]
    async fn test_commands_commit_and_failures_roll_back() {
        let app = setup();
        let player_id = Uuid::new_v4();

        app.service
            .submit(submit(app.quiz_id, player_id, 10, 10))
            .await
            .unwrap();
        assert_eq!(app.mock.commits(), 1);
        assert_eq!(app.mock.rollbacks(), 0);

        let err = app
            .service
            .submit(submit(app.quiz_id, player_id, 500, 10))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ScoreRejected);
        assert_eq!(app.mock.commits(), 1);
        assert_eq!(app.mock.rollbacks(), 1);

        app.service.list_page(first_page(app.quiz_id)).await.unwrap();
        assert_eq!(app.mock.commits(), 1, "Queries never commit");
        assert_eq!(app.mock.rollbacks(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_submits_for_same_player_admit_one() {
        let app = setup();
        let player_id = Uuid::new_v4();

        let mut tasks = Vec::new();
        for score in 0..16 {
            let service = app.service.clone();
            let cmd = submit(app.quiz_id, player_id, score, 30);
            tasks.push(tokio::spawn(async move { service.submit(cmd).await }));
        }

        let mut created = 0;
        let mut conflicts = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => created += 1,
                Err(e) if e.kind() == ErrorKind::Conflict => conflicts += 1,
                Err(e) => panic!("Unexpected error: {:?}", e),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(conflicts, 15);
        assert_eq!(app.mock.mock_leaderboard().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_then_submit_creates_fresh_identity() {
        let app = setup();
        let player_id = Uuid::new_v4();

        let first = app
            .service
            .submit(submit(app.quiz_id, player_id, 40, 40))
            .await
            .unwrap();
        app.service
            .remove(RemoveEntry { entry_id: first.id })
            .await
            .unwrap();
        let second = app
            .service
            .submit(submit(app.quiz_id, player_id, 20, 40))
            .await
            .unwrap();

        assert_ne!(first.id, second.id);

        let err = app
            .service
            .remove(RemoveEntry { entry_id: first.id })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_metadata_outage_surfaces_as_infrastructure_error() {
        let app = setup();
        app.mock.mock_quizzes().set_unavailable(true);

        let err = app
            .service
            .submit(submit(app.quiz_id, Uuid::new_v4(), 1, 1))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Infrastructure);
        assert!(app.mock.mock_leaderboard().is_empty());
    }

    #[tokio::test]
    async fn test_day_filter_through_service() {
        let app = setup();
        let player_id = Uuid::new_v4();
        app.service
            .submit(submit(app.quiz_id, player_id, 60, 60))
            .await
            .unwrap();
        app.clock.advance(Duration::days(2));

        let mut query = first_page(app.quiz_id);
        query.filter = LeaderboardFilter::new(RecencyFilter::Day, None);
        assert!(app.service.list_page(query.clone()).await.unwrap().entries.is_empty());

        query.filter.recency = RecencyFilter::Week;
        assert_eq!(app.service.list_page(query).await.unwrap().entries.len(), 1);
    }
}
