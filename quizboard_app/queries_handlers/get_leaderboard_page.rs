use async_trait::async_trait;
use std::sync::Arc;

use quizboard_types::{errors::ApplicationError, leaderboard::RankQuery};

use crate::{
    clock::Clock,
    config::Config,
    cqrs::{
        Query, QueryHandler,
        queries::{GetLeaderboardPage, LeaderboardPage},
    },
    pagination::PaginationOracle,
    uow::UnitOfWork,
};

pub struct GetLeaderboardPageHandler {
    clock: Arc<dyn Clock>,
}

impl GetLeaderboardPageHandler {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

#[async_trait]
impl QueryHandler<GetLeaderboardPage> for GetLeaderboardPageHandler {
    async fn handle(
        &self,
        query: GetLeaderboardPage,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<GetLeaderboardPage as Query>::Output, ApplicationError> {
        // Recency boundaries are resolved on every call, never cached.
        let rank_query = RankQuery::resolve(query.quiz_id, &query.filter, self.clock.now());
        let repo = uow.leaderboard();

        let entries = repo.ranked_page(&rank_query, query.window).await?;
        let has_next = PaginationOracle::has_next(repo.as_ref(), &rank_query, query.window).await?;

        Ok(LeaderboardPage { entries, has_next })
    }
}
