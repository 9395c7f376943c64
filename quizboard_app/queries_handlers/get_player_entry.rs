use async_trait::async_trait;
use std::sync::Arc;

use quizboard_types::errors::ApplicationError;

use crate::{
    config::Config,
    cqrs::{Query, QueryHandler, queries::GetPlayerEntry},
    uow::UnitOfWork,
};

pub struct GetPlayerEntryHandler {}

impl GetPlayerEntryHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl QueryHandler<GetPlayerEntry> for GetPlayerEntryHandler {
    async fn handle(
        &self,
        query: GetPlayerEntry,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<<GetPlayerEntry as Query>::Output, ApplicationError> {
        uow.leaderboard()
            .ranked_entry(query.quiz_id, query.player_id)
            .await
            .inspect_err(|e| {
                // Not having played a quiz yet is an ordinary outcome.
                if e.is_not_found() {
                    tracing::debug!(
                        quiz_id = %query.quiz_id,
                        player_id = %query.player_id,
                        "Player has no leaderboard entry"
                    );
                }
            })
    }
}
