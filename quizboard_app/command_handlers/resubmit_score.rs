use std::sync::Arc;

use quizboard_types::{
    errors::{ApplicationError, LeaderboardError},
    leaderboard::{LeaderboardEntry, ScoreUpdate},
};

use crate::{
    clock::Clock,
    config::Config,
    cqrs::{CommandHandler, commands::ResubmitScore},
    score_policy::ScorePolicy,
    uow::UnitOfWork,
};

pub struct ResubmitScoreCommandHandler {
    clock: Arc<dyn Clock>,
}

impl ResubmitScoreCommandHandler {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

#[async_trait::async_trait]
impl CommandHandler<ResubmitScore> for ResubmitScoreCommandHandler {
    async fn handle(
        &self,
        command: ResubmitScore,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<LeaderboardEntry, ApplicationError> {
        ScorePolicy::new(uow.quizzes())
            .validate(command.quiz_id, command.score)
            .await?;

        let repo = uow.leaderboard();
        let current = repo.get_by_id(command.entry_id).await?;

        // Entries never move between quizzes or players.
        if current.quiz_id != command.quiz_id || current.player_id != command.player_id {
            return Err(LeaderboardError::EntryPlayerMismatch {
                entry_id: command.entry_id,
                quiz_id: command.quiz_id,
                player_id: command.player_id,
            }
            .into());
        }

        let update = ScoreUpdate {
            score: command.score,
            elapsed_time: command.elapsed_time,
            recorded_at: self.clock.now(),
        };
        let entry = repo.update(command.entry_id, &update).await?;

        tracing::info!(
            entry_id = %entry.id,
            previous_score = current.score,
            score = entry.score,
            "Leaderboard entry updated"
        );

        Ok(entry)
    }
}
