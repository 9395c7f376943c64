use std::sync::Arc;

use quizboard_types::{
    errors::{ApplicationError, ErrorKind},
    leaderboard::{LeaderboardEntry, NewLeaderboardEntry},
};

use crate::{
    clock::Clock,
    config::Config,
    cqrs::{CommandHandler, commands::SubmitScore},
    score_policy::ScorePolicy,
    uow::UnitOfWork,
};

pub struct SubmitScoreCommandHandler {
    clock: Arc<dyn Clock>,
}

impl SubmitScoreCommandHandler {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

#[async_trait::async_trait]
impl CommandHandler<SubmitScore> for SubmitScoreCommandHandler {
    async fn handle(
        &self,
        command: SubmitScore,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<LeaderboardEntry, ApplicationError> {
        ScorePolicy::new(uow.quizzes())
            .validate(command.quiz_id, command.score)
            .await?;

        let new_entry = NewLeaderboardEntry {
            quiz_id: command.quiz_id,
            player_id: command.player_id,
            score: command.score,
            elapsed_time: command.elapsed_time,
            recorded_at: self.clock.now(),
        };

        // A conflict means the caller should have resubmitted instead.
        let entry = uow
            .leaderboard()
            .create(&new_entry)
            .await
            .inspect_err(|e| {
                if e.kind() == ErrorKind::Conflict {
                    tracing::warn!(
                        quiz_id = %command.quiz_id,
                        player_id = %command.player_id,
                        "Duplicate leaderboard submission"
                    );
                }
            })?;

        tracing::info!(
            entry_id = %entry.id,
            quiz_id = %entry.quiz_id,
            player_id = %entry.player_id,
            score = entry.score,
            "Leaderboard entry created"
        );

        Ok(entry)
    }
}
