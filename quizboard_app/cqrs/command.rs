use async_trait::async_trait;
use quizboard_types::errors::ApplicationError;
use std::sync::Arc;

use crate::{config::Config, uow::UnitOfWork};

/// A marker trait for Command structs.
/// Commands are operations that change the state of the system.
pub trait Command: Send + Sync {
    /// What the command hands back once applied.
    type Output: Send + Sync;
}

/// A trait for handlers that execute Commands.
/// It should NOT manage the transaction lifecycle (commit/rollback);
/// that is the job of the LeaderboardService.
#[async_trait]
pub trait CommandHandler<C: Command> {
    async fn handle(
        &self,
        cmd: C,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        config: &Arc<Config>,
    ) -> Result<C::Output, ApplicationError>;
}
