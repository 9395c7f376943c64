use std::sync::Arc;

use quizboard_types::errors::ApplicationError;

use crate::{
    config::Config,
    cqrs::{CommandHandler, commands::RemoveEntry},
    uow::UnitOfWork,
};

pub struct RemoveEntryCommandHandler {}

impl RemoveEntryCommandHandler {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait::async_trait]
impl CommandHandler<RemoveEntry> for RemoveEntryCommandHandler {
    async fn handle(
        &self,
        command: RemoveEntry,
        uow: &Box<dyn UnitOfWork<'_> + '_>,
        _config: &Arc<Config>,
    ) -> Result<(), ApplicationError> {
        uow.leaderboard().delete(command.entry_id).await?;
        tracing::info!(entry_id = %command.entry_id, "Leaderboard entry removed");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use quizboard_types::errors::ErrorKind;

    use super::*;
    use crate::test_utils::tests::{EntryFactoryOptions, MockUnitOfWork, entry_factory};

    #[tokio::test]
    async fn test_remove_entry() {
        let config = Arc::new(Config::default());
        let mock = MockUnitOfWork::new();
        let entry = entry_factory(EntryFactoryOptions::default());
        mock.mock_leaderboard().insert(entry.clone());
        let uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(mock.clone());
        let handler = RemoveEntryCommandHandler::new();

        handler
            .handle(RemoveEntry { entry_id: entry.id }, &uow, &config)
            .await
            .unwrap();

        assert!(mock.mock_leaderboard().is_empty());
        let err = uow.leaderboard().get_by_id(entry.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_remove_missing_entry_is_not_found() {
        let config = Arc::new(Config::default());
        let uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(MockUnitOfWork::new());
        let handler = RemoveEntryCommandHandler::new();

        let err = handler
            .handle(
                RemoveEntry {
                    entry_id: Uuid::new_v4(),
                },
                &uow,
                &config,
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
