use std::sync::Arc;

use quizboard_app::{clock::SystemClock, config::Config, service::LeaderboardService};
use quizboard_db::{establish_connection_pool, uow::PostgresUnitOfWorkProvider};
use quizboard_types::{Result, errors::ApplicationError};
use quizboard_web::{AppState, WebRouter};

mod logs;
use logs::setup_logging;

#[tokio::main]
#[cfg(not(tarpaulin_include))]
async fn main() -> Result<(), ApplicationError> {
    let _log_guard = setup_logging();
    let (config, service) = setup_app().await?;
    let state = AppState::new(service);

    WebRouter::serve(state, config.http_port).await
}

async fn setup_app() -> Result<(Arc<Config>, Arc<LeaderboardService>), ApplicationError> {
    let config = Arc::new(Config::from_env());
    tracing::debug!("Loaded config: {:?}", config);

    let db_pool = establish_connection_pool(config.db_max_connections).await?;

    sqlx::migrate!("../migrations")
        .run(&db_pool)
        .await
        .map_err(|e| ApplicationError::Infrastructure(e.to_string()))?;
    tracing::info!("Database migrations applied");

    let uow_provider = Arc::new(PostgresUnitOfWorkProvider::new(db_pool));
    let service = Arc::new(LeaderboardService::new(
        config.clone(),
        uow_provider,
        Arc::new(SystemClock),
    ));

    Ok((config, service))
}
