use axum::{
    Router,
    routing::{delete, get, put},
};
use std::{io::Error, net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;

use quizboard_app::service::LeaderboardService;
use quizboard_types::{Result, errors::ApplicationError};

use crate::handlers::{
    get_player_entry, list_leaderboard, remove_entry, resubmit_score, submit_score,
};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<LeaderboardService>,
}

impl AppState {
    pub fn new(service: Arc<LeaderboardService>) -> AppState {
        AppState { service }
    }
}

pub struct WebRouter {}

impl WebRouter {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route(
                "/quizzes/{quiz_id}/leaderboard",
                get(list_leaderboard).post(submit_score),
            )
            .route(
                "/quizzes/{quiz_id}/leaderboard/players/{player_id}",
                get(get_player_entry),
            )
            .route(
                "/quizzes/{quiz_id}/leaderboard/{entry_id}",
                put(resubmit_score),
            )
            .route("/leaderboard/{entry_id}", delete(remove_entry))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    pub async fn serve(state: AppState, port: u16) -> Result<(), ApplicationError> {
        let router = Self::router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(infra_error)?;

        tracing::info!("HTTP Server started, listening on http://{}", addr);
        axum::serve(listener, router).await.map_err(infra_error)?;

        Ok(())
    }
}

fn infra_error(e: Error) -> ApplicationError {
    let err = format!("{:#?}", e);
    ApplicationError::Infrastructure(err)
}
