use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use quizboard_app::{
    cqrs::{
        commands::{RemoveEntry, ResubmitScore, SubmitScore},
        queries::{GetLeaderboardPage, GetPlayerEntry},
    },
    pagination::PageWindow,
};
use quizboard_types::leaderboard::{LeaderboardFilter, RankedEntry, RecencyFilter};

use crate::{handlers::ApiError, http::AppState};

/// Query string of a leaderboard listing.
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub recency: Option<String>,
    pub name: Option<String>,
}

/// Body of a submission or resubmission.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoreForm {
    pub player_id: Uuid,
    pub score: u32,
    pub elapsed_time: u32,
}

#[derive(Debug, Serialize)]
struct LeaderboardResponse {
    entries: Vec<RankedEntry>,
    has_next: bool,
    #[serde(flatten)]
    window: PageWindow,
}

/// GET /quizzes/{quiz_id}/leaderboard – One page of the ranked board.
pub async fn list_leaderboard(
    State(state): State<AppState>,
    Path(quiz_id): Path<Uuid>,
    Query(params): Query<LeaderboardParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = params.page.unwrap_or(0);
    if page < 0 {
        return Err(ApiError::BadRequest(format!(
            "page must not be negative, got {page}"
        )));
    }

    let recency = match params.recency.as_deref() {
        Some(value) => value
            .parse::<RecencyFilter>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => RecencyFilter::default(),
    };

    let limit = state.service.config().clamp_page_size(params.limit);
    let window = PageWindow::checked(page, limit).ok_or_else(|| {
        ApiError::BadRequest(format!("page {page} is out of range for limit {limit}"))
    })?;
    let query = GetLeaderboardPage {
        quiz_id,
        filter: LeaderboardFilter::new(recency, params.name),
        window,
    };

    let page = state.service.list_page(query).await.map_err(ApiError::Read)?;

    Ok(Json(LeaderboardResponse {
        entries: page.entries,
        has_next: page.has_next,
        window,
    }))
}

/// GET /quizzes/{quiz_id}/leaderboard/players/{player_id} – A player's ranked entry.
pub async fn get_player_entry(
    State(state): State<AppState>,
    Path((quiz_id, player_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<RankedEntry>, ApiError> {
    let entry = state
        .service
        .get_player_entry(GetPlayerEntry { quiz_id, player_id })
        .await
        .map_err(ApiError::Read)?;

    Ok(Json(entry))
}

/// POST /quizzes/{quiz_id}/leaderboard – First submission of a player.
pub async fn submit_score(
    State(state): State<AppState>,
    Path(quiz_id): Path<Uuid>,
    Json(form): Json<ScoreForm>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = SubmitScore {
        quiz_id,
        player_id: form.player_id,
        score: form.score,
        elapsed_time: form.elapsed_time,
    };

    let entry = state.service.submit(cmd).await.map_err(ApiError::Write)?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /quizzes/{quiz_id}/leaderboard/{entry_id} – Replace an existing entry's result.
pub async fn resubmit_score(
    State(state): State<AppState>,
    Path((quiz_id, entry_id)): Path<(Uuid, Uuid)>,
    Json(form): Json<ScoreForm>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = ResubmitScore {
        entry_id,
        quiz_id,
        player_id: form.player_id,
        score: form.score,
        elapsed_time: form.elapsed_time,
    };

    let entry = state.service.resubmit(cmd).await.map_err(ApiError::Write)?;

    Ok(Json(entry))
}

/// DELETE /leaderboard/{entry_id}
pub async fn remove_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .service
        .remove(RemoveEntry { entry_id })
        .await
        .map_err(ApiError::Write)?;

    Ok(StatusCode::NO_CONTENT)
}
