use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use quizboard_types::errors::{ApplicationError, ErrorKind};

/// Error side of every leaderboard route.
///
/// Reads report a missing entry as an empty `204`; writes report it as `404`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Read(ApplicationError),
    Write(ApplicationError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Read(e) if e.is_not_found() => StatusCode::NO_CONTENT,
            ApiError::Read(e) | ApiError::Write(e) => match e.kind() {
                ErrorKind::ScoreRejected => StatusCode::UNPROCESSABLE_ENTITY,
                ErrorKind::Conflict => StatusCode::CONFLICT,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Infrastructure => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            ApiError::BadRequest(message) => {
                (status, Json(json!({ "error": message }))).into_response()
            }
            _ if status == StatusCode::NO_CONTENT => status.into_response(),
            ApiError::Read(e) | ApiError::Write(e) => {
                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    tracing::error!("Leaderboard request failed: {}", e);
                    return (
                        status,
                        Json(json!({ "error": "Internal server error." })),
                    )
                        .into_response();
                }
                (status, Json(json!({ "error": e.to_string() }))).into_response()
            }
        }
    }
}
