use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::catalog;
use super::domain::{CheckinAnswers, CheckinId, UserId};
use super::repository::{CheckinRepository, RepositoryError, SignalSink};
use super::service::{CheckinService, CheckinServiceError};

/// Request body for completing a check-in.
#[derive(Debug, Deserialize)]
pub struct CompleteCheckinRequest {
    pub answers: CheckinAnswers,
    #[serde(default)]
    pub captured_at: Option<DateTime<Utc>>,
}

/// Router builder exposing the check-in catalog, scoring, and history endpoints.
pub fn checkin_router<R, S>(service: Arc<CheckinService<R, S>>) -> Router
where
    R: CheckinRepository + 'static,
    S: SignalSink + 'static,
{
    Router::new()
        .route("/api/v1/checkin/questions", get(questions_handler))
        .route("/api/v1/checkin/score", post(preview_handler::<R, S>))
        .route(
            "/api/v1/checkin/users/:user_id/checkins",
            post(complete_handler::<R, S>).get(history_handler::<R, S>),
        )
        .route(
            "/api/v1/checkin/users/:user_id/trends",
            get(trends_handler::<R, S>),
        )
        .route(
            "/api/v1/checkin/checkins/:checkin_id",
            get(fetch_handler::<R, S>),
        )
        .with_state(service)
}

fn error_response(status: StatusCode, error: &CheckinServiceError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}

pub(crate) async fn questions_handler() -> Response {
    (StatusCode::OK, Json(catalog::questions())).into_response()
}

pub(crate) async fn preview_handler<R, S>(
    State(service): State<Arc<CheckinService<R, S>>>,
    Json(answers): Json<CheckinAnswers>,
) -> Response
where
    R: CheckinRepository + 'static,
    S: SignalSink + 'static,
{
    (StatusCode::OK, Json(service.preview(&answers))).into_response()
}

pub(crate) async fn complete_handler<R, S>(
    State(service): State<Arc<CheckinService<R, S>>>,
    Path(user_id): Path<String>,
    Json(request): Json<CompleteCheckinRequest>,
) -> Response
where
    R: CheckinRepository + 'static,
    S: SignalSink + 'static,
{
    let captured_at = request.captured_at.unwrap_or_else(Utc::now);
    match service.complete(UserId(user_id), request.answers, captured_at) {
        Ok(record) => (StatusCode::CREATED, Json(record.summary_view())).into_response(),
        Err(error @ CheckinServiceError::EmptyCheckin) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, &error)
        }
        Err(error @ CheckinServiceError::Repository(RepositoryError::Conflict)) => {
            error_response(StatusCode::CONFLICT, &error)
        }
        Err(error @ CheckinServiceError::Signals(_)) => {
            error_response(StatusCode::BAD_GATEWAY, &error)
        }
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &other),
    }
}

pub(crate) async fn history_handler<R, S>(
    State(service): State<Arc<CheckinService<R, S>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: CheckinRepository + 'static,
    S: SignalSink + 'static,
{
    match service.history(&UserId(user_id)) {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(|record| record.summary_view()).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &other),
    }
}

pub(crate) async fn fetch_handler<R, S>(
    State(service): State<Arc<CheckinService<R, S>>>,
    Path(checkin_id): Path<String>,
) -> Response
where
    R: CheckinRepository + 'static,
    S: SignalSink + 'static,
{
    match service.get(&CheckinId(checkin_id)) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(error @ CheckinServiceError::Repository(RepositoryError::NotFound)) => {
            error_response(StatusCode::NOT_FOUND, &error)
        }
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &other),
    }
}

pub(crate) async fn trends_handler<R, S>(
    State(service): State<Arc<CheckinService<R, S>>>,
    Path(user_id): Path<String>,
) -> Response
where
    R: CheckinRepository + 'static,
    S: SignalSink + 'static,
{
    match service.trends(&UserId(user_id)) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(error @ CheckinServiceError::InsufficientHistory { .. }) => {
            error_response(StatusCode::NOT_FOUND, &error)
        }
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &other),
    }
}
