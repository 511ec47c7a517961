use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;
use vitality::checkin::{
    calculate_lifestyle_score, checkin_router, compare_checkins, CheckinHistoryImporter,
    CheckinRepository, CheckinService, HistoricalCheckin, ScoreBand, SignalSink, TrendSummary,
};
use vitality::error::AppError;

#[derive(Debug, Deserialize)]
pub(crate) struct HistoryReportRequest {
    pub(crate) history_csv: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct DailyScoreEntry {
    pub(crate) date: NaiveDate,
    pub(crate) score: u8,
    pub(crate) band: ScoreBand,
    pub(crate) answered: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct HistoryReportResponse {
    pub(crate) days: Vec<DailyScoreEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) latest_trend: Option<TrendSummary>,
}

pub(crate) fn with_checkin_routes<R, S>(service: Arc<CheckinService<R, S>>) -> axum::Router
where
    R: CheckinRepository + 'static,
    S: SignalSink + 'static,
{
    checkin_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/checkin/history/report",
            axum::routing::post(history_report_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) fn history_report(history_csv: String) -> Result<HistoryReportResponse, AppError> {
    let reader = Cursor::new(history_csv.into_bytes());
    let history = CheckinHistoryImporter::from_reader(reader)?;
    Ok(summarize_history(&history))
}

pub(crate) fn summarize_history(history: &[HistoricalCheckin]) -> HistoryReportResponse {
    let scored: Vec<_> = history
        .iter()
        .map(|entry| (entry, calculate_lifestyle_score(&entry.answers)))
        .collect();

    let latest_trend = match scored.as_slice() {
        [.., (previous, previous_result), (current, current_result)] => Some(TrendSummary::new(
            previous_result.score,
            current_result.score,
            compare_checkins(&previous.answers, &current.answers),
        )),
        _ => None,
    };

    let days = scored
        .iter()
        .map(|(entry, result)| DailyScoreEntry {
            date: entry.date,
            score: result.score,
            band: result.band(),
            answered: entry.answers.len(),
        })
        .collect();

    HistoryReportResponse { days, latest_trend }
}

pub(crate) async fn history_report_endpoint(
    Json(payload): Json<HistoryReportRequest>,
) -> Result<Json<HistoryReportResponse>, AppError> {
    Ok(Json(history_report(payload.history_csv)?))
}
