use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;

use desk_application::commands::sync_commands;
use desk_application::dtos::{DeadLetterList, RequeueSummary};
use desk_application::queries::sync_queries;
use desk_application::{AppState, DrainOutcome};
use desk_domain::{DrainReport, SyncStatus};

use crate::error::HttpError;
use crate::middleware::authorize;

#[derive(Serialize)]
pub struct DrainResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<DrainReport>,
}

pub async fn get_sync_status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SyncStatus>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    Ok(Json(sync_queries::sync_status(&state)))
}

/// Runs a pass immediately; answers 202 when one is already in flight.
pub async fn drain_now(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<DrainResponse>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let response = match sync_commands::drain_outbox(&state).await {
        DrainOutcome::Completed(report) => (
            StatusCode::OK,
            Json(DrainResponse {
                status: "completed",
                report: Some(report),
            }),
        ),
        DrainOutcome::AlreadyRunning => (
            StatusCode::ACCEPTED,
            Json(DrainResponse {
                status: "already_running",
                report: None,
            }),
        ),
    };
    Ok(response)
}

pub async fn list_dead_letters(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DeadLetterList>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    Ok(Json(sync_queries::list_dead_letters(&state)))
}

pub async fn requeue_dead_letters(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RequeueSummary>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let summary = sync_commands::requeue_dead_letters(&state)?;
    Ok(Json(summary))
}
