use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use desk_application::commands::check_in_commands;
use desk_application::dtos::CheckInRequest;
use desk_application::queries::ticket_queries;
use desk_application::{AppState, CheckInReceipt};
use desk_domain::CheckIn;

use crate::error::HttpError;
use crate::middleware::{authorize, volunteer_name};

pub async fn check_in_guest(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CheckInRequest>,
) -> Result<(StatusCode, Json<CheckInReceipt>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let receipt = check_in_commands::check_in_guest(&state, &volunteer_name(&headers), payload)?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

pub async fn get_check_in(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(ticket_id): Path<String>,
) -> Result<Json<CheckIn>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let check_in = ticket_queries::get_check_in(&state, &ticket_id)?;
    Ok(Json(check_in))
}
