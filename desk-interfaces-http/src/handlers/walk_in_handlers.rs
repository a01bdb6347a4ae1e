use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use desk_application::commands::walk_in_commands;
use desk_application::dtos::WalkInRequest;
use desk_application::queries::ticket_queries;
use desk_application::AppState;
use desk_domain::WalkIn;

use crate::error::HttpError;
use crate::middleware::{authorize, volunteer_name};

pub async fn register_walk_in(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<WalkInRequest>,
) -> Result<(StatusCode, Json<WalkIn>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let walk_in = walk_in_commands::register_walk_in(&state, &volunteer_name(&headers), payload)?;
    Ok((StatusCode::CREATED, Json(walk_in)))
}

pub async fn list_walk_ins(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<WalkIn>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    Ok(Json(ticket_queries::list_walk_ins(&state)))
}
