use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use desk_application::commands::session_commands;
use desk_application::dtos::LoginRequest;
use desk_application::AppState;
use desk_domain::VolunteerSession;

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<VolunteerSession>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let session = session_commands::login(&state, payload)?;
    Ok(Json(session))
}
