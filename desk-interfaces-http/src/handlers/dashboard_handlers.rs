use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;

use desk_application::dtos::{ActivityQuery, DashboardSummary};
use desk_application::queries::activity_queries;
use desk_application::AppState;
use desk_domain::ActivityItem;

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn get_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DashboardSummary>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    Ok(Json(activity_queries::dashboard_summary(&state)))
}

pub async fn list_activity(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<Vec<ActivityItem>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    Ok(Json(activity_queries::recent_activity(&state, query)))
}
