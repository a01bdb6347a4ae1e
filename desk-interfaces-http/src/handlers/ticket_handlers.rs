use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;

use desk_application::commands::ticket_commands;
use desk_application::dtos::{
    IssueTicketRequest, IssuedTicket, ResolveReferenceRequest, ResolvedReference,
    TicketSearchQuery,
};
use desk_application::queries::ticket_queries;
use desk_application::AppState;
use desk_domain::Ticket;

use crate::error::HttpError;
use crate::middleware::{authorize, volunteer_name};

#[derive(Serialize)]
pub struct ReferenceToken {
    pub reference: String,
}

pub async fn issue_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<IssueTicketRequest>,
) -> Result<(StatusCode, Json<IssuedTicket>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let issued = ticket_commands::issue_ticket(&state, &volunteer_name(&headers), payload)?;
    Ok((StatusCode::CREATED, Json(issued)))
}

pub async fn search_tickets(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<TicketSearchQuery>,
) -> Result<Json<Vec<Ticket>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    Ok(Json(ticket_queries::search_tickets(&state, query)))
}

pub async fn get_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Ticket>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let ticket = ticket_queries::get_ticket(&state, &id)?;
    Ok(Json(ticket))
}

pub async fn get_ticket_reference(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ReferenceToken>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let reference = ticket_queries::ticket_reference(&state, &id)?;
    Ok(Json(ReferenceToken { reference }))
}

pub async fn resolve_reference(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ResolveReferenceRequest>,
) -> Result<Json<ResolvedReference>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let resolved = ticket_queries::resolve_reference(&state, payload)?;
    Ok(Json(resolved))
}
