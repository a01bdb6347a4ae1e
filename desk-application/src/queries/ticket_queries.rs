use desk_domain::{decode_reference, encode_reference, CheckIn, Ticket, WalkIn};

use crate::dtos::{ResolveReferenceRequest, ResolvedReference, TicketSearchQuery};
use crate::{AppError, AppState};

const DEFAULT_SEARCH_LIMIT: usize = 50;
const MAX_SEARCH_LIMIT: usize = 200;

pub fn get_ticket(state: &AppState, id: &str) -> Result<Ticket, AppError> {
    state
        .ledger
        .get_ticket_by_id(id)
        .ok_or_else(|| AppError::NotFound(id.trim().to_string()))
}

pub fn search_tickets(state: &AppState, query: TicketSearchQuery) -> Vec<Ticket> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .clamp(1, MAX_SEARCH_LIMIT);
    let mut results = state
        .ledger
        .search_tickets(query.query.as_deref().unwrap_or_default());
    results.truncate(limit);
    results
}

pub fn ticket_reference(state: &AppState, id: &str) -> Result<String, AppError> {
    get_ticket(state, id).map(|ticket| encode_reference(&ticket))
}

/// Decodes scanned text and joins it with the local ticket and check-in.
pub fn resolve_reference(
    state: &AppState,
    payload: ResolveReferenceRequest,
) -> Result<ResolvedReference, AppError> {
    let reference = decode_reference(&payload.raw)?;
    let ticket = state.ledger.get_ticket_by_id(&reference.id);
    let check_in = state.ledger.get_check_in_by_ticket_id(&reference.id);
    Ok(ResolvedReference {
        reference,
        ticket,
        check_in,
    })
}

pub fn get_check_in(state: &AppState, ticket_id: &str) -> Result<CheckIn, AppError> {
    state
        .ledger
        .get_check_in_by_ticket_id(ticket_id)
        .ok_or_else(|| AppError::NotFound(ticket_id.trim().to_string()))
}

pub fn list_walk_ins(state: &AppState) -> Vec<WalkIn> {
    state.ledger.get_walk_ins()
}
