use anyhow::anyhow;
use chrono::Utc;
use tracing::info;

use desk_domain::{
    encode_reference, generate_ticket_id, normalize_optional_text, Ticket, TicketStatus,
};

use crate::commands::validation::{
    normalize_email, normalize_person_name, normalize_required_text, validate_party,
};
use crate::commands::session_commands::volunteer_or_unknown;
use crate::dtos::{IssuedTicket, IssueTicketRequest};
use crate::{AppError, AppState};

const MAX_ID_ATTEMPTS: usize = 32;

pub fn issue_ticket(
    state: &AppState,
    volunteer: &str,
    payload: IssueTicketRequest,
) -> Result<IssuedTicket, AppError> {
    let recipient_name = normalize_person_name(payload.recipient_name, "recipient_name")?;
    let phone_number = normalize_required_text(payload.phone_number, "phone_number")?;
    let email = normalize_email(payload.email)?;
    let (group_size, children) =
        validate_party(payload.adult_count, payload.child_count, payload.children)?;

    let id = fresh_ticket_id(state)?;
    let ticket = Ticket {
        id,
        recipient_name,
        phone_number,
        email,
        adult_count: payload.adult_count,
        child_count: payload.child_count,
        children,
        group_size,
        special_needs: normalize_optional_text(payload.special_needs),
        rsvp_status: payload.rsvp_status,
        status: TicketStatus::Issued,
        created_at: Utc::now(),
        created_by: volunteer_or_unknown(volunteer),
    };

    state.ledger.put_ticket(ticket.clone())?;
    state.metrics.record_ticket_issued();
    info!(
        "ticket {} issued by {} (group of {})",
        ticket.id, ticket.created_by, ticket.group_size
    );

    let reference = encode_reference(&ticket);
    Ok(IssuedTicket { ticket, reference })
}

fn fresh_ticket_id(state: &AppState) -> Result<String, AppError> {
    for _ in 0..MAX_ID_ATTEMPTS {
        let candidate = generate_ticket_id();
        if !state.ledger.has_ticket(&candidate) {
            return Ok(candidate);
        }
    }
    Err(AppError::Internal(anyhow!(
        "could not find an unused ticket id after {} attempts",
        MAX_ID_ATTEMPTS
    )))
}
