use chrono::Utc;
use tracing::{info, warn};

use desk_domain::{CheckIn, LedgerError};

use crate::commands::session_commands::volunteer_or_unknown;
use crate::commands::validation::{normalize_required_text, validate_party};
use crate::dtos::CheckInRequest;
use crate::{AppError, AppState, CheckInReceipt};

pub fn check_in_guest(
    state: &AppState,
    volunteer: &str,
    payload: CheckInRequest,
) -> Result<CheckInReceipt, AppError> {
    let ticket_id = normalize_required_text(payload.ticket_id, "ticket_id")?;
    validate_party(payload.actual_adults, payload.actual_children, None)?;

    let check_in = CheckIn::new(
        ticket_id,
        payload.actual_adults,
        payload.actual_children,
        volunteer_or_unknown(volunteer),
        Utc::now(),
    );

    match state.ledger.put_check_in(check_in) {
        Ok(receipt) => {
            state.metrics.record_check_in();
            info!(
                "ticket {} checked in by {} ({} guests)",
                receipt.check_in.ticket_id,
                receipt.check_in.checked_in_by,
                receipt.check_in.actual_total
            );
            Ok(receipt)
        }
        Err(LedgerError::DuplicateCheckIn { existing }) => {
            state.metrics.record_duplicate_check_in();
            warn!(
                "ticket {} already checked in by {} at {}",
                existing.ticket_id, existing.checked_in_by, existing.checked_in_at
            );
            Err(AppError::DuplicateCheckIn(existing))
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{app_state, ticket};
    use desk_domain::TicketStatus;

    fn request(ticket_id: &str, adults: u32, children: u32) -> CheckInRequest {
        CheckInRequest {
            ticket_id: ticket_id.to_string(),
            actual_adults: adults,
            actual_children: children,
        }
    }

    #[test]
    fn second_check_in_reports_the_first() {
        let state = app_state();
        state.ledger.put_ticket(ticket("AB3X7Q9K", 2, 1)).expect("put");

        let receipt = check_in_guest(&state, "Ben", request("ab3x7q9k", 2, 0)).expect("check in");
        assert_eq!(receipt.check_in.ticket_id, "AB3X7Q9K");
        assert_eq!(receipt.check_in.actual_total, 2);
        assert_eq!(
            receipt.ticket.map(|t| t.status),
            Some(TicketStatus::CheckedIn)
        );

        match check_in_guest(&state, "Cleo", request("AB3X7Q9K", 1, 0)) {
            Err(AppError::DuplicateCheckIn(existing)) => {
                assert_eq!(existing.checked_in_by, "Ben");
                assert_eq!(existing.checked_in_at, receipt.check_in.checked_in_at);
            }
            other => panic!("expected duplicate, got {other:?}"),
        }
        assert!(state
            .metrics
            .render_prometheus()
            .contains("checkin_desk_duplicate_check_ins_total 1\n"));
    }

    #[test]
    fn empty_party_or_blank_id_is_rejected() {
        let state = app_state();
        assert!(matches!(
            check_in_guest(&state, "Ben", request("AB3X7Q9K", 0, 0)),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            check_in_guest(&state, "Ben", request("  ", 1, 0)),
            Err(AppError::BadRequest(_))
        ));
        assert!(state.ledger.get_check_ins().is_empty());
    }
}
