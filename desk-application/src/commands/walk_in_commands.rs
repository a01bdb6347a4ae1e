use chrono::Utc;
use tracing::info;

use desk_domain::{generate_walk_in_id, WalkIn};

use crate::commands::session_commands::volunteer_or_unknown;
use crate::commands::validation::{normalize_person_name, normalize_required_text, validate_party};
use crate::dtos::WalkInRequest;
use crate::{AppError, AppState};

const MAX_ID_ATTEMPTS: usize = 32;

pub fn register_walk_in(
    state: &AppState,
    volunteer: &str,
    payload: WalkInRequest,
) -> Result<WalkIn, AppError> {
    let name = normalize_person_name(payload.name, "name")?;
    let phone_number = normalize_required_text(payload.phone_number, "phone_number")?;
    let (total_count, children) =
        validate_party(payload.adult_count, payload.child_count, payload.children)?;

    let id = (0..MAX_ID_ATTEMPTS)
        .map(|_| generate_walk_in_id())
        .find(|candidate| !state.ledger.has_walk_in(candidate))
        .ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "could not find an unused walk-in id after {} attempts",
                MAX_ID_ATTEMPTS
            ))
        })?;

    let walk_in = WalkIn {
        id,
        name,
        phone_number,
        adult_count: payload.adult_count,
        child_count: payload.child_count,
        children,
        total_count,
        checked_in_at: Utc::now(),
        checked_in_by: volunteer_or_unknown(volunteer),
    };
    state.ledger.put_walk_in(walk_in.clone())?;
    state.metrics.record_walk_in();
    info!(
        "walk-in {} registered by {} ({} guests)",
        walk_in.id, walk_in.checked_in_by, walk_in.total_count
    );
    Ok(walk_in)
}
