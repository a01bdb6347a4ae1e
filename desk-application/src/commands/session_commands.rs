use chrono::Utc;
use tracing::{info, warn};

use desk_domain::VolunteerSession;

use crate::commands::validation::normalize_person_name;
use crate::dtos::LoginRequest;
use crate::{AppError, AppState};

const UNKNOWN_VOLUNTEER: &str = "Unknown";

pub fn login(state: &AppState, payload: LoginRequest) -> Result<VolunteerSession, AppError> {
    let volunteer_name = normalize_person_name(payload.volunteer_name, "volunteer_name")?;
    if !state.pin_verifier.verify(payload.pin.trim()) {
        warn!("rejected PIN for volunteer {}", volunteer_name);
        return Err(AppError::Unauthorized);
    }
    info!("volunteer {} signed in", volunteer_name);
    Ok(VolunteerSession {
        volunteer_name,
        session_started: Utc::now(),
    })
}

/// Display name stamped on records; blank names become `Unknown`.
pub fn volunteer_or_unknown(volunteer: &str) -> String {
    let trimmed = volunteer.trim();
    if trimmed.is_empty() {
        UNKNOWN_VOLUNTEER.to_string()
    } else {
        trimmed.to_string()
    }
}
