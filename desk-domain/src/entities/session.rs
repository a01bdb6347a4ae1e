// Volunteer session handed out after the PIN check

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolunteerSession {
    pub volunteer_name: String,
    pub session_started: DateTime<Utc>,
}
