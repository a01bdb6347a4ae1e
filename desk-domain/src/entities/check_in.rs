// Check-in entity
// Recorded once per ticket when the guest is admitted

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
    pub ticket_id: String,
    pub checked_in_at: DateTime<Utc>,
    pub checked_in_by: String,
    pub actual_adults: u32,
    pub actual_children: u32,
    pub actual_total: u32,
}

impl CheckIn {
    pub fn new(
        ticket_id: impl Into<String>,
        actual_adults: u32,
        actual_children: u32,
        checked_in_by: impl Into<String>,
        checked_in_at: DateTime<Utc>,
    ) -> Self {
        Self {
            ticket_id: ticket_id.into(),
            checked_in_at,
            checked_in_by: checked_in_by.into(),
            actual_adults,
            actual_children,
            actual_total: actual_adults + actual_children,
        }
    }
}
