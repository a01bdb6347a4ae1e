// Walk-in entity
// Guests admitted without a ticket

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::ChildInfo;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkIn {
    pub id: String,
    pub name: String,
    pub phone_number: String,
    pub adult_count: u32,
    pub child_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ChildInfo>>,
    pub total_count: u32,
    pub checked_in_at: DateTime<Utc>,
    pub checked_in_by: String,
}
