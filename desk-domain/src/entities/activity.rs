// Read models derived from the ledger

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::{CheckIn, Ticket, WalkIn};
use crate::value_objects::EntityKind;

/// Value copy of every ledger collection, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub tickets: Vec<Ticket>,
    pub check_ins: Vec<CheckIn>,
    pub walk_ins: Vec<WalkIn>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LedgerStats {
    pub total_tickets: usize,
    pub checked_in: usize,
    pub walk_ins: usize,
    pub total_expected_guests: u64,
    pub total_actual_guests: u64,
    pub total_walk_in_guests: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub name: String,
    pub count: u32,
    pub timestamp: DateTime<Utc>,
    pub volunteer_name: String,
}
