// Ticket entity
// Issued ahead of the event, redeemed once at the door

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ChildGender, RsvpStatus, TicketStatus};

pub const MIN_CHILD_AGE: u8 = 1;
pub const MAX_CHILD_AGE: u8 = 18;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildInfo {
    pub age: u8,
    pub gender: ChildGender,
}

impl ChildInfo {
    pub fn has_valid_age(&self) -> bool {
        (MIN_CHILD_AGE..=MAX_CHILD_AGE).contains(&self.age)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub recipient_name: String,
    pub phone_number: String,
    pub email: String,
    pub adult_count: u32,
    pub child_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ChildInfo>>,
    pub group_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_needs: Option<String>,
    pub rsvp_status: RsvpStatus,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

impl Ticket {
    pub fn is_checked_in(&self) -> bool {
        self.status == TicketStatus::CheckedIn
    }

    /// `group_size` must equal adults plus children and never be zero.
    pub fn has_consistent_group_size(&self) -> bool {
        self.group_size > 0 && self.group_size == self.adult_count + self.child_count
    }
}

/// Renders children the way the remote sheet stores them:
/// `Child 1: 5yrs, boy; Child 2: 9yrs, girl`.
pub fn format_children(children: Option<&[ChildInfo]>) -> String {
    match children {
        Some(list) if !list.is_empty() => list
            .iter()
            .enumerate()
            .map(|(idx, child)| {
                format!("Child {}: {}yrs, {}", idx + 1, child.age, child.gender.as_str())
            })
            .collect::<Vec<_>>()
            .join("; "),
        _ => String::new(),
    }
}
