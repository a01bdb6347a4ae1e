// Outbox entities
// Value snapshots of local mutations waiting to be mirrored remotely

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::entities::{format_children, CheckIn, Ticket, WalkIn};
use crate::value_objects::{normalize_code, EntityKind, SyncOperation};

/// Flat key/value record as accepted by the remote ledger.
pub type FlatRecord = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInSnapshot {
    pub check_in: CheckIn,
    /// Linked ticket as it was when the check-in happened, if known locally.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket: Option<Ticket>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum SyncPayload {
    #[serde(rename = "ticket")]
    Ticket(Ticket),
    #[serde(rename = "checkin")]
    CheckIn(CheckInSnapshot),
    #[serde(rename = "walkin")]
    WalkIn(WalkIn),
}

impl SyncPayload {
    pub fn entity_kind(&self) -> EntityKind {
        match self {
            SyncPayload::Ticket(_) => EntityKind::Ticket,
            SyncPayload::CheckIn(_) => EntityKind::CheckIn,
            SyncPayload::WalkIn(_) => EntityKind::WalkIn,
        }
    }

    pub fn entity_id(&self) -> String {
        match self {
            SyncPayload::Ticket(ticket) => normalize_code(&ticket.id),
            SyncPayload::CheckIn(snapshot) => normalize_code(&snapshot.check_in.ticket_id),
            SyncPayload::WalkIn(walk_in) => normalize_code(&walk_in.id),
        }
    }

    /// Key that groups entries belonging to the same entity.
    pub fn entity_key(&self) -> String {
        format!("{}:{}", self.entity_kind(), self.entity_id())
    }

    pub fn to_flat_record(&self) -> FlatRecord {
        let value = match self {
            SyncPayload::Ticket(ticket) => json!({
                "id": ticket.id,
                "recipientName": ticket.recipient_name,
                "phoneNumber": ticket.phone_number,
                "email": ticket.email,
                "adultCount": ticket.adult_count,
                "childCount": ticket.child_count,
                "children": format_children(ticket.children.as_deref()),
                "groupSize": ticket.group_size,
                "specialNeeds": ticket.special_needs.clone().unwrap_or_default(),
                "rsvpStatus": ticket.rsvp_status.as_str(),
                "status": ticket.status.as_str(),
                "createdAt": iso_timestamp(&ticket.created_at),
                "createdBy": ticket.created_by,
            }),
            SyncPayload::CheckIn(CheckInSnapshot { check_in, ticket }) => {
                let ticket = ticket.as_ref();
                json!({
                    "ticketId": check_in.ticket_id,
                    "recipientName": ticket.map(|t| t.recipient_name.clone()).unwrap_or_default(),
                    "checkedInAt": iso_timestamp(&check_in.checked_in_at),
                    "checkedInBy": check_in.checked_in_by,
                    "expectedAdults": ticket.map(|t| t.adult_count).unwrap_or(0),
                    "expectedChildren": ticket.map(|t| t.child_count).unwrap_or(0),
                    "expectedTotal": ticket.map(|t| t.group_size).unwrap_or(0),
                    "actualAdults": check_in.actual_adults,
                    "actualChildren": check_in.actual_children,
                    "actualTotal": check_in.actual_total,
                    "children": ticket
                        .map(|t| format_children(t.children.as_deref()))
                        .unwrap_or_default(),
                })
            }
            SyncPayload::WalkIn(walk_in) => json!({
                "id": walk_in.id,
                "name": walk_in.name,
                "phoneNumber": walk_in.phone_number,
                "adultCount": walk_in.adult_count,
                "childCount": walk_in.child_count,
                "children": format_children(walk_in.children.as_deref()),
                "totalCount": walk_in.total_count,
                "checkedInAt": iso_timestamp(&walk_in.checked_in_at),
                "checkedInBy": walk_in.checked_in_by,
            }),
        };
        match value {
            Value::Object(map) => map,
            _ => FlatRecord::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboxEntry {
    pub id: String,
    pub entity_kind: EntityKind,
    pub operation: SyncOperation,
    pub payload: SyncPayload,
    pub enqueued_at: DateTime<Utc>,
    pub retry_count: u32,
}

impl OutboxEntry {
    pub fn new(operation: SyncOperation, payload: SyncPayload) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            entity_kind: payload.entity_kind(),
            operation,
            payload,
            enqueued_at: Utc::now(),
            retry_count: 0,
        }
    }
}

/// Entry dropped after exceeding the retry cap, kept locally for operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadLetter {
    pub entry: OutboxEntry,
    pub dropped_at: DateTime<Utc>,
    pub last_error: String,
}

fn iso_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ChildInfo;
    use crate::value_objects::{ChildGender, RsvpStatus, TicketStatus};
    use chrono::TimeZone;

    fn sample_ticket() -> Ticket {
        Ticket {
            id: "AB3X7Q9K".to_string(),
            recipient_name: "Maria Lopez".to_string(),
            phone_number: "(555) 010-2000".to_string(),
            email: "maria@example.org".to_string(),
            adult_count: 2,
            child_count: 1,
            children: Some(vec![ChildInfo {
                age: 7,
                gender: ChildGender::Girl,
            }]),
            group_size: 3,
            special_needs: None,
            rsvp_status: RsvpStatus::Confirmed,
            status: TicketStatus::Issued,
            created_at: Utc.with_ymd_and_hms(2025, 12, 1, 15, 30, 0).unwrap(),
            created_by: "Ana".to_string(),
        }
    }

    #[test]
    fn payload_serializes_with_kind_tag() {
        let payload = SyncPayload::Ticket(sample_ticket());
        let value = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(value["kind"], "ticket");
        assert_eq!(value["data"]["id"], "AB3X7Q9K");
        let back: SyncPayload = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, payload);
    }

    #[test]
    fn ticket_record_uses_sheet_columns() {
        let record = SyncPayload::Ticket(sample_ticket()).to_flat_record();
        assert_eq!(record["recipientName"], "Maria Lopez");
        assert_eq!(record["groupSize"], 3);
        assert_eq!(record["children"], "Child 1: 7yrs, girl");
        assert_eq!(record["specialNeeds"], "");
        assert_eq!(record["status"], "issued");
        assert_eq!(record["createdAt"], "2025-12-01T15:30:00.000Z");
    }

    #[test]
    fn check_in_record_carries_expected_counts() {
        let check_in = CheckIn::new(
            "AB3X7Q9K",
            2,
            0,
            "Ben",
            Utc.with_ymd_and_hms(2025, 12, 20, 10, 0, 0).unwrap(),
        );
        let with_ticket = SyncPayload::CheckIn(CheckInSnapshot {
            check_in: check_in.clone(),
            ticket: Some(sample_ticket()),
        })
        .to_flat_record();
        assert_eq!(with_ticket["expectedTotal"], 3);
        assert_eq!(with_ticket["actualTotal"], 2);
        assert_eq!(with_ticket["recipientName"], "Maria Lopez");

        let orphan = SyncPayload::CheckIn(CheckInSnapshot {
            check_in,
            ticket: None,
        })
        .to_flat_record();
        assert_eq!(orphan["expectedTotal"], 0);
        assert_eq!(orphan["recipientName"], "");
    }

    #[test]
    fn entity_key_is_case_folded() {
        let mut ticket = sample_ticket();
        ticket.id = "ab3x7q9k".to_string();
        let payload = SyncPayload::Ticket(ticket);
        assert_eq!(payload.entity_key(), "ticket:AB3X7Q9K");
        let entry = OutboxEntry::new(SyncOperation::Create, payload);
        assert_eq!(entry.entity_kind, EntityKind::Ticket);
        assert_eq!(entry.retry_count, 0);
    }
}
