// Pure read projections over a ledger snapshot

use crate::entities::{ActivityItem, LedgerSnapshot, LedgerStats};
use crate::value_objects::{codes_match, EntityKind};

const UNKNOWN_RECIPIENT: &str = "Unknown";

pub fn ledger_stats(snapshot: &LedgerSnapshot) -> LedgerStats {
    LedgerStats {
        total_tickets: snapshot.tickets.len(),
        checked_in: snapshot.check_ins.len(),
        walk_ins: snapshot.walk_ins.len(),
        total_expected_guests: snapshot
            .tickets
            .iter()
            .map(|t| u64::from(t.group_size))
            .sum(),
        total_actual_guests: snapshot
            .check_ins
            .iter()
            .map(|c| u64::from(c.actual_total))
            .sum(),
        total_walk_in_guests: snapshot
            .walk_ins
            .iter()
            .map(|w| u64::from(w.total_count))
            .sum(),
    }
}

/// Merged feed of issuances, check-ins and walk-ins, newest first.
///
/// Ties on timestamp keep ticket, check-in, walk-in order so the result is
/// deterministic for a given snapshot.
pub fn activity_feed(snapshot: &LedgerSnapshot, volunteer: Option<&str>) -> Vec<ActivityItem> {
    let keep = |name: &str| volunteer.map_or(true, |v| v == name);
    let mut items = Vec::new();

    for ticket in snapshot.tickets.iter().filter(|t| keep(&t.created_by)) {
        items.push(ActivityItem {
            id: ticket.id.clone(),
            kind: EntityKind::Ticket,
            name: ticket.recipient_name.clone(),
            count: ticket.group_size,
            timestamp: ticket.created_at,
            volunteer_name: ticket.created_by.clone(),
        });
    }

    for check_in in snapshot.check_ins.iter().filter(|c| keep(&c.checked_in_by)) {
        let name = snapshot
            .tickets
            .iter()
            .find(|t| codes_match(&t.id, &check_in.ticket_id))
            .map(|t| t.recipient_name.clone())
            .unwrap_or_else(|| UNKNOWN_RECIPIENT.to_string());
        items.push(ActivityItem {
            id: check_in.ticket_id.clone(),
            kind: EntityKind::CheckIn,
            name,
            count: check_in.actual_total,
            timestamp: check_in.checked_in_at,
            volunteer_name: check_in.checked_in_by.clone(),
        });
    }

    for walk_in in snapshot.walk_ins.iter().filter(|w| keep(&w.checked_in_by)) {
        items.push(ActivityItem {
            id: walk_in.id.clone(),
            kind: EntityKind::WalkIn,
            name: walk_in.name.clone(),
            count: walk_in.total_count,
            timestamp: walk_in.checked_in_at,
            volunteer_name: walk_in.checked_in_by.clone(),
        });
    }

    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    items
}
