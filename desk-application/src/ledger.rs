//! Local entity ledger.
//!
//! Tickets, check-ins and walk-ins live in memory behind one mutex and are
//! written through to the key-value store as whole collections. Every
//! successful mutation is mirrored into the outbox; the local copy stays
//! authoritative even when that enqueue fails.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use desk_domain::{
    codes_match, digits_only, normalize_code, CheckIn, CheckInSnapshot, KeyValueStore,
    LedgerError, LedgerSnapshot, SyncOperation, SyncPayload, Ticket, TicketStatus, WalkIn,
};

use crate::outbox::OutboxQueue;
use crate::storage::{
    load_collection, save_collection, CHECK_INS_KEY, TICKETS_KEY, WALK_INS_KEY,
};

/// Result of a successful check-in: the stored record and the linked ticket
/// after its status flip, when the ticket is known locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckInReceipt {
    pub check_in: CheckIn,
    pub ticket: Option<Ticket>,
}

#[derive(Default)]
struct LedgerState {
    tickets: Vec<Ticket>,
    check_ins: Vec<CheckIn>,
    walk_ins: Vec<WalkIn>,
}

pub struct EntityStore {
    store: Arc<dyn KeyValueStore>,
    outbox: Arc<OutboxQueue>,
    state: Mutex<LedgerState>,
}

impl EntityStore {
    /// Loads all collections and repairs tickets whose check-in was stored
    /// but whose status flip was not.
    pub fn open(store: Arc<dyn KeyValueStore>, outbox: Arc<OutboxQueue>) -> anyhow::Result<Self> {
        let state = LedgerState {
            tickets: load_collection(store.as_ref(), TICKETS_KEY)?,
            check_ins: load_collection(store.as_ref(), CHECK_INS_KEY)?,
            walk_ins: load_collection(store.as_ref(), WALK_INS_KEY)?,
        };
        info!(
            "ledger loaded: {} tickets, {} check-ins, {} walk-ins",
            state.tickets.len(),
            state.check_ins.len(),
            state.walk_ins.len()
        );
        let ledger = Self {
            store,
            outbox,
            state: Mutex::new(state),
        };
        ledger.reconcile()?;
        Ok(ledger)
    }

    fn reconcile(&self) -> anyhow::Result<()> {
        let mut state = self.lock();
        let mut tickets = state.tickets.clone();
        let mut repaired = Vec::new();
        for ticket in tickets.iter_mut() {
            if ticket.is_checked_in() {
                continue;
            }
            if state
                .check_ins
                .iter()
                .any(|c| codes_match(&c.ticket_id, &ticket.id))
            {
                ticket.status = TicketStatus::CheckedIn;
                repaired.push(ticket.clone());
            }
        }
        if repaired.is_empty() {
            return Ok(());
        }
        save_collection(self.store.as_ref(), TICKETS_KEY, &tickets)?;
        state.tickets = tickets;

        warn!("repaired status of {} checked-in tickets", repaired.len());
        for ticket in repaired {
            self.mirror(SyncOperation::Update, SyncPayload::Ticket(ticket));
        }
        Ok(())
    }

    /// Inserts or replaces a ticket by case-insensitive id. A replaced
    /// ticket keeps the id spelling it was first stored under.
    ///
    /// The outbox entry is appended under the ledger lock so a concurrent
    /// check-in cannot queue its ticket update ahead of this write.
    pub fn put_ticket(&self, mut ticket: Ticket) -> Result<SyncOperation, LedgerError> {
        let mut state = self.lock();
        let mut tickets = state.tickets.clone();
        let operation = match tickets.iter().position(|t| codes_match(&t.id, &ticket.id)) {
            Some(idx) => {
                ticket.id = tickets[idx].id.clone();
                tickets[idx] = ticket.clone();
                SyncOperation::Update
            }
            None => {
                tickets.push(ticket.clone());
                SyncOperation::Create
            }
        };
        save_collection(self.store.as_ref(), TICKETS_KEY, &tickets)?;
        state.tickets = tickets;
        debug!("ticket {} stored ({})", ticket.id, operation);
        self.mirror(operation, SyncPayload::Ticket(ticket));
        Ok(operation)
    }

    pub fn get_ticket_by_id(&self, id: &str) -> Option<Ticket> {
        self.lock()
            .tickets
            .iter()
            .find(|t| codes_match(&t.id, id))
            .cloned()
    }

    pub fn has_ticket(&self, id: &str) -> bool {
        self.lock().tickets.iter().any(|t| codes_match(&t.id, id))
    }

    pub fn get_tickets(&self) -> Vec<Ticket> {
        self.lock().tickets.clone()
    }

    /// Matches on name, phone digits or id. A blank query matches nothing.
    pub fn search_tickets(&self, query: &str) -> Vec<Ticket> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let name_query = query.to_lowercase();
        let digit_query = digits_only(query);
        let id_query = normalize_code(query);

        self.lock()
            .tickets
            .iter()
            .filter(|t| {
                t.recipient_name.to_lowercase().contains(&name_query)
                    || (!digit_query.is_empty()
                        && digits_only(&t.phone_number).contains(&digit_query))
                    || normalize_code(&t.id).contains(&id_query)
            })
            .cloned()
            .collect()
    }

    /// Records a check-in; at most one per ticket id.
    pub fn put_check_in(&self, check_in: CheckIn) -> Result<CheckInReceipt, LedgerError> {
        let mut state = self.lock();
        if let Some(existing) = state
            .check_ins
            .iter()
            .find(|c| codes_match(&c.ticket_id, &check_in.ticket_id))
        {
            return Err(LedgerError::DuplicateCheckIn {
                existing: Box::new(existing.clone()),
            });
        }

        let ticket_idx = state
            .tickets
            .iter()
            .position(|t| codes_match(&t.id, &check_in.ticket_id));
        let linked = ticket_idx.map(|idx| state.tickets[idx].clone());
        let check_in = CheckIn {
            ticket_id: linked
                .as_ref()
                .map(|t| t.id.clone())
                .unwrap_or_else(|| normalize_code(&check_in.ticket_id)),
            ..check_in
        };

        let mut check_ins = state.check_ins.clone();
        check_ins.push(check_in.clone());
        save_collection(self.store.as_ref(), CHECK_INS_KEY, &check_ins)?;
        state.check_ins = check_ins;
        self.mirror(
            SyncOperation::Create,
            SyncPayload::CheckIn(CheckInSnapshot {
                check_in: check_in.clone(),
                ticket: linked,
            }),
        );

        let ticket = match ticket_idx {
            Some(idx) => {
                let mut tickets = state.tickets.clone();
                tickets[idx].status = TicketStatus::CheckedIn;
                // The check-in is already durable; reopening repairs the status.
                if let Err(err) = save_collection(self.store.as_ref(), TICKETS_KEY, &tickets) {
                    error!(
                        "failed to persist checked-in status for {}: {:#}",
                        tickets[idx].id, err
                    );
                }
                let updated = tickets[idx].clone();
                state.tickets = tickets;
                self.mirror(SyncOperation::Update, SyncPayload::Ticket(updated.clone()));
                Some(updated)
            }
            None => {
                warn!("check-in for unknown ticket {}", check_in.ticket_id);
                None
            }
        };
        drop(state);

        debug!(
            "ticket {} checked in by {} ({} guests)",
            check_in.ticket_id, check_in.checked_in_by, check_in.actual_total
        );
        Ok(CheckInReceipt { check_in, ticket })
    }

    pub fn get_check_in_by_ticket_id(&self, ticket_id: &str) -> Option<CheckIn> {
        self.lock()
            .check_ins
            .iter()
            .find(|c| codes_match(&c.ticket_id, ticket_id))
            .cloned()
    }

    pub fn get_check_ins(&self) -> Vec<CheckIn> {
        self.lock().check_ins.clone()
    }

    pub fn put_walk_in(&self, walk_in: WalkIn) -> Result<(), LedgerError> {
        let mut state = self.lock();
        let mut walk_ins = state.walk_ins.clone();
        walk_ins.push(walk_in.clone());
        save_collection(self.store.as_ref(), WALK_INS_KEY, &walk_ins)?;
        state.walk_ins = walk_ins;
        debug!("walk-in {} stored ({} guests)", walk_in.id, walk_in.total_count);
        self.mirror(SyncOperation::Create, SyncPayload::WalkIn(walk_in));
        Ok(())
    }

    pub fn get_walk_ins(&self) -> Vec<WalkIn> {
        self.lock().walk_ins.clone()
    }

    pub fn has_walk_in(&self, id: &str) -> bool {
        self.lock().walk_ins.iter().any(|w| codes_match(&w.id, id))
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        let state = self.lock();
        LedgerSnapshot {
            tickets: state.tickets.clone(),
            check_ins: state.check_ins.clone(),
            walk_ins: state.walk_ins.clone(),
        }
    }

    fn mirror(&self, operation: SyncOperation, payload: SyncPayload) {
        let entity_key = payload.entity_key();
        if let Err(err) = self.outbox.enqueue(operation, payload) {
            error!(
                "failed to enqueue {} for {}; local record kept: {:#}",
                operation, entity_key, err
            );
        }
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
