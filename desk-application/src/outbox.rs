//! Durable replication outbox.
//!
//! Entries are appended in mutation order and removed on delivery. Entries
//! that exceed the retry cap move to a persisted dead-letter log instead of
//! disappearing, so operators can inspect and re-queue them.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::debug;

use desk_domain::{DeadLetter, KeyValueStore, OutboxEntry, SyncOperation, SyncPayload};

use crate::storage::{load_collection, save_collection, DEAD_LETTERS_KEY, OUTBOX_KEY};
use crate::sync::SyncTrigger;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureOutcome {
    Retained { retry_count: u32 },
    Dropped(DeadLetter),
    /// The entry was no longer queued (removed by a concurrent requeue/delivery).
    Missing,
}

#[derive(Default)]
struct OutboxState {
    entries: Vec<OutboxEntry>,
    dead_letters: Vec<DeadLetter>,
}

pub struct OutboxQueue {
    store: Arc<dyn KeyValueStore>,
    state: Mutex<OutboxState>,
    trigger: SyncTrigger,
}

impl OutboxQueue {
    pub fn open(store: Arc<dyn KeyValueStore>, trigger: SyncTrigger) -> anyhow::Result<Self> {
        let entries = load_collection(store.as_ref(), OUTBOX_KEY)?;
        let dead_letters = load_collection(store.as_ref(), DEAD_LETTERS_KEY)?;
        Ok(Self {
            store,
            state: Mutex::new(OutboxState {
                entries,
                dead_letters,
            }),
            trigger,
        })
    }

    /// Appends a snapshot of a mutation and nudges the sync worker.
    pub fn enqueue(
        &self,
        operation: SyncOperation,
        payload: SyncPayload,
    ) -> anyhow::Result<OutboxEntry> {
        let entry = OutboxEntry::new(operation, payload);
        {
            let mut state = self.lock();
            let mut entries = state.entries.clone();
            entries.push(entry.clone());
            save_collection(self.store.as_ref(), OUTBOX_KEY, &entries)?;
            state.entries = entries;
        }
        debug!(
            "outbox enqueued {} {} ({})",
            entry.entity_kind, entry.operation, entry.id
        );
        self.trigger.fire();
        Ok(entry)
    }

    pub fn snapshot(&self) -> Vec<OutboxEntry> {
        self.lock().entries.clone()
    }

    pub fn pending_count(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn remove(&self, entry_id: &str) -> anyhow::Result<bool> {
        let mut state = self.lock();
        let Some(idx) = state.entries.iter().position(|e| e.id == entry_id) else {
            return Ok(false);
        };
        let mut entries = state.entries.clone();
        entries.remove(idx);
        save_collection(self.store.as_ref(), OUTBOX_KEY, &entries)?;
        state.entries = entries;
        Ok(true)
    }

    /// Charges one failed attempt to an entry. Once `retry_count` exceeds
    /// `retry_cap` the entry leaves the queue for the dead-letter log.
    pub fn record_failure(
        &self,
        entry_id: &str,
        error: &str,
        retry_cap: u32,
    ) -> anyhow::Result<FailureOutcome> {
        let mut state = self.lock();
        let Some(idx) = state.entries.iter().position(|e| e.id == entry_id) else {
            return Ok(FailureOutcome::Missing);
        };
        let mut entries = state.entries.clone();
        entries[idx].retry_count += 1;
        let retry_count = entries[idx].retry_count;

        if retry_count <= retry_cap {
            save_collection(self.store.as_ref(), OUTBOX_KEY, &entries)?;
            state.entries = entries;
            return Ok(FailureOutcome::Retained { retry_count });
        }

        let dead = DeadLetter {
            entry: entries.remove(idx),
            dropped_at: Utc::now(),
            last_error: error.to_string(),
        };
        let mut dead_letters = state.dead_letters.clone();
        dead_letters.push(dead.clone());
        save_collection(self.store.as_ref(), DEAD_LETTERS_KEY, &dead_letters)?;
        save_collection(self.store.as_ref(), OUTBOX_KEY, &entries)?;
        state.entries = entries;
        state.dead_letters = dead_letters;
        Ok(FailureOutcome::Dropped(dead))
    }

    pub fn dead_letters(&self) -> Vec<DeadLetter> {
        self.lock().dead_letters.clone()
    }

    pub fn dead_letter_count(&self) -> usize {
        self.lock().dead_letters.len()
    }

    /// Moves every dead letter back into the queue with a fresh retry budget.
    /// A revived entry goes ahead of any queued entry for the same entity,
    /// otherwise to the tail. Returns how many entries were re-queued.
    pub fn requeue_dead_letters(&self) -> anyhow::Result<usize> {
        let requeued = {
            let mut state = self.lock();
            if state.dead_letters.is_empty() {
                return Ok(0);
            }
            let mut entries = state.entries.clone();
            let mut revived = HashSet::new();
            let count = state.dead_letters.len();
            for dead in &state.dead_letters {
                let entity_key = dead.entry.payload.entity_key();
                let at = entries
                    .iter()
                    .position(|e| !revived.contains(&e.id) && e.payload.entity_key() == entity_key)
                    .unwrap_or(entries.len());
                revived.insert(dead.entry.id.clone());
                entries.insert(
                    at,
                    OutboxEntry {
                        retry_count: 0,
                        ..dead.entry.clone()
                    },
                );
            }
            save_collection(self.store.as_ref(), OUTBOX_KEY, &entries)?;
            save_collection::<DeadLetter>(self.store.as_ref(), DEAD_LETTERS_KEY, &[])?;
            state.entries = entries;
            state.dead_letters.clear();
            count
        };
        self.trigger.fire();
        Ok(requeued)
    }

    fn lock(&self) -> MutexGuard<'_, OutboxState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
