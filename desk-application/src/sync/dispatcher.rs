use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, warn};

use desk_domain::{DrainReport, Gateway, GatewayError, SyncStatus};

use crate::outbox::{FailureOutcome, OutboxQueue};
use crate::sync::{SyncEvent, SyncEventHub};
use crate::Metrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    Completed(DrainReport),
    /// Another pass was in flight; this request was collapsed into it.
    AlreadyRunning,
}

/// Drains the outbox through the gateway, one pass at a time.
pub struct SyncDispatcher {
    outbox: Arc<OutboxQueue>,
    gateway: Arc<dyn Gateway>,
    metrics: Arc<Metrics>,
    events: SyncEventHub,
    retry_cap: u32,
    pass_lock: Mutex<()>,
}

impl SyncDispatcher {
    pub fn new(
        outbox: Arc<OutboxQueue>,
        gateway: Arc<dyn Gateway>,
        metrics: Arc<Metrics>,
        retry_cap: u32,
    ) -> Self {
        Self {
            outbox,
            gateway,
            metrics,
            events: SyncEventHub::default(),
            retry_cap,
            pass_lock: Mutex::new(()),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.events.subscribe()
    }

    pub fn status(&self) -> SyncStatus {
        SyncStatus {
            pending_count: self.outbox.pending_count(),
            is_gateway_configured: self.gateway.is_configured(),
            dead_letter_count: self.outbox.dead_letter_count(),
        }
    }

    /// Runs one pass over the current queue snapshot.
    ///
    /// Entries are attempted in queue order. After an entry fails, later
    /// entries of the same entity are deferred to the next pass so an entity's
    /// `update` never overtakes its `create`.
    pub async fn drain(&self) -> DrainOutcome {
        let Ok(_pass) = self.pass_lock.try_lock() else {
            debug!("drain pass already in flight");
            return DrainOutcome::AlreadyRunning;
        };

        let mut report = DrainReport::default();
        let mut blocked = HashSet::new();

        for entry in self.outbox.snapshot() {
            let entity_key = entry.payload.entity_key();
            if blocked.contains(&entity_key) {
                report.deferred += 1;
                continue;
            }
            report.attempted += 1;

            let record = entry.payload.to_flat_record();
            let result = self
                .gateway
                .send(entry.entity_kind, entry.operation, &record)
                .await;

            match result {
                Ok(()) => {
                    if let Err(err) = self.outbox.remove(&entry.id) {
                        error!("failed to remove delivered outbox entry {}: {:#}", entry.id, err);
                    }
                    self.metrics.record_sync_delivered();
                    report.delivered += 1;
                    self.events.publish(SyncEvent::Delivered {
                        entry_id: entry.id,
                        entity_kind: entry.entity_kind,
                        operation: entry.operation,
                    });
                }
                Err(err) => {
                    blocked.insert(entity_key);
                    self.metrics.record_sync_failure();
                    self.handle_failure(&entry.id, &err, &mut report);
                }
            }
        }

        if report.attempted > 0 {
            debug!(
                "drain pass: attempted={} delivered={} retained={} dropped={} deferred={}",
                report.attempted, report.delivered, report.retained, report.dropped, report.deferred
            );
        }
        self.events.publish(SyncEvent::PassCompleted(report));
        DrainOutcome::Completed(report)
    }

    fn handle_failure(&self, entry_id: &str, err: &GatewayError, report: &mut DrainReport) {
        let message = err.to_string();
        match self.outbox.record_failure(entry_id, &message, self.retry_cap) {
            Ok(FailureOutcome::Retained { retry_count }) => {
                match err {
                    GatewayError::NotConfigured => {
                        debug!("sync skipped for {}: {}", entry_id, message)
                    }
                    _ => warn!(
                        "sync failed for {} (attempt {}): {}",
                        entry_id, retry_count, message
                    ),
                }
                report.retained += 1;
                self.events.publish(SyncEvent::Retrying {
                    entry_id: entry_id.to_string(),
                    retry_count,
                    error: message,
                });
            }
            Ok(FailureOutcome::Dropped(dead)) => {
                error!(
                    "sync dropped {} {} for {} after {} attempts: {}",
                    dead.entry.entity_kind,
                    dead.entry.operation,
                    dead.entry.payload.entity_id(),
                    dead.entry.retry_count,
                    message
                );
                self.metrics.record_sync_dropped();
                report.dropped += 1;
                self.events.publish(SyncEvent::Dropped(dead));
            }
            Ok(FailureOutcome::Missing) => {}
            Err(store_err) => {
                error!(
                    "failed to persist retry count for {}: {:#}",
                    entry_id, store_err
                );
                report.retained += 1;
            }
        }
    }
}
