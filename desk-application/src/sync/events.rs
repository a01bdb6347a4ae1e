use tokio::sync::broadcast;

use desk_domain::{DeadLetter, DrainReport, EntityKind, SyncOperation};

const CHANNEL_BUFFER: usize = 64;

#[derive(Debug, Clone)]
pub enum SyncEvent {
    Delivered {
        entry_id: String,
        entity_kind: EntityKind,
        operation: SyncOperation,
    },
    Retrying {
        entry_id: String,
        retry_count: u32,
        error: String,
    },
    /// Lost-sync event: the entry exceeded the retry cap and left the queue.
    Dropped(DeadLetter),
    PassCompleted(DrainReport),
}

pub struct SyncEventHub {
    tx: broadcast::Sender<SyncEvent>,
}

impl Default for SyncEventHub {
    fn default() -> Self {
        let (tx, _rx) = broadcast::channel(CHANNEL_BUFFER);
        Self { tx }
    }
}

impl SyncEventHub {
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: SyncEvent) {
        let _ = self.tx.send(event);
    }
}
