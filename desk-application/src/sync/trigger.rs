use tokio::sync::mpsc;

/// Coalescing "there is work" signal from the outbox to the sync worker.
///
/// The channel holds at most one pending signal, so any number of enqueues
/// made while a pass is running collapse into a single follow-up pass.
#[derive(Clone, Debug, Default)]
pub struct SyncTrigger {
    tx: Option<mpsc::Sender<()>>,
}

impl SyncTrigger {
    pub fn channel() -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        (Self { tx: Some(tx) }, rx)
    }

    /// Trigger that goes nowhere; used when no worker is attached.
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn fire(&self) {
        if let Some(tx) = &self.tx {
            let _ = tx.try_send(());
        }
    }
}
