use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::sync::SyncDispatcher;

/// Runs drain passes on a fixed period and whenever the outbox signals new
/// work, until `shutdown` resolves.
///
/// The first tick fires immediately, so whatever survived the last shutdown
/// is retried at startup.
pub fn spawn_sync_worker<F>(
    dispatcher: Arc<SyncDispatcher>,
    mut triggers: mpsc::Receiver<()>,
    period: Duration,
    shutdown: F,
) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut triggers_open = true;
        tokio::pin!(shutdown);

        info!("sync worker started (period {}s)", period.as_secs());
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    dispatcher.drain().await;
                }
                signal = triggers.recv(), if triggers_open => match signal {
                    Some(()) => {
                        dispatcher.drain().await;
                    }
                    None => {
                        debug!("sync trigger channel closed; falling back to periodic passes");
                        triggers_open = false;
                    }
                },
            }
        }
        info!("sync worker stopped");
    })
}
