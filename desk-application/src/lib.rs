// Check-in Desk Application Layer

pub mod commands;
pub mod dtos;
pub mod error;
pub mod ledger;
pub mod metrics;
pub mod outbox;
pub mod queries;
pub mod state;
pub mod storage;
pub mod sync;

#[cfg(test)]
mod test_support;

pub use error::AppError;
pub use ledger::{CheckInReceipt, EntityStore};
pub use metrics::Metrics;
pub use outbox::{FailureOutcome, OutboxQueue};
pub use state::AppState;
pub use sync::{spawn_sync_worker, DrainOutcome, SyncDispatcher, SyncEvent, SyncEventHub, SyncTrigger};
