use std::sync::Arc;

use desk_domain::ports::PinVerifier;
use desk_domain::RuntimeConfig;

use crate::{EntityStore, Metrics, OutboxQueue, SyncDispatcher};

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub ledger: Arc<EntityStore>,
    pub outbox: Arc<OutboxQueue>,
    pub dispatcher: Arc<SyncDispatcher>,
    pub pin_verifier: Arc<dyn PinVerifier>,
    pub metrics: Arc<Metrics>,
}
