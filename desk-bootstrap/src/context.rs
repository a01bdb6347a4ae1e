use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{info, warn};

use desk_application::{AppState, EntityStore, Metrics, OutboxQueue, SyncDispatcher, SyncTrigger};
use desk_domain::{KeyValueStore, RuntimeConfig, StorageBackend};
use desk_infrastructure::{AppConfig, ConfiguredPinVerifier, JsonFileStore, MemoryStore, SheetsGateway};

pub struct AppContext {
    pub state: AppState,
    /// Outbox "work available" signals, consumed by the sync worker.
    pub sync_triggers: mpsc::Receiver<()>,
}

impl AppContext {
    pub async fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = AppConfig::load(config_path).await?;
        Self::from_runtime_config(config.to_runtime_config())
    }

    pub fn from_runtime_config(config: RuntimeConfig) -> Result<Self> {
        let store: Arc<dyn KeyValueStore> = match config.storage_backend {
            StorageBackend::File => {
                info!("using file storage at {}", config.data_dir);
                Arc::new(JsonFileStore::open(&config.data_dir)?)
            }
            StorageBackend::Memory => {
                warn!("using in-memory storage; records will not survive a restart");
                Arc::new(MemoryStore::new())
            }
        };

        let (trigger, sync_triggers) = SyncTrigger::channel();
        let outbox = Arc::new(OutboxQueue::open(store.clone(), trigger)?);
        let ledger = Arc::new(EntityStore::open(store, outbox.clone())?);
        let metrics = Arc::new(Metrics::default());

        let gateway = Arc::new(SheetsGateway::from_config(&config)?);
        if config.gateway_url.is_none() {
            warn!("gateway_url not set; records stay local and sync entries will be dead-lettered");
        }
        let dispatcher = Arc::new(SyncDispatcher::new(
            outbox.clone(),
            gateway,
            metrics.clone(),
            config.sync_retry_cap,
        ));

        let state = AppState {
            pin_verifier: Arc::new(ConfiguredPinVerifier::from_config(&config)),
            config,
            ledger,
            outbox,
            dispatcher,
            metrics,
        };

        Ok(Self {
            state,
            sync_triggers,
        })
    }
}
