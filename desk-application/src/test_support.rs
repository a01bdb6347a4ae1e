use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use desk_domain::{
    CheckIn, EntityKind, FlatRecord, Gateway, GatewayError, KeyValueStore, PinVerifier,
    RsvpStatus, RuntimeConfig, SyncOperation, Ticket, TicketStatus, WalkIn,
};

use crate::ledger::EntityStore;
use crate::outbox::OutboxQueue;
use crate::sync::{SyncDispatcher, SyncTrigger};
use crate::{AppState, Metrics};

#[derive(Default)]
pub struct MemoryKv {
    docs: Mutex<HashMap<String, String>>,
    pub fail_writes: AtomicBool,
}

impl MemoryKv {
    pub fn raw(&self, key: &str) -> Option<String> {
        self.docs.lock().unwrap().get(key).cloned()
    }
}

impl KeyValueStore for MemoryKv {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.docs.lock().unwrap().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> anyhow::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("disk full");
        }
        self.docs
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Gateway that answers from a script, then falls back to `default_ok`.
pub struct ScriptedGateway {
    configured: bool,
    default_ok: bool,
    script: Mutex<VecDeque<bool>>,
    pub calls: Mutex<Vec<(EntityKind, SyncOperation, FlatRecord)>>,
}

impl ScriptedGateway {
    pub fn always(ok: bool) -> Self {
        Self {
            configured: true,
            default_ok: ok,
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::always(false)
        }
    }

    pub fn scripted(answers: &[bool], default_ok: bool) -> Self {
        Self {
            script: Mutex::new(answers.iter().copied().collect()),
            ..Self::always(default_ok)
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Gateway for ScriptedGateway {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn send(
        &self,
        entity_kind: EntityKind,
        operation: SyncOperation,
        record: &FlatRecord,
    ) -> Result<(), GatewayError> {
        if !self.configured {
            return Err(GatewayError::NotConfigured);
        }
        self.calls
            .lock()
            .unwrap()
            .push((entity_kind, operation, record.clone()));
        let ok = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.default_ok);
        if ok {
            Ok(())
        } else {
            Err(GatewayError::Transport("connection reset".to_string()))
        }
    }
}

pub struct Fixture {
    pub kv: Arc<MemoryKv>,
    pub outbox: Arc<OutboxQueue>,
    pub ledger: Arc<EntityStore>,
}

pub fn fixture() -> Fixture {
    let kv = Arc::new(MemoryKv::default());
    reopen(kv)
}

pub fn reopen(kv: Arc<MemoryKv>) -> Fixture {
    let outbox = Arc::new(OutboxQueue::open(kv.clone(), SyncTrigger::disabled()).unwrap());
    let ledger = Arc::new(EntityStore::open(kv.clone(), outbox.clone()).unwrap());
    Fixture { kv, outbox, ledger }
}

pub struct StaticPin(pub &'static str);

impl PinVerifier for StaticPin {
    fn verify(&self, pin: &str) -> bool {
        pin == self.0
    }
}

pub fn app_state() -> AppState {
    app_state_with_gateway(Arc::new(ScriptedGateway::always(true)))
}

pub fn app_state_with_gateway(gateway: Arc<ScriptedGateway>) -> AppState {
    let fx = fixture();
    let metrics = Arc::new(Metrics::default());
    let config = RuntimeConfig::default();
    let dispatcher = Arc::new(SyncDispatcher::new(
        fx.outbox.clone(),
        gateway,
        metrics.clone(),
        config.sync_retry_cap,
    ));
    AppState {
        config,
        ledger: fx.ledger,
        outbox: fx.outbox,
        dispatcher,
        pin_verifier: Arc::new(StaticPin("2468")),
        metrics,
    }
}

pub fn ticket(id: &str, adults: u32, children: u32) -> Ticket {
    Ticket {
        id: id.to_string(),
        recipient_name: "Maria Lopez".to_string(),
        phone_number: "(555) 010-2000".to_string(),
        email: "maria@example.org".to_string(),
        adult_count: adults,
        child_count: children,
        children: None,
        group_size: adults + children,
        special_needs: None,
        rsvp_status: RsvpStatus::Confirmed,
        status: TicketStatus::Issued,
        created_at: Utc::now(),
        created_by: "Ana".to_string(),
    }
}

pub fn check_in(ticket_id: &str, adults: u32, children: u32, by: &str) -> CheckIn {
    CheckIn::new(ticket_id, adults, children, by, Utc::now())
}

pub fn walk_in(id: &str, total: u32) -> WalkIn {
    WalkIn {
        id: id.to_string(),
        name: "Walk-in Guest".to_string(),
        phone_number: String::new(),
        adult_count: total,
        child_count: 0,
        children: None,
        total_count: total,
        checked_in_at: Utc::now(),
        checked_in_by: "Ben".to_string(),
    }
}
