use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use desk_application::{DrainOutcome, EntityStore, Metrics, OutboxQueue, SyncDispatcher, SyncTrigger};
use desk_domain::{
    CheckIn, EntityKind, FlatRecord, Gateway, GatewayError, RsvpStatus, SyncOperation, Ticket,
    TicketStatus, WalkIn,
};
use desk_infrastructure::JsonFileStore;

struct ScriptedGateway {
    answers: Mutex<VecDeque<bool>>,
    sent: Mutex<Vec<(EntityKind, SyncOperation, FlatRecord)>>,
}

impl ScriptedGateway {
    fn new(answers: &[bool]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Gateway for ScriptedGateway {
    fn is_configured(&self) -> bool {
        true
    }

    async fn send(
        &self,
        entity_kind: EntityKind,
        operation: SyncOperation,
        record: &FlatRecord,
    ) -> Result<(), GatewayError> {
        self.sent
            .lock()
            .unwrap()
            .push((entity_kind, operation, record.clone()));
        if self.answers.lock().unwrap().pop_front().unwrap_or(true) {
            Ok(())
        } else {
            Err(GatewayError::Transport("timed out".to_string()))
        }
    }
}

fn open(dir: &std::path::Path) -> (Arc<OutboxQueue>, EntityStore) {
    let store = Arc::new(JsonFileStore::open(dir).expect("store"));
    let outbox = Arc::new(OutboxQueue::open(store.clone(), SyncTrigger::disabled()).expect("outbox"));
    let ledger = EntityStore::open(store, outbox.clone()).expect("ledger");
    (outbox, ledger)
}

fn ticket() -> Ticket {
    Ticket {
        id: "AB3X7Q9K".to_string(),
        recipient_name: "Maria Lopez".to_string(),
        phone_number: "555-010-2000".to_string(),
        email: "maria@example.org".to_string(),
        adult_count: 2,
        child_count: 1,
        children: None,
        group_size: 3,
        special_needs: None,
        rsvp_status: RsvpStatus::Confirmed,
        status: TicketStatus::Issued,
        created_at: Utc::now(),
        created_by: "Ana".to_string(),
    }
}

fn walk_in() -> WalkIn {
    WalkIn {
        id: "W7K2M9P".to_string(),
        name: "Sam Rivera".to_string(),
        phone_number: "555-0100".to_string(),
        adult_count: 2,
        child_count: 0,
        children: None,
        total_count: 2,
        checked_in_at: Utc::now(),
        checked_in_by: "Ben".to_string(),
    }
}

#[test]
fn ledger_and_outbox_survive_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    {
        let (_outbox, ledger) = open(dir.path());
        ledger.put_ticket(ticket()).expect("ticket");
        ledger
            .put_check_in(CheckIn::new("ab3x7q9k", 2, 0, "Ben", Utc::now()))
            .expect("check-in");
        ledger.put_walk_in(walk_in()).expect("walk-in");
    }

    let (outbox, ledger) = open(dir.path());
    let restored = ledger.get_ticket_by_id("AB3X7Q9K").expect("ticket restored");
    assert_eq!(restored.status, TicketStatus::CheckedIn);
    assert_eq!(restored.group_size, 3);
    assert_eq!(ledger.get_check_ins().len(), 1);
    assert_eq!(ledger.get_walk_ins().len(), 1);

    let kinds: Vec<_> = outbox
        .snapshot()
        .iter()
        .map(|entry| (entry.entity_kind, entry.operation))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (EntityKind::Ticket, SyncOperation::Create),
            (EntityKind::CheckIn, SyncOperation::Create),
            (EntityKind::Ticket, SyncOperation::Update),
            (EntityKind::WalkIn, SyncOperation::Create),
        ]
    );
}

#[tokio::test]
async fn retry_counts_and_dead_letters_persist() {
    let dir = tempfile::tempdir().expect("tempdir");
    let gateway = Arc::new(ScriptedGateway::new(&[false; 6]));
    {
        let (outbox, ledger) = open(dir.path());
        ledger.put_walk_in(walk_in()).expect("walk-in");
        let dispatcher =
            SyncDispatcher::new(outbox, gateway.clone(), Arc::new(Metrics::default()), 5);
        for _ in 0..3 {
            dispatcher.drain().await;
        }
    }

    let (outbox, ledger) = open(dir.path());
    assert_eq!(outbox.snapshot()[0].retry_count, 3);
    let dispatcher =
        SyncDispatcher::new(outbox.clone(), gateway.clone(), Arc::new(Metrics::default()), 5);
    for _ in 0..3 {
        dispatcher.drain().await;
    }
    assert_eq!(outbox.pending_count(), 0);
    assert_eq!(ledger.get_walk_ins().len(), 1);

    let (outbox, _ledger) = open(dir.path());
    let dead = outbox.dead_letters();
    assert_eq!(dead.len(), 1);
    assert_eq!(dead[0].entry.retry_count, 6);
    assert_eq!(dead[0].last_error, "gateway transport failure: timed out");

    outbox.requeue_dead_letters().expect("requeue");
    let dispatcher = SyncDispatcher::new(outbox.clone(), gateway.clone(), Arc::new(Metrics::default()), 5);
    match dispatcher.drain().await {
        DrainOutcome::Completed(report) => assert_eq!(report.delivered, 1),
        DrainOutcome::AlreadyRunning => panic!("unexpected concurrent pass"),
    }
    assert_eq!(gateway.sent.lock().unwrap().len(), 7);
}
