use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    tickets_issued: AtomicU64,
    check_ins: AtomicU64,
    duplicate_check_ins: AtomicU64,
    walk_ins: AtomicU64,
    sync_delivered: AtomicU64,
    sync_failures: AtomicU64,
    sync_dropped: AtomicU64,
}

impl Metrics {
    pub fn record_ticket_issued(&self) {
        self.tickets_issued.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_check_in(&self) {
        self.check_ins.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_duplicate_check_in(&self) {
        self.duplicate_check_ins.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_walk_in(&self) {
        self.walk_ins.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sync_delivered(&self) {
        self.sync_delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sync_failure(&self) {
        self.sync_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sync_dropped(&self) {
        self.sync_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let counters = [
            ("checkin_desk_tickets_issued_total", &self.tickets_issued),
            ("checkin_desk_check_ins_total", &self.check_ins),
            (
                "checkin_desk_duplicate_check_ins_total",
                &self.duplicate_check_ins,
            ),
            ("checkin_desk_walk_ins_total", &self.walk_ins),
            ("checkin_desk_sync_delivered_total", &self.sync_delivered),
            ("checkin_desk_sync_failures_total", &self.sync_failures),
            ("checkin_desk_sync_dropped_total", &self.sync_dropped),
        ];

        let mut out = String::new();
        for (name, counter) in counters {
            out.push_str(&format!(
                "# TYPE {name} counter\n{name} {}\n",
                counter.load(Ordering::Relaxed)
            ));
        }
        out
    }
}
