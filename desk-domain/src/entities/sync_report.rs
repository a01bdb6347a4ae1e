// Replication status read models

use serde::Serialize;

/// Display summary of the replication backlog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SyncStatus {
    pub pending_count: usize,
    pub is_gateway_configured: bool,
    pub dead_letter_count: usize,
}

/// Outcome counters of one drain pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DrainReport {
    pub attempted: usize,
    pub delivered: usize,
    pub retained: usize,
    pub dropped: usize,
    pub deferred: usize,
}
