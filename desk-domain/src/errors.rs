// Domain error taxonomy

use thiserror::Error;

use crate::entities::CheckIn;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// A check-in already exists for this ticket; carries the first one so
    /// the desk can show who admitted the guest and when.
    #[error("ticket {} already checked in by {} at {}", .existing.ticket_id, .existing.checked_in_by, .existing.checked_in_at)]
    DuplicateCheckIn { existing: Box<CheckIn> },
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("not a valid ticket reference")]
pub struct InvalidReference;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway destination not configured")]
    NotConfigured,
    #[error("gateway rejected record: {0}")]
    Rejected(String),
    #[error("gateway transport failure: {0}")]
    Transport(String),
}
