use desk_domain::{CheckIn, InvalidReference, LedgerError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("no such ticket: {0}")]
    NotFound(String),
    #[error(transparent)]
    InvalidReference(#[from] InvalidReference),
    #[error("ticket {} already checked in by {} at {}", .0.ticket_id, .0.checked_in_by, .0.checked_in_at)]
    DuplicateCheckIn(Box<CheckIn>),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<LedgerError> for AppError {
    fn from(value: LedgerError) -> Self {
        match value {
            LedgerError::DuplicateCheckIn { existing } => AppError::DuplicateCheckIn(existing),
            LedgerError::Storage(err) => AppError::Internal(err),
        }
    }
}
