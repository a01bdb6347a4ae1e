use async_trait::async_trait;

use crate::entities::FlatRecord;
use crate::errors::GatewayError;
use crate::value_objects::{EntityKind, SyncOperation};

/// One-way, best-effort sink for mirrored records.
#[async_trait]
pub trait Gateway: Send + Sync {
    fn is_configured(&self) -> bool;
    async fn send(
        &self,
        entity_kind: EntityKind,
        operation: SyncOperation,
        record: &FlatRecord,
    ) -> Result<(), GatewayError>;
}

pub trait PinVerifier: Send + Sync {
    fn verify(&self, pin: &str) -> bool;
}
