// Read-side use cases over the ledger and the outbox

pub mod activity_queries;
pub mod sync_queries;
pub mod ticket_queries;
