pub mod check_in_handlers;
pub mod dashboard_handlers;
pub mod ops_handlers;
pub mod session_handlers;
pub mod sync_handlers;
pub mod ticket_handlers;
pub mod walk_in_handlers;
