// Domain entities
pub mod activity;
pub mod check_in;
pub mod config;
pub mod outbox;
pub mod session;
pub mod sync_report;
pub mod ticket;
pub mod walk_in;

pub use activity::*;
pub use check_in::*;
pub use config::*;
pub use outbox::*;
pub use session::*;
pub use sync_report::*;
pub use ticket::*;
pub use walk_in::*;
