// Front-end actions that mutate the ledger

pub mod check_in_commands;
pub mod session_commands;
pub mod sync_commands;
pub mod ticket_commands;
pub mod validation;
pub mod walk_in_commands;
