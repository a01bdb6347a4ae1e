// Outbox replication: trigger channel, dispatcher and background worker

pub mod dispatcher;
pub mod events;
pub mod trigger;
pub mod worker;

pub use dispatcher::*;
pub use events::*;
pub use trigger::*;
pub use worker::*;
