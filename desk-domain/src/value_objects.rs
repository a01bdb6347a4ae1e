// Domain value objects
pub mod child_gender;
pub mod entity_kind;
pub mod identifiers;
pub mod ticket_status;

pub use child_gender::*;
pub use entity_kind::*;
pub use identifiers::*;
pub use ticket_status::*;
