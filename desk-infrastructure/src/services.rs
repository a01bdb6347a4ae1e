pub mod pin_verifier;
pub mod sheets_gateway;

pub use pin_verifier::*;
pub use sheets_gateway::*;
