pub mod projections;
pub mod reference_codec;

pub use projections::*;
pub use reference_codec::*;
