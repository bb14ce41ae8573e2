//! Basic types

mod hash;
pub use hash::Byte32;
