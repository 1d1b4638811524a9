//! Data models
//!
//! Wire shapes of the service desk REST API, normalized on decode.
//! All IDs are `i64`.

pub mod asset;
pub mod contact;
pub mod customer;
pub mod ticket;
pub mod zone;

// Re-exports
pub use asset::*;
pub use contact::*;
pub use customer::*;
pub use ticket::*;
pub use zone::*;
