//! In-memory stores backing the gateway.
//!
//! The user table is immutable after startup. Tokens and service descriptors
//! live in `RwLock`-guarded maps: concurrent readers, one writer at a time.

pub mod services;
pub mod tokens;
pub mod users;
