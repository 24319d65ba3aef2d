//! Common utilities shared across Access Gateway crates.

#![warn(clippy::pedantic)]

/// Module for bearer-token `Authorization` header handling
pub mod bearer;

/// Module for secret types that prevent accidental logging
pub mod secret;
