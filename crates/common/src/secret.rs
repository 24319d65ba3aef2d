//! Secret types for protecting sensitive values from accidental logging.
//!
//! This module re-exports types from the [`secrecy`] crate. Use these types for
//! user passwords held by the credential store and for login request bodies.
//!
//! # Compile-Time Safety
//!
//! `SecretBox<T>` and `SecretString` implement `Debug` with redaction, so any
//! struct that derives `Debug` while holding a secret gets safe logging for
//! free. Printing a login request with `{:?}` or through tracing can never leak
//! the password.
//!
//! # Memory Safety
//!
//! Secrets are zeroized when dropped.
//!
//! # Example
//!
//! ```rust
//! use common::secret::SecretString;
//! use secrecy::ExposeSecret;
//!
//! #[derive(Debug)]
//! struct LoginRequest {
//!     username: String,
//!     password: SecretString,  // Debug shows "[REDACTED]"
//! }
//!
//! let req = LoginRequest {
//!     username: "admin".to_string(),
//!     password: SecretString::from("1234"),
//! };
//!
//! println!("{:?}", req);
//!
//! // Reading the value requires an explicit call
//! let password: &str = req.password.expose_secret();
//! ```
//!
//! # Usage Guidelines
//!
//! Use `SecretString` for:
//! - Seeded user secrets
//! - Passwords arriving on `/authenticate`
//!
//! Bearer token values are opaque random strings but are still never logged;
//! they are kept as plain `String` map keys inside the token store.

pub use secrecy::{ExposeSecret, SecretBox, SecretString};
