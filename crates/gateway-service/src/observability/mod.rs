//! Observability for the gateway.
//!
//! # Privacy by Default
//!
//! Instrumentation uses `#[instrument(skip_all)]` and explicit field
//! allow-listing. Fields fall into three groups:
//! - **SAFE**: logged in plaintext (roles, operation labels, outcomes)
//! - **HASHED**: SHA-256 truncated for correlation (usernames)
//! - **NEVER**: must not appear in logs (secrets, token values)

pub mod metrics;

use crate::errors::GatewayError;
use sha2::{Digest, Sha256};

/// Hash a field value for correlation in logs (SHA-256, first 8 hex chars)
///
/// Not a security boundary: it lets operators correlate repeated failed
/// logins for the same username without writing the username itself.
pub fn hash_for_correlation(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    hex::encode(result.get(..4).unwrap_or_default())
}

/// Error categories for metrics labels (bounded cardinality)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad credentials, missing or unknown token
    Authentication,
    /// Role lacks permission
    Authorization,
    /// Unknown service id
    NotFound,
    /// RNG or other internal failure
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Authentication => "authentication",
            ErrorCategory::Authorization => "authorization",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::Internal => "internal",
        }
    }
}

impl From<&GatewayError> for ErrorCategory {
    fn from(err: &GatewayError) -> Self {
        match err {
            GatewayError::InvalidCredentials | GatewayError::InvalidToken(_) => {
                ErrorCategory::Authentication
            }
            GatewayError::Forbidden => ErrorCategory::Authorization,
            GatewayError::NotFound(_) => ErrorCategory::NotFound,
            GatewayError::Crypto(_) => ErrorCategory::Internal,
        }
    }
}
