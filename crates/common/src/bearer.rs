//! Bearer token helpers for the `Authorization` header.
//!
//! Parsing is deliberately strict: the scheme must be exactly `Bearer`
//! followed by a single space and a non-empty token without whitespace.
//! Anything else is treated as a missing credential by callers.

/// Maximum accepted bearer token length in bytes.
///
/// Gateway tokens are 43 characters (32 random bytes, base64url). Anything far
/// larger is rejected before it reaches the token store.
pub const MAX_BEARER_TOKEN_BYTES: usize = 512;

/// Authentication scheme prefix used in the `Authorization` header.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Reasons an `Authorization` header could not yield a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BearerError {
    /// The header was absent.
    Missing,
    /// The header was present but not a well-formed bearer credential.
    Malformed,
}

impl BearerError {
    /// Client-facing description. Kept generic on purpose.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            BearerError::Missing => "Missing Authorization header",
            BearerError::Malformed => "Invalid Authorization header format",
        }
    }
}

/// Extract the token from an `Authorization` header value.
///
/// # Errors
///
/// Returns [`BearerError::Missing`] when `header` is `None` and
/// [`BearerError::Malformed`] when the scheme, length or token characters
/// are wrong.
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, BearerError> {
    let header = header.ok_or(BearerError::Missing)?;
    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(BearerError::Malformed)?;

    if token.is_empty()
        || token.len() > MAX_BEARER_TOKEN_BYTES
        || token.chars().any(char::is_whitespace)
    {
        return Err(BearerError::Malformed);
    }

    Ok(token)
}

/// Build an `Authorization` header value for `token`.
#[must_use]
pub fn bearer_header(token: &str) -> String {
    format!("{BEARER_PREFIX}{token}")
}
