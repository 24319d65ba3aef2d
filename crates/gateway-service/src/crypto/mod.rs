//! Cryptographic primitives for the gateway.
//!
//! - Bearer token values: 32 bytes from the system CSPRNG, base64url encoded.
//! - Secret checks: HMAC-SHA256 tags under a per-process random key, compared
//!   in constant time with `ring::hmac::verify`.

use crate::errors::GatewayError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use ring::{
    hmac,
    rand::{SecureRandom, SystemRandom},
};
use tracing::instrument;

/// Random bytes per bearer token (256 bits).
pub const TOKEN_BYTES: usize = 32;

/// Generate cryptographically secure random bytes
pub fn generate_random_bytes(len: usize) -> Result<Vec<u8>, GatewayError> {
    let rng = SystemRandom::new();
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes)
        .map_err(|e| GatewayError::Crypto(format!("Random bytes generation failed: {}", e)))?;
    Ok(bytes)
}

/// Generate an opaque bearer token value.
///
/// The value carries no identity information; the token store is the only
/// place that knows who it belongs to.
#[instrument(skip_all)]
pub fn generate_token_value() -> Result<String, GatewayError> {
    let bytes = generate_random_bytes(TOKEN_BYTES)?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Keyed digests of user secrets.
///
/// Stored secrets are reduced to HMAC tags at startup. Verification recomputes
/// the tag for the presented secret and compares in constant time, so the
/// comparison leaks neither length nor matching prefix.
pub struct SecretVerifier {
    key: hmac::Key,
}

impl SecretVerifier {
    pub fn new() -> Result<Self, GatewayError> {
        let rng = SystemRandom::new();
        let key = hmac::Key::generate(hmac::HMAC_SHA256, &rng)
            .map_err(|e| GatewayError::Crypto(format!("HMAC key generation failed: {}", e)))?;
        Ok(Self { key })
    }

    /// Compute the tag stored in place of a secret.
    pub fn digest(&self, secret: &str) -> Vec<u8> {
        hmac::sign(&self.key, secret.as_bytes()).as_ref().to_vec()
    }

    /// Check `secret` against a tag produced by [`SecretVerifier::digest`].
    #[instrument(skip_all)]
    pub fn verify(&self, secret: &str, digest: &[u8]) -> bool {
        hmac::verify(&self.key, secret.as_bytes(), digest).is_ok()
    }
}
