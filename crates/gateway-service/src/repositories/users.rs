//! Credential store for the seeded user set.

use crate::crypto::SecretVerifier;
use crate::errors::GatewayError;
use crate::models::{Role, SeedUser};
use common::secret::ExposeSecret;
use std::collections::HashMap;

/// Why a credential check failed.
///
/// Internal only: callers above the authentication service see a single
/// `GatewayError::InvalidCredentials` for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    UnknownUser,
    BadSecret,
}

impl CredentialError {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialError::UnknownUser => "unknown_user",
            CredentialError::BadSecret => "bad_secret",
        }
    }
}

struct UserRecord {
    secret_digest: Vec<u8>,
    role: Role,
}

pub struct CredentialStore {
    users: HashMap<String, UserRecord>,
    verifier: SecretVerifier,
    // Compared against when the username is unknown so both failure paths do
    // the same work.
    dummy_digest: Vec<u8>,
}

impl CredentialStore {
    /// Build the store from the startup seed.
    ///
    /// Usernames must be unique; the config loader rejects duplicates, and if
    /// one slips through here the first entry wins.
    pub fn from_seed(seed: &[SeedUser]) -> Result<Self, GatewayError> {
        let verifier = SecretVerifier::new()?;
        let dummy_digest = verifier.digest(&hex::encode(crate::crypto::generate_random_bytes(16)?));

        let mut users = HashMap::with_capacity(seed.len());
        for user in seed {
            if users.contains_key(&user.username) {
                tracing::warn!(
                    target: "gw.repositories.users",
                    "Ignoring duplicate seed user"
                );
                continue;
            }
            users.insert(
                user.username.clone(),
                UserRecord {
                    secret_digest: verifier.digest(user.secret.expose_secret()),
                    role: user.role,
                },
            );
        }

        Ok(Self {
            users,
            verifier,
            dummy_digest,
        })
    }

    /// Check a username/secret pair and return the user's role.
    pub fn verify(&self, username: &str, secret: &str) -> Result<Role, CredentialError> {
        match self.users.get(username) {
            Some(record) => {
                if self.verifier.verify(secret, &record.secret_digest) {
                    Ok(record.role)
                } else {
                    Err(CredentialError::BadSecret)
                }
            }
            None => {
                let _ = self.verifier.verify(secret, &self.dummy_digest);
                Err(CredentialError::UnknownUser)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
