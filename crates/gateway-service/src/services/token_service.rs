use crate::crypto;
use crate::errors::GatewayError;
use crate::models::{Identity, IssuedToken, Role};
use crate::observability::metrics::{record_token_validation, set_live_tokens};
use crate::repositories::tokens::{TokenRecord, TokenStore};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::instrument;

/// Upper bound on regeneration attempts after a value collision.
///
/// With 256-bit random values a single collision is already astronomically
/// unlikely; hitting this limit means the RNG is broken.
const MAX_ISSUE_ATTEMPTS: usize = 8;

/// Mints bearer tokens and resolves them back to identities.
#[derive(Clone)]
pub struct TokenIssuer {
    store: TokenStore,
    ttl: Option<Duration>,
}

impl TokenIssuer {
    /// `ttl` of `None` keeps tokens live for the life of the process.
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            store: TokenStore::new(),
            ttl,
        }
    }

    /// Issue a fresh token for `username` carrying `role`.
    ///
    /// The value is unique among live tokens: a colliding value is discarded
    /// and regenerated, and the uniqueness check happens atomically with the
    /// insert.
    #[instrument(skip_all, name = "gw.token.issue", fields(role = %role))]
    pub async fn issue(&self, username: &str, role: Role) -> Result<IssuedToken, GatewayError> {
        let identity = Identity {
            username: username.to_string(),
            role,
        };

        self.prune_expired().await;

        for _ in 0..MAX_ISSUE_ATTEMPTS {
            let value = crypto::generate_token_value()?;
            let issued_at = Utc::now();
            let record = TokenRecord {
                identity: identity.clone(),
                issued_at,
            };

            if self.store.insert_if_absent(value.clone(), record).await {
                set_live_tokens(self.store.len().await);
                return Ok(IssuedToken {
                    value,
                    identity,
                    issued_at,
                    expires_in: self.ttl.map(|ttl| ttl.as_secs()),
                });
            }

            tracing::warn!(target: "gw.services.token", "Token value collision, regenerating");
        }

        tracing::error!(
            target: "gw.services.token",
            attempts = MAX_ISSUE_ATTEMPTS,
            "Could not generate a unique token value"
        );
        Err(GatewayError::Crypto(
            "Could not generate a unique token value".to_string(),
        ))
    }

    /// Look up the identity behind a token value.
    ///
    /// Unknown values, and values older than the configured TTL, fail with
    /// `InvalidToken`.
    #[instrument(skip_all, name = "gw.token.resolve")]
    pub async fn resolve(&self, value: &str) -> Result<Identity, GatewayError> {
        let record = match self.store.get(value).await {
            Some(record) => record,
            None => {
                record_token_validation("error", Some("unknown"));
                return Err(GatewayError::InvalidToken(
                    "Invalid or expired token".to_string(),
                ));
            }
        };

        if self
            .expiry_cutoff()
            .is_some_and(|cutoff| record.issued_at <= cutoff)
        {
            if self.store.remove(value).await {
                set_live_tokens(self.store.len().await);
            }
            record_token_validation("error", Some("expired"));
            return Err(GatewayError::InvalidToken(
                "Invalid or expired token".to_string(),
            ));
        }

        record_token_validation("success", None);
        Ok(record.identity)
    }

    /// Records issued at or before this instant are expired. `None` when no
    /// TTL is configured, or the TTL is too large to represent.
    fn expiry_cutoff(&self) -> Option<DateTime<Utc>> {
        let ttl = chrono::Duration::from_std(self.ttl?).ok()?;
        Utc::now().checked_sub_signed(ttl)
    }

    /// Drop every expired record and refresh the live token gauge.
    async fn prune_expired(&self) {
        let Some(cutoff) = self.expiry_cutoff() else {
            return;
        };
        let removed = self.store.retain_issued_after(cutoff).await;
        if removed > 0 {
            tracing::debug!(target: "gw.services.token", removed, "Pruned expired tokens");
            set_live_tokens(self.store.len().await);
        }
    }

    /// Number of live token records.
    pub async fn live_count(&self) -> usize {
        self.store.len().await
    }
}
