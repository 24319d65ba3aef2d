//! Credential verification and login.

use crate::errors::GatewayError;
use crate::models::IssuedToken;
use crate::observability::{hash_for_correlation, metrics::record_token_issuance};
use crate::repositories::users::CredentialStore;
use crate::services::token_service::TokenIssuer;
use common::secret::{ExposeSecret, SecretString};
use std::time::Instant;
use tracing::instrument;

/// Verifies credentials and hands out tokens. The only path that creates one.
pub struct AuthenticationService {
    credentials: CredentialStore,
    issuer: TokenIssuer,
}

impl AuthenticationService {
    pub fn new(credentials: CredentialStore, issuer: TokenIssuer) -> Self {
        Self {
            credentials,
            issuer,
        }
    }

    /// Check `username`/`password` and issue a token with the user's role.
    ///
    /// Unknown user and wrong password both surface as
    /// `GatewayError::InvalidCredentials`. The distinction is only visible in
    /// debug logs, keyed by a hashed username.
    #[instrument(skip_all, name = "gw.auth.authenticate")]
    pub async fn authenticate(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<IssuedToken, GatewayError> {
        let start = Instant::now();

        let role = match self.credentials.verify(username, password.expose_secret()) {
            Ok(role) => role,
            Err(reason) => {
                tracing::debug!(
                    target: "gw.services.auth",
                    user = %hash_for_correlation(username),
                    reason = reason.as_str(),
                    "Authentication failed"
                );
                record_token_issuance("error", start.elapsed());
                return Err(GatewayError::InvalidCredentials);
            }
        };

        let result = self.issuer.issue(username, role).await;
        match &result {
            Ok(_) => {
                tracing::info!(
                    target: "gw.services.auth",
                    user = %hash_for_correlation(username),
                    role = %role,
                    "Token issued"
                );
                record_token_issuance("success", start.elapsed());
            }
            Err(_) => record_token_issuance("error", start.elapsed()),
        }
        result
    }
}
