//! Per-request access façade.
//!
//! Every protected call goes through the same sequence:
//!
//! 1. Extract the bearer token (missing or malformed -> 401)
//! 2. Resolve it to an identity (unknown or expired -> 401)
//! 3. Evaluate the policy for the identity's role and the requested operation
//! 4. Denied -> 403, allowed -> run the business action
//!
//! Steps 1-2 are `resolve_bearer`, used by the HTTP auth middleware. Steps 3-4
//! are inside each business action, so an action can never run without its
//! policy check.

use crate::config::Config;
use crate::errors::GatewayError;
use crate::models::{
    AuthorizeAccessResponse, Identity, IssuedToken, Operation, OrchestrateResponse,
    RegisterServiceResponse, ServiceDescriptor, UpdateRulesResponse,
};
use crate::observability::hash_for_correlation;
use crate::observability::metrics::{record_service_registration, set_registered_services};
use crate::repositories::services::ServiceRegistry;
use crate::repositories::users::CredentialStore;
use crate::services::auth_service::AuthenticationService;
use crate::services::authorization_service::AuthorizationPolicy;
use crate::services::token_service::TokenIssuer;
use common::bearer::extract_bearer_token;
use common::secret::SecretString;
use serde_json::{Map, Value};
use tracing::instrument;

pub struct AccessGateway {
    authentication: AuthenticationService,
    tokens: TokenIssuer,
    policy: AuthorizationPolicy,
    registry: ServiceRegistry,
}

impl AccessGateway {
    pub fn new(
        authentication: AuthenticationService,
        tokens: TokenIssuer,
        policy: AuthorizationPolicy,
        registry: ServiceRegistry,
    ) -> Self {
        Self {
            authentication,
            tokens,
            policy,
            registry,
        }
    }

    /// Wire up all components from configuration.
    pub fn from_config(config: &Config) -> Result<Self, GatewayError> {
        let credentials = CredentialStore::from_seed(&config.seed_users)?;
        let tokens = TokenIssuer::new(config.token_ttl);
        let authentication = AuthenticationService::new(credentials, tokens.clone());
        let policy = AuthorizationPolicy::new(config.resource_access_mode.clone());

        Ok(Self::new(
            authentication,
            tokens,
            policy,
            ServiceRegistry::new(),
        ))
    }

    /// Log in. The only unauthenticated operation.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<IssuedToken, GatewayError> {
        self.authentication.authenticate(username, password).await
    }

    /// Turn an `Authorization` header value into the identity it carries.
    #[instrument(skip_all, name = "gw.gateway.resolve_bearer")]
    pub async fn resolve_bearer(
        &self,
        authorization: Option<&str>,
    ) -> Result<Identity, GatewayError> {
        let token = extract_bearer_token(authorization).map_err(|e| {
            tracing::debug!(target: "gw.gateway", "{}", e.message());
            GatewayError::InvalidToken(e.message().to_string())
        })?;

        self.tokens.resolve(token).await
    }

    /// Fail with `Forbidden` unless the policy allows `operation`.
    pub fn authorize(
        &self,
        identity: &Identity,
        operation: &Operation<'_>,
    ) -> Result<(), GatewayError> {
        let decision = self.policy.authorize(identity.role, operation);
        if decision.is_allowed() {
            return Ok(());
        }

        tracing::info!(
            target: "gw.gateway",
            user = %hash_for_correlation(&identity.username),
            role = %identity.role,
            operation = operation.as_str(),
            "Access denied"
        );
        Err(GatewayError::Forbidden)
    }

    #[instrument(skip_all, name = "gw.gateway.view_service")]
    pub async fn view_service(
        &self,
        identity: &Identity,
        id: &str,
    ) -> Result<ServiceDescriptor, GatewayError> {
        self.authorize(identity, &Operation::ViewService)?;

        self.registry
            .get(id)
            .await
            .ok_or_else(|| GatewayError::NotFound("Service".to_string()))
    }

    /// Register or overwrite a service descriptor.
    #[instrument(skip_all, name = "gw.gateway.register_service")]
    pub async fn register_service(
        &self,
        identity: &Identity,
        descriptor: ServiceDescriptor,
    ) -> Result<RegisterServiceResponse, GatewayError> {
        self.authorize(identity, &Operation::RegisterService)?;

        let name = descriptor.name.clone();
        let replaced = self.registry.upsert(descriptor).await;
        let outcome = if replaced { "replaced" } else { "created" };

        tracing::info!(
            target: "gw.gateway",
            service = %name,
            outcome,
            "Service registered"
        );
        record_service_registration(outcome);
        set_registered_services(self.registry.len().await);

        Ok(RegisterServiceResponse {
            message: "Service registered successfully".to_string(),
            name,
        })
    }

    /// Acknowledge an orchestration request and echo its parameters.
    #[instrument(skip_all, name = "gw.gateway.orchestrate")]
    pub fn orchestrate(
        &self,
        identity: &Identity,
        target_service: &str,
        parameters: Map<String, Value>,
    ) -> Result<OrchestrateResponse, GatewayError> {
        self.authorize(identity, &Operation::Orchestrate)?;

        Ok(OrchestrateResponse {
            message: format!("Service {} orchestrated successfully", target_service),
            parameters,
        })
    }

    #[instrument(skip_all, name = "gw.gateway.update_orchestration_rules")]
    pub fn update_orchestration_rules(
        &self,
        identity: &Identity,
        rules: Map<String, Value>,
    ) -> Result<UpdateRulesResponse, GatewayError> {
        self.authorize(identity, &Operation::UpdateOrchestrationRules)?;

        Ok(UpdateRulesResponse {
            message: "Orchestration rules updated".to_string(),
            rules,
        })
    }

    #[instrument(skip_all, name = "gw.gateway.authorize_access")]
    pub fn authorize_access(
        &self,
        identity: &Identity,
        claimed_role: &str,
        resources: Vec<String>,
    ) -> Result<AuthorizeAccessResponse, GatewayError> {
        self.authorize(
            identity,
            &Operation::AuthorizeResourceAccess {
                claimed_role,
                resources: &resources,
            },
        )?;

        Ok(AuthorizeAccessResponse {
            message: "Access authorized".to_string(),
            resources,
        })
    }
}
