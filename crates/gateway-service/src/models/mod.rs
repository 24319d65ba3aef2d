use chrono::{DateTime, Utc};
use common::secret::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Privilege tier assigned to every user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Administrator,
    Orchestrator,
    StandardUser,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Administrator, Role::Orchestrator, Role::StandardUser];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "Administrator",
            Role::Orchestrator => "Orchestrator",
            Role::StandardUser => "StandardUser",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Administrator" => Ok(Role::Administrator),
            "Orchestrator" => Ok(Role::Orchestrator),
            "StandardUser" => Ok(Role::StandardUser),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// Actions guarded by the authorization policy.
///
/// `AuthorizeResourceAccess` carries the request payload because its decision
/// depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation<'a> {
    ViewService,
    RegisterService,
    Orchestrate,
    UpdateOrchestrationRules,
    AuthorizeResourceAccess {
        claimed_role: &'a str,
        resources: &'a [String],
    },
}

impl Operation<'_> {
    /// Bounded label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ViewService => "view_service",
            Operation::RegisterService => "register_service",
            Operation::Orchestrate => "orchestrate",
            Operation::UpdateOrchestrationRules => "update_orchestration_rules",
            Operation::AuthorizeResourceAccess { .. } => "authorize_resource_access",
        }
    }
}

/// Outcome of a policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Allowed => "allowed",
            Decision::Denied => "denied",
        }
    }
}

/// Identity resolved from a live bearer token.
///
/// The role is the one captured when the token was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub role: Role,
}

/// User entry provisioned at startup.
#[derive(Debug, Clone)]
pub struct SeedUser {
    pub username: String,
    pub secret: SecretString,
    pub role: Role,
}

/// Registered service (keyed by `name`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub name: String,
    pub description: String,
    pub endpoints: Vec<String>,
}

/// How `AuthorizeResourceAccess` is decided.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResourceAccessMode {
    /// Caller's role must equal the role named in the request body.
    #[default]
    ClaimMatch,
    /// Every requested resource must match one of the caller role's patterns.
    ResourceRules(ResourceRules),
}

/// Per-role resource patterns. `*` matches any run of characters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourceRules {
    patterns: HashMap<Role, Vec<String>>,
}

impl ResourceRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow(mut self, role: Role, pattern: impl Into<String>) -> Self {
        self.patterns.entry(role).or_default().push(pattern.into());
        self
    }

    pub fn patterns_for(&self, role: Role) -> &[String] {
        self.patterns.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

/// A token freshly minted by the issuer.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub value: String,
    pub identity: Identity,
    pub issued_at: DateTime<Utc>,
    pub expires_in: Option<u64>,
}

impl From<IssuedToken> for TokenResponse {
    fn from(token: IssuedToken) -> Self {
        TokenResponse {
            access_token: token.value,
            token_type: "Bearer".to_string(),
            expires_in: token.expires_in,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterServiceResponse {
    pub message: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrateResponse {
    pub message: String,
    pub parameters: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRulesResponse {
    pub message: String,
    pub rules: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizeAccessResponse {
    pub message: String,
    pub resources: Vec<String>,
}
