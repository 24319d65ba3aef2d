use crate::models::{ResourceAccessMode, ResourceRules, Role, SeedUser};
use common::secret::SecretString;
use std::collections::{HashMap, HashSet};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Development seed used when `GATEWAY_SEED_USERS` is not set.
pub const DEFAULT_SEED_USERS: &str =
    "admin:1234:Administrator,orchestrator:abcd:Orchestrator,user:xyz:StandardUser";

/// Rules applied when `resource-rules` mode is enabled without explicit rules.
pub const DEFAULT_RESOURCE_RULES: &str = "Administrator=*";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub seed_users: Vec<SeedUser>,
    /// `true` when the built-in development seed is in use.
    pub using_default_seed: bool,
    /// Token lifetime. `None` keeps tokens live until restart.
    pub token_ttl: Option<Duration>,
    pub resource_access_mode: ResourceAccessMode,
    pub request_timeout: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid seed user entry: {0}")]
    InvalidSeedUser(String),

    #[error("Duplicate seed user: {0}")]
    DuplicateSeedUser(String),

    #[error("Invalid token TTL: {0}")]
    InvalidTokenTtl(String),

    #[error("Invalid resource access mode: {0}")]
    InvalidResourceAccessMode(String),

    #[error("Invalid resource rule: {0}")]
    InvalidResourceRule(String),

    #[error("Invalid request timeout: {0}")]
    InvalidRequestTimeout(String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let (seed_spec, using_default_seed) = match vars.get("GATEWAY_SEED_USERS") {
            Some(spec) => (spec.as_str(), false),
            None => (DEFAULT_SEED_USERS, true),
        };
        let seed_users = parse_seed_users(seed_spec)?;

        let token_ttl = match vars.get("GATEWAY_TOKEN_TTL_SECONDS") {
            Some(raw) => {
                let seconds = raw
                    .parse::<u64>()
                    .map_err(|e| ConfigError::InvalidTokenTtl(format!("{}: {}", raw, e)))?;
                if seconds == 0 {
                    return Err(ConfigError::InvalidTokenTtl(
                        "TTL must be greater than zero".to_string(),
                    ));
                }
                Some(Duration::from_secs(seconds))
            }
            None => None,
        };

        let resource_access_mode = match vars
            .get("GATEWAY_RESOURCE_ACCESS_MODE")
            .map(String::as_str)
        {
            None | Some("claim-match") => ResourceAccessMode::ClaimMatch,
            Some("resource-rules") => {
                let rules = vars
                    .get("GATEWAY_RESOURCE_RULES")
                    .map(String::as_str)
                    .unwrap_or(DEFAULT_RESOURCE_RULES);
                ResourceAccessMode::ResourceRules(parse_resource_rules(rules)?)
            }
            Some(other) => {
                return Err(ConfigError::InvalidResourceAccessMode(format!(
                    "'{}' (expected claim-match or resource-rules)",
                    other
                )))
            }
        };

        let request_timeout = match vars.get("GATEWAY_REQUEST_TIMEOUT_SECONDS") {
            Some(raw) => {
                let seconds = raw.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidRequestTimeout(format!("{}: {}", raw, e))
                })?;
                if seconds == 0 {
                    return Err(ConfigError::InvalidRequestTimeout(
                        "timeout must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs(seconds)
            }
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS),
        };

        Ok(Config {
            bind_address,
            seed_users,
            using_default_seed,
            token_ttl,
            resource_access_mode,
            request_timeout,
        })
    }
}

/// Parse `username:secret:Role` entries separated by commas.
///
/// The secret may itself contain `:`; the role is taken after the last one.
fn parse_seed_users(spec: &str) -> Result<Vec<SeedUser>, ConfigError> {
    let mut seen = HashSet::new();
    let mut users = Vec::new();

    for entry in spec.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (username, rest) = entry
            .split_once(':')
            .ok_or_else(|| ConfigError::InvalidSeedUser("expected username:secret:Role".to_string()))?;
        let (secret, role) = rest
            .rsplit_once(':')
            .ok_or_else(|| ConfigError::InvalidSeedUser("expected username:secret:Role".to_string()))?;

        if username.is_empty() || secret.is_empty() {
            return Err(ConfigError::InvalidSeedUser(
                "username and secret must be non-empty".to_string(),
            ));
        }

        let role = Role::from_str(role).map_err(ConfigError::InvalidSeedUser)?;

        if !seen.insert(username.to_string()) {
            return Err(ConfigError::DuplicateSeedUser(username.to_string()));
        }

        users.push(SeedUser {
            username: username.to_string(),
            secret: SecretString::from(secret.to_string()),
            role,
        });
    }

    Ok(users)
}

/// Parse `Role=pattern|pattern;Role=pattern` rules.
fn parse_resource_rules(spec: &str) -> Result<ResourceRules, ConfigError> {
    let mut rules = ResourceRules::new();

    for clause in spec.split(';').map(str::trim).filter(|c| !c.is_empty()) {
        let (role, patterns) = clause
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidResourceRule(format!("'{}'", clause)))?;
        let role = Role::from_str(role.trim()).map_err(ConfigError::InvalidResourceRule)?;

        for pattern in patterns.split('|').map(str::trim) {
            if pattern.is_empty() {
                return Err(ConfigError::InvalidResourceRule(format!(
                    "empty pattern for {}",
                    role
                )));
            }
            rules = rules.allow(role, pattern);
        }
    }

    Ok(rules)
}
